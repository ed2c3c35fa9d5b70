// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors relevant parts of the application
// state. The app orchestrator pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders on a fixed
// tick. Text being edited (the search input and the competitor draft) lives
// only here; the app sees it when a submission is sent.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::models::AnalysisResult;
use crate::protocol::{TaskStatus, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which input the keyboard currently feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation keys only.
    Normal,
    /// Editing the primary search input.
    Search,
    /// Editing the competitor draft.
    CompetitorDraft,
}

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the app orchestrator.
/// The `render_frame` function reads this struct to draw the dashboard.
pub struct ViewState {
    /// The primary search input being edited.
    pub search_input: String,
    /// The competitor draft being edited. Preserved across a failed add so
    /// the user can retry; cleared when the form opens or an add succeeds.
    pub comp_draft: String,
    pub input_mode: InputMode,
    /// Mirror of the current analysis result.
    pub result: Option<AnalysisResult>,
    pub primary_status: TaskStatus,
    pub primary_error: Option<String>,
    pub competitor_status: TaskStatus,
    pub competitor_error: Option<String>,
    pub competitor_form_open: bool,
    /// Scroll offset into the competitor table.
    pub competitor_scroll: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            search_input: String::new(),
            comp_draft: String::new(),
            // Start focused on the search input so the user can type
            // immediately.
            input_mode: InputMode::Search,
            result: None,
            primary_status: TaskStatus::Idle,
            primary_error: None,
            competitor_status: TaskStatus::Idle,
            competitor_error: None,
            competitor_form_open: false,
            competitor_scroll: 0,
        }
    }
}

impl ViewState {
    /// Whether either flow has a lookup on the wire (submissions disabled).
    pub fn lookup_in_flight(&self) -> bool {
        self.primary_status == TaskStatus::InFlight
            || self.competitor_status == TaskStatus::InFlight
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::SearchStarted => {
            state.result = None;
            state.primary_error = None;
            state.primary_status = TaskStatus::InFlight;
            state.competitor_scroll = 0;
        }
        UiUpdate::SearchSucceeded(result) => {
            state.result = Some(*result);
            state.primary_status = TaskStatus::Succeeded;
            state.competitor_scroll = 0;
        }
        UiUpdate::SearchFailed(message) => {
            state.primary_error = Some(message);
            state.primary_status = TaskStatus::Failed;
        }
        UiUpdate::CompetitorFormOpened => {
            state.competitor_form_open = true;
            state.competitor_error = None;
            state.comp_draft.clear();
            state.input_mode = InputMode::CompetitorDraft;
        }
        UiUpdate::CompetitorFormClosed => {
            state.competitor_form_open = false;
            if state.input_mode == InputMode::CompetitorDraft {
                state.input_mode = InputMode::Normal;
            }
        }
        UiUpdate::CompetitorSubmitted => {
            state.competitor_error = None;
            state.competitor_status = TaskStatus::InFlight;
        }
        UiUpdate::CompetitorAccepted(result) => {
            if let Some(result) = result {
                state.result = Some(*result);
            }
            state.competitor_status = TaskStatus::Succeeded;
            state.competitor_form_open = false;
            state.comp_draft.clear();
            state.competitor_scroll = 0;
            if state.input_mode == InputMode::CompetitorDraft {
                state.input_mode = InputMode::Normal;
            }
        }
        UiUpdate::CompetitorRejected(message) => {
            // Draft and form untouched so the user can retry in place.
            state.competitor_error = Some(message);
            state.competitor_status = TaskStatus::Failed;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::search_bar::render(frame, layout.search_bar, state);
    render_notice(frame, &layout, state);
    widgets::profile::render(frame, layout.profile, state);
    widgets::video_panel::render(frame, layout.video_panel, state);

    if state.competitor_form_open {
        // Carve the form out of the top of the competitor zone.
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(layout.competitors);
        widgets::competitor_form::render(frame, chunks[0], state);
        widgets::competitors::render(frame, chunks[1], state);
    } else {
        widgets::competitors::render(frame, layout.competitors, state);
    }

    render_help_bar(frame, &layout);
}

fn render_notice(frame: &mut Frame, layout: &layout::AppLayout, state: &ViewState) {
    let line = match &state.primary_error {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), layout.notice);
}

fn render_help_bar(frame: &mut Frame, layout: &layout::AppLayout) {
    let text = " q:Quit | /:Search | a:Add competitor | Enter:Submit | Esc:Back | j/k:Scroll";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    tick_ms: u64,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal on crash; chain the original hook after ours.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(tick_ms));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // UI updates from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => {
                        apply_ui_update(&mut view_state, ui_update);
                    }
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quitting = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quitting {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events need no handling; the next
                        // render tick picks up the new size.
                    }
                    Some(Err(_)) | None => {
                        break;
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::sample_result;
    use crate::models::Competitor;

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.search_input.is_empty());
        assert!(state.comp_draft.is_empty());
        assert_eq!(state.input_mode, InputMode::Search);
        assert!(state.result.is_none());
        assert_eq!(state.primary_status, TaskStatus::Idle);
        assert_eq!(state.competitor_status, TaskStatus::Idle);
        assert!(state.primary_error.is_none());
        assert!(state.competitor_error.is_none());
        assert!(!state.competitor_form_open);
        assert_eq!(state.competitor_scroll, 0);
        assert!(!state.lookup_in_flight());
    }

    #[test]
    fn search_started_clears_stale_view() {
        let mut state = ViewState::default();
        state.result = Some(sample_result("Old"));
        state.primary_error = Some("old error".to_string());
        state.competitor_scroll = 3;

        apply_ui_update(&mut state, UiUpdate::SearchStarted);

        assert!(state.result.is_none());
        assert!(state.primary_error.is_none());
        assert_eq!(state.primary_status, TaskStatus::InFlight);
        assert_eq!(state.competitor_scroll, 0);
        assert!(state.lookup_in_flight());
    }

    #[test]
    fn search_succeeded_installs_result() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::SearchSucceeded(Box::new(sample_result("TechChannel"))),
        );
        assert_eq!(
            state.result.as_ref().unwrap().target_uploader.info.name,
            "TechChannel"
        );
        assert_eq!(state.primary_status, TaskStatus::Succeeded);
        assert!(!state.lookup_in_flight());
    }

    #[test]
    fn search_failed_sets_error() {
        let mut state = ViewState::default();
        state.primary_status = TaskStatus::InFlight;
        apply_ui_update(
            &mut state,
            UiUpdate::SearchFailed("Unsupported platform".to_string()),
        );
        assert_eq!(state.primary_error.as_deref(), Some("Unsupported platform"));
        assert_eq!(state.primary_status, TaskStatus::Failed);
    }

    #[test]
    fn form_opened_resets_draft_and_error() {
        let mut state = ViewState::default();
        state.comp_draft = "stale".to_string();
        state.competitor_error = Some("stale error".to_string());

        apply_ui_update(&mut state, UiUpdate::CompetitorFormOpened);

        assert!(state.competitor_form_open);
        assert!(state.comp_draft.is_empty());
        assert!(state.competitor_error.is_none());
        assert_eq!(state.input_mode, InputMode::CompetitorDraft);
    }

    #[test]
    fn form_closed_leaves_draft_mode() {
        let mut state = ViewState::default();
        state.competitor_form_open = true;
        state.input_mode = InputMode::CompetitorDraft;

        apply_ui_update(&mut state, UiUpdate::CompetitorFormClosed);

        assert!(!state.competitor_form_open);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn competitor_accepted_updates_result_and_closes_form() {
        let mut state = ViewState::default();
        state.competitor_form_open = true;
        state.input_mode = InputMode::CompetitorDraft;
        state.comp_draft = "rival".to_string();
        state.competitor_status = TaskStatus::InFlight;

        let mut updated = sample_result("Main");
        updated
            .competitors
            .insert(0, Competitor::from_result("rival", &sample_result("Rival")));

        apply_ui_update(
            &mut state,
            UiUpdate::CompetitorAccepted(Some(Box::new(updated))),
        );

        assert_eq!(state.result.as_ref().unwrap().competitors.len(), 1);
        assert_eq!(state.competitor_status, TaskStatus::Succeeded);
        assert!(!state.competitor_form_open);
        assert!(state.comp_draft.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn competitor_accepted_without_merge_keeps_view_empty() {
        let mut state = ViewState::default();
        state.competitor_form_open = true;
        state.competitor_status = TaskStatus::InFlight;

        apply_ui_update(&mut state, UiUpdate::CompetitorAccepted(None));

        assert!(state.result.is_none());
        assert!(state.competitor_error.is_none());
        assert_eq!(state.competitor_status, TaskStatus::Succeeded);
        assert!(!state.competitor_form_open);
    }

    #[test]
    fn competitor_rejected_preserves_draft_for_retry() {
        let mut state = ViewState::default();
        state.competitor_form_open = true;
        state.input_mode = InputMode::CompetitorDraft;
        state.comp_draft = "RivalChannel".to_string();
        state.competitor_status = TaskStatus::InFlight;

        apply_ui_update(
            &mut state,
            UiUpdate::CompetitorRejected("creator not found".to_string()),
        );

        assert!(state.competitor_form_open, "form stays open");
        assert_eq!(state.comp_draft, "RivalChannel", "draft preserved");
        assert_eq!(state.input_mode, InputMode::CompetitorDraft);
        assert_eq!(
            state.competitor_error.as_deref(),
            Some("creator not found")
        );
        assert_eq!(state.competitor_status, TaskStatus::Failed);
    }

    // -- Full-frame rendering --

    #[test]
    fn render_frame_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(120, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }

    #[test]
    fn render_frame_does_not_panic_with_result_and_open_form() {
        let backend = ratatui::backend::TestBackend::new(120, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();

        let mut state = ViewState::default();
        let mut result = sample_result("Main");
        result.competitors.push(Competitor::from_result(
            "https://example.com/rival",
            &sample_result("Rival"),
        ));
        state.result = Some(result);
        state.competitor_form_open = true;
        state.input_mode = InputMode::CompetitorDraft;
        state.comp_draft = "next rival".to_string();
        state.competitor_error = Some("Failed to add competitor".to_string());
        state.primary_error = Some("Analysis failed".to_string());

        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }

    #[test]
    fn render_frame_does_not_panic_on_small_terminal() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.result = Some(sample_result("Main"));
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }
}
