// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (text editing, mode
// switches, competitor-table scrolling).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{InputMode, ViewState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to
/// the app orchestrator (a submission, form transition, or quit). Returns
/// `None` when the key press was handled locally by mutating `ViewState`
/// (text editing, mode switches, scrolling).
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match view_state.input_mode {
        InputMode::Search => handle_search_mode(key_event, view_state),
        InputMode::CompetitorDraft => handle_draft_mode(key_event, view_state),
        InputMode::Normal => handle_normal_mode(key_event, view_state),
    }
}

/// Normal mode: navigation and mode entry.
fn handle_normal_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        // Focus the search input
        KeyCode::Char('/') | KeyCode::Char('s') => {
            view_state.input_mode = InputMode::Search;
            None
        }

        // Open the competitor draft form. The draft is cleared here and
        // the app clears the prior error on the matching command.
        KeyCode::Char('a') => {
            view_state.comp_draft.clear();
            view_state.input_mode = InputMode::CompetitorDraft;
            Some(UserCommand::OpenCompetitorForm)
        }

        // Competitor table scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.competitor_scroll = view_state.competitor_scroll.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let max = view_state
                .result
                .as_ref()
                .map(|r| r.competitors.len().saturating_sub(1))
                .unwrap_or(0);
            view_state.competitor_scroll = (view_state.competitor_scroll + 1).min(max);
            None
        }

        KeyCode::Char('q') => Some(UserCommand::Quit),

        _ => None,
    }
}

/// Search mode: edit the primary identifier, Enter submits.
///
/// Enter is a no-op for an empty input or while a lookup is in flight;
/// both guards exist app-side too, this one just keeps the disabled state
/// honest at the point of entry.
fn handle_search_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            None
        }
        KeyCode::Enter => {
            if view_state.search_input.is_empty() || view_state.lookup_in_flight() {
                return None;
            }
            Some(UserCommand::Analyze(view_state.search_input.clone()))
        }
        KeyCode::Backspace => {
            view_state.search_input.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.search_input.push(c);
            None
        }
        _ => None,
    }
}

/// Competitor draft mode: edit the draft, Enter submits, Esc cancels.
fn handle_draft_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            Some(UserCommand::CloseCompetitorForm)
        }
        KeyCode::Enter => {
            if view_state.comp_draft.is_empty() || view_state.lookup_in_flight() {
                return None;
            }
            Some(UserCommand::AddCompetitor(view_state.comp_draft.clone()))
        }
        KeyCode::Backspace => {
            view_state.comp_draft.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.comp_draft.push(c);
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
