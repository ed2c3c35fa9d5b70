// Profile header widget: uploader name, bio, and aggregate stats.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::format::format_count;
use crate::models::AnalysisResult;
use crate::protocol::TaskStatus;
use crate::tui::ViewState;

/// Render the profile header into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Profile");

    let Some(result) = &state.result else {
        let placeholder = match state.primary_status {
            TaskStatus::InFlight => "Analyzing...",
            _ => "No analysis yet. Press / and enter a creator URL, name, or ID.",
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let info = &result.target_uploader.info;
    let bio = info.sign.as_deref().unwrap_or("No bio available");

    let lines = vec![
        Line::from(Span::styled(
            info.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            bio.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(stats_line(result)),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// One-line aggregate summary: followers plus the known backend stats.
pub(crate) fn stats_line(result: &AnalysisResult) -> String {
    let uploader = &result.target_uploader;
    format!(
        "Followers {}   Total Views {}   Total Likes {}",
        format_count(uploader.info.follower),
        format_count(uploader.stat("archive_view")),
        format_count(uploader.stat("likes")),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
