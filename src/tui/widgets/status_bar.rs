// Status bar widget: app name, detected platform, lookup state.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::TaskStatus;
use crate::tui::ViewState;

/// Render the status bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let platform = state
        .result
        .as_ref()
        .map(|r| r.platform.as_str())
        .unwrap_or("--");

    let text = format!(
        " creatorscope | platform: {} | {}",
        platform,
        status_label(state)
    );

    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Human-readable label for the combined lookup state.
pub(crate) fn status_label(state: &ViewState) -> &'static str {
    if state.lookup_in_flight() {
        "Analyzing..."
    } else if state.primary_status == TaskStatus::Failed
        || state.competitor_status == TaskStatus::Failed
    {
        "Error"
    } else {
        "Ready"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
