// Competitor draft form: inline input shown above the competitor table
// while the add flow is in its Drafting or Submitting state.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{InputMode, ViewState};

/// Render the draft form into the given area.
///
/// Callers only invoke this while `state.competitor_form_open` is set; the
/// form shows the draft text, a cursor while focused, and the last
/// competitor-add error (which keeps the form open for a retry).
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.input_mode == InputMode::CompetitorDraft;

    let mut input_spans = if state.comp_draft.is_empty() && !focused {
        vec![Span::styled(
            "Enter URL, name or ID...",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        vec![Span::raw(state.comp_draft.clone())]
    };
    if focused {
        input_spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }

    let mut lines = vec![Line::from(input_spans)];
    if let Some(error) = &state.competitor_error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title(state.lookup_in_flight())),
    );
    frame.render_widget(paragraph, area);
}

pub(crate) fn title(in_flight: bool) -> &'static str {
    if in_flight {
        "Add competitor (looking up...)"
    } else {
        "Add competitor (Enter to submit, Esc to cancel)"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
