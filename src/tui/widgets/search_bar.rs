// Search bar widget: the primary identifier input.
//
// Accepts a full URL, a bare channel name, or a platform ID; interpretation
// is entirely backend-side. The border highlights while the input has
// focus, and the title shows the in-flight state since submission is
// disabled during a lookup.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{InputMode, ViewState};

const PLACEHOLDER: &str = "Paste URL, or enter channel name / platform ID...";

/// Render the search bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.input_mode == InputMode::Search;

    let line = if state.search_input.is_empty() && !focused {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(state.search_input.clone())];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        Line::from(spans)
    };

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title(state.lookup_in_flight())),
    );
    frame.render_widget(paragraph, area);
}

/// Block title, switching to the disabled hint while a lookup runs.
pub(crate) fn title(in_flight: bool) -> &'static str {
    if in_flight {
        "Search (analyzing...)"
    } else {
        "Search"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
