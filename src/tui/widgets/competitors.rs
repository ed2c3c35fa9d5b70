// Competitor table widget: channel, followers, top video, views.
//
// Rows the user adds are prepended by the app, so the table reads newest
// first, followed by whatever the backend's initial payload contained.
// Names with a link (the user searched by URL) are underlined; name/ID
// searches produce linkless rows.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::format::format_count;
use crate::models::Competitor;
use crate::tui::ViewState;

/// Render the competitor table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let competitors: &[Competitor] = state
        .result
        .as_ref()
        .map(|r| r.competitors.as_slice())
        .unwrap_or(&[]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(build_title(competitors.len()));

    if competitors.is_empty() {
        let paragraph = Paragraph::new(Line::from("No competitors found"))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let offset = clamp_scroll(competitors.len(), state.competitor_scroll);

    let header = Row::new(vec![
        Cell::from("Channel"),
        Cell::from("Followers"),
        Cell::from("Top Video"),
        Cell::from("Views"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = competitors
        .iter()
        .skip(offset)
        .map(|comp| {
            let name_style = if comp.link.is_some() {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(comp.name.clone()).style(name_style),
                Cell::from(format_count(comp.follower)),
                Cell::from(comp.video_title.clone()),
                Cell::from(format_count(comp.video_view)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(10),
        Constraint::Min(20),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Keep the scroll offset inside the row range.
pub(crate) fn clamp_scroll(len: usize, offset: usize) -> usize {
    offset.min(len.saturating_sub(1))
}

fn build_title(count: usize) -> Line<'static> {
    Line::from(format!("Competitors ({count})"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
