// Latest-video widget: title, publish date, and per-video counters.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::format::{format_count, format_pubdate};
use crate::models::VideoInfo;
use crate::tui::ViewState;

/// Render the latest-video panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Latest Video");

    let Some(result) = &state.result else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "--",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let video = &result.target_uploader.current_video;

    let mut lines = vec![
        Line::from(Span::styled(
            video.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            published_line(video),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    for (label, value) in stat_rows(video) {
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

/// The publish-date line; videos without a pubdate show a placeholder.
pub(crate) fn published_line(video: &VideoInfo) -> String {
    match video.pubdate {
        Some(secs) => format!("Published {}", format_pubdate(secs)),
        None => "Published --".to_string(),
    }
}

/// Label/value pairs for the counter list.
pub(crate) fn stat_rows(video: &VideoInfo) -> Vec<(&'static str, String)> {
    let stat = &video.stat;
    vec![
        ("Views", format_count(stat.view)),
        ("Likes", format_count(stat.like)),
        ("Comments", format_count(stat.reply)),
        ("Coins", format_count(stat.coin)),
        ("Danmaku", format_count(stat.danmaku)),
        ("Favorites", format_count(stat.favorite)),
        ("Shares", format_count(stat.share)),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::sample_result;

    #[test]
    fn stat_rows_formats_all_counters() {
        let result = sample_result("X");
        let rows = stat_rows(&result.target_uploader.current_video);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], ("Views", "65.4万".to_string()));
        assert_eq!(rows[1], ("Likes", "8.8万".to_string()));
        assert_eq!(rows[2], ("Comments", "1800".to_string()));
    }

    #[test]
    fn published_line_handles_missing_pubdate() {
        let mut result = sample_result("X");
        result.target_uploader.current_video.pubdate = None;
        assert_eq!(
            published_line(&result.target_uploader.current_video),
            "Published --"
        );

        result.target_uploader.current_video.pubdate = Some(1_700_000_000);
        assert_eq!(
            published_line(&result.target_uploader.current_video),
            "Published 2023-11-14"
        );
    }

    #[test]
    fn render_does_not_panic_without_result() {
        let backend = ratatui::backend::TestBackend::new(60, 14);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_result() {
        let backend = ratatui::backend::TestBackend::new(60, 14);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.result = Some(sample_result("X"));
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
