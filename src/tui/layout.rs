// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the analysis dashboard:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                               |
// +--------------------------------------------------+
// | Search Bar (3 rows)                              |
// +--------------------------------------------------+
// | Notice (1 row)                                   |
// +------------------------+-------------------------+
// | Profile Header (6 rows, full width)              |
// +------------------------+-------------------------+
// | Latest Video (40%)     | Competitors (60%)       |
// +------------------------+-------------------------+
// | Help Bar (1 row)                                 |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: app name, platform, lookup state.
    pub status_bar: Rect,
    /// Primary identifier input.
    pub search_bar: Rect,
    /// Inline primary-search error line.
    pub notice: Rect,
    /// Uploader name, bio, and aggregate stats.
    pub profile: Rect,
    /// Latest-video metrics.
    pub video_panel: Rect,
    /// Competitor table (and draft form, when open).
    pub competitors: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | search(3) | notice(1) | profile(6) | body(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // search bar
            Constraint::Length(1), // notice
            Constraint::Length(6), // profile header
            Constraint::Min(8),   // body (video + competitors)
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let search_bar = vertical[1];
    let notice = vertical[2];
    let profile = vertical[3];
    let body = vertical[4];
    let help_bar = vertical[5];

    // Horizontal: latest video (40%) | competitors (60%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(body);

    AppLayout {
        status_bar,
        search_bar,
        notice,
        profile,
        video_panel: horizontal[0],
        competitors: horizontal[1],
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// A reasonable terminal size for testing.
    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        let rects = [
            ("status_bar", layout.status_bar),
            ("search_bar", layout.search_bar),
            ("notice", layout.notice),
            ("profile", layout.profile),
            ("video_panel", layout.video_panel),
            ("competitors", layout.competitors),
            ("help_bar", layout.help_bar),
        ];
        for (name, rect) in rects {
            assert!(rect.width > 0, "{name} has zero width");
            assert!(rect.height > 0, "{name} has zero height");
        }
    }

    #[test]
    fn layout_rows_do_not_overlap() {
        let layout = build_layout(test_area());
        assert!(layout.status_bar.bottom() <= layout.search_bar.top());
        assert!(layout.search_bar.bottom() <= layout.notice.top());
        assert!(layout.notice.bottom() <= layout.profile.top());
        assert!(layout.profile.bottom() <= layout.video_panel.top());
        assert!(layout.video_panel.bottom() <= layout.help_bar.top());
    }

    #[test]
    fn body_split_covers_full_width() {
        let layout = build_layout(test_area());
        assert_eq!(layout.video_panel.left(), 0);
        assert_eq!(layout.competitors.right(), 120);
        assert_eq!(layout.video_panel.right(), layout.competitors.left());
    }

    #[test]
    fn layout_fits_small_terminal() {
        // 80x24 is the classic minimum; everything must still get a slice.
        let layout = build_layout(Rect::new(0, 0, 80, 24));
        assert!(layout.competitors.height >= 8);
        assert_eq!(layout.help_bar.height, 1);
    }
}
