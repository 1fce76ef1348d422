use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub tabs_area: Rect,
    pub list_area: Rect,
    pub detail_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Width: 44 columns fits the five tab titles on one line.
    /// Height: 10 lines (1 tabs + 1 status + two bordered panes).
    pub const MIN_WIDTH: u16 = 44;
    pub const MIN_HEIGHT: u16 = 10;

    /// Share of the content width given to the detail pane.
    pub const DETAIL_PERCENT: u16 = 40;

    pub fn calculate(size: Rect) -> Self {
        let min_width_with_border = Self::MIN_WIDTH + 2;
        let min_height_with_border = Self::MIN_HEIGHT + 2;
        let width = size.width.max(min_width_with_border);
        let height = size.height.max(min_height_with_border);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Min(1),    // Content (list + detail)
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        // Detail pane never squeezes the list below 20 columns
        let detail_width = ((inner_area.width * Self::DETAIL_PERCENT) / 100)
            .min(inner_area.width.saturating_sub(20));
        let horizontal = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(detail_width)])
            .split(vertical[1]);

        Self {
            inner_area,
            tabs_area: vertical[0],
            list_area: horizontal[0],
            detail_area: horizontal[1],
            status_area: vertical[2],
        }
    }
}
