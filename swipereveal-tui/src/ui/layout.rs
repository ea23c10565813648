use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Layout manager for the TUI
pub struct Layout;

impl Layout {
    /// Create the main layout with status bar, list area, and toast bar
    ///
    /// Returns: (status_area, list_area, toast_area)
    pub fn main(area: Rect) -> (Rect, Rect, Rect) {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Status bar
                Constraint::Min(0),    // Row list
                Constraint::Length(1), // Toast bar
            ])
            .split(area);

        (chunks[0], chunks[1], chunks[2])
    }
}
