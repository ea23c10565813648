/// Interaction modes of the list screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the list
    Normal,

    /// A pointer drag is moving a row
    Dragging,
}

impl AppMode {
    /// Get display name for status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            AppMode::Normal => "NORMAL",
            AppMode::Dragging => "DRAG",
        }
    }

    /// Get color for status bar (in ratatui Color enum)
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            AppMode::Normal => Color::Cyan,
            AppMode::Dragging => Color::Yellow,
        }
    }
}
