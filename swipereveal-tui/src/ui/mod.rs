pub mod layout;
pub mod row_panel;
pub mod status_bar;
pub mod toast_bar;

use std::time::Instant;

use ratatui::Frame;

use crate::app::App;

/// Main UI renderer
pub struct UI;

impl UI {
    /// Create a new UI
    pub fn new() -> Self {
        Self
    }

    /// Render the entire UI. Lays out the list as a side effect.
    pub fn render(&mut self, f: &mut Frame, app: &mut App) {
        // Get main layout areas
        let (status_area, list_area, toast_area) = layout::Layout::main(f.area());

        // Rows first: layout may mount, unmount or re-measure widgets
        row_panel::render(f, list_area, app);

        // Render status bar
        status_bar::render(f, status_area, app);

        // Render toast bar
        let toast = app.current_toast(Instant::now());
        toast_bar::render(f, toast_area, app, toast.as_deref());
    }
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use swipereveal_core::SwipeConfig;

    fn screen_text(buffer: &Buffer) -> String {
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn test_app() -> App {
        let mut config = SwipeConfig::default();
        config.list.rows = 20;
        config.animation.duration_ms = 0;
        App::new(&config)
    }

    #[test]
    fn test_renders_visible_rows() {
        let mut app = test_app();
        let mut ui = UI::new();
        let mut terminal = Terminal::new(TestBackend::new(50, 16)).unwrap();

        terminal.draw(|f| ui.render(f, &mut app)).unwrap();

        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains("Contacts (20)"));
        assert!(text.contains("Contact 1"));
        assert!(text.contains("20 rows, 0 open"));
        // 16 lines minus bars and borders leaves room for 5 rows
        assert_eq!(app.visible_rows(), 5);
        assert!(!text.contains("Contact 6"));
    }

    #[test]
    fn test_open_row_exposes_panel() {
        let mut app = test_app();
        let mut ui = UI::new();
        let mut terminal = Terminal::new(TestBackend::new(50, 16)).unwrap();
        terminal.draw(|f| ui.render(f, &mut app)).unwrap();

        app.screen.widget_mut(1).unwrap().set_revealed(true);
        app.tick(Instant::now());
        terminal.draw(|f| ui.render(f, &mut app)).unwrap();

        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains("Pin"));
        assert!(text.contains("Unpin"));
        assert!(text.contains("1 open"));
    }
}
