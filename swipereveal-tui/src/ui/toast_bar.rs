use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::mode::AppMode;

/// Render the toast bar (bottom bar)
pub fn render(f: &mut Frame, area: Rect, app: &App, toast: Option<&str>) {
    let content = if let Some(message) = toast {
        Line::from(Span::styled(
            format!(" {} ", message),
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
    } else if let Some(ref msg) = app.status_message {
        Line::from(msg.as_str())
    } else {
        // Keybind hints based on mode
        let hints = match app.mode {
            AppMode::Normal => {
                "drag or h/l: swipe | 1-9/Enter: action | Esc: close | j/k: move | q: quit"
            }
            AppMode::Dragging => "release to settle",
        };
        Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
    };

    f.render_widget(Paragraph::new(content), area);
}
