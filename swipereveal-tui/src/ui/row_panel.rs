use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use swipereveal_core::{ActionIcon, ActionPanel, Rgb, RowAction};

use crate::app::App;

/// Terminal lines per list row
pub const ROW_HEIGHT: u16 = 2;

/// Convert a renderer-independent colour
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn icon_text(icon: &ActionIcon<RowAction>) -> String {
    format!(" {} {} ", icon.glyph, icon.label())
}

/// Rendered width of one icon, in cells
pub fn icon_width(icon: &ActionIcon<RowAction>) -> u16 {
    Line::from(icon_text(icon)).width() as u16
}

/// Rendered width of a whole panel, in cells
pub fn panel_width(panel: &ActionPanel<RowAction>) -> u16 {
    panel.iter().map(icon_width).sum()
}

/// Icon at `x` cells from the start of the panel
pub fn icon_at(panel: &ActionPanel<RowAction>, x: u16) -> Option<RowAction> {
    let mut start = 0u16;
    for icon in panel {
        let end = start + icon_width(icon);
        if x < end {
            return Some(icon.click());
        }
        start = end;
    }
    None
}

/// Render the list of swipeable rows
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let title = format!(" Contacts ({}) ", app.screen.rows().len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(app.mode.color()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Measure and mount before drawing so offsets reflect this frame's widths
    app.layout(inner);

    if app.screen.rows().is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No contacts left",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )));
        f.render_widget(empty, inner);
        return;
    }

    let left_panel = app.screen.left_actions();
    let right_panel = app.screen.right_actions();

    for slot in 0..app.visible_rows() {
        let index = app.scroll + slot;
        let Some(row) = app.screen.rows().rows().get(index) else {
            break;
        };
        let row_area = Rect {
            x: inner.x,
            y: inner.y + slot as u16 * ROW_HEIGHT,
            width: inner.width,
            height: ROW_HEIGHT,
        };
        let offset = app
            .screen
            .widget(row.id)
            .map(|widget| widget.offset().round() as i32)
            .unwrap_or(0);

        if offset > 0 {
            render_panel(f, row_area, row_area.x, &left_panel);
        } else if offset < 0 {
            let start = row_area.right().saturating_sub(panel_width(&right_panel));
            render_panel(f, row_area, start, &right_panel);
        }

        let selected = index == app.selected;
        render_content(f, row_area, offset, &row.label, selected);
    }
}

/// Draw a panel's icons starting at column `x`, clipped to the row
fn render_panel(f: &mut Frame, row_area: Rect, x: u16, panel: &ActionPanel<RowAction>) {
    let mut x = x;
    for icon in panel {
        let width = icon_width(icon);
        let icon_area = Rect {
            x,
            y: row_area.y,
            width,
            height: row_area.height,
        }
        .intersection(row_area);
        x = x.saturating_add(width);
        if icon_area.is_empty() {
            continue;
        }

        let style = Style::default()
            .fg(color(icon.tint))
            .bg(color(icon.background))
            .add_modifier(Modifier::BOLD);
        f.render_widget(Paragraph::new(icon_text(icon)).style(style), icon_area);
    }
}

/// Draw the content surface shifted by `offset` cells
fn render_content(f: &mut Frame, row_area: Rect, offset: i32, label: &str, selected: bool) {
    let shift = offset.unsigned_abs().min(u32::from(row_area.width)) as u16;
    let content_area = if offset >= 0 {
        Rect {
            x: row_area.x + shift,
            width: row_area.width - shift,
            ..row_area
        }
    } else {
        Rect {
            width: row_area.width - shift,
            ..row_area
        }
    };
    if content_area.is_empty() {
        return;
    }

    let style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::Black)
    };

    let lines = vec![
        Line::from(format!("  {}", label)),
        Line::from(Span::styled(
            "─".repeat(row_area.width as usize),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    // Left-moving content scrolls its text out past the left edge
    let scroll_x = if offset < 0 { shift } else { 0 };

    f.render_widget(Clear, content_area);
    f.render_widget(
        Paragraph::new(lines).style(style).scroll((0, scroll_x)),
        content_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipereveal_core::ActionPreset;

    #[test]
    fn test_panel_width_and_hit_testing() {
        let panel = vec![
            ActionPreset::Pin.icon(RowAction::Pin),
            ActionPreset::Unpin.icon(RowAction::Unpin),
        ];
        let pin = icon_width(&panel[0]);
        assert_eq!(panel_width(&panel), pin + icon_width(&panel[1]));

        assert_eq!(icon_at(&panel, 0), Some(RowAction::Pin));
        assert_eq!(icon_at(&panel, pin - 1), Some(RowAction::Pin));
        assert_eq!(icon_at(&panel, pin), Some(RowAction::Unpin));
        assert_eq!(icon_at(&panel, panel_width(&panel)), None);
    }
}
