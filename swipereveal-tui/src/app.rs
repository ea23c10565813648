use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use swipereveal_core::{
    DragGestureListener, RowAction, RowId, RowListScreen, Settle, SwipeConfig,
};
use tracing::{debug, warn};

use crate::mode::AppMode;
use crate::ui::row_panel::{self, ROW_HEIGHT};

/// Poll timeout while nothing is moving
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Pointer press on a row. Becomes a drag on the first horizontal move,
/// so a plain click never settles the row.
#[derive(Debug)]
struct DragSession {
    id: RowId,
    last_column: u16,
    started: bool,
}

/// Main application state
pub struct App {
    /// Current mode
    pub mode: AppMode,

    /// Rows, mounted swipe widgets and toasts
    pub screen: RowListScreen,

    /// Index of the selected row
    pub selected: usize,

    /// Index of the first visible row
    pub scroll: usize,

    /// Inner area of the list, as of the last layout
    pub list_area: Rect,

    /// Status message (shown in the toast bar when no toast is up)
    pub status_message: Option<String>,

    /// Should quit?
    pub should_quit: bool,

    drag: Option<DragSession>,
    animating: bool,
    keyboard_step: f32,
    frame_interval: Duration,
}

impl App {
    /// Create a new App
    pub fn new(config: &SwipeConfig) -> Self {
        Self {
            mode: AppMode::Normal,
            screen: RowListScreen::from_config(config),
            selected: 0,
            scroll: 0,
            list_area: Rect::default(),
            status_message: None,
            should_quit: false,
            drag: None,
            animating: false,
            keyboard_step: config.input.keyboard_drag_step,
            frame_interval: config.animation.frame_interval(),
        }
    }

    /// Number of whole rows that fit in the list area
    pub fn visible_rows(&self) -> usize {
        (self.list_area.height / ROW_HEIGHT) as usize
    }

    pub fn selected_id(&self) -> Option<RowId> {
        self.screen.rows().rows().get(self.selected).map(|row| row.id)
    }

    /// Lay the list out in `area`.
    ///
    /// Keeps the selection on screen, mounts and measures the visible rows,
    /// and unmounts the rest.
    pub fn layout(&mut self, area: Rect) {
        self.list_area = area;
        self.clamp_selection();

        let visible = self.visible_rows();
        if visible > 0 {
            if self.selected < self.scroll {
                self.scroll = self.selected;
            } else if self.selected >= self.scroll + visible {
                self.scroll = self.selected + 1 - visible;
            }
        }
        self.scroll = self
            .scroll
            .min(self.screen.rows().len().saturating_sub(visible.max(1)));

        let left = row_panel::panel_width(&self.screen.left_actions()) as f32;
        let right = row_panel::panel_width(&self.screen.right_actions()) as f32;

        let mut keep: Vec<RowId> = self
            .screen
            .rows()
            .iter()
            .skip(self.scroll)
            .take(visible)
            .map(|row| row.id)
            .collect();
        for id in &keep {
            if let Some(widget) = self.screen.mount(*id) {
                widget.measure(left, right);
            }
        }
        if let Some(session) = &self.drag {
            keep.push(session.id);
        }
        self.screen.unmount_except(&keep);
    }

    /// Advance animations; true while something is still moving
    pub fn tick(&mut self, now: Instant) -> bool {
        self.animating = self.screen.tick(now);
        self.animating
    }

    /// Frame interval while animating or dragging, idle timeout otherwise
    pub fn poll_timeout(&self) -> Duration {
        if self.animating || self.mode == AppMode::Dragging {
            self.frame_interval
        } else {
            IDLE_POLL
        }
    }

    /// Toast to display right now, if any
    pub fn current_toast(&mut self, now: Instant) -> Option<String> {
        self.screen
            .notifier_mut()
            .current(now)
            .map(|toast| toast.message.clone())
    }

    /// Called when the row list revision moved
    pub fn on_rows_changed(&mut self) {
        self.clamp_selection();
        debug!(rows = self.screen.rows().len(), "row list changed");
    }

    /// Dispatch a terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            // Terminal resized, next layout picks it up
            _ => {}
        }
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }

            // Selection
            (KeyCode::Char('j') | KeyCode::Down, _) => self.select_next(),
            (KeyCode::Char('k') | KeyCode::Up, _) => self.select_previous(),
            (KeyCode::PageDown, _) => {
                self.selected = self.selected.saturating_add(self.visible_rows().max(1));
                self.clamp_selection();
            }
            (KeyCode::PageUp, _) => {
                self.selected = self.selected.saturating_sub(self.visible_rows().max(1));
            }
            (KeyCode::Char('g') | KeyCode::Home, _) => self.selected = 0,
            (KeyCode::Char('G') | KeyCode::End, _) => {
                self.selected = self.screen.rows().len().saturating_sub(1);
            }

            // Keyboard swipes
            (KeyCode::Char('l') | KeyCode::Right, _) => self.keyboard_swipe(self.keyboard_step),
            (KeyCode::Char('h') | KeyCode::Left, _) => self.keyboard_swipe(-self.keyboard_step),

            // Close the selected row
            (KeyCode::Esc, _) => {
                if let Some(id) = self.selected_id() {
                    if let Err(err) = self.screen.collapse(id) {
                        warn!(id, %err, "collapse failed");
                    }
                }
            }

            // Action buttons of the exposed panel
            (KeyCode::Enter, _) => self.activate(0),
            (KeyCode::Char(c @ '1'..='9'), _) => self.activate(c as usize - '1' as usize),

            _ => {}
        }
    }

    /// Handle mouse input: press, drag and release drive the row gesture
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some((index, id)) = self.row_at(mouse.column, mouse.row) else {
                    return;
                };
                self.selected = index;
                if let Some(action) = self.action_at(id, mouse.column) {
                    self.run_action(id, action);
                    return;
                }
                self.drag = Some(DragSession {
                    id,
                    last_column: mouse.column,
                    started: false,
                });
            }

            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(session) = self.drag.as_mut() else {
                    return;
                };
                let dx = f32::from(mouse.column) - f32::from(session.last_column);
                if dx == 0.0 {
                    return;
                }
                session.last_column = mouse.column;
                let first = !session.started;
                session.started = true;
                let id = session.id;

                if let Some(widget) = self.screen.widget_mut(id) {
                    if first {
                        widget.on_drag_start();
                        self.mode = AppMode::Dragging;
                    }
                    widget.on_drag_delta(dx);
                }
            }

            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(session) = self.drag.take() {
                    if session.started {
                        if let Some(widget) = self.screen.widget_mut(session.id) {
                            widget.on_drag_end();
                        }
                    }
                }
                self.mode = AppMode::Normal;
            }

            MouseEventKind::ScrollDown => self.select_next(),
            MouseEventKind::ScrollUp => self.select_previous(),

            _ => {}
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected < self.screen.rows().len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// One complete gesture of `dx` cells on the selected row
    fn keyboard_swipe(&mut self, dx: f32) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some(widget) = self.screen.widget_mut(id) {
            widget.on_drag_start();
            widget.on_drag_delta(dx);
            widget.on_drag_end();
        }
    }

    /// Click the `n`th icon of the selected row's exposed panel
    fn activate(&mut self, n: usize) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let state = self
            .screen
            .widget(id)
            .map(|widget| widget.state())
            .unwrap_or(Settle::Center);
        let panel = match state {
            Settle::Left => self.screen.left_actions(),
            Settle::Right => self.screen.right_actions(),
            Settle::Center => {
                self.status_message = Some("Swipe the row open first (h / l)".to_string());
                return;
            }
        };
        if let Some(icon) = panel.get(n) {
            self.run_action(id, icon.click());
        }
    }

    fn run_action(&mut self, id: RowId, action: RowAction) {
        debug!(id, ?action, "action clicked");
        match self.screen.click(id, action, Instant::now()) {
            Ok(()) => self.status_message = None,
            Err(err) => {
                warn!(id, %err, "action failed");
                self.status_message = Some(err.to_string());
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = self
            .selected
            .min(self.screen.rows().len().saturating_sub(1));
    }

    /// Row under a terminal position
    fn row_at(&self, column: u16, y: u16) -> Option<(usize, RowId)> {
        let area = self.list_area;
        if column < area.x || column >= area.right() || y < area.y || y >= area.bottom() {
            return None;
        }
        let slot = ((y - area.y) / ROW_HEIGHT) as usize;
        if slot >= self.visible_rows() {
            return None;
        }
        let index = self.scroll + slot;
        self.screen.rows().rows().get(index).map(|row| (index, row.id))
    }

    /// Action icon under `column` on row `id`, if its panel is exposed there
    fn action_at(&self, id: RowId, column: u16) -> Option<RowAction> {
        let widget = self.screen.widget(id)?;
        let offset = widget.offset().round() as i32;
        let rel = i32::from(column) - i32::from(self.list_area.x);
        let width = i32::from(self.list_area.width);

        if offset > 0 && rel < offset {
            row_panel::icon_at(&self.screen.left_actions(), rel as u16)
        } else if offset < 0 && rel >= width + offset {
            let panel = self.screen.right_actions();
            let start = width - i32::from(row_panel::panel_width(&panel));
            if rel < start {
                return None;
            }
            row_panel::icon_at(&panel, (rel - start) as u16)
        } else {
            None
        }
    }

    /// Poll for events with timeout
    pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn app() -> App {
        let mut config = SwipeConfig::default();
        config.list.rows = 10;
        config.animation.duration_ms = 0;
        let mut app = App::new(&config);
        app.layout(Rect::new(0, 0, 40, 10));
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn drag_row(app: &mut App, y: u16, from: u16, to: u16) {
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), from, y));
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), to, y));
        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), to, y));
        app.tick(Instant::now());
    }

    #[test]
    fn test_mouse_drag_reveals_left_panel() {
        let mut app = app();
        drag_row(&mut app, 0, 2, 30);

        let left = row_panel::panel_width(&app.screen.left_actions()) as f32;
        assert!(app.screen.rows().get(1).unwrap().revealed);
        assert_eq!(app.screen.widget(1).unwrap().offset(), left);
        assert_eq!(app.mode, AppMode::Normal);
    }

    /// Run frames the way the event loop does: tick, then lay out again
    fn run_frames(app: &mut App, start: Instant, frames: u32) -> bool {
        let area = Rect::new(0, 0, 40, 10);
        let mut busy = false;
        for k in 0..frames {
            busy = app.tick(start + Duration::from_millis(16) * k);
            app.layout(area);
        }
        busy
    }

    #[test]
    fn test_animated_drag_settles_across_frames() {
        let mut config = SwipeConfig::default();
        config.list.rows = 10;
        let mut app = App::new(&config);
        app.layout(Rect::new(0, 0, 40, 10));
        let left = row_panel::panel_width(&app.screen.left_actions()) as f32;

        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 2, 0));
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 0));
        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 12, 0));

        let t0 = Instant::now();
        assert!(!run_frames(&mut app, t0, 30));
        assert!(app.screen.rows().get(1).unwrap().revealed);
        assert_eq!(app.screen.widget(1).unwrap().state(), Settle::Left);
        assert_eq!(app.screen.widget(1).unwrap().offset(), left);
        assert_eq!(app.poll_timeout(), IDLE_POLL);

        // Drag the content back past half the panel to close it
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 30, 0));
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 0));
        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 20, 0));

        assert!(!run_frames(&mut app, t0 + Duration::from_secs(1), 30));
        assert!(!app.screen.rows().get(1).unwrap().revealed);
        assert_eq!(app.screen.widget(1).unwrap().state(), Settle::Center);
        assert_eq!(app.screen.widget(1).unwrap().offset(), 0.0);
    }

    #[test]
    fn test_click_without_movement_does_not_settle() {
        let mut app = app();
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2));
        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 5, 2));
        app.tick(Instant::now());

        assert_eq!(app.selected, 1);
        assert!(!app.screen.rows().get(2).unwrap().revealed);
        assert_eq!(app.screen.widget(2).unwrap().offset(), 0.0);
    }

    #[test]
    fn test_clicking_pin_collapses_and_toasts() {
        let mut app = app();
        drag_row(&mut app, 0, 2, 30);

        // First cell of the exposed left panel is the pin icon
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 0));
        app.tick(Instant::now());

        assert!(!app.screen.rows().get(1).unwrap().revealed);
        assert_eq!(app.screen.widget(1).unwrap().offset(), 0.0);
        assert_eq!(
            app.current_toast(Instant::now()).as_deref(),
            Some("Contact 1 was pinned.")
        );
    }

    #[test]
    fn test_keyboard_swipe_and_delete() {
        let mut app = app();
        app.handle_key_event(key('h'));
        app.tick(Instant::now());
        assert!(app.screen.rows().get(1).unwrap().revealed);
        assert!(app.screen.widget(1).unwrap().offset() < 0.0);

        app.handle_key_event(key('1'));
        assert_eq!(app.screen.rows().len(), 9);
        assert_eq!(app.selected_id(), Some(2));
    }

    #[test]
    fn test_activate_on_closed_row_only_hints() {
        let mut app = app();
        app.handle_key_event(key('1'));
        assert_eq!(app.screen.rows().len(), 10);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let mut app = app();
        app.handle_key_event(key('G'));
        app.layout(Rect::new(0, 0, 40, 10));

        assert_eq!(app.selected, 9);
        assert_eq!(app.scroll, 10 - app.visible_rows());
        assert!(app.screen.widget(10).is_some());
        assert!(app.screen.widget(1).is_none());
    }
}
