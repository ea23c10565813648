//! List screen: canonical rows, mounted swipe widgets, and action wiring.
//!
//! The screen is renderer-agnostic. A host mounts the rows it is about to
//! show, reports panel widths, forwards drag events to the mounted widget,
//! calls [`RowListScreen::tick`] every frame, and turns icon clicks into
//! [`RowListScreen::click`].

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, warn};

use crate::actions::{ActionPanel, ActionPreset};
use crate::animation::AnimationSpec;
use crate::config::SwipeConfig;
use crate::error::{Result, SwipeError};
use crate::notify::{Notifier, ToastQueue};
use crate::rows::{RowId, RowList, RowState};
use crate::swipe::{RowVariant, Settle, SettleHandler, SwipeRow};

/// Application-level effect of an action icon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowAction {
    Pin,
    Unpin,
    Delete,
}

/// Settle callbacks bound to one row of the canonical list
struct RowBinding<'a> {
    rows: &'a mut RowList,
    id: RowId,
    changed: Vec<RowId>,
}

impl RowBinding<'_> {
    fn set(&mut self, revealed: bool) {
        match self.rows.set_revealed(self.id, revealed) {
            Ok(changed) => self.changed.extend(changed),
            Err(err) => warn!(id = self.id, %err, "settle for unknown row"),
        }
    }
}

impl SettleHandler for RowBinding<'_> {
    fn on_settle_left(&mut self) {
        self.set(true);
    }

    fn on_settle_right(&mut self) {
        self.set(true);
    }

    fn on_settle_center(&mut self) {
        self.set(false);
    }
}

/// Scrollable list of swipeable rows
pub struct RowListScreen<N: Notifier = ToastQueue> {
    rows: RowList,
    widgets: BTreeMap<RowId, SwipeRow>,
    variant: RowVariant,
    spec: AnimationSpec,
    notifier: N,
}

impl RowListScreen<ToastQueue> {
    /// Screen with synthetic rows and toast notifications, as configured
    pub fn from_config(config: &SwipeConfig) -> Self {
        let rows = RowList::synthetic(
            config.list.rows,
            &config.list.label_prefix,
            config.list.reveal_policy,
        );
        Self::new(
            rows,
            config.list.variant,
            config.animation.spec(),
            ToastQueue::new(config.toast.duration()),
        )
    }
}

impl<N: Notifier> RowListScreen<N> {
    pub fn new(rows: RowList, variant: RowVariant, spec: AnimationSpec, notifier: N) -> Self {
        Self {
            rows,
            widgets: BTreeMap::new(),
            variant,
            spec,
            notifier,
        }
    }

    pub fn rows(&self) -> &RowList {
        &self.rows
    }

    pub fn variant(&self) -> RowVariant {
        self.variant
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Icons revealed by dragging right
    pub fn left_actions(&self) -> ActionPanel<RowAction> {
        let mut panel = vec![
            ActionPreset::Pin.icon(RowAction::Pin),
            ActionPreset::Unpin.icon(RowAction::Unpin),
        ];
        if self.variant == RowVariant::SingleSided {
            panel.push(ActionPreset::Delete.icon(RowAction::Delete));
        }
        panel
    }

    /// Icons revealed by dragging left
    pub fn right_actions(&self) -> ActionPanel<RowAction> {
        match self.variant {
            RowVariant::SingleSided => Vec::new(),
            RowVariant::TwoSided => vec![ActionPreset::Delete.icon(RowAction::Delete)],
        }
    }

    /// Create the widget for a row if needed.
    ///
    /// A new widget starts from the row's `revealed` flag. An existing one is
    /// left alone: its own settles flow into the list through
    /// [`tick`](Self::tick), and list-side changes reach it through `sync`.
    pub fn mount(&mut self, id: RowId) -> Option<&mut SwipeRow> {
        let revealed = self.rows.get(id)?.revealed;
        let (variant, spec) = (self.variant, self.spec);
        let widget = self.widgets.entry(id).or_insert_with(|| {
            debug!(id, revealed, "row mounted");
            let mut widget = SwipeRow::new(variant, spec);
            widget.set_revealed(revealed);
            widget
        });
        Some(widget)
    }

    /// Drop widgets of rows that are no longer visible
    pub fn unmount_except(&mut self, visible: &[RowId]) {
        self.widgets.retain(|id, _| visible.contains(id));
    }

    pub fn widget(&self, id: RowId) -> Option<&SwipeRow> {
        self.widgets.get(&id)
    }

    pub fn widget_mut(&mut self, id: RowId) -> Option<&mut SwipeRow> {
        self.widgets.get_mut(&id)
    }

    pub fn mounted(&self) -> impl Iterator<Item = RowId> + '_ {
        self.widgets.keys().copied()
    }

    /// Advance every mounted widget and apply their settles.
    ///
    /// Returns true while any widget still has work, so the host knows to
    /// keep ticking at frame rate.
    pub fn tick(&mut self, now: Instant) -> bool {
        let settled: Vec<(RowId, Settle)> = self
            .widgets
            .iter_mut()
            .flat_map(|(id, widget)| widget.poll(now).into_iter().map(move |s| (*id, s)))
            .collect();

        for (id, settle) in settled {
            if let Err(err) = self.apply_settle(id, settle) {
                warn!(id, %err, "dropping settle");
            }
        }

        self.widgets.values().any(|widget| widget.is_busy())
    }

    /// Record a row's settle in the canonical list
    pub fn apply_settle(&mut self, id: RowId, settle: Settle) -> Result<()> {
        if self.rows.get(id).is_none() {
            return Err(SwipeError::row_not_found(id));
        }
        debug!(id, ?settle, "row settled");
        let mut binding = RowBinding {
            rows: &mut self.rows,
            id,
            changed: Vec::new(),
        };
        settle.dispatch(&mut binding);
        let changed = binding.changed;
        self.sync(&changed);
        Ok(())
    }

    /// Run the effect of an action icon on row `id`
    pub fn click(&mut self, id: RowId, action: RowAction, now: Instant) -> Result<()> {
        let label = self
            .rows
            .get(id)
            .map(|row| row.label.clone())
            .ok_or_else(|| SwipeError::row_not_found(id))?;

        match action {
            RowAction::Pin => {
                self.notifier.notify(format!("{} was pinned.", label), now);
                self.collapse(id)?;
            }
            RowAction::Unpin => {
                self.collapse(id)?;
                self.notifier.notify(format!("{} was unpinned.", label), now);
            }
            RowAction::Delete => {
                self.notifier.notify(format!("{} was deleted.", label), now);
                self.remove(id)?;
            }
        }
        Ok(())
    }

    /// Force a row closed
    pub fn collapse(&mut self, id: RowId) -> Result<()> {
        let changed = self.rows.set_revealed(id, false)?;
        self.sync(&changed);
        Ok(())
    }

    /// Remove a row and its widget
    pub fn remove(&mut self, id: RowId) -> Result<RowState> {
        let row = self.rows.remove(id)?;
        self.widgets.remove(&id);
        Ok(row)
    }

    /// Drive mounted widgets from the canonical flags of `ids`
    fn sync(&mut self, ids: &[RowId]) {
        for id in ids {
            let Some(revealed) = self.rows.get(*id).map(|row| row.revealed) else {
                continue;
            };
            if let Some(widget) = self.widgets.get_mut(id) {
                widget.set_revealed(revealed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::RevealPolicy;
    use crate::swipe::DragGestureListener;

    #[derive(Default)]
    struct Recorded(Vec<String>);

    impl Notifier for Recorded {
        fn notify(&mut self, message: String, _now: Instant) {
            self.0.push(message);
        }
    }

    fn screen(policy: RevealPolicy) -> RowListScreen<Recorded> {
        RowListScreen::new(
            RowList::synthetic(5, "Contact", policy),
            RowVariant::TwoSided,
            AnimationSpec::immediate(),
            Recorded::default(),
        )
    }

    fn open_left(screen: &mut RowListScreen<Recorded>, id: RowId, now: Instant) {
        let widget = screen.mount(id).unwrap();
        widget.measure(20.0, 10.0);
        widget.on_drag_delta(15.0);
        widget.on_drag_end();
        screen.tick(now);
    }

    #[test]
    fn test_panels_per_variant() {
        let two = screen(RevealPolicy::Independent);
        assert_eq!(two.left_actions().len(), 2);
        assert_eq!(two.right_actions()[0].click(), RowAction::Delete);

        let single = RowListScreen::new(
            RowList::synthetic(1, "Contact", RevealPolicy::Independent),
            RowVariant::SingleSided,
            AnimationSpec::immediate(),
            Recorded::default(),
        );
        assert_eq!(single.left_actions().len(), 3);
        assert!(single.right_actions().is_empty());
    }

    #[test]
    fn test_settle_updates_row_state() {
        let now = Instant::now();
        let mut screen = screen(RevealPolicy::Independent);
        open_left(&mut screen, 2, now);
        assert!(screen.rows().get(2).unwrap().revealed);
        assert_eq!(screen.widget(2).unwrap().offset(), 20.0);
    }

    #[test]
    fn test_exclusive_policy_closes_other_widget() {
        let now = Instant::now();
        let mut screen = screen(RevealPolicy::Exclusive);
        open_left(&mut screen, 1, now);
        open_left(&mut screen, 3, now);

        assert!(!screen.rows().get(1).unwrap().revealed);
        assert!(screen.rows().get(3).unwrap().revealed);

        // Collapse animation of row 1 runs on the next frame
        screen.tick(now);
        assert_eq!(screen.widget(1).unwrap().offset(), 0.0);
        assert_eq!(screen.widget(3).unwrap().offset(), 20.0);
    }

    #[test]
    fn test_unpin_collapses_and_notifies() {
        let now = Instant::now();
        let mut screen = screen(RevealPolicy::Independent);
        open_left(&mut screen, 4, now);

        screen.click(4, RowAction::Unpin, now).unwrap();
        screen.tick(now);
        assert!(!screen.rows().get(4).unwrap().revealed);
        assert_eq!(screen.widget(4).unwrap().offset(), 0.0);
        assert_eq!(screen.notifier().0, vec!["Contact 4 was unpinned."]);
    }

    #[test]
    fn test_delete_removes_row_and_widget() {
        let now = Instant::now();
        let mut screen = screen(RevealPolicy::Independent);
        open_left(&mut screen, 2, now);

        screen.click(2, RowAction::Delete, now).unwrap();
        assert!(screen.rows().get(2).is_none());
        assert!(screen.widget(2).is_none());
        assert_eq!(screen.rows().len(), 4);
        assert_eq!(screen.notifier().0, vec!["Contact 2 was deleted."]);
        assert!(screen.click(2, RowAction::Pin, now).is_err());
    }

    #[test]
    fn test_mount_during_settle_animation_keeps_gesture() {
        use crate::animation::Easing;
        use std::time::Duration;

        let frame = Duration::from_millis(16);
        let mut screen = RowListScreen::new(
            RowList::synthetic(3, "Contact", RevealPolicy::Independent),
            RowVariant::TwoSided,
            AnimationSpec::new(Duration::from_millis(100), Easing::Linear),
            Recorded::default(),
        );

        let widget = screen.mount(2).unwrap();
        widget.measure(20.0, 10.0);
        widget.on_drag_delta(15.0);
        widget.on_drag_end();

        // Host remounts and re-measures every frame while the open animation runs
        let t0 = Instant::now();
        let mut busy = true;
        for k in 0..20 {
            let now = t0 + frame * k;
            busy = screen.tick(now);
            let widget = screen.mount(2).unwrap();
            widget.measure(20.0, 10.0);
            assert_eq!(widget.state(), Settle::Left);
        }

        assert!(!busy);
        assert!(screen.rows().get(2).unwrap().revealed);
        assert_eq!(screen.widget(2).unwrap().offset(), 20.0);

        // Closing by drag survives the same treatment
        let widget = screen.mount(2).unwrap();
        widget.on_drag_delta(-15.0);
        widget.on_drag_end();
        let t1 = t0 + frame * 20;
        for k in 0..20 {
            busy = screen.tick(t1 + frame * k);
            screen.mount(2).unwrap().measure(20.0, 10.0);
        }

        assert!(!busy);
        assert!(!screen.rows().get(2).unwrap().revealed);
        assert_eq!(screen.widget(2).unwrap().state(), Settle::Center);
        assert_eq!(screen.widget(2).unwrap().offset(), 0.0);
    }

    #[test]
    fn test_remount_restores_revealed_row() {
        let now = Instant::now();
        let mut screen = screen(RevealPolicy::Independent);
        open_left(&mut screen, 5, now);

        screen.unmount_except(&[]);
        assert!(screen.widget(5).is_none());

        let widget = screen.mount(5).unwrap();
        widget.measure(20.0, 10.0);
        screen.tick(now);
        assert_eq!(screen.widget(5).unwrap().offset(), 20.0);
        assert!(screen.rows().get(5).unwrap().revealed);
    }
}
