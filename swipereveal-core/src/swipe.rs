//! Swipe-to-reveal row state machine.
//!
//! A [`SwipeRow`] owns the horizontal offset of one row's content surface.
//! Positive offsets expose the left action panel, negative offsets the right
//! one. The host feeds it drag events through [`DragGestureListener`], panel
//! measurements through [`SwipeRow::measure`], the owner's `revealed` flag
//! through [`SwipeRow::set_revealed`], and frames through [`SwipeRow::poll`].
//!
//! Every completed gesture and every external reveal transition produces
//! exactly one [`Settle`]. The settle is reported once its animation has
//! finished, or earlier if something supersedes that animation.

use std::time::Instant;

use tracing::debug;

use crate::animation::{AnimationSpec, Animator};

/// Terminal outcome of a gesture or reveal transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Settle {
    /// Left panel revealed (content moved right)
    Left,
    /// Right panel revealed (content moved left)
    Right,
    /// Collapsed
    Center,
}

impl Settle {
    /// Route this outcome to the matching handler method
    pub fn dispatch<H: SettleHandler + ?Sized>(self, handler: &mut H) {
        match self {
            Settle::Left => handler.on_settle_left(),
            Settle::Right => handler.on_settle_right(),
            Settle::Center => handler.on_settle_center(),
        }
    }

    pub fn is_revealed(self) -> bool {
        !matches!(self, Settle::Center)
    }
}

/// Receiver of settle outcomes
pub trait SettleHandler {
    fn on_settle_left(&mut self);
    fn on_settle_right(&mut self);
    fn on_settle_center(&mut self);
}

/// Platform-independent drag source contract
pub trait DragGestureListener {
    /// Pointer went down and a horizontal drag began
    fn on_drag_start(&mut self) {}

    /// Incremental horizontal movement since the previous event
    fn on_drag_delta(&mut self, dx: f32);

    /// Pointer released
    fn on_drag_end(&mut self);

    /// Gesture aborted by the platform. Settles like a release.
    fn on_drag_cancel(&mut self) {
        self.on_drag_end();
    }
}

/// Which panels a row carries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowVariant {
    /// One panel, revealed by dragging right
    SingleSided,
    /// Independent left and right panels
    #[default]
    TwoSided,
}

/// Measured widths of the action panels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanelWidths {
    pub left: f32,
    pub right: f32,
}

impl PanelWidths {
    pub fn new(left: f32, right: f32) -> Self {
        Self {
            left: sanitize_width(left),
            right: sanitize_width(right),
        }
    }

    /// Clamp an offset into `[-right, left]`
    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(-self.right, self.left)
    }

    /// Threshold rule applied at drag end. Position only, no velocity.
    pub fn settle_for(&self, offset: f32) -> Settle {
        if self.left > 0.0 && offset >= self.left / 2.0 {
            Settle::Left
        } else if self.right > 0.0 && offset <= -self.right / 2.0 {
            Settle::Right
        } else {
            Settle::Center
        }
    }

    /// Resting offset for a settled state
    pub fn rest_offset(&self, settle: Settle) -> f32 {
        match settle {
            Settle::Left => self.left,
            Settle::Right => -self.right,
            Settle::Center => 0.0,
        }
    }
}

fn sanitize_width(width: f32) -> f32 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        0.0
    }
}

/// Swipe-to-reveal state for one mounted row
#[derive(Debug)]
pub struct SwipeRow {
    variant: RowVariant,
    widths: PanelWidths,
    offset: Animator,
    spec: AnimationSpec,
    /// Last settled (or externally driven) state
    state: Settle,
    dragging: bool,
    /// Settle waiting on the running animation
    pending: Option<Settle>,
    /// Settles ready to be handed to the owner
    ready: Vec<Settle>,
}

impl SwipeRow {
    pub fn new(variant: RowVariant, spec: AnimationSpec) -> Self {
        Self {
            variant,
            widths: PanelWidths::default(),
            offset: Animator::new(0.0),
            spec,
            state: Settle::Center,
            dragging: false,
            pending: None,
            ready: Vec::new(),
        }
    }

    pub fn variant(&self) -> RowVariant {
        self.variant
    }

    pub fn widths(&self) -> PanelWidths {
        self.widths
    }

    /// Current offset, always within `[-right, left]`
    pub fn offset(&self) -> f32 {
        self.widths.clamp(self.offset.value())
    }

    /// Last settled state
    pub fn state(&self) -> Settle {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// True while an animation is in flight or settles are waiting
    pub fn is_busy(&self) -> bool {
        self.offset.is_running() || !self.ready.is_empty()
    }

    /// Record measured panel widths.
    ///
    /// Single-sided rows ignore the right width. A change re-clamps the
    /// offset and, outside a drag, re-targets the rest position of the
    /// current state.
    pub fn measure(&mut self, left: f32, right: f32) {
        let right = match self.variant {
            RowVariant::SingleSided => 0.0,
            RowVariant::TwoSided => right,
        };
        let widths = PanelWidths::new(left, right);
        if widths == self.widths {
            return;
        }
        debug!(left = widths.left, right = widths.right, "panel widths measured");
        self.widths = widths;

        if self.dragging {
            self.offset.snap_to(self.widths.clamp(self.offset.value()));
            return;
        }

        let target = self.widths.rest_offset(self.state);
        if self.offset.is_running() || self.offset.value() != target {
            // Carry the pending settle over to the re-targeted animation
            let carried = self.pending.take();
            self.offset.snap_to(self.widths.clamp(self.offset.value()));
            self.offset.animate_to(target, self.spec);
            self.pending = carried;
        }
    }

    /// Drive the row from the owner's `revealed` flag.
    ///
    /// Repeating the current value does nothing. Opening from closed picks
    /// the left panel, or the right one when there is no left panel.
    pub fn set_revealed(&mut self, revealed: bool) {
        if revealed == self.state.is_revealed() {
            return;
        }
        let settle = if !revealed {
            Settle::Center
        } else if self.widths.left == 0.0 && self.widths.right > 0.0 {
            Settle::Right
        } else {
            Settle::Left
        };
        debug!(?settle, "reveal driven externally");
        self.start_settle(settle);
    }

    /// Advance the animation to `now` and drain settled outcomes
    pub fn poll(&mut self, now: Instant) -> Vec<Settle> {
        if self.offset.tick(now).is_some() {
            if let Some(settle) = self.pending.take() {
                self.ready.push(settle);
            }
        }
        std::mem::take(&mut self.ready)
    }

    /// Advance and dispatch every drained outcome to `handler`
    pub fn poll_into<H: SettleHandler + ?Sized>(&mut self, now: Instant, handler: &mut H) {
        for settle in self.poll(now) {
            settle.dispatch(handler);
        }
    }

    fn start_settle(&mut self, settle: Settle) {
        self.flush_pending();
        self.state = settle;
        self.offset
            .animate_to(self.widths.rest_offset(settle), self.spec);
        self.pending = Some(settle);
    }

    /// Superseded settle animations still report their outcome
    fn flush_pending(&mut self) {
        if let Some(settle) = self.pending.take() {
            self.ready.push(settle);
        }
    }
}

impl DragGestureListener for SwipeRow {
    fn on_drag_start(&mut self) {
        if self.dragging {
            return;
        }
        self.flush_pending();
        let current = self.offset();
        self.offset.snap_to(current);
        self.dragging = true;
    }

    fn on_drag_delta(&mut self, dx: f32) {
        if !dx.is_finite() {
            return;
        }
        // Any write from the gesture supersedes a running animation
        if !self.dragging || self.offset.is_running() {
            self.dragging = false;
            self.on_drag_start();
        }
        let next = self.widths.clamp(self.offset.value() + dx);
        self.offset.snap_to(next);
    }

    fn on_drag_end(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        let offset = self.offset();
        let settle = self.widths.settle_for(offset);
        debug!(offset, ?settle, "drag ended");
        self.start_settle(settle);
    }
}
