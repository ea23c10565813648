//! Platform-independent swipe-to-reveal rows.
//!
//! - [`animation`]: cooperative tween scheduler
//! - [`swipe`]: drag-to-reveal state machine for one row
//! - [`actions`]: action icon descriptions and presets
//! - [`rows`]: observable canonical row list
//! - [`screen`]: list screen wiring rows, widgets and actions
//! - [`notify`]: transient notifications
//! - [`config`]: TOML configuration

pub mod actions;
pub mod animation;
pub mod config;
pub mod error;
pub mod notify;
pub mod rows;
pub mod screen;
pub mod swipe;

pub use actions::{ActionIcon, ActionPanel, ActionPreset, Rgb};
pub use animation::{AnimationId, AnimationSpec, Animator, Easing};
pub use config::SwipeConfig;
pub use error::{Result, SwipeError};
pub use notify::{Notifier, Toast, ToastQueue};
pub use rows::{RevealPolicy, RowId, RowList, RowState};
pub use screen::{RowAction, RowListScreen};
pub use swipe::{DragGestureListener, PanelWidths, RowVariant, Settle, SettleHandler, SwipeRow};
