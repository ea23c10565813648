//! Action buttons shown behind a row.
//!
//! An [`ActionIcon`] is a pure description; the renderer draws it filling the
//! panel height and reports the panel width back to the row. Clicking an icon
//! yields its message, which the owner interprets.

use serde::{Deserialize, Serialize};

/// 24-bit colour, independent of any renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
}

pub const PIN_BG: Rgb = Rgb(0xF5, 0xA6, 0x23);
pub const UNPIN_BG: Rgb = Rgb(0x4A, 0x90, 0xE2);
pub const DELETE_BG: Rgb = Rgb(0xD0, 0x02, 0x1B);

/// A tappable icon carrying click message `M`
#[derive(Clone, Debug, PartialEq)]
pub struct ActionIcon<M> {
    pub on_click: M,
    pub background: Rgb,
    pub glyph: &'static str,
    pub content_description: Option<String>,
    pub tint: Rgb,
}

impl<M: Clone> ActionIcon<M> {
    pub fn new(on_click: M, background: Rgb, glyph: &'static str) -> Self {
        Self {
            on_click,
            background,
            glyph,
            content_description: None,
            tint: Rgb::WHITE,
        }
    }

    pub fn with_content_description(mut self, text: impl Into<String>) -> Self {
        self.content_description = Some(text.into());
        self
    }

    pub fn with_tint(mut self, tint: Rgb) -> Self {
        self.tint = tint;
        self
    }

    /// Message produced by a click
    pub fn click(&self) -> M {
        self.on_click.clone()
    }

    /// Text shown next to the glyph
    pub fn label(&self) -> &str {
        self.content_description.as_deref().unwrap_or("")
    }
}

/// Named presets with a fixed colour and glyph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionPreset {
    Pin,
    Unpin,
    Delete,
}

impl ActionPreset {
    pub fn background(self) -> Rgb {
        match self {
            ActionPreset::Pin => PIN_BG,
            ActionPreset::Unpin => UNPIN_BG,
            ActionPreset::Delete => DELETE_BG,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ActionPreset::Pin => "▲",
            ActionPreset::Unpin => "△",
            ActionPreset::Delete => "✕",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActionPreset::Pin => "Pin",
            ActionPreset::Unpin => "Unpin",
            ActionPreset::Delete => "Delete",
        }
    }

    /// Build the icon for this preset, forwarding `on_click`
    pub fn icon<M: Clone>(self, on_click: M) -> ActionIcon<M> {
        ActionIcon::new(on_click, self.background(), self.glyph())
            .with_content_description(self.description())
    }
}

/// Ordered icons of one side of a row
pub type ActionPanel<M> = Vec<ActionIcon<M>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_binds_colour_and_forwards_click() {
        let icon = ActionPreset::Delete.icon(("delete", 7));
        assert_eq!(icon.background, DELETE_BG);
        assert_eq!(icon.glyph, "✕");
        assert_eq!(icon.tint, Rgb::WHITE);
        assert_eq!(icon.label(), "Delete");
        assert_eq!(icon.click(), ("delete", 7));
    }

    #[test]
    fn test_custom_icon() {
        let icon = ActionIcon::new(1u8, Rgb(0, 0, 0), "*").with_tint(Rgb(1, 2, 3));
        assert_eq!(icon.label(), "");
        assert_eq!(icon.tint, Rgb(1, 2, 3));
    }
}
