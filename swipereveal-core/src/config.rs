use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::animation::{AnimationSpec, Easing};
use crate::error::{Result, SwipeError};
use crate::rows::RevealPolicy;
use crate::swipe::RowVariant;

/// Configuration for the swipe list, read from ~/.swipereveal/config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub list: ListConfig,
    pub animation: AnimationConfig,
    pub toast: ToastConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Number of synthetic rows created at startup
    pub rows: u32,
    pub label_prefix: String,
    pub reveal_policy: RevealPolicy,
    pub variant: RowVariant,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            label_prefix: "Contact".to_string(),
            reveal_policy: RevealPolicy::Independent,
            variant: RowVariant::TwoSided,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub easing: Easing,
    /// Frame interval while any animation is running
    pub frame_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: Easing::EaseOutCubic,
            frame_ms: 16,
        }
    }
}

impl AnimationConfig {
    pub fn spec(&self) -> AnimationSpec {
        AnimationSpec::new(Duration::from_millis(self.duration_ms), self.easing)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { duration_ms: 2000 }
    }
}

impl ToastConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Cells moved by one keyboard swipe
    pub keyboard_drag_step: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            keyboard_drag_step: 12.0,
        }
    }
}

impl SwipeConfig {
    /// Load config from `path`, or from [`config_path`](Self::config_path).
    ///
    /// A missing file at the default location yields defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        if !config_path.exists() {
            if explicit {
                return Err(SwipeError::config_read(
                    &config_path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
                ));
            }
            tracing::debug!(path = ?config_path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| SwipeError::config_read(&config_path, e))?;
        let config = Self::from_toml(&content)
            .map_err(|e| match e {
                SwipeError::ConfigParse { source, .. } => {
                    SwipeError::config_parse(&config_path, source)
                }
                other => other,
            })?;

        tracing::info!(path = ?config_path, "config loaded");
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SwipeError::config_parse("<inline>", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Get config file path: $SWIPEREVEAL_CONFIG or ~/.swipereveal/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("SWIPEREVEAL_CONFIG") {
            return PathBuf::from(path);
        }
        Self::home_dir().join("config.toml")
    }

    /// ~/.swipereveal, also used for the log file
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".swipereveal")
    }

    /// Reject values the runtime cannot work with
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.animation.frame_ms == 0 {
            errors.push("animation.frame_ms must be greater than 0");
        }
        if !(self.input.keyboard_drag_step.is_finite() && self.input.keyboard_drag_step > 0.0) {
            errors.push("input.keyboard_drag_step must be a positive number");
        }
        if self.list.label_prefix.trim().is_empty() {
            errors.push("list.label_prefix must not be empty");
        }

        if !errors.is_empty() {
            return Err(SwipeError::config(errors.join("; ")));
        }
        Ok(())
    }

    /// Serialize as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SwipeError::config(format!("failed to serialize config: {}", e)))
    }
}
