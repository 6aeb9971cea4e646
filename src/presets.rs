//! Named style presets.
//!
//! Presets live in a single JSON object mapping a preset name to its options:
//!
//! ```json
//! {
//!   "default": { "bg": "#2b2b31", "titleSize": 72 },
//!   "sunset":  { "bg": "#3b1f2b", "primary": "#ff9f1c", "textBgOpacity": 0.5 }
//! }
//! ```
//!
//! Unknown keys are ignored. A missing or unreadable file behaves like an empty
//! book so the generator still works with its built-in defaults.

use crate::constants::DEFAULT_PRESET;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default values for one named style.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Background color replacing the background placeholder
    #[serde(default)]
    pub bg: Option<String>,
    /// Primary pattern color
    #[serde(default)]
    pub primary: Option<String>,
    /// Accent pattern color
    #[serde(default)]
    pub accent: Option<String>,
    /// Title and subtitle fill
    #[serde(default)]
    pub text_color: Option<String>,
    /// Readability panel fill
    #[serde(default)]
    pub text_bg: Option<String>,
    /// Readability panel opacity (0.0 to 1.0)
    #[serde(default)]
    pub text_bg_opacity: Option<f64>,
    /// Title font size
    #[serde(default)]
    pub title_size: Option<f64>,
    /// Subtitle font size
    #[serde(default)]
    pub subtitle_size: Option<f64>,
}

/// All presets from one preset file, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PresetBook {
    presets: BTreeMap<String, Preset>,
}

impl PresetBook {
    /// Parses a preset book from JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Loads the preset file, treating a missing or malformed file as empty.
    #[must_use]
    pub fn load_or_empty(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "preset file not readable");
                return Self::default();
            }
        };

        match Self::from_json(&content) {
            Ok(book) => book,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed preset file");
                Self::default()
            }
        }
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Number of presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the book holds no presets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Looks up a preset by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    /// Resolves `name`, falling back to `default`, then to an empty preset.
    #[must_use]
    pub fn resolve(&self, name: Option<&str>) -> Preset {
        let requested = name.unwrap_or(DEFAULT_PRESET);
        if let Some(preset) = self.get(requested) {
            return preset.clone();
        }

        if requested != DEFAULT_PRESET {
            tracing::debug!(preset = requested, "preset not found, falling back to default");
        }

        self.get(DEFAULT_PRESET).cloned().unwrap_or_default()
    }
}
