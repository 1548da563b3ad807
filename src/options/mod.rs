//! Viewer configuration with TOML support.
//!
//! Navigation conventions, binding side effects and key bindings are
//! consolidated here. Options serialize to/from TOML so a host can ship
//! presets alongside its add-in.

mod binding;
mod keybindings;
mod navigation;

use std::path::Path;

pub use binding::BindingOptions;
pub use keybindings::KeybindingOptions;
pub use navigation::{
    NavigationOptions, PanVertical, RightClickAction, WheelZoom,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[navigation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Mouse navigation conventions.
    pub navigation: NavigationOptions,
    /// Drawable binding side effects.
    pub binding: BindingOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] for malformed TOML or for
    /// navigation values outside their documented ranges.
    pub fn from_toml(content: &str) -> Result<Self, ViewerError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        opts.navigation.validate()?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Options::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] if serialization fails and
    /// [`ViewerError::Io`] if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }
}
