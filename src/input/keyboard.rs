use serde::{Deserialize, Serialize};

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// zoom_extents = "KeyF"
/// zoom_in = "Equal"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Fit the view to everything shown.
    ZoomExtents,
    /// Fit a top view matched to the viewport aspect.
    ResetTopView,
    /// One wheel notch toward the viewer.
    ZoomIn,
    /// One wheel notch away from the viewer.
    ZoomOut,
}
