use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Binding", inline)]
#[serde(default)]
/// Side effects of pushing a new drawable into the viewer.
pub struct BindingOptions {
    /// Fit the view to the new drawable.
    #[schemars(title = "Auto Zoom")]
    pub auto_zoom: bool,
    /// Respond to mouse gestures once a drawable is shown.
    #[schemars(title = "Mouse Gestures")]
    pub gestures_enabled: bool,
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self {
            auto_zoom: true,
            gestures_enabled: true,
        }
    }
}
