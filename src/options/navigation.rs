use std::ops::RangeInclusive;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::arcball::DEFAULT_RADIUS_RATIO;
use crate::error::ViewerError;

const RADIUS_RATIO_RANGE: RangeInclusive<f64> = 0.1..=1.0;
const FIT_MARGIN_RANGE: RangeInclusive<f64> = 1.0..=2.0;

/// How wheel notches turn into zoom factors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WheelZoom {
    /// Zoom out by `1 + step` per notch and in by its reciprocal, so a notch
    /// in followed by a notch out restores the field.
    Reciprocal {
        /// Relative step per notch.
        step: f64,
    },
    /// Independent factors per notch.
    Fixed {
        /// Factor applied per notch toward the viewer (below 1).
        zoom_in: f64,
        /// Factor applied per notch away from the viewer (above 1).
        zoom_out: f64,
    },
}

impl Default for WheelZoom {
    fn default() -> Self {
        Self::Reciprocal { step: 0.1 }
    }
}

impl WheelZoom {
    /// Field scale for `notches` wheel notches; positive zooms in.
    #[must_use]
    pub fn factor(&self, notches: f64) -> f64 {
        match *self {
            Self::Reciprocal { step } => (1.0 + step).powf(-notches),
            Self::Fixed { zoom_in, zoom_out } => {
                if notches >= 0.0 {
                    zoom_in.powf(notches)
                } else {
                    zoom_out.powf(-notches)
                }
            }
        }
    }
}

/// Sign of the vertical pan component.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PanVertical {
    /// Content moves with the pointer: device delta `(-dx, -dy)`.
    #[default]
    FollowCursor,
    /// Content moves against the pointer vertically: `(-dx, dy)`.
    Inverted,
}

impl PanVertical {
    /// Multiplier for the device y delta.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::FollowCursor => -1.0,
            Self::Inverted => 1.0,
        }
    }
}

/// What a right click does.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RightClickAction {
    /// Top-down fit with margin.
    #[default]
    FitExtents,
    /// Top-down fit matched to the viewport aspect, then one zoom-in step.
    ResetTopView,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Mouse navigation conventions.
pub struct NavigationOptions {
    /// Wheel zoom behavior.
    #[schemars(title = "Wheel Zoom")]
    pub wheel_zoom: WheelZoom,
    /// Vertical pan direction.
    #[schemars(title = "Vertical Pan")]
    pub pan_vertical: PanVertical,
    /// Right-click action.
    #[schemars(title = "Right Click")]
    pub right_click: RightClickAction,
    /// Arcball radius as a fraction of the smaller viewport dimension.
    #[schemars(title = "Arcball Radius", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub arcball_radius_ratio: f64,
    /// Field scale applied around fitted extents.
    #[schemars(title = "Fit Margin", range(min = 1.0, max = 2.0), extend("step" = 0.01))]
    pub fit_margin: f64,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            wheel_zoom: WheelZoom::default(),
            pan_vertical: PanVertical::default(),
            right_click: RightClickAction::default(),
            arcball_radius_ratio: DEFAULT_RADIUS_RATIO,
            fit_margin: 1.05,
        }
    }
}

impl NavigationOptions {
    /// Factor for a single wheel notch toward the viewer.
    #[must_use]
    pub fn zoom_in_factor(&self) -> f64 {
        self.wheel_zoom.factor(1.0)
    }

    /// Check the ranges advertised in the schema.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] naming the first field out of
    /// range.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let out_of_range = |field: &str, value: f64| {
            ViewerError::OptionsParse(format!(
                "navigation.{field} = {value} is out of range"
            ))
        };
        if !RADIUS_RATIO_RANGE.contains(&self.arcball_radius_ratio) {
            return Err(out_of_range(
                "arcball_radius_ratio",
                self.arcball_radius_ratio,
            ));
        }
        if !FIT_MARGIN_RANGE.contains(&self.fit_margin) {
            return Err(out_of_range("fit_margin", self.fit_margin));
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        match self.wheel_zoom {
            WheelZoom::Reciprocal { step } if !positive(step) => {
                Err(out_of_range("wheel_zoom.step", step))
            }
            WheelZoom::Fixed { zoom_in, .. } if !positive(zoom_in) => {
                Err(out_of_range("wheel_zoom.zoom_in", zoom_in))
            }
            WheelZoom::Fixed { zoom_out, .. } if !positive(zoom_out) => {
                Err(out_of_range("wheel_zoom.zoom_out", zoom_out))
            }
            _ => Ok(()),
        }
    }
}
