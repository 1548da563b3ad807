//! The viewer's interactive vocabulary.
//!
//! Every navigation operation, whether triggered by a mouse gesture, a key
//! press or a host command, is represented as a `ViewCommand` and passed to
//! [`DrawableViewer::execute`](super::DrawableViewer::execute).

use glam::DVec2;

/// A camera operation requested by input or the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    /// Translate the view so content follows the drag.
    Pan {
        /// Previous pointer position.
        from: DVec2,
        /// Current pointer position.
        to: DVec2,
    },
    /// Arcball rotation for the drag.
    Orbit {
        /// Previous pointer position.
        from: DVec2,
        /// Current pointer position.
        to: DVec2,
    },
    /// Scale the visible field.
    Zoom {
        /// Below 1 zooms in, above 1 zooms out.
        factor: f64,
    },
    /// Top-down fit of everything shown.
    FitExtents,
    /// Top-down fit matched to the viewport, then one zoom-in step.
    ResetTopView,
}
