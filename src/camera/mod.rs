//! Camera system for the preview viewport.
//!
//! Provides the camera state, the arcball that turns pointer drags into
//! roll/orbit sequences, and the controller driving a [`GraphicsView`].
//!
//! [`GraphicsView`]: crate::host::GraphicsView

/// Virtual-trackball decomposition into roll and orbit primitives.
pub mod arcball;
/// Pan, zoom, orbit and fit operations over a graphics view.
pub mod controller;
/// Camera state and projection types.
pub mod core;

pub use arcball::{ArcballRotation, RotationStep, ViewportRect};
pub use controller::CameraController;
pub use self::core::{CameraState, Projection};
