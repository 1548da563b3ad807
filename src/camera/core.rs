use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Relative tolerance below which `up` counts as parallel to the view
/// direction.
const COLLINEAR_EPSILON: f64 = 1e-12;

/// How the view volume is projected onto the viewport.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Orthographic projection; the field is the visible rectangle.
    #[default]
    Parallel,
    /// Perspective projection; the field is measured at the target plane.
    Perspective,
}

/// Camera defined by eye position, target, up vector and the size of the
/// visible field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Eye (camera) position in world space.
    pub position: DVec3,
    /// Look-at target position.
    pub target: DVec3,
    /// Up direction vector. Need not be unit length or orthogonal to the
    /// view direction, but must not be parallel to it.
    pub up: DVec3,
    /// Width of the visible field in world units.
    pub field_width: f64,
    /// Height of the visible field in world units.
    pub field_height: f64,
    /// Projection mode.
    pub projection: Projection,
}

impl Default for CameraState {
    /// Top-down view of the unit square around the origin.
    fn default() -> Self {
        Self {
            position: DVec3::Z,
            target: DVec3::ZERO,
            up: DVec3::Y,
            field_width: 1.0,
            field_height: 1.0,
            projection: Projection::Parallel,
        }
    }
}

impl CameraState {
    /// Check the camera invariants: a non-degenerate basis and a finite,
    /// positive field.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidCameraBasis`] when `up` is parallel to
    /// the view direction or the eye sits on the target, and
    /// [`ViewerError::InvalidField`] for a non-positive or non-finite field.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let dir = self.target - self.position;
        let cross = self.up.cross(dir);
        let scale = self.up.length_squared() * dir.length_squared();
        if !cross.is_finite()
            || scale == 0.0
            || cross.length_squared() <= COLLINEAR_EPSILON * scale
        {
            return Err(ViewerError::InvalidCameraBasis);
        }
        let field_ok = |v: f64| v.is_finite() && v > 0.0;
        if !field_ok(self.field_width) || !field_ok(self.field_height) {
            return Err(ViewerError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        Ok(())
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.position.distance(self.target)
    }

    /// Orthonormal camera frame with columns right, up and back (from target
    /// toward the eye).
    ///
    /// Only meaningful for a state that passed [`CameraState::validate`].
    #[must_use]
    pub fn frame(&self) -> DMat3 {
        let back = (self.position - self.target).normalize();
        let right = self.up.cross(back).normalize();
        let up = back.cross(right);
        DMat3::from_cols(right, up, back)
    }

    /// Rebuild eye and up from a new frame, keeping target and distance.
    #[must_use]
    pub fn with_frame(&self, frame: DMat3) -> Self {
        Self {
            position: self.target + frame.z_axis * self.distance(),
            up: frame.y_axis,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_is_valid() {
        assert!(CameraState::default().validate().is_ok());
    }

    #[test]
    fn up_along_view_direction_is_rejected() {
        let camera = CameraState {
            up: DVec3::new(0.0, 0.0, -3.0),
            ..CameraState::default()
        };
        assert!(matches!(
            camera.validate(),
            Err(ViewerError::InvalidCameraBasis)
        ));
    }

    #[test]
    fn eye_on_target_is_rejected() {
        let camera = CameraState {
            position: DVec3::ZERO,
            ..CameraState::default()
        };
        assert!(matches!(
            camera.validate(),
            Err(ViewerError::InvalidCameraBasis)
        ));
    }

    #[test]
    fn non_positive_field_is_rejected() {
        let camera = CameraState {
            field_height: 0.0,
            ..CameraState::default()
        };
        assert!(matches!(
            camera.validate(),
            Err(ViewerError::InvalidField { .. })
        ));
    }

    #[test]
    fn frame_is_orthonormal_for_skewed_up() {
        let camera = CameraState {
            position: DVec3::new(3.0, -2.0, 5.0),
            target: DVec3::new(1.0, 1.0, 1.0),
            up: DVec3::new(0.2, 1.0, 0.4),
            ..CameraState::default()
        };
        let frame = camera.frame();
        let identity = frame.transpose() * frame;
        assert!(identity.abs_diff_eq(DMat3::IDENTITY, 1e-12));
        let rebuilt = camera.with_frame(frame);
        assert!(rebuilt.position.abs_diff_eq(camera.position, 1e-12));
    }
}
