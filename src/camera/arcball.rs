//! Virtual trackball.
//!
//! Pointer positions are projected onto an imaginary hemisphere centred in
//! the viewport; the rotation carrying the previous projection onto the
//! current one is then decomposed into the only two rotation primitives a
//! host view offers, `roll` about the view axis and `orbit` about the view's
//! horizontal and vertical axes:
//!
//! ```text
//! roll(r)  orbit(0, y)  orbit(a, 0)  orbit(0, -y)  roll(-r)
//! ```
//!
//! The outer pairs rotate the arcball axis onto the view's vertical axis and
//! back, so the middle orbit turns the scene about the axis under the
//! pointer whatever the current camera orientation is.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DVec2, DVec3};

/// Sphere radius as a fraction of the smaller viewport dimension.
pub const DEFAULT_RADIUS_RATIO: f64 = 0.4;

/// Screen rectangle in device pixels, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ViewportRect {
    /// Create from an origin and a size.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin.
    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Center point.
    #[must_use]
    pub const fn center(&self) -> DVec2 {
        DVec2::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Width over height, or 1 for a collapsed rectangle.
    #[must_use]
    pub const fn aspect(&self) -> f64 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// One primitive camera operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationStep {
    /// Rotate about the view axis by the given angle in radians.
    Roll(f64),
    /// Rotate about the view's vertical (`x`) and horizontal (`y`) axes.
    Orbit {
        /// Angle about the vertical axis, radians.
        x: f64,
        /// Angle about the horizontal axis, radians.
        y: f64,
    },
}

/// Scalar angles of the five-step roll/orbit decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcballRotation {
    /// Roll aligning the rotation axis with the view's vertical plane.
    pub roll: f64,
    /// Orbit tilting the rotation axis onto the view's vertical axis.
    pub orbit_y: f64,
    /// Rotation about the aligned axis.
    pub rotation: f64,
}

impl ArcballRotation {
    /// Rotation for a zero-length axis: net identity.
    pub const IDENTITY: Self = Self {
        roll: 0.0,
        orbit_y: PI,
        rotation: 0.0,
    };

    /// The primitive sequence, in application order.
    #[must_use]
    pub const fn steps(&self) -> [RotationStep; 5] {
        [
            RotationStep::Roll(self.roll),
            RotationStep::Orbit {
                x: 0.0,
                y: self.orbit_y,
            },
            RotationStep::Orbit {
                x: self.rotation,
                y: 0.0,
            },
            RotationStep::Orbit {
                x: 0.0,
                y: -self.orbit_y,
            },
            RotationStep::Roll(-self.roll),
        ]
    }

    /// Whether the sequence leaves the camera where it was.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.rotation == 0.0
    }
}

/// Arcball with a configurable sphere radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arcball {
    radius_ratio: f64,
}

impl Default for Arcball {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_RATIO)
    }
}

impl Arcball {
    /// Create an arcball whose radius is `radius_ratio` times the smaller
    /// viewport dimension.
    #[must_use]
    pub const fn new(radius_ratio: f64) -> Self {
        Self { radius_ratio }
    }

    /// Sphere radius in pixels for `rect`.
    #[must_use]
    pub const fn radius(&self, rect: &ViewportRect) -> f64 {
        let side = if rect.width < rect.height {
            rect.width
        } else {
            rect.height
        };
        self.radius_ratio * side
    }

    /// Project a pointer position onto the unit hemisphere facing the
    /// viewer.
    ///
    /// Points outside the sphere's silhouette land on its equator (`z = 0`),
    /// where a drag becomes a pure roll.
    #[must_use]
    pub fn project(&self, rect: &ViewportRect, p: DVec2) -> DVec3 {
        let c = rect.center();
        let radius = self.radius(rect);
        let q = DVec2::new(p.x - c.x, c.y - p.y) / radius;
        let d2 = q.length_squared();
        if d2 > 1.0 {
            q.normalize().extend(0.0)
        } else {
            q.extend((1.0 - d2).max(0.0).sqrt())
        }
    }

    /// Decompose the drag from `last` to `current` into roll/orbit angles.
    ///
    /// A collapsed viewport has no sphere and yields
    /// [`ArcballRotation::IDENTITY`].
    #[must_use]
    pub fn rotation(
        &self,
        rect: &ViewportRect,
        last: DVec2,
        current: DVec2,
    ) -> ArcballRotation {
        let radius = self.radius(rect);
        if !(radius.is_finite() && radius > 0.0) {
            return ArcballRotation::IDENTITY;
        }

        let v_last = self.project(rect, last);
        let v_new = self.project(rect, current);
        let axis = v_last.cross(v_new);
        let len = axis.length();

        let orbit_y = if len == 0.0 {
            PI
        } else {
            (axis.z / len).clamp(-1.0, 1.0).acos() + FRAC_PI_2
        };

        ArcballRotation {
            roll: axis.x.atan2(axis.y),
            orbit_y,
            rotation: len.min(1.0).asin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn rect() -> ViewportRect {
        ViewportRect::from_size(800.0, 600.0)
    }

    #[test]
    fn radius_uses_smaller_dimension() {
        assert_eq!(Arcball::default().radius(&rect()), 240.0);
        let offset = ViewportRect::new(100.0, 50.0, 300.0, 900.0);
        assert_eq!(Arcball::default().radius(&offset), 120.0);
        assert_eq!(offset.center(), DVec2::new(250.0, 500.0));
    }

    #[test]
    fn center_projects_to_pole() {
        let v = Arcball::default().project(&rect(), DVec2::new(400.0, 300.0));
        assert_eq!(v, DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn far_point_projects_to_equator() {
        let v =
            Arcball::default().project(&rect(), DVec2::new(1400.0, 300.0));
        assert_eq!(v.z, 0.0);
        assert!((v.length() - 1.0).abs() < EPS);
        assert!((v.x - 1.0).abs() < EPS);
    }

    #[test]
    fn boundary_point_has_zero_height() {
        // Exactly one radius above the center.
        let v = Arcball::default().project(&rect(), DVec2::new(400.0, 60.0));
        assert_eq!(v, DVec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn screen_up_maps_to_positive_y() {
        let v = Arcball::default().project(&rect(), DVec2::new(400.0, 180.0));
        assert!(v.y > 0.0);
        assert!(v.z > 0.0);
        assert!((v.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn no_motion_is_identity() {
        let p = DVec2::new(512.0, 211.0);
        let r = Arcball::default().rotation(&rect(), p, p);
        assert_eq!(r.rotation, 0.0);
        assert_eq!(r.orbit_y, PI);
        assert!(r.is_identity());
    }

    #[test]
    fn horizontal_drag_through_center() {
        let r = Arcball::default().rotation(
            &rect(),
            DVec2::new(400.0, 300.0),
            DVec2::new(424.0, 300.0),
        );
        // Axis is the view's vertical: no roll, axis perpendicular to z.
        assert!(r.roll.abs() < EPS);
        assert!((r.orbit_y - PI).abs() < EPS);
        assert!((r.rotation - 0.1_f64.asin()).abs() < EPS);
    }

    #[test]
    fn steps_unwind_the_alignment() {
        let r = ArcballRotation {
            roll: 0.3,
            orbit_y: 2.0,
            rotation: 0.1,
        };
        assert_eq!(
            r.steps(),
            [
                RotationStep::Roll(0.3),
                RotationStep::Orbit { x: 0.0, y: 2.0 },
                RotationStep::Orbit { x: 0.1, y: 0.0 },
                RotationStep::Orbit { x: 0.0, y: -2.0 },
                RotationStep::Roll(-0.3),
            ]
        );
    }

    #[test]
    fn reversed_drag_flips_the_axis() {
        let arcball = Arcball::default();
        let a = DVec2::new(350.0, 280.0);
        let b = DVec2::new(470.0, 190.0);
        let forward = arcball.rotation(&rect(), a, b);
        let back = arcball.rotation(&rect(), b, a);
        assert!((forward.rotation - back.rotation).abs() < EPS);
        assert!((forward.orbit_y + back.orbit_y - 2.0 * PI).abs() < EPS);
    }

    #[test]
    fn rotation_is_capped_at_quarter_turn() {
        let r = Arcball::default().rotation(
            &rect(),
            DVec2::new(-5000.0, 300.0),
            DVec2::new(400.0, -5000.0),
        );
        assert!(r.rotation <= FRAC_PI_2);
    }

    #[test]
    fn collapsed_viewport_is_identity() {
        let r = Arcball::default().rotation(
            &ViewportRect::from_size(0.0, 600.0),
            DVec2::ZERO,
            DVec2::new(10.0, 10.0),
        );
        assert_eq!(r, ArcballRotation::IDENTITY);
    }
}
