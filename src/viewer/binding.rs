//! Binding a "current drawable" to the viewer.
//!
//! Hosts that track one selected object push it through
//! [`DrawableBinding::set_drawable`], which clears the viewer, shows the
//! object and optionally fits the view to it.

use crate::error::ViewerError;
use crate::host::GraphicsSystem;
use crate::options::BindingOptions;

use super::DrawableViewer;

/// "Show this drawable" entry point for hosts that bind a current object to
/// the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawableBinding {
    /// Fit the view to each newly shown drawable.
    pub auto_zoom: bool,
    /// Gesture enable flag applied once a drawable is shown.
    pub gestures_enabled: bool,
}

impl Default for DrawableBinding {
    fn default() -> Self {
        Self::from(&BindingOptions::default())
    }
}

impl From<&BindingOptions> for DrawableBinding {
    fn from(options: &BindingOptions) -> Self {
        Self {
            auto_zoom: options.auto_zoom,
            gestures_enabled: options.gestures_enabled,
        }
    }
}

impl DrawableBinding {
    /// Replace whatever `viewer` shows with `drawable`.
    ///
    /// `None` clears the viewer.
    ///
    /// # Errors
    ///
    /// Returns the error of [`DrawableViewer::add`] or
    /// [`DrawableViewer::zoom_extents`]. After a failed `add` the viewer
    /// stays cleared and the gesture flag is left as it was.
    pub fn set_drawable<S: GraphicsSystem>(
        &self,
        viewer: &mut DrawableViewer<S>,
        drawable: Option<&S::Drawable>,
    ) -> Result<(), ViewerError> {
        viewer.erase_all();
        let Some(drawable) = drawable else {
            viewer.invalidate();
            return Ok(());
        };

        viewer.add(drawable)?;
        if self.auto_zoom {
            viewer.zoom_extents()?;
        }
        viewer.set_gesture_enabled(self.gestures_enabled);
        viewer.invalidate();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::camera::CameraState;
    use crate::host::software::{Shape, SoftwareSystem};
    use crate::host::WindowHandle;
    use crate::options::Options;

    fn viewer(system: &mut SoftwareSystem) -> DrawableViewer<SoftwareSystem> {
        let mut v =
            DrawableViewer::new(system, WindowHandle(7), &Options::default())
                .unwrap();
        v.resize(640, 480);
        v
    }

    #[test]
    fn defaults_follow_options() {
        let b = DrawableBinding::default();
        assert!(b.auto_zoom);
        assert!(b.gestures_enabled);
    }

    #[test]
    fn showing_a_drawable_fits_and_enables_gestures() {
        let mut system = SoftwareSystem::new();
        let mut v = viewer(&mut system);
        v.set_gesture_enabled(false);

        let circle = Shape::circle(DVec3::new(10.0, 20.0, 0.0), 5.0);
        DrawableBinding::default()
            .set_drawable(&mut v, Some(&circle))
            .unwrap();

        let cam = v.camera();
        assert_eq!(cam.target, DVec3::new(10.0, 20.0, 0.0));
        assert!((cam.field_width - 10.5).abs() < 1e-12);
        assert!(v.gesture_enabled());
        assert!(v.view().is_invalidated());
        assert_eq!(v.view().displayed().collect::<Vec<_>>(), ["Circle"]);
    }

    #[test]
    fn replacing_the_drawable_drops_old_extents() {
        let mut system = SoftwareSystem::new();
        let mut v = viewer(&mut system);
        let binding = DrawableBinding::default();
        binding
            .set_drawable(&mut v, Some(&Shape::circle(DVec3::ZERO, 100.0)))
            .unwrap();
        binding
            .set_drawable(
                &mut v,
                Some(&Shape::circle(DVec3::new(5.0, 5.0, 0.0), 1.0)),
            )
            .unwrap();
        let e = v.extents().unwrap();
        assert_eq!(e.min, DVec3::new(4.0, 4.0, 0.0));
        assert_eq!(v.view().displayed().count(), 1);
    }

    #[test]
    fn without_auto_zoom_the_camera_stays() {
        let mut system = SoftwareSystem::new();
        let mut v = viewer(&mut system);
        let before = v.camera();
        let binding = DrawableBinding {
            auto_zoom: false,
            gestures_enabled: false,
        };
        binding
            .set_drawable(&mut v, Some(&Shape::circle(DVec3::ONE, 3.0)))
            .unwrap();
        assert_eq!(v.camera(), before);
        assert!(!v.gesture_enabled());
        assert!(v.extents().is_some());
    }

    #[test]
    fn none_clears_the_viewer() {
        let mut system = SoftwareSystem::new();
        let mut v = viewer(&mut system);
        let binding = DrawableBinding::default();
        binding
            .set_drawable(&mut v, Some(&Shape::circle(DVec3::ZERO, 1.0)))
            .unwrap();
        v.set_gesture_enabled(false);
        v.paint();

        binding.set_drawable(&mut v, None).unwrap();
        assert_eq!(v.extents(), None);
        assert_eq!(v.view().displayed().count(), 0);
        assert!(v.view().is_invalidated());
        assert!(!v.gesture_enabled());
        assert_eq!(v.camera(), fitted_unit_circle());
    }

    #[test]
    fn failed_add_leaves_viewer_cleared() {
        let mut system = SoftwareSystem::new();
        let mut v = viewer(&mut system);
        let binding = DrawableBinding::default();
        binding
            .set_drawable(&mut v, Some(&Shape::circle(DVec3::ZERO, 1.0)))
            .unwrap();
        v.set_gesture_enabled(false);

        let result =
            binding.set_drawable(&mut v, Some(&Shape::unsupported("Wipeout")));
        assert!(matches!(result, Err(ViewerError::UnsupportedDrawable(_))));
        assert_eq!(v.extents(), None);
        assert!(!v.gesture_enabled());
    }

    fn fitted_unit_circle() -> CameraState {
        CameraState {
            position: DVec3::Z,
            target: DVec3::ZERO,
            up: DVec3::Y,
            field_width: 2.1,
            field_height: 2.1,
            ..CameraState::default()
        }
    }
}
