use glam::{DVec2, DVec3};

use crate::camera::arcball::{Arcball, RotationStep, ViewportRect};
use crate::camera::core::{CameraState, Projection};
use crate::error::ViewerError;
use crate::geometry::{BoundingVolume, Extents3d};
use crate::host::GraphicsView;
use crate::options::{NavigationOptions, PanVertical};

/// Camera controller driving a host view through its primitives.
///
/// The view is the single owner of the camera; the controller owns the view
/// for the lifetime of the viewport.
pub struct CameraController<V> {
    view: V,
    arcball: Arcball,
    pan_vertical: PanVertical,
    fit_margin: f64,
    zoom_in_factor: f64,
}

impl<V: GraphicsView> CameraController<V> {
    /// Take over `view`, configured from `options`.
    #[must_use]
    pub fn new(view: V, options: &NavigationOptions) -> Self {
        let mut controller = Self {
            view,
            arcball: Arcball::default(),
            pan_vertical: PanVertical::default(),
            fit_margin: 1.0,
            zoom_in_factor: 1.0,
        };
        controller.apply_options(options);
        controller
    }

    /// Adopt new navigation conventions.
    pub fn apply_options(&mut self, options: &NavigationOptions) {
        self.arcball = Arcball::new(options.arcball_radius_ratio);
        self.pan_vertical = options.pan_vertical;
        self.fit_margin = options.fit_margin;
        self.zoom_in_factor = options.zoom_in_factor();
    }

    /// The controlled view.
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// The controlled view, mutably.
    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> CameraState {
        self.view.camera()
    }

    /// Replace the camera wholesale after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidCameraBasis`] or
    /// [`ViewerError::InvalidField`] when `camera` fails validation; the
    /// view keeps its camera.
    pub fn set_view(&mut self, camera: CameraState) -> Result<(), ViewerError> {
        camera.validate()?;
        log::debug!(
            "set_view: eye {} target {} field {}x{}",
            camera.position,
            camera.target,
            camera.field_width,
            camera.field_height
        );
        self.view.set_view(&camera);
        Ok(())
    }

    /// Translate eye and target so the content follows a drag from `from`
    /// to `to` (device pixels).
    ///
    /// Does nothing while the device transform is singular, e.g. before the
    /// window has a size.
    pub fn pan(&mut self, from: DVec2, to: DVec2) {
        let delta = to - from;
        let world_to_device = self.view.world_to_device_transform();
        let det = world_to_device.determinant();
        if det == 0.0 || !det.is_finite() {
            log::warn!("pan ignored: device transform is singular");
            return;
        }
        let device_to_view =
            self.view.viewing_transform() * world_to_device.inverse();
        let vector = device_to_view.transform_vector3(DVec3::new(
            -delta.x,
            self.pan_vertical.sign() * delta.y,
            0.0,
        ));
        log::trace!("pan by {vector}");
        self.view.dolly(vector);
    }

    /// Scale the visible field; below 1 zooms in.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidZoomFactor`] unless `factor` is finite
    /// and positive.
    pub fn zoom(&mut self, factor: f64) -> Result<(), ViewerError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(ViewerError::InvalidZoomFactor(factor));
        }
        self.view.zoom(factor);
        Ok(())
    }

    /// Arcball rotation for a drag from `from` to `to` inside `viewport`.
    pub fn orbit(&mut self, from: DVec2, to: DVec2, viewport: &ViewportRect) {
        let rotation = self.arcball.rotation(viewport, from, to);
        log::trace!("orbit {rotation:?}");
        for step in rotation.steps() {
            match step {
                RotationStep::Roll(angle) => self.view.roll(angle),
                RotationStep::Orbit { x, y } => self.view.orbit(x, y),
            }
        }
    }

    /// Top-down parallel view of `volume` with the configured margin.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::EmptyVolume`] when nothing has been added.
    pub fn fit_to_extents(
        &mut self,
        volume: &BoundingVolume,
    ) -> Result<(), ViewerError> {
        let camera = self.top_view(volume)?;
        self.set_view(camera)
    }

    /// Like [`CameraController::fit_to_extents`], with the field stretched
    /// to the viewport's aspect ratio and one zoom-in step applied.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::EmptyVolume`] when nothing has been added.
    pub fn reset_top_view(
        &mut self,
        volume: &BoundingVolume,
        viewport: &ViewportRect,
    ) -> Result<(), ViewerError> {
        let mut camera = self.top_view(volume)?;
        let aspect = viewport.aspect();
        if camera.field_width / camera.field_height < aspect {
            camera.field_width = camera.field_height * aspect;
        } else {
            camera.field_height = camera.field_width / aspect;
        }
        self.set_view(camera)?;
        self.zoom(self.zoom_in_factor)
    }

    fn top_view(
        &self,
        volume: &BoundingVolume,
    ) -> Result<CameraState, ViewerError> {
        let extents = volume.extents().ok_or(ViewerError::EmptyVolume)?;
        let (field_width, field_height) = self.fitted_field(&extents);
        let target = extents.center();
        Ok(CameraState {
            position: target + DVec3::Z,
            target,
            up: DVec3::Y,
            field_width,
            field_height,
            projection: Projection::Parallel,
        })
    }

    /// Field for a box seen from above. A flat axis borrows the other
    /// axis' size; a point gets a unit field.
    fn fitted_field(&self, extents: &Extents3d) -> (f64, f64) {
        let size = extents.size();
        let width = self.fit_margin * size.x;
        let height = self.fit_margin * size.y;
        match (width > 0.0, height > 0.0) {
            (true, true) => (width, height),
            (true, false) => (width, width),
            (false, true) => (height, height),
            (false, false) => (1.0, 1.0),
        }
    }
}
