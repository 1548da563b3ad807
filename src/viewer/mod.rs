//! The embeddable preview control.
//!
//! [`DrawableViewer`] owns one device/model/view session from a
//! [`GraphicsSystem`], the bounding volume of what it shows, the camera
//! controller and the gesture dispatcher. Hosts feed it window events and
//! drawables; everything else happens here.

pub mod binding;
pub mod command;

use glam::DVec2;

pub use binding::DrawableBinding;
pub use command::ViewCommand;

use crate::camera::{CameraController, CameraState, ViewportRect};
use crate::error::ViewerError;
use crate::geometry::{BoundingVolume, Extents3d};
use crate::host::{
    Drawable, DrawableKind, GraphicsDevice, GraphicsSystem, GraphicsView,
    WindowHandle,
};
use crate::input::{GestureDispatcher, InputEvent};
use crate::options::Options;

/// 3D preview of host drawables with mouse navigation.
///
/// Fields drop in declaration order, so the view (inside the controller) is
/// released before the model, and the model before the device.
pub struct DrawableViewer<S: GraphicsSystem> {
    camera: CameraController<S::View>,
    model: S::Model,
    device: S::Device,
    extents: BoundingVolume,
    dispatcher: GestureDispatcher,
    viewport: ViewportRect,
}

impl<S: GraphicsSystem> DrawableViewer<S> {
    /// Acquire a device for `window`, a model and a view from `system`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if a resource cannot be acquired; the
    /// resources obtained so far are released first.
    pub fn new(
        system: &mut S,
        window: WindowHandle,
        options: &Options,
    ) -> Result<Self, ViewerError> {
        let mut device = system.create_device(window)?;
        let model = system.create_model()?;
        let mut view = system.create_view()?;
        device.attach(&mut view);
        log::debug!("viewer session opened for window {window:?}");

        let mut dispatcher = GestureDispatcher::with_options(options);
        dispatcher.set_enabled(options.binding.gestures_enabled);

        Ok(Self {
            camera: CameraController::new(view, &options.navigation),
            model,
            device,
            extents: BoundingVolume::new(),
            dispatcher,
            viewport: ViewportRect::from_size(0.0, 0.0),
        })
    }

    /// Adopt new options. The gesture enable flag is left as is.
    pub fn apply_options(&mut self, options: &Options) {
        self.camera.apply_options(&options.navigation);
        self.dispatcher.apply_options(options);
    }

    /// Show `drawable` and merge its extents into the viewer's volume.
    ///
    /// Entities contribute their geometric extents, block references their
    /// best-fit extents, block definitions the union of their members. The
    /// volume is only updated once the view has accepted the drawable.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::NullArgument`] for a null handle,
    /// [`ViewerError::UnsupportedDrawable`] for an unknown kind and
    /// [`ViewerError::InvalidExtents`] for a drawable without geometry, or
    /// the view's own error. Nothing changes on error.
    pub fn add(&mut self, drawable: &S::Drawable) -> Result<(), ViewerError> {
        if drawable.is_null() {
            return Err(ViewerError::NullArgument("drawable"));
        }

        let mut extents = self.extents;
        match drawable.kind() {
            DrawableKind::Entity => extents.add(
                drawable
                    .geometric_extents()
                    .ok_or(ViewerError::InvalidExtents(None))?,
            )?,
            DrawableKind::BlockReference => extents.add(
                drawable
                    .best_fit_extents()
                    .ok_or(ViewerError::InvalidExtents(None))?,
            )?,
            DrawableKind::BlockDefinition => {
                extents.add_block(drawable.member_extents())?;
            }
            DrawableKind::Other => {
                return Err(ViewerError::UnsupportedDrawable(
                    drawable.class_name().to_owned(),
                ));
            }
        }

        self.camera.view_mut().add(drawable, &self.model)?;
        self.extents = extents;
        log::debug!("added {}", drawable.class_name());
        Ok(())
    }

    /// Remove everything shown and forget the accumulated extents.
    pub fn erase_all(&mut self) {
        let view = self.camera.view_mut();
        view.erase_all();
        view.invalidate();
        self.extents.reset();
    }

    /// Top-down fit of everything shown.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::EmptyVolume`] when nothing is shown.
    pub fn zoom_extents(&mut self) -> Result<(), ViewerError> {
        self.camera.fit_to_extents(&self.extents)
    }

    /// Replace the camera.
    ///
    /// # Errors
    ///
    /// Returns the validation error of [`CameraState::validate`].
    pub fn set_view(&mut self, camera: CameraState) -> Result<(), ViewerError> {
        self.camera.set_view(camera)
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> CameraState {
        self.camera.camera()
    }

    /// Bounding box of everything shown, if anything is.
    #[must_use]
    pub const fn extents(&self) -> Option<Extents3d> {
        self.extents.extents()
    }

    /// Enable or disable mouse navigation. The view can still be driven
    /// through [`DrawableViewer::execute`] while disabled.
    pub const fn set_gesture_enabled(&mut self, enabled: bool) {
        self.dispatcher.set_enabled(enabled);
    }

    /// Whether mouse navigation is enabled.
    #[must_use]
    pub const fn gesture_enabled(&self) -> bool {
        self.dispatcher.is_enabled()
    }

    /// Mark the view for redraw.
    pub fn invalidate(&mut self) {
        self.camera.view_mut().invalidate();
    }

    /// Redraw now.
    pub fn paint(&mut self) {
        let view = self.camera.view_mut();
        view.invalidate();
        view.update();
    }

    /// The window's client area changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.device.on_size(width, height);
        self.viewport =
            ViewportRect::from_size(f64::from(width), f64::from(height));
        self.invalidate();
    }

    /// Client area in device pixels.
    #[must_use]
    pub const fn viewport(&self) -> ViewportRect {
        self.viewport
    }

    /// Feed a window event through the gesture dispatcher.
    ///
    /// # Errors
    ///
    /// Returns the error of the command the event produced, if any.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), ViewerError> {
        self.dispatcher
            .handle_event(event)
            .map_or(Ok(()), |command| self.execute(command))
    }

    /// Feed a key press through the key bindings.
    ///
    /// # Errors
    ///
    /// Returns the error of the bound command, if any.
    pub fn handle_key_press(&mut self, key: &str) -> Result<(), ViewerError> {
        self.dispatcher
            .handle_key_press(key)
            .map_or(Ok(()), |command| self.execute(command))
    }

    /// Run a command, then redraw.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::EmptyVolume`] for a fit with nothing shown and
    /// [`ViewerError::InvalidZoomFactor`] for a bad zoom. No redraw happens
    /// on error.
    pub fn execute(&mut self, command: ViewCommand) -> Result<(), ViewerError> {
        match command {
            ViewCommand::Pan { from, to } => self.camera.pan(from, to),
            ViewCommand::Orbit { from, to } => {
                self.camera.orbit(from, to, &self.viewport);
            }
            ViewCommand::Zoom { factor } => self.camera.zoom(factor)?,
            ViewCommand::FitExtents => {
                self.camera.fit_to_extents(&self.extents)?;
            }
            ViewCommand::ResetTopView => {
                self.camera.reset_top_view(&self.extents, &self.viewport)?;
            }
        }
        self.paint();
        Ok(())
    }

    /// Pointer position last seen by the dispatcher.
    #[must_use]
    pub const fn pointer(&self) -> DVec2 {
        self.dispatcher.last_position()
    }

    /// The underlying view.
    #[must_use]
    pub const fn view(&self) -> &S::View {
        self.camera.view()
    }

    /// The underlying device.
    #[must_use]
    pub const fn device(&self) -> &S::Device {
        &self.device
    }

    /// The gesture dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &GestureDispatcher {
        &self.dispatcher
    }
}

impl<S: GraphicsSystem> Drop for DrawableViewer<S> {
    fn drop(&mut self) {
        self.device.detach(self.camera.view_mut());
        log::debug!("viewer session closed");
    }
}
