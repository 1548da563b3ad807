//! Contract with the host CAD application's graphics subsystem.
//!
//! The viewer never talks to a concrete backend. Each host (one per CAD
//! product line) implements [`GraphicsSystem`] and the traits it names; the
//! backend is picked at build time as the viewer's type parameter.
//! [`software`] is a headless implementation of the whole contract.

use glam::{DMat4, DVec3};

use crate::camera::CameraState;
use crate::error::ViewerError;
use crate::geometry::Extents3d;

/// In-memory reference backend.
pub mod software;

/// Opaque native handle of the window a device renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

/// Host object categories the viewer knows how to bound and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawableKind {
    /// A single database entity.
    Entity,
    /// An insert of a block definition; bounded by its best-fit extents.
    BlockReference,
    /// A block definition (e.g. model space); bounded by its members.
    BlockDefinition,
    /// Anything else.
    Other,
}

/// A host object that can be shown in a view.
pub trait Drawable {
    /// Category used to decide how to bound the object.
    fn kind(&self) -> DrawableKind;

    /// Host class name, for diagnostics.
    fn class_name(&self) -> &str;

    /// Whether this is a null or already-erased handle.
    fn is_null(&self) -> bool {
        false
    }

    /// World extents, or `None` when the object has no measurable geometry.
    fn geometric_extents(&self) -> Option<Extents3d>;

    /// Tight extents of a block reference.
    fn best_fit_extents(&self) -> Option<Extents3d> {
        self.geometric_extents()
    }

    /// Extents of each member of a block definition.
    fn member_extents(&self) -> Vec<Extents3d> {
        Vec::new()
    }
}

/// A view: the camera plus the set of drawables it displays.
///
/// Rotation primitives follow one convention: `roll(a)` turns the camera
/// right-handedly about its view direction, and `orbit(x, y)` swings the eye
/// about the target, `x` to the right then `y` upward.
pub trait GraphicsView {
    /// Drawable type accepted by [`GraphicsView::add`].
    type Drawable: Drawable + ?Sized;
    /// Model the drawables are displayed through.
    type Model;

    /// Display `drawable` through `model`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Host`] when the backend refuses the drawable.
    fn add(
        &mut self,
        drawable: &Self::Drawable,
        model: &Self::Model,
    ) -> Result<(), ViewerError>;
    /// Remove every displayed drawable.
    fn erase_all(&mut self);
    /// Mark the view as needing a redraw.
    fn invalidate(&mut self);
    /// Redraw now if invalidated.
    fn update(&mut self);

    /// Replace the camera wholesale.
    fn set_view(&mut self, camera: &CameraState);
    /// Current camera.
    fn camera(&self) -> CameraState;

    /// Turn the camera about its view direction.
    fn roll(&mut self, angle: f64);
    /// Swing the eye about the target.
    fn orbit(&mut self, x: f64, y: f64);
    /// Translate eye and target by a vector in view coordinates.
    fn dolly(&mut self, vector: DVec3);
    /// Scale the visible field by `factor`.
    fn zoom(&mut self, factor: f64);

    /// World to view (eye) coordinates.
    fn viewing_transform(&self) -> DMat4;
    /// World to device (pixel) coordinates.
    fn world_to_device_transform(&self) -> DMat4;
}

/// A render surface bound to a native window.
pub trait GraphicsDevice {
    /// Views this device can host.
    type View;

    /// Start rendering `view` on this device.
    fn attach(&mut self, view: &mut Self::View);
    /// Stop rendering `view` on this device.
    fn detach(&mut self, view: &mut Self::View);
    /// The window's client area changed size.
    fn on_size(&mut self, width: u32, height: u32);
}

/// Factory for the device/model/view triple of one viewer.
///
/// Every resource is released by dropping it.
pub trait GraphicsSystem {
    /// Drawable type shown by this backend.
    type Drawable: Drawable + ?Sized;
    /// Model type.
    type Model;
    /// View type.
    type View: GraphicsView<Drawable = Self::Drawable, Model = Self::Model>;
    /// Device type.
    type Device: GraphicsDevice<View = Self::View>;

    /// Create a device rendering into `window`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Host`] when the device is unavailable.
    fn create_device(
        &mut self,
        window: WindowHandle,
    ) -> Result<Self::Device, ViewerError>;
    /// Create a model.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Host`] when the model is unavailable.
    fn create_model(&mut self) -> Result<Self::Model, ViewerError>;
    /// Create a view.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Host`] when the view is unavailable.
    fn create_view(&mut self) -> Result<Self::View, ViewerError>;
}
