//! Headless graphics backend.
//!
//! Implements the full view contract with plain vector math and keeps a log
//! of resource acquisition and release. Used for off-screen previews, the
//! demo binary and tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::{DMat3, DMat4, DVec2, DVec3};

use super::{
    Drawable, DrawableKind, GraphicsDevice, GraphicsSystem, GraphicsView,
    WindowHandle,
};
use crate::camera::CameraState;
use crate::error::ViewerError;
use crate::geometry::Extents3d;

/// Resources handed out by [`SoftwareSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Render device.
    Device,
    /// Model.
    Model,
    /// View.
    View,
}

/// Entry in the session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A resource was created.
    Acquired(Resource),
    /// A view was attached to a device.
    Attached,
    /// A view was detached from a device.
    Detached,
    /// A resource was dropped.
    Released(Resource),
}

type EventLog = Rc<RefCell<Vec<SessionEvent>>>;

fn record(log: &EventLog, event: SessionEvent) {
    log::debug!("software session: {event:?}");
    log.borrow_mut().push(event);
}

/// Factory for software devices, models and views.
#[derive(Debug, Default)]
pub struct SoftwareSystem {
    events: EventLog,
    fail_on: Option<Resource>,
    next_model: u32,
}

impl SoftwareSystem {
    /// A system whose resources are always available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A system that refuses to create `resource`.
    #[must_use]
    pub fn failing_on(resource: Resource) -> Self {
        Self {
            fail_on: Some(resource),
            ..Self::default()
        }
    }

    /// Snapshot of the session log so far.
    #[must_use]
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.borrow().clone()
    }

    fn acquire(&self, resource: Resource) -> Result<(), ViewerError> {
        if self.fail_on == Some(resource) {
            return Err(ViewerError::Host(format!(
                "{resource:?} unavailable"
            )));
        }
        record(&self.events, SessionEvent::Acquired(resource));
        Ok(())
    }
}

impl GraphicsSystem for SoftwareSystem {
    type Drawable = Shape;
    type Model = SoftwareModel;
    type View = SoftwareView;
    type Device = SoftwareDevice;

    fn create_device(
        &mut self,
        window: WindowHandle,
    ) -> Result<SoftwareDevice, ViewerError> {
        self.acquire(Resource::Device)?;
        Ok(SoftwareDevice {
            window,
            surface: Rc::new(Cell::new(DVec2::ZERO)),
            events: Rc::clone(&self.events),
        })
    }

    fn create_model(&mut self) -> Result<SoftwareModel, ViewerError> {
        self.acquire(Resource::Model)?;
        self.next_model += 1;
        Ok(SoftwareModel {
            id: self.next_model,
            events: Rc::clone(&self.events),
        })
    }

    fn create_view(&mut self) -> Result<SoftwareView, ViewerError> {
        self.acquire(Resource::View)?;
        Ok(SoftwareView {
            camera: CameraState::default(),
            surface: Rc::new(Cell::new(DVec2::ZERO)),
            displayed: Vec::new(),
            invalidated: false,
            redraws: 0,
            events: Rc::clone(&self.events),
        })
    }
}

/// Software render surface. Its size is shared with attached views.
#[derive(Debug)]
pub struct SoftwareDevice {
    window: WindowHandle,
    surface: Rc<Cell<DVec2>>,
    events: EventLog,
}

impl SoftwareDevice {
    /// Window this device renders into.
    #[must_use]
    pub const fn window(&self) -> WindowHandle {
        self.window
    }

    /// Current surface size in pixels.
    #[must_use]
    pub fn size(&self) -> DVec2 {
        self.surface.get()
    }
}

impl GraphicsDevice for SoftwareDevice {
    type View = SoftwareView;

    fn attach(&mut self, view: &mut SoftwareView) {
        view.surface = Rc::clone(&self.surface);
        record(&self.events, SessionEvent::Attached);
    }

    fn detach(&mut self, view: &mut SoftwareView) {
        view.surface = Rc::new(Cell::new(DVec2::ZERO));
        record(&self.events, SessionEvent::Detached);
    }

    fn on_size(&mut self, width: u32, height: u32) {
        self.surface
            .set(DVec2::new(f64::from(width), f64::from(height)));
    }
}

impl Drop for SoftwareDevice {
    fn drop(&mut self) {
        record(&self.events, SessionEvent::Released(Resource::Device));
    }
}

/// Software model; only carries an identity.
#[derive(Debug)]
pub struct SoftwareModel {
    id: u32,
    events: EventLog,
}

impl SoftwareModel {
    /// Identifier unique within its system.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for SoftwareModel {
    fn drop(&mut self) {
        record(&self.events, SessionEvent::Released(Resource::Model));
    }
}

/// Software view: a camera, the names of displayed drawables, and a redraw
/// counter.
#[derive(Debug)]
pub struct SoftwareView {
    camera: CameraState,
    surface: Rc<Cell<DVec2>>,
    displayed: Vec<(String, u32)>,
    invalidated: bool,
    redraws: usize,
    events: EventLog,
}

impl SoftwareView {
    /// Class names of displayed drawables, in insertion order.
    pub fn displayed(&self) -> impl Iterator<Item = &str> {
        self.displayed.iter().map(|(class, _)| class.as_str())
    }

    /// Number of redraws performed by [`GraphicsView::update`].
    #[must_use]
    pub const fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Whether a redraw is pending.
    #[must_use]
    pub const fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    fn rotate_frame(&mut self, local: DMat3) {
        let frame = self.camera.frame() * local;
        self.camera = self.camera.with_frame(frame);
    }
}

impl GraphicsView for SoftwareView {
    type Drawable = Shape;
    type Model = SoftwareModel;

    fn add(
        &mut self,
        drawable: &Shape,
        model: &SoftwareModel,
    ) -> Result<(), ViewerError> {
        self.displayed.push((drawable.class.clone(), model.id));
        Ok(())
    }

    fn erase_all(&mut self) {
        self.displayed.clear();
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }

    fn update(&mut self) {
        if self.invalidated {
            self.invalidated = false;
            self.redraws += 1;
        }
    }

    fn set_view(&mut self, camera: &CameraState) {
        self.camera = *camera;
    }

    fn camera(&self) -> CameraState {
        self.camera
    }

    fn roll(&mut self, angle: f64) {
        self.rotate_frame(DMat3::from_rotation_z(-angle));
    }

    fn orbit(&mut self, x: f64, y: f64) {
        self.rotate_frame(DMat3::from_rotation_y(x) * DMat3::from_rotation_x(-y));
    }

    fn dolly(&mut self, vector: DVec3) {
        let offset = self.camera.frame() * vector;
        self.camera.position += offset;
        self.camera.target += offset;
    }

    fn zoom(&mut self, factor: f64) {
        self.camera.field_width *= factor;
        self.camera.field_height *= factor;
    }

    fn viewing_transform(&self) -> DMat4 {
        DMat4::look_at_rh(
            self.camera.position,
            self.camera.target,
            self.camera.up,
        )
    }

    /// The field is mapped onto the surface at the target plane for both
    /// projections, with device y growing downward.
    fn world_to_device_transform(&self) -> DMat4 {
        let size = self.surface.get();
        let to_device = DMat4::from_translation(DVec3::new(
            size.x / 2.0,
            size.y / 2.0,
            0.0,
        )) * DMat4::from_scale(DVec3::new(
            size.x / self.camera.field_width,
            -size.y / self.camera.field_height,
            1.0,
        ));
        to_device * self.viewing_transform()
    }
}

impl Drop for SoftwareView {
    fn drop(&mut self) {
        record(&self.events, SessionEvent::Released(Resource::View));
    }
}

/// Drawable understood by the software backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: DrawableKind,
    class: String,
    extents: Option<Extents3d>,
    best_fit: Option<Extents3d>,
    members: Vec<Extents3d>,
    null: bool,
}

impl Shape {
    /// An entity enclosing `points`; no points means no geometry.
    #[must_use]
    pub fn entity(
        class: impl Into<String>,
        points: impl IntoIterator<Item = DVec3>,
    ) -> Self {
        let extents = Extents3d::from_points(points);
        Self {
            kind: DrawableKind::Entity,
            class: class.into(),
            extents,
            best_fit: extents,
            members: Vec::new(),
            null: false,
        }
    }

    /// Circle in a plane parallel to XY.
    #[must_use]
    pub fn circle(center: DVec3, radius: f64) -> Self {
        let r = DVec3::new(radius, radius, 0.0);
        Self::entity("Circle", [center - r, center + r])
    }

    /// A block definition holding `members`.
    #[must_use]
    pub fn block_definition(name: impl Into<String>, members: &[Self]) -> Self {
        let members: Vec<_> =
            members.iter().filter_map(Self::geometric_extents).collect();
        let extents = members.iter().copied().reduce(|a, b| a.union(&b));
        Self {
            kind: DrawableKind::BlockDefinition,
            class: name.into(),
            extents,
            best_fit: extents,
            members,
            null: false,
        }
    }

    /// An insert of `definition` at `insertion`.
    ///
    /// Its geometric extents also cover the insertion point, so they can be
    /// looser than the best fit.
    #[must_use]
    pub fn block_reference(definition: &Self, insertion: DVec3) -> Self {
        let best_fit = definition.extents.map(|e| {
            Extents3d::new(e.min + insertion, e.max + insertion)
        });
        let extents = best_fit.map(|e| {
            e.union(&Extents3d::new(insertion, insertion))
        });
        Self {
            kind: DrawableKind::BlockReference,
            class: "BlockReference".to_owned(),
            extents,
            best_fit,
            members: Vec::new(),
            null: false,
        }
    }

    /// A drawable of a class the viewer does not support.
    #[must_use]
    pub fn unsupported(class: impl Into<String>) -> Self {
        Self {
            kind: DrawableKind::Other,
            class: class.into(),
            extents: None,
            best_fit: None,
            members: Vec::new(),
            null: false,
        }
    }

    /// A null handle.
    #[must_use]
    pub fn null() -> Self {
        Self {
            null: true,
            ..Self::unsupported("Null")
        }
    }
}

impl Drawable for Shape {
    fn kind(&self) -> DrawableKind {
        self.kind
    }

    fn class_name(&self) -> &str {
        &self.class
    }

    fn is_null(&self) -> bool {
        self.null
    }

    fn geometric_extents(&self) -> Option<Extents3d> {
        self.extents
    }

    fn best_fit_extents(&self) -> Option<Extents3d> {
        self.best_fit
    }

    fn member_extents(&self) -> Vec<Extents3d> {
        self.members.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    const EPS: f64 = 1e-12;

    fn view() -> SoftwareView {
        SoftwareSystem::new().create_view().unwrap()
    }

    #[test]
    fn orbit_x_swings_eye_right() {
        let mut v = view();
        v.orbit(FRAC_PI_2, 0.0);
        let c = v.camera();
        assert!(c.position.abs_diff_eq(DVec3::X, EPS));
        assert!(c.up.abs_diff_eq(DVec3::Y, EPS));
        assert_eq!(c.target, DVec3::ZERO);
    }

    #[test]
    fn orbit_y_swings_eye_up() {
        let mut v = view();
        v.orbit(0.0, FRAC_PI_2);
        let c = v.camera();
        assert!(c.position.abs_diff_eq(DVec3::Y, EPS));
        assert!(c.up.abs_diff_eq(-DVec3::Z, EPS));
    }

    #[test]
    fn roll_turns_up_clockwise_on_screen() {
        let mut v = view();
        v.roll(FRAC_PI_2);
        let c = v.camera();
        assert!(c.up.abs_diff_eq(DVec3::X, EPS));
        assert!(c.position.abs_diff_eq(DVec3::Z, EPS));
    }

    #[test]
    fn dolly_moves_eye_and_target_in_view_space() {
        let mut v = view();
        v.orbit(FRAC_PI_2, 0.0);
        v.dolly(DVec3::new(1.0, 2.0, 0.0));
        let c = v.camera();
        // View right is now -Z.
        assert!(c.target.abs_diff_eq(DVec3::new(0.0, 2.0, -1.0), EPS));
        assert!((c.distance() - 1.0).abs() < EPS);
    }

    #[test]
    fn device_transform_maps_field_to_surface() {
        let mut system = SoftwareSystem::new();
        let mut device = system.create_device(WindowHandle(1)).unwrap();
        let mut v = system.create_view().unwrap();
        device.attach(&mut v);
        device.on_size(200, 100);
        v.set_view(&CameraState {
            field_width: 20.0,
            field_height: 10.0,
            ..CameraState::default()
        });
        let m = v.world_to_device_transform();
        let center = m.transform_point3(DVec3::ZERO);
        assert!(center.abs_diff_eq(DVec3::new(100.0, 50.0, -1.0), EPS));
        let corner = m.transform_point3(DVec3::new(10.0, 5.0, 0.0));
        assert!(corner.truncate().abs_diff_eq(DVec2::new(200.0, 0.0), EPS));
    }

    #[test]
    fn update_redraws_only_when_invalidated() {
        let mut v = view();
        v.update();
        assert_eq!(v.redraw_count(), 0);
        v.invalidate();
        v.update();
        v.update();
        assert_eq!(v.redraw_count(), 1);
    }

    #[test]
    fn failing_system_reports_host_error() {
        let mut system = SoftwareSystem::failing_on(Resource::Model);
        assert!(matches!(
            system.create_model(),
            Err(ViewerError::Host(_))
        ));
        assert!(system.events().is_empty());
    }

    #[test]
    fn block_reference_best_fit_is_tighter() {
        let def = Shape::block_definition(
            "Door",
            &[Shape::circle(DVec3::new(10.0, 10.0, 0.0), 1.0)],
        );
        let insert = Shape::block_reference(&def, DVec3::new(5.0, 0.0, 0.0));
        let best = insert.best_fit_extents().unwrap();
        let loose = insert.geometric_extents().unwrap();
        assert_eq!(best.min, DVec3::new(14.0, 9.0, 0.0));
        assert_eq!(loose.min, DVec3::new(5.0, 0.0, 0.0));
    }
}
