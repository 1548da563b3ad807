//! Headless demo: shows a small drawing in a software viewer and replays a
//! scripted navigation session, logging the camera after each step.
//!
//! Usage: `cadview [options.toml]` (set `RUST_LOG=debug` for session detail).

use std::path::Path;

use cadview::camera::CameraState;
use cadview::host::software::{Shape, SoftwareSystem};
use cadview::host::WindowHandle;
use cadview::input::{InputEvent, MouseButton};
use cadview::options::Options;
use cadview::{DrawableBinding, DrawableViewer, ViewerError};
use glam::DVec3;

fn log_camera(step: &str, camera: &CameraState) {
    log::info!(
        "{step}: eye {:.3} target {:.3} up {:.3} field {:.3}x{:.3}",
        camera.position,
        camera.target,
        camera.up,
        camera.field_width,
        camera.field_height
    );
}

fn drawing() -> Shape {
    let door = Shape::block_definition(
        "Door",
        &[
            Shape::entity(
                "Line",
                [DVec3::ZERO, DVec3::new(0.0, 900.0, 0.0)],
            ),
            Shape::circle(DVec3::ZERO, 900.0),
        ],
    );
    Shape::block_definition(
        "*Model_Space",
        &[
            Shape::entity(
                "Polyline",
                [DVec3::new(0.0, 0.0, 0.0), DVec3::new(6000.0, 4000.0, 0.0)],
            ),
            Shape::block_reference(&door, DVec3::new(2500.0, 0.0, 0.0)),
            Shape::entity(
                "Solid3d",
                [
                    DVec3::new(4000.0, 1000.0, 0.0),
                    DVec3::new(5000.0, 2000.0, 2700.0),
                ],
            ),
        ],
    )
}

fn drag(
    viewer: &mut DrawableViewer<SoftwareSystem>,
    button: MouseButton,
    path: &[(f64, f64)],
) -> Result<(), ViewerError> {
    let Some((&(x, y), rest)) = path.split_first() else {
        return Ok(());
    };
    viewer.handle_event(InputEvent::CursorMoved { x, y })?;
    viewer.handle_event(InputEvent::MouseButton {
        button,
        pressed: true,
    })?;
    for &(x, y) in rest {
        viewer.handle_event(InputEvent::CursorMoved { x, y })?;
    }
    viewer.handle_event(InputEvent::MouseButton {
        button,
        pressed: false,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading options from {path}");
            Options::load(Path::new(&path))?
        }
        None => Options::default(),
    };

    let mut system = SoftwareSystem::new();
    let mut viewer =
        DrawableViewer::new(&mut system, WindowHandle(1), &options)?;
    viewer.resize(1024, 768);

    DrawableBinding::from(&options.binding)
        .set_drawable(&mut viewer, Some(&drawing()))?;
    viewer.paint();
    if let Some(extents) = viewer.extents() {
        log::info!("extents {:.1} .. {:.1}", extents.min, extents.max);
    }
    log_camera("fit", &viewer.camera());

    drag(
        &mut viewer,
        MouseButton::Left,
        &[(512.0, 384.0), (540.0, 370.0), (580.0, 350.0), (620.0, 340.0)],
    )?;
    log_camera("orbit", &viewer.camera());

    drag(
        &mut viewer,
        MouseButton::Middle,
        &[(300.0, 300.0), (340.0, 320.0), (400.0, 360.0)],
    )?;
    log_camera("pan", &viewer.camera());

    for delta in [1.0, 1.0, -3.0] {
        viewer.handle_event(InputEvent::Scroll { delta })?;
    }
    log_camera("zoom", &viewer.camera());

    viewer.handle_key_press("KeyT")?;
    log_camera("top view", &viewer.camera());

    viewer.handle_event(InputEvent::MouseButton {
        button: MouseButton::Right,
        pressed: true,
    })?;
    log_camera("right click", &viewer.camera());

    log::info!("{} redraws", viewer.view().redraw_count());
    Ok(())
}
