// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Embeddable 3D preview control for CAD drawables.
//!
//! The viewer shows entities and block definitions from a host CAD
//! application and lets the user navigate with the mouse: left drag orbits
//! with a virtual trackball, middle drag pans, the wheel zooms and a right
//! click fits the view to everything shown.
//!
//! # Key entry points
//!
//! - [`viewer::DrawableViewer`] - the control itself, generic over the host
//!   backend
//! - [`viewer::DrawableBinding`] - "show this drawable" with auto-zoom
//! - [`host::GraphicsSystem`] - the contract a host backend implements;
//!   [`host::software`] is a headless implementation
//! - [`options::Options`] - navigation conventions, binding flags and key
//!   bindings, loadable from TOML
//!
//! # Architecture
//!
//! Window events go through an [`input::GestureDispatcher`], which turns
//! them into [`viewer::ViewCommand`]s. The viewer executes each command on
//! a [`camera::CameraController`], which drives the host view through its
//! roll/orbit/dolly/zoom primitives and requests a redraw. The extents of
//! everything added are tracked in a [`geometry::BoundingVolume`] for
//! fitting.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod options;
pub mod viewer;

pub use error::ViewerError;
pub use viewer::{DrawableBinding, DrawableViewer, ViewCommand};
