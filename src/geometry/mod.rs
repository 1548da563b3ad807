//! Axis-aligned extents and the running bounding volume of visible content.

mod extents;

pub use extents::{BoundingVolume, Extents3d};
