use glam::DVec3;

use crate::error::ViewerError;

/// Axis-aligned box given by its minimum and maximum corners.
///
/// Nothing stops a caller from building an inverted box; use
/// [`Extents3d::is_valid`] before trusting one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents3d {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Extents3d {
    /// Create from min and max points.
    #[inline]
    #[must_use]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing every point.
    ///
    /// Returns `None` for an empty iterator.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(acc.map_or(Self::new(p, p), |b| {
                Self::new(b.min.min(p), b.max.max(p))
            }))
        })
    }

    /// `min <= max` on every axis.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }

    /// Midpoint of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> DVec3 {
        self.min + (self.max - self.min) / 2.0
    }

    /// Edge lengths along each axis.
    #[inline]
    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Componentwise union of two boxes.
    #[inline]
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Running bounding box of everything added to a viewer.
///
/// Starts out empty. The empty state is a sentinel rather than a degenerate
/// box, so it can never leak into a camera fit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingVolume {
    extents: Option<Extents3d>,
}

impl BoundingVolume {
    /// An empty volume.
    #[must_use]
    pub const fn new() -> Self {
        Self { extents: None }
    }

    /// Return to the empty sentinel.
    pub const fn reset(&mut self) {
        self.extents = None;
    }

    /// Merge `extents` into the volume.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidExtents`] for an inverted or non-finite
    /// box, leaving the volume untouched.
    pub fn add(&mut self, extents: Extents3d) -> Result<(), ViewerError> {
        if !extents.is_valid() || !extents.is_finite() {
            return Err(ViewerError::InvalidExtents(Some(extents)));
        }
        self.extents = Some(
            self.extents
                .map_or(extents, |current| current.union(&extents)),
        );
        Ok(())
    }

    /// Merge the union of a block definition's member extents.
    ///
    /// Invalid members are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidExtents`] with `None` when no member is
    /// valid, since the definition then carries no geometry.
    pub fn add_block(
        &mut self,
        members: impl IntoIterator<Item = Extents3d>,
    ) -> Result<(), ViewerError> {
        let block = members
            .into_iter()
            .filter(|m| m.is_valid() && m.is_finite())
            .reduce(|a, b| a.union(&b))
            .ok_or(ViewerError::InvalidExtents(None))?;
        self.add(block)
    }

    /// Center of the accumulated box.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::EmptyVolume`] before anything was added.
    pub fn center(&self) -> Result<DVec3, ViewerError> {
        self.extents
            .map(|e| e.center())
            .ok_or(ViewerError::EmptyVolume)
    }

    /// Whether the volume holds a box satisfying `min <= max`.
    ///
    /// The empty sentinel is not valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.extents.is_some_and(|e| e.is_valid())
    }

    /// Whether nothing has been added since construction or the last reset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.extents.is_none()
    }

    /// The accumulated box, if any.
    #[must_use]
    pub const fn extents(&self) -> Option<Extents3d> {
        self.extents
    }
}
