//! Crate-level error types.

use std::fmt;

use crate::geometry::Extents3d;

/// Errors produced by the cadview crate.
#[derive(Debug)]
pub enum ViewerError {
    /// A required argument was a null host handle.
    NullArgument(&'static str),
    /// A bounding box failed the `min <= max` invariant, or a drawable had no
    /// measurable geometry (`None`).
    InvalidExtents(Option<Extents3d>),
    /// Fit or center was requested before any content was added.
    EmptyVolume,
    /// The camera up vector is collinear with the view direction, or the
    /// view direction is zero-length.
    InvalidCameraBasis,
    /// A field dimension was not finite and positive.
    InvalidField {
        /// Requested field width.
        width: f64,
        /// Requested field height.
        height: f64,
    },
    /// A zoom factor was not finite and positive.
    InvalidZoomFactor(f64),
    /// A drawable variant the control cannot bound or display.
    UnsupportedDrawable(String),
    /// The graphics backend failed to provide a resource.
    Host(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullArgument(name) => {
                write!(f, "argument `{name}` is a null handle")
            }
            Self::InvalidExtents(Some(extents)) => write!(
                f,
                "invalid extents: min {} exceeds max {}",
                extents.min, extents.max
            ),
            Self::InvalidExtents(None) => {
                write!(f, "invalid extents: no measurable geometry")
            }
            Self::EmptyVolume => write!(f, "bounding volume is empty"),
            Self::InvalidCameraBasis => write!(
                f,
                "camera up vector is collinear with the view direction"
            ),
            Self::InvalidField { width, height } => {
                write!(f, "invalid view field {width} x {height}")
            }
            Self::InvalidZoomFactor(factor) => {
                write!(f, "invalid zoom factor {factor}")
            }
            Self::UnsupportedDrawable(class) => {
                write!(f, "unsupported drawable: {class}")
            }
            Self::Host(msg) => write!(f, "graphics host error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;

    #[test]
    fn invalid_extents_message_names_both_corners() {
        let err = ViewerError::InvalidExtents(Some(Extents3d::new(
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::ZERO,
        )));
        let msg = err.to_string();
        assert!(msg.contains("min"));
        assert!(msg.contains("max"));
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;
        let err: ViewerError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(ViewerError::EmptyVolume.source().is_none());
    }
}
