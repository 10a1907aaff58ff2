//! Error types for efield.
//!
//! This module provides error types for distribution construction, the
//! shared vertex registry, and scene setup.

use std::fmt;

use crate::geometry::ShapeKind;

/// Errors raised when user-supplied geometry cannot be placed in the scene.
///
/// Geometry where the physical quantity is simply zero (a point inside a
/// cavity, a field evaluated on a charge) is never an error. These variants
/// cover geometry whose placement or field is undefined.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A line or cylinder whose two endpoints coincide has no axis.
    ZeroLengthAxis,
    /// Bounding-box corners span no area, so the plane has no normal.
    DegeneratePlane,
    /// Inner radius larger than outer radius (or negative radius).
    InvalidRadii {
        /// Inner radius as supplied.
        inner: f64,
        /// Outer radius as supplied.
        outer: f64,
    },
    /// A coordinate or parameter was NaN or infinite.
    NonFinite(&'static str),
    /// A size that must be strictly positive was zero or negative.
    NonPositive {
        what: &'static str,
        value: f64,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::ZeroLengthAxis => write!(f, "Endpoints coincide: a line or cylinder needs a non-zero axis"),
            GeometryError::DegeneratePlane => write!(f, "Plane corners span no area, the plane normal is undefined"),
            GeometryError::InvalidRadii { inner, outer } => {
                write!(f, "Invalid radii: inner {} must be >= 0 and <= outer {}", inner, outer)
            }
            GeometryError::NonFinite(what) => write!(f, "Non-finite value for {}", what),
            GeometryError::NonPositive { what, value } => write!(f, "{} must be positive, got {}", what, value),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Errors from the shared vertex registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Buffers for this shape kind were already registered in this context.
    DuplicateRegistration(ShapeKind),
    /// A mesh of this kind was requested at a different resolution than the
    /// one already uploaded.
    ResolutionMismatch {
        kind: ShapeKind,
        cached: u32,
        requested: u32,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateRegistration(kind) => {
                write!(f, "Vertex buffers already registered for {:?}", kind)
            }
            RegistryError::ResolutionMismatch { kind, cached, requested } => write!(
                f,
                "{:?} mesh is cached with {} indices, requested mesh has {}",
                kind, cached, requested
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Errors that can occur while building or drawing a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A distribution or surface could not be placed.
    Geometry(GeometryError),
    /// Mesh registration failed.
    Registry(RegistryError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Geometry(e) => write!(f, "Geometry error: {}", e),
            SceneError::Registry(e) => write!(f, "Registry error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Geometry(e) => Some(e),
            SceneError::Registry(e) => Some(e),
        }
    }
}

impl From<GeometryError> for SceneError {
    fn from(e: GeometryError) -> Self {
        SceneError::Geometry(e)
    }
}

impl From<RegistryError> for SceneError {
    fn from(e: RegistryError) -> Self {
        SceneError::Registry(e)
    }
}
