//! # efield - Electrostatic Field Visualization Core
//!
//! Charge distributions, field-line tracing and the procedural meshes needed
//! to draw them, independent of any particular graphics API.
//!
//! efield evaluates the closed-form field of every source in a scene, seeds
//! field lines in proportion to the charge, traces them with fixed-step
//! integration and issues the draw calls for a frame through a
//! [`RenderBackend`] you provide.
//!
//! ## Quick Start
//!
//! ```ignore
//! use efield::prelude::*;
//!
//! let mut scene: Scene<BufferId> = Scene::new(SceneConfig::default());
//! scene
//!     .add_charge(PointCharge::new(5.0, DVec3::new(-30.0, 0.0, 0.0)))
//!     .add_charge(PointCharge::new(-5.0, DVec3::new(30.0, 0.0, 0.0)))
//!     .add_distribution(ChargedLine::new(
//!         DVec3::new(0.0, -40.0, 0.0),
//!         DVec3::new(0.0, 40.0, 0.0),
//!         1.0,
//!         0.2,
//!     )?);
//! scene.add_gaussian_surface(GaussianSphere::new(DVec3::new(-30.0, 0.0, 0.0), 10.0)?);
//!
//! scene.trace();
//! let mut backend = CommandRecorder::new();
//! scene.render(&mut backend)?;
//! ```
//!
//! ## Core Concepts
//!
//! ### Sources
//!
//! Every source implements [`ElectricField`]:
//!
//! - [`PointCharge`] - `Q/r²`
//! - [`ChargedLine`] - finite rod, field of an infinite line
//! - [`ChargedCylinder`] - solid or hollow, Gauss's law
//! - [`ChargedPlane`] - rectangle, field of an infinite sheet
//! - [`ChargedSphere`] - solid or hollow, Gauss's law
//!
//! A [`ChargeCollection`] sums them.
//!
//! ### Field Lines
//!
//! Each source supplies [`SeedPoint`]s tagged with the sign of its charge.
//! [`FieldLineTracer`] follows the field from positive seeds and against it
//! from negative ones, dropping an arrow glyph every so often.
//!
//! ### Rendering
//!
//! Surfaces are canonical unit meshes ([`geometry`]) uploaded once into a
//! [`VertexRegistry`] and placed by a per-instance [`Placement`]. Shader
//! sources live in [`shader`].

pub mod backend;
mod charge;
pub mod collection;
pub mod distribution;
pub mod error;
pub mod field;
mod gaussian;
pub mod geometry;
pub mod scene;
pub mod seed;
pub mod shader;
pub mod tracer;
pub mod transform;
pub mod visuals;

pub use backend::{BufferId, CommandRecorder, CullFace, Primitive, Program, RenderBackend};
pub use bytemuck;
pub use charge::PointCharge;
pub use collection::ChargeCollection;
pub use distribution::{ChargeDistribution, ChargedCylinder, ChargedLine, ChargedPlane, ChargedSphere};
pub use error::{GeometryError, RegistryError, SceneError};
pub use field::ElectricField;
pub use gaussian::{GaussianCylinder, GaussianSphere, GaussianSurface};
pub use geometry::{CylinderMesh, Shape, ShapeKind, SphereMesh, SurfaceGeometry, UnitSquare, VertexRegistry};
pub use glam::{DMat4, DVec3, Mat3, Mat4, Vec3, Vec4};
pub use scene::{ChargeVertex, Scene, SceneConfig};
pub use seed::{SeedPoint, Sign};
pub use tracer::{FieldLine, FieldLineTracer, Termination, TraceConfig};
pub use transform::{EulerZxy, Placement};
pub use visuals::Lighting;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use efield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backend::{BufferId, CommandRecorder, RenderBackend};
    pub use crate::collection::ChargeCollection;
    pub use crate::distribution::{ChargeDistribution, ChargedCylinder, ChargedLine, ChargedPlane, ChargedSphere};
    pub use crate::error::{GeometryError, SceneError};
    pub use crate::field::ElectricField;
    pub use crate::gaussian::{GaussianCylinder, GaussianSphere, GaussianSurface};
    pub use crate::scene::{Scene, SceneConfig};
    pub use crate::seed::{SeedPoint, Sign};
    pub use crate::tracer::{FieldLine, FieldLineTracer, TraceConfig};
    pub use crate::transform::EulerZxy;
    pub use crate::PointCharge;
    pub use crate::{DVec3, Mat4};
}
