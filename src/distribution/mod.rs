//! Charge distributions: the sources a scene is built from.
//!
//! Each distribution evaluates its own closed-form field, produces its own
//! seed points, and draws itself by placing a shared canonical mesh. They are
//! immutable once built: any change to geometry means constructing a new
//! value, so a placement can never go stale. The `with_*` methods only swap
//! charge or density parameters, which the placement does not depend on.
//!
//! | Kind | Field | Seeds |
//! |------|-------|-------|
//! | [`PointCharge`] | `Q/r²` | `round(ρ·|Q|)` on a unit sphere |
//! | [`ChargedLine`] | `2λ/r` | 8 per cross-section at radius 1 |
//! | [`ChargedCylinder`] | Gauss's law, infinite cylinder | 8 per cross-section at radius `r0 + 1` |
//! | [`ChargedPlane`] | `2πσ`, uniform | boustrophedon grid, both sides |
//! | [`ChargedSphere`] | Gauss's law, spherical shell | `round(ρ·|Q|)` at radius `b + 1` |
//!
//! # Example
//!
//! ```ignore
//! let rod = ChargedLine::new(DVec3::new(0.0, -20.0, 0.0), DVec3::new(0.0, 20.0, 0.0), 1.0, 0.5)?;
//! let ball = ChargedSphere::new(DVec3::new(30.0, 0.0, 0.0), 0.0, 5.0, -10.0, 2.0)?;
//! let sources: Vec<ChargeDistribution> = vec![rod.into(), ball.into()];
//! ```

mod axis;
mod cylinder;
mod line;
mod plane;
mod shells;
mod sphere;

pub use cylinder::ChargedCylinder;
pub use line::{ChargedLine, DEFAULT_DISPLAY_RADIUS};
pub use plane::ChargedPlane;
pub use sphere::ChargedSphere;
pub(crate) use axis::check_finite;

use glam::{DVec3, Vec4};

pub use crate::charge::PointCharge;
use crate::backend::RenderBackend;
use crate::error::RegistryError;
use crate::field::ElectricField;
use crate::geometry::VertexRegistry;
use crate::seed::{SeedPoint, Sign};
use crate::transform::Placement;

/// Any charge source that can be placed in a scene.
#[derive(Clone, Debug, PartialEq)]
pub enum ChargeDistribution {
    Point(PointCharge),
    Line(ChargedLine),
    Cylinder(ChargedCylinder),
    Plane(ChargedPlane),
    Sphere(ChargedSphere),
}

impl ChargeDistribution {
    /// Seed points for this source.
    ///
    /// `point_density` is the field lines per unit charge used for point
    /// charges, which carry no density of their own. The other kinds use
    /// the density they were built with.
    pub fn start_points(&self, point_density: f64) -> Vec<SeedPoint> {
        match self {
            ChargeDistribution::Point(q) => q.start_points(point_density),
            ChargeDistribution::Line(d) => d.start_points(),
            ChargeDistribution::Cylinder(d) => d.start_points(),
            ChargeDistribution::Plane(d) => d.start_points(),
            ChargeDistribution::Sphere(d) => d.start_points(),
        }
    }

    /// Issue the draw calls for this source with the surface program bound.
    ///
    /// Point charges are drawn as sprites by the scene, not as surfaces, so
    /// they draw nothing here.
    pub fn render<B: RenderBackend>(&self, backend: &mut B, registry: &mut VertexRegistry<B::Buffer>) -> Result<(), RegistryError> {
        match self {
            ChargeDistribution::Point(_) => Ok(()),
            ChargeDistribution::Line(d) => d.render(backend, registry),
            ChargeDistribution::Cylinder(d) => d.render(backend, registry),
            ChargeDistribution::Plane(d) => d.render(backend, registry),
            ChargeDistribution::Sphere(d) => d.render(backend, registry),
        }
    }

    /// Placement of the canonical mesh, if this source is drawn as a surface.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            ChargeDistribution::Point(_) => None,
            ChargeDistribution::Line(d) => Some(d.placement()),
            ChargeDistribution::Cylinder(d) => Some(d.placement()),
            ChargeDistribution::Plane(d) => Some(d.placement()),
            ChargeDistribution::Sphere(d) => Some(d.placement()),
        }
    }

    /// Surface colour, if this source is drawn as a surface.
    pub fn color(&self) -> Option<Vec4> {
        match self {
            ChargeDistribution::Point(_) => None,
            ChargeDistribution::Line(d) => Some(d.color()),
            ChargeDistribution::Cylinder(d) => Some(d.color()),
            ChargeDistribution::Plane(d) => Some(d.color()),
            ChargeDistribution::Sphere(d) => Some(d.color()),
        }
    }

    pub fn sign(&self) -> Sign {
        match self {
            ChargeDistribution::Point(q) => q.sign(),
            ChargeDistribution::Line(d) => d.sign(),
            ChargeDistribution::Cylinder(d) => d.sign(),
            ChargeDistribution::Plane(d) => d.sign(),
            ChargeDistribution::Sphere(d) => d.sign(),
        }
    }
}

impl ElectricField for ChargeDistribution {
    fn field_at(&self, point: DVec3) -> DVec3 {
        match self {
            ChargeDistribution::Point(q) => q.field_at(point),
            ChargeDistribution::Line(d) => d.field_at(point),
            ChargeDistribution::Cylinder(d) => d.field_at(point),
            ChargeDistribution::Plane(d) => d.field_at(point),
            ChargeDistribution::Sphere(d) => d.field_at(point),
        }
    }
}

impl From<PointCharge> for ChargeDistribution {
    fn from(q: PointCharge) -> Self {
        ChargeDistribution::Point(q)
    }
}

impl From<ChargedLine> for ChargeDistribution {
    fn from(d: ChargedLine) -> Self {
        ChargeDistribution::Line(d)
    }
}

impl From<ChargedCylinder> for ChargeDistribution {
    fn from(d: ChargedCylinder) -> Self {
        ChargeDistribution::Cylinder(d)
    }
}

impl From<ChargedPlane> for ChargeDistribution {
    fn from(d: ChargedPlane) -> Self {
        ChargeDistribution::Plane(d)
    }
}

impl From<ChargedSphere> for ChargeDistribution {
    fn from(d: ChargedSphere) -> Self {
        ChargeDistribution::Sphere(d)
    }
}
