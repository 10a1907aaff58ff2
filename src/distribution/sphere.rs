//! Uniformly charged solid or hollow sphere.

use glam::{DVec3, Vec4};

use super::axis::check_finite;
use super::shells::draw_sphere_shells;
use crate::backend::RenderBackend;
use crate::error::{GeometryError, RegistryError};
use crate::field::ElectricField;
use crate::geometry::VertexRegistry;
use crate::seed::{fibonacci_sphere, line_count, SeedPoint, Sign};
use crate::transform::Placement;
use crate::visuals::{surface_color, SurfaceKind};

/// Total charge `Q` spread evenly through the shell `a ≤ r ≤ b`.
///
/// `a = 0` gives a solid ball. Outside the field is that of a point charge;
/// inside the shell it grows with the enclosed volume; the cavity is field
/// free.
#[derive(Clone, Debug, PartialEq)]
pub struct ChargedSphere {
    center: DVec3,
    inner_radius: f64,
    outer_radius: f64,
    charge: f64,
    rho: f64,
    placement: Placement,
}

impl ChargedSphere {
    pub fn new(center: DVec3, a: f64, b: f64, charge: f64, rho: f64) -> Result<Self, GeometryError> {
        if !center.is_finite() {
            return Err(GeometryError::NonFinite("sphere center"));
        }
        check_finite(a, "inner radius")?;
        check_finite(b, "outer radius")?;
        check_finite(charge, "sphere charge")?;
        check_finite(rho, "field line density")?;
        if a < 0.0 || a > b || b <= 0.0 {
            return Err(GeometryError::InvalidRadii { inner: a, outer: b });
        }
        Ok(Self {
            center,
            inner_radius: a,
            outer_radius: b,
            charge,
            rho,
            placement: Placement::centered(center, b),
        })
    }

    pub fn with_charge(self, charge: f64) -> Self {
        Self { charge, ..self }
    }

    pub fn with_rho(self, rho: f64) -> Self {
        Self { rho, ..self }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn sign(&self) -> Sign {
        Sign::of(self.charge)
    }

    /// `round(ρ·|Q|)` seeds spiralling over a sphere just outside the surface.
    pub fn start_points(&self) -> Vec<SeedPoint> {
        let sign = self.sign();
        if sign.is_neutral() {
            return Vec::new();
        }
        fibonacci_sphere(self.center, self.outer_radius + 1.0, line_count(self.rho, self.charge))
            .into_iter()
            .map(|p| SeedPoint::new(p, sign))
            .collect()
    }

    pub fn color(&self) -> Vec4 {
        surface_color(SurfaceKind::Sphere, self.sign())
    }

    /// Draw as nested shells between the two radii.
    pub fn render<B: RenderBackend>(&self, backend: &mut B, registry: &mut VertexRegistry<B::Buffer>) -> Result<(), RegistryError> {
        draw_sphere_shells(
            backend,
            registry,
            self.center,
            self.inner_radius,
            self.outer_radius,
            self.color(),
        )
    }
}

impl ElectricField for ChargedSphere {
    fn field_at(&self, point: DVec3) -> DVec3 {
        let delta = point - self.center;
        let r2 = delta.length_squared();
        let a = self.inner_radius;
        let b = self.outer_radius;
        if r2 <= a * a || r2 == 0.0 {
            return DVec3::ZERO;
        }
        let r = r2.sqrt();
        let magnitude = if r < b {
            let a3 = a * a * a;
            self.charge * (r - a3 / r2) / (b * b * b - a3)
        } else {
            self.charge / r2
        };
        delta * (magnitude / r)
    }
}
