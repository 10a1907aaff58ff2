//! Uniformly charged solid or hollow cylinder.

use std::f64::consts::PI;

use glam::{DVec3, Vec4};

use super::axis::{check_finite, cross_section_seeds, section_count, Axis};
use super::shells::draw_tube_shells;
use crate::backend::RenderBackend;
use crate::error::{GeometryError, RegistryError};
use crate::field::{radial_field, ElectricField};
use crate::geometry::VertexRegistry;
use crate::seed::{SeedPoint, Sign};
use crate::transform::Placement;
use crate::visuals::{surface_color, SurfaceKind};

/// A cylinder of volume charge density `ρq` between radii `r0` and `r1`.
///
/// `r0 = 0` gives a solid cylinder. The field is Gauss's law for an infinite
/// cylinder: zero inside the cavity, growing with the enclosed charge through
/// the wall, and that of a line charge outside.
#[derive(Clone, Debug, PartialEq)]
pub struct ChargedCylinder {
    axis: Axis,
    inner_radius: f64,
    outer_radius: f64,
    rhoq: f64,
    rhof: f64,
    placement: Placement,
}

impl ChargedCylinder {
    /// Cylinder along `p0 → p1` with radii `r0 ≤ r1`, charge density `rhoq`
    /// and `rhof` field lines per unit charge.
    pub fn new(p0: DVec3, p1: DVec3, r0: f64, r1: f64, rhoq: f64, rhof: f64) -> Result<Self, GeometryError> {
        check_finite(r0, "inner radius")?;
        check_finite(r1, "outer radius")?;
        check_finite(rhoq, "volume charge density")?;
        check_finite(rhof, "field line density")?;
        if r0 < 0.0 || r0 > r1 || r1 <= 0.0 {
            return Err(GeometryError::InvalidRadii { inner: r0, outer: r1 });
        }
        let axis = Axis::new(p0, p1)?;
        let placement = Placement::segment(p0, p1, r1).ok_or(GeometryError::ZeroLengthAxis)?;
        Ok(Self {
            axis,
            inner_radius: r0,
            outer_radius: r1,
            rhoq,
            rhof,
            placement,
        })
    }

    pub fn with_rhoq(self, rhoq: f64) -> Self {
        Self { rhoq, ..self }
    }

    pub fn with_rhof(self, rhof: f64) -> Self {
        Self { rhof, ..self }
    }

    pub fn endpoints(&self) -> (DVec3, DVec3) {
        self.axis.endpoints()
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn rhoq(&self) -> f64 {
        self.rhoq
    }

    pub fn rhof(&self) -> f64 {
        self.rhof
    }

    pub fn height(&self) -> f64 {
        self.axis.length()
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn sign(&self) -> Sign {
        Sign::of(self.rhoq)
    }

    /// Charge per unit length enclosed within distance `r` of the axis.
    pub fn enclosed_charge(&self, r: f64) -> f64 {
        let r0 = self.inner_radius;
        if r < r0 {
            0.0
        } else if r < self.outer_radius {
            PI * (r * r - r0 * r0) * self.rhoq
        } else {
            PI * (self.outer_radius * self.outer_radius - r0 * r0) * self.rhoq
        }
    }

    /// Eight seeds per cross-section at radius `r0 + 1`.
    pub fn start_points(&self) -> Vec<SeedPoint> {
        if self.rhof == 0.0 {
            return Vec::new();
        }
        let r0 = self.inner_radius;
        let r1 = self.outer_radius;
        let lines = self.rhoq * PI * (r1 * r1 - r0 * r0) * self.rhof * self.height();
        cross_section_seeds(&self.placement, r0 + 1.0, section_count(lines), self.sign())
    }

    pub fn color(&self) -> Vec4 {
        surface_color(SurfaceKind::Cylinder, self.sign())
    }

    /// Draw the wall as nested open tubes from `r1` in to `r0`.
    pub fn render<B: RenderBackend>(&self, backend: &mut B, registry: &mut VertexRegistry<B::Buffer>) -> Result<(), RegistryError> {
        draw_tube_shells(
            backend,
            registry,
            &self.placement,
            self.inner_radius,
            self.outer_radius,
            self.color(),
        )
    }
}

impl ElectricField for ChargedCylinder {
    fn field_at(&self, point: DVec3) -> DVec3 {
        let offset = self.axis.offset(point);
        let r = offset.length();
        if r < self.inner_radius {
            return DVec3::ZERO;
        }
        radial_field(offset, 2.0 * self.enclosed_charge(r))
    }
}
