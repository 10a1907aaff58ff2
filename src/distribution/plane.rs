//! Uniformly charged rectangular plane.

use std::f64::consts::TAU;

use glam::{DVec3, Vec4};

use super::axis::check_finite;
use crate::backend::{CullFace, Primitive, RenderBackend};
use crate::error::{GeometryError, RegistryError};
use crate::field::ElectricField;
use crate::geometry::{Shape, UnitSquare, VertexRegistry};
use crate::seed::{SeedPoint, Sign};
use crate::shader::uniform;
use crate::transform::Placement;
use crate::visuals::{surface_color, SurfaceKind};

/// Canonical off-plane offset of plane seeds, either side of the surface.
const SEED_OFFSET: f64 = 0.4;

/// A rectangle of surface charge density `σ`.
///
/// The field is that of an infinite plane: uniform magnitude `2πσ`, pointing
/// away from the plane on both sides. Corners are given in order around the
/// rectangle; the normal follows the right-hand rule from the first edge
/// (`c0 → c1`) to the last (`c3 → c0`) reversed.
#[derive(Clone, Debug, PartialEq)]
pub struct ChargedPlane {
    corners: [DVec3; 4],
    sigma: f64,
    rho: f64,
    normal: DVec3,
    placement: Placement,
}

impl ChargedPlane {
    pub fn new(sigma: f64, rho: f64, corners: [DVec3; 4]) -> Result<Self, GeometryError> {
        check_finite(sigma, "surface charge density")?;
        check_finite(rho, "field line density")?;
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(GeometryError::NonFinite("plane corner"));
        }
        let placement = Placement::rectangle(&corners).ok_or(GeometryError::DegeneratePlane)?;
        let normal = placement.rotation().z_axis.normalize();
        Ok(Self {
            corners,
            sigma,
            rho,
            normal,
            placement,
        })
    }

    pub fn with_sigma(self, sigma: f64) -> Self {
        Self { sigma, ..self }
    }

    pub fn with_rho(self, rho: f64) -> Self {
        Self { rho, ..self }
    }

    pub fn corners(&self) -> &[DVec3; 4] {
        &self.corners
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Unit normal of the plane.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn sign(&self) -> Sign {
        Sign::of(self.sigma)
    }

    /// Signed distance from the plane, positive on the normal's side.
    pub fn distance(&self, point: DVec3) -> f64 {
        (point - self.corners[0]).dot(self.normal)
    }

    /// Seeds on a grid with one field line per `1/|σρ|` of area.
    ///
    /// The grid is walked column by column, reversing direction at each edge,
    /// with a pair of seeds either side of the plane at every grid point.
    pub fn start_points(&self) -> Vec<SeedPoint> {
        let density = (self.sigma * self.rho).abs();
        if !(density > 0.0) {
            return Vec::new();
        }
        let spacing = (1.0 / density).sqrt();
        let ax = spacing / self.placement.scale.x.abs();
        let mut ay = spacing / self.placement.scale.y.abs();
        let sign = self.sign();

        let (left, right, bottom, top) = (-0.5, 0.5, -0.5, 0.5);
        let mut x = (left + ax / 2.0).min((right - left) / 2.0);
        let mut y = (bottom + ay / 2.0).min((top - bottom) / 2.0);

        let mut seeds = Vec::new();
        while x <= right {
            for z in [SEED_OFFSET, -SEED_OFFSET] {
                seeds.push(SeedPoint::new(self.placement.transform_point(DVec3::new(x, y, z)), sign));
            }
            y += ay;
            if y > top {
                y = (top - (y - top)).max(bottom);
                x += ax;
                ay = -ay;
            } else if y < bottom {
                y = (bottom - (y - bottom)).min(top);
                x += ax;
                ay = -ay;
            }
        }
        seeds
    }

    pub fn color(&self) -> Vec4 {
        surface_color(SurfaceKind::Plane, self.sign())
    }

    /// Draw both faces of the rectangle, then restore back-face culling.
    pub fn render<B: RenderBackend>(&self, backend: &mut B, registry: &mut VertexRegistry<B::Buffer>) -> Result<(), RegistryError> {
        let buffers = UnitSquare.get_vertex_buffers(registry, backend)?;
        backend.set_uniform_vec4(uniform::SURFACE_COLOR, self.color());
        backend.set_uniform_mat4(uniform::MODEL, &self.placement.to_mat4());
        backend.set_culling(None);
        buffers.bind(backend);
        backend.draw_elements(Primitive::Triangles, buffers.index_count, 0);
        backend.set_culling(Some(CullFace::Back));
        Ok(())
    }
}

impl ElectricField for ChargedPlane {
    fn field_at(&self, point: DVec3) -> DVec3 {
        let d = self.distance(point);
        if d == 0.0 {
            return DVec3::ZERO;
        }
        let e = TAU * self.sigma;
        if d > 0.0 {
            self.normal * e
        } else {
            -self.normal * e
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4 × 2 rectangle in the z = 1 plane, normal +Z.
    fn flat_plane(sigma: f64, rho: f64) -> ChargedPlane {
        ChargedPlane::new(
            sigma,
            rho,
            [
                DVec3::new(-2.0, 1.0, 1.0),
                DVec3::new(2.0, 1.0, 1.0),
                DVec3::new(2.0, -1.0, 1.0),
                DVec3::new(-2.0, -1.0, 1.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_normal_and_distance() {
        let plane = flat_plane(1.0, 1.0);
        assert!((plane.normal() - DVec3::Z).length() < 1e-12);
        assert!((plane.distance(DVec3::new(5.0, 5.0, 3.0)) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_field_is_uniform_and_opposite() {
        let plane = flat_plane(0.5, 1.0);
        let above = plane.field_at(DVec3::new(0.3, -0.2, 1.0 + 1e-3));
        let below = plane.field_at(DVec3::new(0.3, -0.2, 1.0 - 1e-3));
        let far = plane.field_at(DVec3::new(100.0, 0.0, 50.0));
        assert!((above.length() - TAU * 0.5).abs() < 1e-12);
        assert_eq!(above, -below);
        assert_eq!(above, far);
    }

    #[test]
    fn test_field_on_plane_is_zero() {
        assert_eq!(flat_plane(1.0, 1.0).field_at(DVec3::new(0.5, 0.5, 1.0)), DVec3::ZERO);
    }

    #[test]
    fn test_seed_grid() {
        // Spacing 1: a 4 × 2 rectangle gets a 4 × 2 grid, two seeds per point.
        let plane = flat_plane(1.0, 1.0);
        let seeds = plane.start_points();
        assert_eq!(seeds.len(), 16);
        for seed in &seeds {
            assert!((plane.distance(seed.position).abs() - 0.4).abs() < 1e-9);
            assert!(seed.position.x.abs() <= 2.0 && seed.position.y.abs() <= 1.0);
            assert_eq!(seed.sign, Sign::Positive);
        }
        // First grid point is half a spacing in from the corner.
        assert!((seeds[0].position.x + 1.5).abs() < 1e-9);
        assert!((seeds[0].position.y + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_denser_grid_has_more_seeds() {
        let sparse = flat_plane(1.0, 1.0).start_points().len();
        let dense = flat_plane(-1.0, 4.0).start_points().len();
        assert!(dense > sparse);
        assert!(flat_plane(-1.0, 4.0).start_points().iter().all(|s| s.sign == Sign::Negative));
    }

    #[test]
    fn test_neutral_plane_has_no_seeds() {
        assert!(flat_plane(0.0, 1.0).start_points().is_empty());
        assert!(flat_plane(1.0, 0.0).start_points().is_empty());
    }

    #[test]
    fn test_collinear_corners_rejected() {
        let corners = [DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, 0.0), DVec3::new(3.0, 0.0, 0.0)];
        assert_eq!(ChargedPlane::new(1.0, 1.0, corners), Err(GeometryError::DegeneratePlane));
    }
}
