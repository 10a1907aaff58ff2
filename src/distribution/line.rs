//! Uniformly charged line segment.

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

/// Default radius of the translucent tube drawn around a line.
pub const DEFAULT_DISPLAY_RADIUS: f64 = 3.0;

/// Distance of line seeds from the axis.
const SEED_RADIUS: f64 = 1.0;

/// A line charge with linear density `λ` between two endpoints.
///
/// The field is that of an infinite line through the endpoints: `2λ/r`
/// pointing away from the axis. Only the segment is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ChargedLine {
    axis: Axis,
    lambda: f64,
    rho: f64,
    display_radius: f64,
    placement: Placement,
}

impl ChargedLine {
    /// Line from `p0` to `p1` with linear density `lambda` and `rho` field
    /// lines per unit charge.
    pub fn new(p0: DVec3, p1: DVec3, lambda: f64, rho: f64) -> Result<Self, GeometryError> {
        check_finite(lambda, "line charge density")?;
        check_finite(rho, "field line density")?;
        let axis = Axis::new(p0, p1)?;
        let placement = Placement::segment(p0, p1, DEFAULT_DISPLAY_RADIUS).ok_or(GeometryError::ZeroLengthAxis)?;
        Ok(Self {
            axis,
            lambda,
            rho,
            display_radius: DEFAULT_DISPLAY_RADIUS,
            placement,
        })
    }

    /// Same line drawn as a tube of a different radius.
    pub fn with_display_radius(self, radius: f64) -> Result<Self, GeometryError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(GeometryError::InvalidRadii { inner: 0.0, outer: radius });
        }
        let (p0, p1) = self.axis.endpoints();
        let placement = Placement::segment(p0, p1, radius).ok_or(GeometryError::ZeroLengthAxis)?;
        Ok(Self {
            display_radius: radius,
            placement,
            ..self
        })
    }

    pub fn with_lambda(self, lambda: f64) -> Self {
        Self { lambda, ..self }
    }

    pub fn with_rho(self, rho: f64) -> Self {
        Self { rho, ..self }
    }

    pub fn endpoints(&self) -> (DVec3, DVec3) {
        self.axis.endpoints()
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn height(&self) -> f64 {
        self.axis.length()
    }

    pub fn display_radius(&self) -> f64 {
        self.display_radius
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn sign(&self) -> Sign {
        Sign::of(self.lambda)
    }

    /// Eight seeds per cross-section, `max(2, round(|λ·ρ·h|))` cross-sections.
    pub fn start_points(&self) -> Vec<SeedPoint> {
        if self.rho == 0.0 {
            return Vec::new();
        }
        let sections = section_count(self.lambda * self.rho * self.height());
        cross_section_seeds(&self.placement, SEED_RADIUS, sections, self.sign())
    }

    pub fn color(&self) -> Vec4 {
        surface_color(SurfaceKind::Line, self.sign())
    }

    /// Draw the line as a solid translucent tube.
    pub fn render<B: RenderBackend>(&self, backend: &mut B, registry: &mut VertexRegistry<B::Buffer>) -> Result<(), RegistryError> {
        draw_tube_shells(backend, registry, &self.placement, 0.0, self.display_radius, self.color())
    }
}

impl ElectricField for ChargedLine {
    fn field_at(&self, point: DVec3) -> DVec3 {
        radial_field(self.axis.offset(point), 2.0 * self.lambda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z_line(lambda: f64, rho: f64) -> ChargedLine {
        ChargedLine::new(DVec3::new(0.0, 0.0, -5.0), DVec3::new(0.0, 0.0, 5.0), lambda, rho).unwrap()
    }

    #[test]
    fn test_field_falls_off_as_inverse_distance() {
        let line = z_line(2.0, 1.0);
        let f1 = line.field_at(DVec3::new(1.0, 0.0, 3.0));
        let f2 = line.field_at(DVec3::new(0.0, -4.0, -20.0));
        assert!((f1 - DVec3::new(4.0, 0.0, 0.0)).length() < 1e-12);
        assert!((f2 - DVec3::new(0.0, -1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_field_on_axis_is_zero() {
        assert_eq!(z_line(1.0, 1.0).field_at(DVec3::new(0.0, 0.0, 2.0)), DVec3::ZERO);
    }

    #[test]
    fn test_negative_line_attracts() {
        let f = z_line(-1.0, 1.0).field_at(DVec3::new(2.0, 0.0, 0.0));
        assert!(f.x < 0.0);
    }

    #[test]
    fn test_seed_count() {
        // |λ·ρ·h| = 0.5 · 1 · 10 = 5 cross-sections.
        let seeds = z_line(0.5, 1.0).start_points();
        assert_eq!(seeds.len(), 40);
        assert!(seeds.iter().all(|s| s.sign == Sign::Positive));

        // Never fewer than two cross-sections.
        assert_eq!(z_line(0.01, 1.0).start_points().len(), 16);
        assert!(z_line(1.0, 0.0).start_points().is_empty());
    }

    #[test]
    fn test_seeds_sit_one_unit_from_axis() {
        let line = ChargedLine::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, -2.0, 5.0), -1.0, 0.5).unwrap();
        for seed in line.start_points() {
            assert!((line.axis.offset(seed.position).length() - 1.0).abs() < 1e-9);
            assert_eq!(seed.sign, Sign::Negative);
        }
    }

    #[test]
    fn test_rejects_degenerate_input() {
        let p = DVec3::new(1.0, 1.0, 1.0);
        assert_eq!(ChargedLine::new(p, p, 1.0, 1.0), Err(GeometryError::ZeroLengthAxis));
        assert!(matches!(
            ChargedLine::new(DVec3::ZERO, p, f64::NAN, 1.0),
            Err(GeometryError::NonFinite(_))
        ));
        assert!(z_line(1.0, 1.0).with_display_radius(0.0).is_err());
    }

    #[test]
    fn test_with_lambda_keeps_placement() {
        let line = z_line(1.0, 1.0);
        let placement = *line.placement();
        let flipped = line.with_lambda(-1.0);
        assert_eq!(*flipped.placement(), placement);
        assert_eq!(flipped.sign(), Sign::Negative);
    }
}
