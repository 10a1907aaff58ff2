//! Geometry shared by the line and cylinder distributions.

use glam::DVec3;

use crate::error::GeometryError;
use crate::seed::{SeedPoint, Sign};
use crate::transform::Placement;

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Unit-circle directions of the eight seeds in one cross-section.
const CROSS_SECTION: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
];

/// The infinite line through two endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Axis {
    p0: DVec3,
    p1: DVec3,
    delta: DVec3,
    length_sq: f64,
}

impl Axis {
    pub(crate) fn new(p0: DVec3, p1: DVec3) -> Result<Self, GeometryError> {
        if !p0.is_finite() || !p1.is_finite() {
            return Err(GeometryError::NonFinite("axis endpoint"));
        }
        let delta = p1 - p0;
        let length_sq = delta.length_squared();
        if length_sq == 0.0 {
            return Err(GeometryError::ZeroLengthAxis);
        }
        Ok(Self { p0, p1, delta, length_sq })
    }

    pub(crate) fn endpoints(&self) -> (DVec3, DVec3) {
        (self.p0, self.p1)
    }

    pub(crate) fn length(&self) -> f64 {
        self.length_sq.sqrt()
    }

    /// Perpendicular offset from the nearest point on the axis to `point`.
    pub(crate) fn offset(&self, point: DVec3) -> DVec3 {
        let u = (point - self.p0).dot(self.delta) / self.length_sq;
        point - (self.p0 + u * self.delta)
    }
}

/// Eight seeds per cross-section at `sections` evenly spaced heights.
///
/// Seeds sit `seed_radius` from the axis in world units. The first and last
/// cross-sections lie on the end caps.
pub(crate) fn cross_section_seeds(placement: &Placement, seed_radius: f64, sections: usize, sign: Sign) -> Vec<SeedPoint> {
    // Seed radius in the canonical frame.
    let k = seed_radius / placement.scale.x;
    let step = if sections > 1 { 1.0 / (sections - 1) as f64 } else { 0.0 };

    let mut seeds = Vec::with_capacity(8 * sections);
    for i in 0..sections {
        let s = -0.5 + i as f64 * step;
        for (cx, cy) in CROSS_SECTION {
            let canonical = DVec3::new(k * cx, k * cy, s);
            seeds.push(SeedPoint::new(placement.transform_point(canonical), sign));
        }
    }
    seeds
}

/// Number of cross-sections for a field line budget: `max(2, round(|lines|))`.
pub(crate) fn section_count(lines: f64) -> usize {
    let n = lines.abs().round();
    if n.is_finite() && n > 2.0 {
        n as usize
    } else {
        2
    }
}

pub(crate) fn check_finite(value: f64, what: &'static str) -> Result<(), GeometryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_perpendicular() {
        let axis = Axis::new(DVec3::new(1.0, 1.0, 0.0), DVec3::new(1.0, 1.0, 4.0)).unwrap();
        let n = axis.offset(DVec3::new(4.0, 5.0, 17.0));
        assert!((n - DVec3::new(3.0, 4.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_zero_length_axis() {
        assert_eq!(Axis::new(DVec3::ONE, DVec3::ONE), Err(GeometryError::ZeroLengthAxis));
        assert!(matches!(
            Axis::new(DVec3::ZERO, DVec3::new(f64::NAN, 0.0, 0.0)),
            Err(GeometryError::NonFinite(_))
        ));
    }

    #[test]
    fn test_section_count() {
        assert_eq!(section_count(0.0), 2);
        assert_eq!(section_count(-7.4), 7);
        assert_eq!(section_count(f64::NAN), 2);
    }

    #[test]
    fn test_cross_section_seeds_on_radius() {
        let p0 = DVec3::new(0.0, 0.0, -2.0);
        let p1 = DVec3::new(0.0, 0.0, 2.0);
        let placement = Placement::segment(p0, p1, 3.0).unwrap();
        let axis = Axis::new(p0, p1).unwrap();

        let seeds = cross_section_seeds(&placement, 1.5, 3, Sign::Negative);
        assert_eq!(seeds.len(), 24);
        for seed in &seeds {
            assert!((axis.offset(seed.position).length() - 1.5).abs() < 1e-9);
            assert_eq!(seed.sign, Sign::Negative);
        }
        // End sections on the caps, middle one halfway.
        assert!((seeds[0].position.z + 2.0).abs() < 1e-9);
        assert!(seeds[8].position.z.abs() < 1e-9);
        assert!((seeds[16].position.z - 2.0).abs() < 1e-9);
    }
}
