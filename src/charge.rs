//! Point charges.

use glam::DVec3;

use crate::field::ElectricField;
use crate::seed::{fibonacci_sphere, line_count, SeedPoint, Sign};

/// A point charge `Q` at a fixed position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointCharge {
    charge: f64,
    position: DVec3,
}

impl PointCharge {
    pub fn new(charge: f64, position: DVec3) -> Self {
        Self { charge, position }
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// The same charge moved to `position`.
    pub fn with_position(self, position: DVec3) -> Self {
        Self { position, ..self }
    }

    pub fn sign(&self) -> Sign {
        Sign::of(self.charge)
    }

    /// `round(rho · |Q|)` seeds spread over the unit sphere around the charge.
    ///
    /// A neutral charge, or a count that rounds to zero, gives no seeds.
    pub fn start_points(&self, rho: f64) -> Vec<SeedPoint> {
        let sign = self.sign();
        if sign.is_neutral() {
            return Vec::new();
        }
        fibonacci_sphere(self.position, 1.0, line_count(rho, self.charge))
            .into_iter()
            .map(|p| SeedPoint::new(p, sign))
            .collect()
    }
}

impl ElectricField for PointCharge {
    fn field_at(&self, point: DVec3) -> DVec3 {
        let delta = point - self.position;
        let r2 = delta.length_squared();
        if r2 == 0.0 {
            return DVec3::ZERO;
        }
        let r = r2.sqrt();
        delta * (self.charge / (r2 * r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_at_own_position_is_zero() {
        let q = PointCharge::new(3.0, DVec3::new(1.0, 2.0, 3.0));
        let f = q.field_at(q.position());
        assert_eq!(f, DVec3::ZERO);
    }

    #[test]
    fn test_inverse_square() {
        let q = PointCharge::new(2.0, DVec3::ZERO);
        let f1 = q.field_at(DVec3::new(1.0, 0.0, 0.0));
        let f2 = q.field_at(DVec3::new(0.0, 2.0, 0.0));
        assert!((f1 - DVec3::new(2.0, 0.0, 0.0)).length() < 1e-12);
        assert!((f2 - DVec3::new(0.0, 0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_negative_charge_points_inward() {
        let q = PointCharge::new(-1.0, DVec3::ZERO);
        assert!(q.field_at(DVec3::new(0.0, 0.0, 2.0)).z < 0.0);
    }

    #[test]
    fn test_start_points_count_and_sign() {
        let q = PointCharge::new(5.0, DVec3::new(0.0, 1.0, 0.0));
        let seeds = q.start_points(2.0);
        assert_eq!(seeds.len(), 10);
        for s in &seeds {
            assert_eq!(s.sign, Sign::Positive);
            assert!(((s.position - q.position()).length() - 1.0).abs() < 1e-12);
        }

        let neg = PointCharge::new(-3.0, DVec3::ZERO).start_points(1.0);
        assert_eq!(neg.len(), 3);
        assert!(neg.iter().all(|s| s.sign == Sign::Negative));
    }

    #[test]
    fn test_neutral_charge_has_no_seeds() {
        assert!(PointCharge::new(0.0, DVec3::ZERO).start_points(10.0).is_empty());
        assert!(PointCharge::new(1.0, DVec3::ZERO).start_points(0.0).is_empty());
    }

    #[test]
    fn test_with_position_keeps_charge() {
        let q = PointCharge::new(4.0, DVec3::ZERO).with_position(DVec3::ONE);
        assert_eq!(q.charge(), 4.0);
        assert_eq!(q.position(), DVec3::ONE);
    }
}
