//! Seed points for field-line tracing.

use glam::DVec3;

/// Direction in which a field line is traced from its seed.
///
/// Positive seeds follow the field, negative seeds run against it, so every
/// line runs from positive toward negative charge. Neutral seeds come from
/// zero net charge and are never traced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
    Neutral,
}

impl Sign {
    /// Sign of a charge or density value.
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Neutral
        }
    }

    /// `+1`, `-1` or `0`.
    pub fn as_f64(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
            Sign::Neutral => 0.0,
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Sign::Neutral
    }
}

/// Starting location and direction for one field line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedPoint {
    pub position: DVec3,
    pub sign: Sign,
}

impl SeedPoint {
    pub fn new(position: DVec3, sign: Sign) -> Self {
        Self { position, sign }
    }
}

/// `n` points spread evenly over a sphere with a golden-angle spiral.
///
/// Points run from the `+Y` pole to the `-Y` pole. The layout is a pure
/// function of its arguments.
pub fn fibonacci_sphere(center: DVec3, radius: f64, n: usize) -> Vec<DVec3> {
    let mut out = Vec::with_capacity(n);
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    for i in 0..n {
        let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
        let r = (1.0 - y * y).sqrt();
        let theta = golden_angle * i as f64;
        out.push(center + radius * DVec3::new(r * theta.cos(), y, r * theta.sin()));
    }
    out
}

/// Number of field lines for a charge: `round(rho · |q|)`.
///
/// Non-finite or non-positive products give zero.
pub fn line_count(rho: f64, charge: f64) -> usize {
    let n = (rho * charge.abs()).round();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_of() {
        assert_eq!(Sign::of(2.5), Sign::Positive);
        assert_eq!(Sign::of(-0.1), Sign::Negative);
        assert_eq!(Sign::of(0.0), Sign::Neutral);
        assert_eq!(Sign::of(f64::NAN), Sign::Neutral);
        assert_eq!(Sign::Negative.as_f64(), -1.0);
    }

    #[test]
    fn test_fibonacci_sphere_on_radius() {
        let center = DVec3::new(1.0, -2.0, 3.0);
        let points = fibonacci_sphere(center, 2.0, 40);
        assert_eq!(points.len(), 40);
        for p in &points {
            assert!(((*p - center).length() - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_fibonacci_sphere_is_balanced() {
        let points = fibonacci_sphere(DVec3::ZERO, 1.0, 200);
        let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
        assert!(centroid.length() < 0.05, "centroid {:?}", centroid);
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(2.0, 5.0), 10);
        assert_eq!(line_count(2.0, -5.0), 10);
        assert_eq!(line_count(0.0, 5.0), 0);
        assert_eq!(line_count(0.2, 1.0), 0);
        assert_eq!(line_count(f64::INFINITY, 1.0), 0);
    }
}
