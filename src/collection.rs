//! Superposition of every charge in a scene.

use glam::DVec3;

use crate::charge::PointCharge;
use crate::distribution::ChargeDistribution;
use crate::field::ElectricField;
use crate::seed::SeedPoint;

/// Default field lines per unit of point charge.
pub const DEFAULT_LINE_DENSITY: f64 = 1.0;

/// An ordered set of point charges and distributions.
///
/// Insertion order is kept: it fixes the order of seeds and of draw calls,
/// so a scene always renders and traces identically.
#[derive(Clone, Debug, PartialEq)]
pub struct ChargeCollection {
    charges: Vec<PointCharge>,
    distributions: Vec<ChargeDistribution>,
    line_density: f64,
}

impl Default for ChargeCollection {
    fn default() -> Self {
        Self {
            charges: Vec::new(),
            distributions: Vec::new(),
            line_density: DEFAULT_LINE_DENSITY,
        }
    }
}

impl ChargeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field lines per unit charge for point charges.
    pub fn with_line_density(mut self, density: f64) -> Self {
        self.line_density = density;
        self
    }

    pub fn line_density(&self) -> f64 {
        self.line_density
    }

    /// Add a point charge, returning the new charge count.
    pub fn add_charge(&mut self, charge: PointCharge) -> usize {
        self.charges.push(charge);
        self.charges.len()
    }

    /// Add a distribution, returning the new distribution count.
    pub fn add_distribution(&mut self, distribution: impl Into<ChargeDistribution>) -> usize {
        self.distributions.push(distribution.into());
        self.distributions.len()
    }

    pub fn charges(&self) -> &[PointCharge] {
        &self.charges
    }

    pub fn distributions(&self) -> &[ChargeDistribution] {
        &self.distributions
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty() && self.distributions.is_empty()
    }

    /// Seeds from every charge, then every distribution, in insertion order.
    ///
    /// Neutral seeds are kept; the tracer skips them.
    pub fn seed_points(&self) -> Vec<SeedPoint> {
        let mut seeds: Vec<SeedPoint> = self
            .charges
            .iter()
            .flat_map(|q| q.start_points(self.line_density))
            .collect();
        seeds.extend(
            self.distributions
                .iter()
                .flat_map(|d| d.start_points(self.line_density)),
        );
        seeds
    }
}

impl ElectricField for ChargeCollection {
    fn field_at(&self, point: DVec3) -> DVec3 {
        self.charges[..].field_at(point) + self.distributions[..].field_at(point)
    }
}
