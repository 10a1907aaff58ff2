//! The electric field capability shared by every charge source.
//!
//! Anything that contributes a field implements [`ElectricField`]: single
//! point charges, each continuous distribution, and the
//! [`ChargeCollection`](crate::collection::ChargeCollection) that superposes
//! them. The tracer only needs this trait, so it can follow lines through a
//! single source as easily as through a whole scene.
//!
//! Fields are in the visualisation's own units: `Q/r²` with no Coulomb
//! constant. Evaluation never returns NaN for finite input; points where the
//! direction is undefined (on a point charge, on a line's axis, inside a
//! cavity) give [`DVec3::ZERO`].

use glam::DVec3;

/// A source of electric field.
pub trait ElectricField {
    /// Field vector at `point`.
    fn field_at(&self, point: DVec3) -> DVec3;

    /// Field magnitude at `point`.
    fn magnitude_at(&self, point: DVec3) -> f64 {
        self.field_at(point).length()
    }
}

impl<F: ElectricField + ?Sized> ElectricField for &F {
    fn field_at(&self, point: DVec3) -> DVec3 {
        (**self).field_at(point)
    }
}

impl<F: ElectricField> ElectricField for [F] {
    fn field_at(&self, point: DVec3) -> DVec3 {
        self.iter().map(|source| source.field_at(point)).sum()
    }
}

/// Field of magnitude `magnitude / |n|` along the perpendicular offset `n`.
///
/// Shared by the line and cylinder sources. A zero offset gives zero.
pub(crate) fn radial_field(offset: DVec3, magnitude_times_r: f64) -> DVec3 {
    let r2 = offset.length_squared();
    if r2 == 0.0 {
        return DVec3::ZERO;
    }
    // (m / r) · (n / r)
    offset * (magnitude_times_r / r2)
}
