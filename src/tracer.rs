//! Field-line tracing with arrow glyphs.
//!
//! A line is traced by repeatedly stepping a fixed distance `ds` along the
//! unit field direction (or against it, for negative seeds) until either the
//! point budget is spent or the field vanishes. Every `arrow_spacing` of arc
//! length a chevron is emitted pointing along the line.
//!
//! # Example
//!
//! ```ignore
//! let tracer = FieldLineTracer::new(&charges, TraceConfig::default().with_step(0.1));
//! let lines = tracer.trace_all(&charges.seed_points());
//! ```

use glam::DVec3;
use log::{debug, warn};

use crate::field::ElectricField;
use crate::seed::SeedPoint;

/// Parameters for tracing field lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceConfig {
    /// Most points recorded per line.
    pub max_points: usize,
    /// Step length.
    pub ds: f64,
    /// Arc length between arrow glyphs.
    pub arrow_spacing: f64,
    /// Length of each arrow stroke.
    pub arrow_size: f64,
}

impl Default for TraceConfig {
    /// - `max_points`: 5000
    /// - `ds`: 0.3
    /// - `arrow_spacing`: 50
    /// - `arrow_size`: 3
    fn default() -> Self {
        Self {
            max_points: 5000,
            ds: 0.3,
            arrow_spacing: 50.0,
            arrow_size: 3.0,
        }
    }
}

impl TraceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn with_step(mut self, ds: f64) -> Self {
        self.ds = ds;
        self
    }

    pub fn with_arrow_spacing(mut self, spacing: f64) -> Self {
        self.arrow_spacing = spacing;
        self
    }

    pub fn with_arrow_size(mut self, size: f64) -> Self {
        self.arrow_size = size;
        self
    }
}

/// Why a trace stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Every allowed point was recorded.
    MaxStepsReached,
    /// The field was zero at the last point.
    FieldVanished,
    /// Nothing to trace: neutral seed, or a step that is not positive.
    Degenerate,
}

/// One traced field line.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldLine {
    pub seed: SeedPoint,
    /// Sampled positions, starting at the seed.
    pub points: Vec<DVec3>,
    /// Arrow glyphs as line-list vertices, four per arrow.
    pub arrows: Vec<DVec3>,
    pub termination: Termination,
}

impl FieldLine {
    /// Number of recorded points.
    pub fn step_count(&self) -> usize {
        self.points.len()
    }

    pub fn arrow_count(&self) -> usize {
        self.arrows.len() / 4
    }

    /// Points packed as `xyz` floats for a line strip.
    pub fn points_f32(&self) -> Vec<f32> {
        pack(&self.points)
    }

    /// Arrow vertices packed as `xyz` floats for a line list.
    pub fn arrows_f32(&self) -> Vec<f32> {
        pack(&self.arrows)
    }
}

fn pack(points: &[DVec3]) -> Vec<f32> {
    points.iter().flat_map(|p| p.as_vec3().to_array()).collect()
}

/// Traces field lines through any [`ElectricField`].
pub struct FieldLineTracer<'a, F: ElectricField + ?Sized> {
    field: &'a F,
    config: TraceConfig,
}

impl<'a, F: ElectricField + ?Sized> FieldLineTracer<'a, F> {
    pub fn new(field: &'a F, config: TraceConfig) -> Self {
        Self { field, config }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Trace one line from `seed`.
    pub fn trace(&self, seed: SeedPoint) -> FieldLine {
        let cfg = &self.config;
        let mut line = FieldLine {
            seed,
            points: Vec::new(),
            arrows: Vec::new(),
            termination: Termination::MaxStepsReached,
        };

        if cfg.max_points == 0 {
            return line;
        }
        if seed.sign.is_neutral() || !(cfg.ds > 0.0) || !cfg.ds.is_finite() {
            warn!("Skipping degenerate trace from {:?} (ds = {})", seed, cfg.ds);
            line.points.push(seed.position);
            line.termination = Termination::Degenerate;
            return line;
        }

        let sign = seed.sign.as_f64();
        let mut p = seed.position;
        let mut since_arrow = 0.0;
        line.points.reserve(cfg.max_points);

        for _ in 0..cfg.max_points {
            line.points.push(p);
            let field = self.field.field_at(p);
            let f = field.length();
            if !(f > 0.0) {
                line.termination = Termination::FieldVanished;
                break;
            }
            let direction = field / f;
            p += sign * direction * cfg.ds;
            since_arrow += cfg.ds;
            if since_arrow > cfg.arrow_spacing {
                since_arrow = 0.0;
                line.arrows.extend(arrow_glyph(p, direction, sign, cfg.arrow_size));
            }
        }

        debug!(
            "Traced {} points, {} arrows from {:?}: {:?}",
            line.points.len(),
            line.arrow_count(),
            seed.position,
            line.termination
        );
        line
    }

    /// Trace every non-neutral seed, in order.
    pub fn trace_all(&self, seeds: &[SeedPoint]) -> Vec<FieldLine> {
        seeds
            .iter()
            .filter(|s| !s.sign.is_neutral())
            .map(|s| self.trace(*s))
            .collect()
    }
}

/// A vector perpendicular to unit `direction`.
///
/// Two components are fixed at 1 and the third solved from `d · n = 0`,
/// dividing by the largest component of `d`.
fn perpendicular(direction: DVec3) -> DVec3 {
    let a = direction.abs();
    let (x, y, z) = (direction.x, direction.y, direction.z);
    if a.z >= a.x && a.z >= a.y {
        DVec3::new(1.0, 1.0, -(x + y) / z)
    } else if a.y >= a.x {
        DVec3::new(1.0, -(x + z) / y, 1.0)
    } else {
        DVec3::new(-(y + z) / x, 1.0, 1.0)
    }
}

/// Two strokes meeting at `tip`, pointing along `sign · direction`.
fn arrow_glyph(tip: DVec3, direction: DVec3, sign: f64, size: f64) -> [DVec3; 4] {
    let n = perpendicular(direction).normalize() * size;
    let tail = tip - sign * size * direction;
    [tail + n, tip, tip, tail - n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::PointCharge;
    use crate::seed::Sign;

    struct Uniform(DVec3);

    impl ElectricField for Uniform {
        fn field_at(&self, _point: DVec3) -> DVec3 {
            self.0
        }
    }

    fn seed(x: f64, y: f64, z: f64, sign: Sign) -> SeedPoint {
        SeedPoint::new(DVec3::new(x, y, z), sign)
    }

    // ========== Config Tests ==========

    #[test]
    fn test_config_defaults() {
        let cfg = TraceConfig::default();
        assert_eq!(cfg.max_points, 5000);
        assert_eq!(cfg.ds, 0.3);
        assert_eq!(cfg.arrow_spacing, 50.0);
        assert_eq!(cfg.arrow_size, 3.0);
    }

    #[test]
    fn test_config_builder() {
        let cfg = TraceConfig::new()
            .with_max_points(10)
            .with_step(0.5)
            .with_arrow_spacing(2.0)
            .with_arrow_size(0.25);
        assert_eq!(cfg, TraceConfig { max_points: 10, ds: 0.5, arrow_spacing: 2.0, arrow_size: 0.25 });
    }

    // ========== Tracing Tests ==========

    #[test]
    fn test_uniform_field_steps_evenly() {
        let field = Uniform(DVec3::new(0.0, 2.0, 0.0));
        let tracer = FieldLineTracer::new(&field, TraceConfig::new().with_max_points(11).with_step(0.5));
        let line = tracer.trace(seed(0.0, 0.0, 0.0, Sign::Positive));
        assert_eq!(line.step_count(), 11);
        assert_eq!(line.termination, Termination::MaxStepsReached);
        assert!((line.points[10] - DVec3::new(0.0, 5.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_negative_seed_runs_against_field() {
        let field = Uniform(DVec3::X);
        let tracer = FieldLineTracer::new(&field, TraceConfig::new().with_max_points(3).with_step(1.0));
        let line = tracer.trace(seed(0.0, 0.0, 0.0, Sign::Negative));
        assert_eq!(line.points[2], DVec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_stops_where_field_vanishes() {
        let field = Uniform(DVec3::ZERO);
        let tracer = FieldLineTracer::new(&field, TraceConfig::default());
        let line = tracer.trace(seed(1.0, 2.0, 3.0, Sign::Positive));
        assert_eq!(line.points, vec![DVec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(line.termination, Termination::FieldVanished);
    }

    #[test]
    fn test_stops_on_point_charge() {
        // Stepping straight into the charge lands exactly on it.
        let q = PointCharge::new(-1.0, DVec3::ZERO);
        let tracer = FieldLineTracer::new(&q, TraceConfig::new().with_step(0.5).with_max_points(100));
        let line = tracer.trace(seed(2.0, 0.0, 0.0, Sign::Positive));
        assert_eq!(line.termination, Termination::FieldVanished);
        assert_eq!(line.step_count(), 5);
        assert_eq!(*line.points.last().unwrap(), DVec3::ZERO);
    }

    #[test]
    fn test_degenerate_inputs() {
        let field = Uniform(DVec3::X);
        let origin = seed(0.0, 0.0, 0.0, Sign::Positive);

        let empty = FieldLineTracer::new(&field, TraceConfig::new().with_max_points(0)).trace(origin);
        assert!(empty.points.is_empty());

        for ds in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let line = FieldLineTracer::new(&field, TraceConfig::new().with_step(ds)).trace(origin);
            assert_eq!(line.points, vec![origin.position]);
            assert_eq!(line.termination, Termination::Degenerate);
        }

        let neutral = FieldLineTracer::new(&field, TraceConfig::default()).trace(seed(0.0, 0.0, 0.0, Sign::Neutral));
        assert_eq!(neutral.termination, Termination::Degenerate);
    }

    #[test]
    fn test_trace_all_skips_neutral() {
        let field = Uniform(DVec3::Z);
        let tracer = FieldLineTracer::new(&field, TraceConfig::new().with_max_points(4));
        let seeds = [
            seed(0.0, 0.0, 0.0, Sign::Positive),
            seed(1.0, 0.0, 0.0, Sign::Neutral),
            seed(2.0, 0.0, 0.0, Sign::Negative),
        ];
        let lines = tracer.trace_all(&seeds);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].seed.position.x, 2.0);
    }

    // ========== Arrow Tests ==========

    #[test]
    fn test_arrow_spacing() {
        let field = Uniform(DVec3::X);
        let cfg = TraceConfig::new().with_max_points(100).with_step(1.0).with_arrow_spacing(9.5);
        let line = FieldLineTracer::new(&field, cfg).trace(seed(0.0, 0.0, 0.0, Sign::Positive));
        // An arrow after every 10 steps.
        assert_eq!(line.arrow_count(), 10);
        assert_eq!(line.arrows[1], DVec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_arrow_geometry() {
        for direction in [DVec3::X, DVec3::Y, DVec3::Z, DVec3::new(1.0, -2.0, 0.5).normalize()] {
            let tip = DVec3::new(1.0, 2.0, 3.0);
            let [a, b, c, d] = arrow_glyph(tip, direction, 1.0, 2.0);
            assert_eq!(b, tip);
            assert_eq!(c, tip);
            let tail = (a + d) / 2.0;
            assert!((tail - (tip - 2.0 * direction)).length() < 1e-12);
            let n = a - tail;
            assert!((n.length() - 2.0).abs() < 1e-12);
            assert!(n.dot(direction).abs() < 1e-12);
        }
    }

    #[test]
    fn test_arrow_flips_for_negative_seed() {
        let [a, _, _, d] = arrow_glyph(DVec3::ZERO, DVec3::X, -1.0, 1.0);
        assert!((a + d).x > 0.0);
    }

    #[test]
    fn test_packed_output() {
        let field = Uniform(DVec3::Y);
        let line = FieldLineTracer::new(&field, TraceConfig::new().with_max_points(2).with_step(1.0))
            .trace(seed(0.0, 0.0, 0.0, Sign::Positive));
        assert_eq!(line.points_f32(), vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert!(line.arrows_f32().is_empty());
    }
}
