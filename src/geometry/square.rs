//! Unit square in the XY plane.

use super::{Shape, ShapeKind, SurfaceGeometry};

/// Canonical corners in the order [`Placement::rectangle`](crate::transform::Placement::rectangle) expects.
pub const CORNERS: [[f32; 3]; 4] = [
    [-0.5, 0.5, 0.0],
    [0.5, 0.5, 0.0],
    [0.5, -0.5, 0.0],
    [-0.5, -0.5, 0.0],
];

/// Unit square centered at the origin with a single `+Z` normal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitSquare;

impl Shape for UnitSquare {
    fn kind(&self) -> ShapeKind {
        ShapeKind::UnitSquare
    }

    fn vertex_count(&self) -> usize {
        4
    }

    fn index_count(&self) -> usize {
        6
    }

    fn compute_geometry(&self, out: &mut SurfaceGeometry) {
        out.clear();
        for corner in CORNERS {
            out.push_vertex(corner, [0.0, 0.0, 1.0]);
        }
        out.indices.extend_from_slice(&[0, 3, 1, 3, 2, 1]);
    }
}
