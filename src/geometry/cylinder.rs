//! Capped unit cylinder.

use std::f32::consts::TAU;

use super::{Shape, ShapeKind, SurfaceGeometry};

/// Unit cylinder: radius 1, axis along Z, `z ∈ [-½, ½]`.
///
/// Index buffer layout for `n` segments:
///
/// | Range | Primitive | Offset | Count |
/// |-------|-----------|--------|-------|
/// | top cap | triangle fan | 0 | n + 2 |
/// | side | triangle strip | n + 2 | 2n + 2 |
/// | bottom cap | triangle fan | 3n + 4 | n + 2 |
///
/// Caps and side use separate vertices so the caps keep flat `±Z` normals
/// while the wall gets radial ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CylinderMesh {
    pub segments: u16,
}

impl CylinderMesh {
    /// # Panics
    ///
    /// Panics if `segments < 3` or the mesh would not fit in 16-bit indices.
    pub fn new(segments: u16) -> Self {
        assert!(segments >= 3, "Cylinder needs at least 3 segments");
        assert!(4 * segments as usize + 2 <= u16::MAX as usize + 1, "Cylinder resolution exceeds 16-bit indices");
        Self { segments }
    }

    /// Draw ranges within this mesh's index buffer.
    pub fn ranges(&self) -> CylinderRanges {
        CylinderRanges::for_segments(self.segments as u32)
    }
}

impl Default for CylinderMesh {
    fn default() -> Self {
        Self::new(32)
    }
}

impl Shape for CylinderMesh {
    fn kind(&self) -> ShapeKind {
        ShapeKind::UnitCylinder
    }

    fn vertex_count(&self) -> usize {
        4 * self.segments as usize + 2
    }

    fn index_count(&self) -> usize {
        4 * self.segments as usize + 6
    }

    fn compute_geometry(&self, out: &mut SurfaceGeometry) {
        out.clear();
        let n = self.segments;
        let ring: Vec<(f32, f32)> = (0..n)
            .map(|i| {
                let (s, c) = (i as f32 * TAU / n as f32).sin_cos();
                (c, s)
            })
            .collect();

        // Top cap: center then ring.
        let top_center = out.push_vertex([0.0, 0.0, 0.5], [0.0, 0.0, 1.0]);
        for &(c, s) in &ring {
            out.push_vertex([c, s, 0.5], [0.0, 0.0, 1.0]);
        }
        // Side: top ring then bottom ring, radial normals.
        let side_top = out.vertex_count() as u16;
        for &(c, s) in &ring {
            out.push_vertex([c, s, 0.5], [c, s, 0.0]);
        }
        let side_bottom = out.vertex_count() as u16;
        for &(c, s) in &ring {
            out.push_vertex([c, s, -0.5], [c, s, 0.0]);
        }
        // Bottom cap: center then ring.
        let bottom_center = out.push_vertex([0.0, 0.0, -0.5], [0.0, 0.0, -1.0]);
        for &(c, s) in &ring {
            out.push_vertex([c, s, -0.5], [0.0, 0.0, -1.0]);
        }

        out.indices.push(top_center);
        out.indices.extend((0..=n).map(|i| top_center + 1 + i % n));

        for i in 0..=n {
            out.indices.push(side_top + i % n);
            out.indices.push(side_bottom + i % n);
        }

        // Reversed so the fan winds counter-clockwise seen from -Z.
        out.indices.push(bottom_center);
        out.indices.extend((0..=n).rev().map(|i| bottom_center + 1 + i % n));
    }
}

/// Index ranges of the three parts of a [`CylinderMesh`], as `(offset, count)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CylinderRanges {
    pub top: (u32, u32),
    pub side: (u32, u32),
    pub bottom: (u32, u32),
}

impl CylinderRanges {
    pub fn for_segments(n: u32) -> Self {
        Self {
            top: (0, n + 2),
            side: (n + 2, 2 * n + 2),
            bottom: (3 * n + 4, n + 2),
        }
    }

    /// Recover the ranges from a total index count of `4n + 6`.
    pub fn from_index_count(index_count: u32) -> Self {
        Self::for_segments(index_count.saturating_sub(6) / 4)
    }
}
