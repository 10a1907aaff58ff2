//! Latitude/longitude unit sphere.

use std::f32::consts::PI;

use super::{Shape, ShapeKind, SurfaceGeometry};

/// Unit sphere built from latitude and longitude bands.
///
/// Band `θ` runs pole to pole (`0..=π`), band `φ` around the Y axis
/// (`0..=2π`). The seam column is duplicated so texture-style indexing stays
/// regular: `(L+1)(M+1)` vertices and `6·L·M` indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SphereMesh {
    pub latitude_bands: u16,
    pub longitude_bands: u16,
}

impl SphereMesh {
    /// Create a sphere with the given band counts.
    ///
    /// # Panics
    ///
    /// Panics if either count is zero or the vertex count would not fit in a
    /// 16-bit index.
    pub fn new(latitude_bands: u16, longitude_bands: u16) -> Self {
        assert!(latitude_bands > 0 && longitude_bands > 0, "Sphere needs at least one band each way");
        let vertices = (latitude_bands as usize + 1) * (longitude_bands as usize + 1);
        assert!(vertices <= u16::MAX as usize + 1, "Sphere resolution exceeds 16-bit indices");
        Self {
            latitude_bands,
            longitude_bands,
        }
    }
}

impl Default for SphereMesh {
    fn default() -> Self {
        Self::new(30, 30)
    }
}

impl Shape for SphereMesh {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere
    }

    fn vertex_count(&self) -> usize {
        (self.latitude_bands as usize + 1) * (self.longitude_bands as usize + 1)
    }

    fn index_count(&self) -> usize {
        6 * self.latitude_bands as usize * self.longitude_bands as usize
    }

    fn compute_geometry(&self, out: &mut SurfaceGeometry) {
        out.clear();
        let nlat = self.latitude_bands;
        let nlong = self.longitude_bands;

        for lat in 0..=nlat {
            let theta = lat as f32 * PI / nlat as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            for long in 0..=nlong {
                let phi = long as f32 * 2.0 * PI / nlong as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();
                let p = [sin_phi * sin_theta, cos_theta, cos_phi * sin_theta];
                // Unit radius: the normal is the position.
                out.push_vertex(p, p);
            }
        }

        for lat in 0..nlat {
            for long in 0..nlong {
                let first = lat * (nlong + 1) + long;
                let second = first + nlong + 1;
                out.indices
                    .extend_from_slice(&[first, second, first + 1, second, second + 1, first + 1]);
            }
        }
    }
}
