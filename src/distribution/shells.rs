//! Nested translucent shells for solid-looking volumes.
//!
//! A charged volume is drawn as concentric shells one unit apart, outermost
//! first with front faces culled, then innermost first with back faces
//! culled. With blending this reads as a semi-transparent solid. Very
//! thick volumes get at most [`MAX_SHELLS`] shells per pass.

use glam::{DVec3, Vec4};

use crate::backend::{CullFace, Primitive, RenderBackend};
use crate::error::RegistryError;
use crate::geometry::{CylinderMesh, CylinderRanges, Shape, SphereMesh, VertexRegistry};
use crate::shader::uniform;
use crate::transform::Placement;

/// Most shells drawn per pass for one volume.
pub const MAX_SHELLS: usize = 64;

/// Shell radii for the two passes: `outer` down to `inner`, then back up.
///
/// Radii step by one unit while that needs at most [`MAX_SHELLS`] shells,
/// otherwise [`MAX_SHELLS`] radii are spread evenly over the span.
/// Non-positive radii are skipped and the ascending pass always ends at
/// `outer`.
pub(crate) fn shell_radii(inner: f64, outer: f64) -> (Vec<f64>, Vec<f64>) {
    let span = (outer - inner).max(0.0);
    let unit_steps = span.floor();
    if unit_steps < (MAX_SHELLS - 1) as f64 {
        let count = unit_steps as usize + 1;
        let descending: Vec<f64> = (0..count).map(|i| outer - i as f64).filter(|&r| r > 0.0).collect();
        let mut ascending: Vec<f64> = (0..count).map(|i| inner + i as f64).filter(|&r| r > 0.0).collect();
        if outer > 0.0 && ascending.last().map_or(true, |&r| r < outer) {
            ascending.push(outer);
        }
        return (descending, ascending);
    }

    let step = span / (MAX_SHELLS - 1) as f64;
    let descending: Vec<f64> = (0..MAX_SHELLS).map(|i| outer - i as f64 * step).filter(|&r| r > 0.0).collect();
    let ascending = descending.iter().rev().copied().collect();
    (descending, ascending)
}

/// Draw the side wall of a cylinder at every shell radius.
///
/// Caps are never drawn so hollow tubes stay open at the ends.
pub(crate) fn draw_tube_shells<B: RenderBackend>(
    backend: &mut B,
    registry: &mut VertexRegistry<B::Buffer>,
    placement: &Placement,
    inner: f64,
    outer: f64,
    color: Vec4,
) -> Result<(), RegistryError> {
    let buffers = CylinderMesh::default().get_vertex_buffers(registry, backend)?;
    let side = CylinderRanges::from_index_count(buffers.index_count).side;

    backend.set_uniform_vec4(uniform::SURFACE_COLOR, color);
    buffers.bind(backend);

    let height = placement.scale.z;
    let (descending, ascending) = shell_radii(inner, outer);
    for (face, radii) in [(CullFace::Front, descending), (CullFace::Back, ascending)] {
        backend.set_culling(Some(face));
        for r in radii {
            let model = placement.with_scale(DVec3::new(r, r, height)).to_mat4();
            backend.set_uniform_mat4(uniform::MODEL, &model);
            backend.draw_elements(Primitive::TriangleStrip, side.1, side.0);
        }
    }
    Ok(())
}

/// Draw concentric spheres around `center`.
pub(crate) fn draw_sphere_shells<B: RenderBackend>(
    backend: &mut B,
    registry: &mut VertexRegistry<B::Buffer>,
    center: DVec3,
    inner: f64,
    outer: f64,
    color: Vec4,
) -> Result<(), RegistryError> {
    let buffers = SphereMesh::default().get_vertex_buffers(registry, backend)?;

    backend.set_uniform_vec4(uniform::SURFACE_COLOR, color);
    buffers.bind(backend);

    let (descending, ascending) = shell_radii(inner, outer);
    for (face, radii) in [(CullFace::Front, descending), (CullFace::Back, ascending)] {
        backend.set_culling(Some(face));
        for r in radii {
            let model = Placement::centered(center, r).to_mat4();
            backend.set_uniform_mat4(uniform::MODEL, &model);
            backend.draw_elements(Primitive::Triangles, buffers.index_count, 0);
        }
    }
    Ok(())
}
