//! Gaussian surfaces: closed surfaces drawn for illustration only.
//!
//! They share the canonical meshes with the charge distributions but carry
//! no charge and never contribute to the field. The scene sets their colour
//! and disables depth testing so they read as a glass overlay.

use glam::DVec3;

use crate::backend::{CullFace, Primitive, RenderBackend};
use crate::distribution::check_finite;
use crate::error::{GeometryError, RegistryError};
use crate::geometry::{CylinderMesh, CylinderRanges, Shape, SphereMesh, VertexRegistry};
use crate::shader::uniform;
use crate::transform::{EulerZxy, Placement};

/// A sphere of `radius` centered at `center`.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianSphere {
    center: DVec3,
    radius: f64,
    placement: Placement,
}

/// Reject NaN, infinite, zero and negative sizes.
fn check_size(value: f64, what: &'static str) -> Result<(), GeometryError> {
    check_finite(value, what)?;
    if value <= 0.0 {
        return Err(GeometryError::NonPositive { what, value });
    }
    Ok(())
}

impl GaussianSphere {
    pub fn new(center: DVec3, radius: f64) -> Result<Self, GeometryError> {
        if !center.is_finite() {
            return Err(GeometryError::NonFinite("Gaussian sphere center"));
        }
        check_size(radius, "Gaussian sphere radius")?;
        Ok(Self {
            center,
            radius,
            placement: Placement::centered(center, radius),
        })
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Draw the far half, then the near half.
    pub fn render<B: RenderBackend>(&self, backend: &mut B, registry: &mut VertexRegistry<B::Buffer>) -> Result<(), RegistryError> {
        let buffers = SphereMesh::default().get_vertex_buffers(registry, backend)?;
        backend.set_uniform_mat4(uniform::MODEL, &self.placement.to_mat4());
        for face in [CullFace::Front, CullFace::Back] {
            backend.set_culling(Some(face));
            buffers.bind(backend);
            backend.draw_elements(Primitive::Triangles, buffers.index_count, 0);
        }
        Ok(())
    }
}

/// A capped cylinder of `radius` and `height` centered at `center`.
///
/// The axis starts along Z and is turned by `angles`: ψ about Y, then θ
/// about X, then φ about Z.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianCylinder {
    center: DVec3,
    height: f64,
    radius: f64,
    angles: EulerZxy,
    placement: Placement,
}

impl GaussianCylinder {
    pub fn new(center: DVec3, height: f64, radius: f64, angles: EulerZxy) -> Result<Self, GeometryError> {
        if !center.is_finite() {
            return Err(GeometryError::NonFinite("Gaussian cylinder center"));
        }
        check_size(height, "Gaussian cylinder height")?;
        check_size(radius, "Gaussian cylinder radius")?;
        check_finite(angles.alpha, "Gaussian cylinder psi")?;
        check_finite(angles.beta, "Gaussian cylinder theta")?;
        check_finite(angles.gamma, "Gaussian cylinder phi")?;
        Ok(Self {
            center,
            height,
            radius,
            angles,
            placement: Placement::from_parts(center, angles, DVec3::new(radius, radius, height)),
        })
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angles(&self) -> EulerZxy {
        self.angles
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Draw both caps and the side wall with culling off.
    pub fn render<B: RenderBackend>(&self, backend: &mut B, registry: &mut VertexRegistry<B::Buffer>) -> Result<(), RegistryError> {
        let buffers = CylinderMesh::default().get_vertex_buffers(registry, backend)?;
        let ranges = CylinderRanges::from_index_count(buffers.index_count);

        backend.set_culling(None);
        backend.set_uniform_mat4(uniform::MODEL, &self.placement.to_mat4());
        buffers.bind(backend);
        backend.draw_elements(Primitive::TriangleFan, ranges.top.1, ranges.top.0);
        backend.draw_elements(Primitive::TriangleStrip, ranges.side.1, ranges.side.0);
        backend.draw_elements(Primitive::TriangleFan, ranges.bottom.1, ranges.bottom.0);
        backend.set_culling(Some(CullFace::Back));
        Ok(())
    }
}

/// Either kind of Gaussian surface.
#[derive(Clone, Debug, PartialEq)]
pub enum GaussianSurface {
    Sphere(GaussianSphere),
    Cylinder(GaussianCylinder),
}

impl GaussianSurface {
    pub fn placement(&self) -> &Placement {
        match self {
            GaussianSurface::Sphere(s) => s.placement(),
            GaussianSurface::Cylinder(c) => c.placement(),
        }
    }

    pub fn render<B: RenderBackend>(&self, backend: &mut B, registry: &mut VertexRegistry<B::Buffer>) -> Result<(), RegistryError> {
        match self {
            GaussianSurface::Sphere(s) => s.render(backend, registry),
            GaussianSurface::Cylinder(c) => c.render(backend, registry),
        }
    }
}

impl From<GaussianSphere> for GaussianSurface {
    fn from(s: GaussianSphere) -> Self {
        GaussianSurface::Sphere(s)
    }
}

impl From<GaussianCylinder> for GaussianSurface {
    fn from(c: GaussianCylinder) -> Self {
        GaussianSurface::Cylinder(c)
    }
}
