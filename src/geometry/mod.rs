//! Procedural meshes for the canonical unit shapes and the shared vertex registry.
//!
//! Every rendered primitive in a scene is one of three canonical meshes placed
//! by a per-instance model matrix:
//!
//! - [`SphereMesh`]: unit sphere centered at the origin
//! - [`UnitSquare`]: unit square in the XY plane, normal `+Z`
//! - [`CylinderMesh`]: radius 1, `z ∈ [-½, ½]`, with caps
//!
//! Meshes are uploaded once per [`ShapeKind`] and cached in a
//! [`VertexRegistry`] for the lifetime of the graphics context. Any number of
//! scaled and rotated instances reuse the same buffers.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = VertexRegistry::new();
//! let buffers = SphereMesh::default().get_vertex_buffers(&mut registry, &mut backend)?;
//! buffers.bind(&mut backend);
//! backend.draw_elements(Primitive::Triangles, buffers.index_count, 0);
//! ```

mod cylinder;
mod sphere;
mod square;

pub use cylinder::{CylinderMesh, CylinderRanges};
pub use sphere::SphereMesh;
pub use square::UnitSquare;

use std::collections::HashMap;

use log::debug;

use crate::backend::RenderBackend;
use crate::error::RegistryError;
use crate::shader::attribute;

/// The canonical meshes known to the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    UnitSquare,
    UnitCylinder,
}

/// CPU-side vertex, normal and index arrays for one mesh.
///
/// Positions and normals are packed `xyz` triples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceGeometry {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u16>,
}

impl SurfaceGeometry {
    /// Empty geometry with room for `vertex_count` vertices and `index_count` indices.
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(3 * vertex_count),
            normals: Vec::with_capacity(3 * vertex_count),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Number of vertices stored.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Drop all data but keep the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.indices.clear();
    }

    /// Append one vertex and its unit normal, returning the vertex index.
    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3]) -> u16 {
        let index = self.vertex_count() as u16;
        self.vertices.extend_from_slice(&position);
        self.normals.extend_from_slice(&normal);
        index
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: usize) -> [f32; 3] {
        [self.vertices[3 * i], self.vertices[3 * i + 1], self.vertices[3 * i + 2]]
    }

    /// Normal of vertex `i`.
    pub fn normal(&self, i: usize) -> [f32; 3] {
        [self.normals[3 * i], self.normals[3 * i + 1], self.normals[3 * i + 2]]
    }
}

/// GPU handles for one uploaded mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBuffers<H> {
    pub vertices: H,
    pub normals: H,
    pub indices: H,
    pub index_count: u32,
}

impl<H> MeshBuffers<H> {
    /// Bind positions, normals and indices for indexed drawing.
    pub fn bind<B>(&self, backend: &mut B)
    where
        B: RenderBackend<Buffer = H>,
    {
        backend.bind_attribute(attribute::POSITION, &self.vertices, 3, 0, 0);
        backend.bind_attribute(attribute::NORMAL, &self.normals, 3, 0, 0);
        backend.bind_index_buffer(&self.indices);
    }
}

/// A canonical mesh generator.
pub trait Shape {
    /// Registry key for this mesh.
    fn kind(&self) -> ShapeKind;

    /// Number of vertices [`compute_geometry`](Shape::compute_geometry) writes.
    fn vertex_count(&self) -> usize;

    /// Number of indices [`compute_geometry`](Shape::compute_geometry) writes.
    fn index_count(&self) -> usize;

    /// Fill `out` with this mesh, replacing whatever it held.
    fn compute_geometry(&self, out: &mut SurfaceGeometry);

    /// Build the mesh into fresh storage.
    fn build(&self) -> SurfaceGeometry {
        let mut geometry = SurfaceGeometry::with_capacity(self.vertex_count(), self.index_count());
        self.compute_geometry(&mut geometry);
        geometry
    }

    /// Buffers for this shape, uploading them on first use.
    fn get_vertex_buffers<B>(
        &self,
        registry: &mut VertexRegistry<B::Buffer>,
        backend: &mut B,
    ) -> Result<MeshBuffers<B::Buffer>, RegistryError>
    where
        Self: Sized,
        B: RenderBackend,
    {
        registry.get_or_build(self, backend)
    }
}

/// Cache of uploaded meshes, one per [`ShapeKind`].
///
/// The registry is build-once/read-many: registering a kind a second time is
/// a programming error. Call [`clear`](VertexRegistry::clear) after the
/// graphics context is lost, since the old handles are no longer valid.
#[derive(Debug)]
pub struct VertexRegistry<H> {
    entries: HashMap<ShapeKind, MeshBuffers<H>>,
}

impl<H> Default for VertexRegistry<H> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<H: Clone> VertexRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register buffers for `kind`.
    ///
    /// Fails with [`RegistryError::DuplicateRegistration`] if `kind` is
    /// already present; the existing entry is left untouched.
    pub fn register(&mut self, kind: ShapeKind, buffers: MeshBuffers<H>) -> Result<(), RegistryError> {
        if self.entries.contains_key(&kind) {
            return Err(RegistryError::DuplicateRegistration(kind));
        }
        self.entries.insert(kind, buffers);
        Ok(())
    }

    pub fn contains(&self, kind: ShapeKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn get(&self, kind: ShapeKind) -> Option<&MeshBuffers<H>> {
        self.entries.get(&kind)
    }

    /// Return cached buffers for `shape`, building and uploading them at most once.
    ///
    /// A kind has one mesh per context. Asking for it at another resolution
    /// fails with [`RegistryError::ResolutionMismatch`].
    pub fn get_or_build<S, B>(&mut self, shape: &S, backend: &mut B) -> Result<MeshBuffers<H>, RegistryError>
    where
        S: Shape + ?Sized,
        B: RenderBackend<Buffer = H>,
    {
        let kind = shape.kind();
        if let Some(buffers) = self.entries.get(&kind) {
            let requested = shape.index_count() as u32;
            if buffers.index_count != requested {
                return Err(RegistryError::ResolutionMismatch {
                    kind,
                    cached: buffers.index_count,
                    requested,
                });
            }
            return Ok(buffers.clone());
        }

        let geometry = shape.build();
        debug!(
            "Uploading {:?} mesh: {} vertices, {} indices",
            kind,
            geometry.vertex_count(),
            geometry.index_count()
        );
        let buffers = MeshBuffers {
            vertices: backend.create_vertex_buffer(&format!("{:?} vertices", kind), &geometry.vertices),
            normals: backend.create_vertex_buffer(&format!("{:?} normals", kind), &geometry.normals),
            indices: backend.create_index_buffer(&format!("{:?} indices", kind), &geometry.indices),
            index_count: geometry.index_count() as u32,
        };
        self.register(kind, buffers.clone())?;
        Ok(buffers)
    }

    /// Forget every entry (graphics context lost).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
