//! Scene orchestration: charges, traced field lines and a full frame.
//!
//! A [`Scene`] owns everything needed to draw one electrostatics picture:
//! the charge collection, Gaussian surfaces, extra seed points, the shared
//! vertex registry, the traced field lines and the camera. It is generic
//! over the back end's buffer handle so the same scene can be drawn by a
//! GPU back end or recorded headlessly.
//!
//! # Example
//!
//! ```ignore
//! let mut scene = Scene::new(SceneConfig::default());
//! scene.add_charge(PointCharge::new(1.0, DVec3::new(-20.0, 0.0, 0.0)));
//! scene.add_charge(PointCharge::new(-1.0, DVec3::new(20.0, 0.0, 0.0)));
//! scene.add_gaussian_surface(GaussianSphere::new(DVec3::new(-20.0, 0.0, 0.0), 10.0)?);
//! scene.trace();
//! scene.render(&mut backend)?;
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{DVec3, Mat3, Mat4};
use log::{debug, info};

use crate::backend::{CullFace, Primitive, Program, RenderBackend};
use crate::charge::PointCharge;
use crate::collection::{ChargeCollection, DEFAULT_LINE_DENSITY};
use crate::distribution::ChargeDistribution;
use crate::error::{GeometryError, SceneError};
use crate::field::ElectricField;
use crate::gaussian::GaussianSurface;
use crate::geometry::VertexRegistry;
use crate::seed::SeedPoint;
use crate::shader::{attribute, uniform};
use crate::tracer::{FieldLine, FieldLineTracer, TraceConfig};
use crate::transform::{normal_matrix, orthographic};
use crate::visuals::{Lighting, GAUSSIAN_SURFACE};

/// Bytes between consecutive [`ChargeVertex`] records.
pub const CHARGE_STRIDE: u32 = std::mem::size_of::<ChargeVertex>() as u32;
/// Byte offset of the charge within a [`ChargeVertex`].
pub const CHARGE_OFFSET: u32 = 12;
/// Bytes between consecutive field line points.
const POINT_STRIDE: u32 = 12;

/// Configuration for a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    /// Tracer settings for every field line.
    pub trace: TraceConfig,
    /// Half-extent of the visible cube.
    pub projection_scale: f32,
    /// Smallest half-extent zooming can reach.
    pub min_scale: f32,
    /// Field lines per unit charge for point charges.
    pub point_line_density: f64,
    pub lighting: Lighting,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            trace: TraceConfig::default(),
            projection_scale: 150.0,
            min_scale: 15.0,
            point_line_density: DEFAULT_LINE_DENSITY,
            lighting: Lighting::default(),
        }
    }
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(mut self, trace: TraceConfig) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_projection_scale(mut self, scale: f32) -> Self {
        self.projection_scale = scale;
        self
    }

    pub fn with_min_scale(mut self, scale: f32) -> Self {
        self.min_scale = scale;
        self
    }

    pub fn with_point_line_density(mut self, density: f64) -> Self {
        self.point_line_density = density;
        self
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }
}

/// One point charge as fed to the charge program: position then charge.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ChargeVertex {
    pub position: [f32; 3],
    pub charge: f32,
}

impl From<&PointCharge> for ChargeVertex {
    fn from(q: &PointCharge) -> Self {
        Self {
            position: q.position().as_vec3().to_array(),
            charge: q.charge() as f32,
        }
    }
}

/// Buffers for one traced field line.
#[derive(Clone, Debug)]
struct LineBuffers<H> {
    points: H,
    point_count: u32,
    arrows: Option<(H, u32)>,
}

/// Per-context uploads that are not canonical meshes.
#[derive(Clone, Debug)]
struct Uploads<H> {
    charges: Option<(H, u32)>,
    lines: Vec<LineBuffers<H>>,
}

/// Charges, surfaces and field lines drawn through a [`RenderBackend`].
pub struct Scene<H> {
    config: SceneConfig,
    collection: ChargeCollection,
    gaussian_surfaces: Vec<GaussianSurface>,
    start_points: Vec<SeedPoint>,
    lines: Vec<FieldLine>,
    registry: VertexRegistry<H>,
    uploads: Option<Uploads<H>>,
    scale: f32,
    projection: Mat4,
    model_view: Mat4,
    normal_matrix: Mat3,
}

impl<H: Clone> Default for Scene<H> {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl<H: Clone> Scene<H> {
    pub fn new(config: SceneConfig) -> Self {
        let scale = config.projection_scale.max(config.min_scale);
        Self {
            config,
            collection: ChargeCollection::new().with_line_density(config.point_line_density),
            gaussian_surfaces: Vec::new(),
            start_points: Vec::new(),
            lines: Vec::new(),
            registry: VertexRegistry::new(),
            uploads: None,
            scale,
            projection: orthographic(scale, scale, -scale, scale),
            model_view: Mat4::IDENTITY,
            normal_matrix: Mat3::IDENTITY,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn add_charge(&mut self, charge: PointCharge) -> &mut Self {
        self.collection.add_charge(charge);
        self.uploads = None;
        self
    }

    pub fn add_distribution(&mut self, distribution: impl Into<ChargeDistribution>) -> &mut Self {
        self.collection.add_distribution(distribution);
        self.uploads = None;
        self
    }

    pub fn add_gaussian_surface(&mut self, surface: impl Into<GaussianSurface>) -> &mut Self {
        self.gaussian_surfaces.push(surface.into());
        self
    }

    /// Add an extra seed, traced before every collection seed.
    pub fn add_start_point(&mut self, seed: SeedPoint) -> Result<&mut Self, SceneError> {
        if !seed.position.is_finite() {
            return Err(GeometryError::NonFinite("start point").into());
        }
        self.start_points.push(seed);
        Ok(self)
    }

    pub fn collection(&self) -> &ChargeCollection {
        &self.collection
    }

    pub fn gaussian_surfaces(&self) -> &[GaussianSurface] {
        &self.gaussian_surfaces
    }

    /// Explicit seeds followed by every seed from the collection.
    pub fn start_points(&self) -> Vec<SeedPoint> {
        let mut seeds = self.start_points.clone();
        seeds.extend(self.collection.seed_points());
        seeds
    }

    /// Field of every charge in the scene at `point`.
    pub fn field_at(&self, point: DVec3) -> DVec3 {
        self.collection.field_at(point)
    }

    /// Retrace every field line from the current seeds.
    pub fn trace(&mut self) -> &[FieldLine] {
        let seeds = self.start_points();
        let tracer = FieldLineTracer::new(&self.collection, self.config.trace);
        self.lines = tracer.trace_all(&seeds);
        self.uploads = None;
        info!("Traced {} field lines from {} seeds", self.lines.len(), seeds.len());
        &self.lines
    }

    /// Field lines from the last [`trace`](Scene::trace).
    pub fn lines(&self) -> &[FieldLine] {
        &self.lines
    }

    /// Set the camera transform and derive the normal matrix from it.
    pub fn set_model_view(&mut self, model_view: Mat4) {
        self.model_view = model_view;
        self.normal_matrix = normal_matrix(&model_view);
    }

    pub fn model_view(&self) -> Mat4 {
        self.model_view
    }

    pub fn normal_matrix(&self) -> Mat3 {
        self.normal_matrix
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Half-extent of the visible cube.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Grow or shrink the visible cube, never below the configured minimum.
    pub fn zoom_by(&mut self, delta: f32) -> f32 {
        self.scale = (self.scale + delta).max(self.config.min_scale);
        self.projection = orthographic(self.scale, self.scale, -self.scale, self.scale);
        self.scale
    }

    /// Every point charge in the scene, packed for the charge program.
    pub fn charge_vertices(&self) -> Vec<ChargeVertex> {
        let loose = self.collection.charges().iter();
        let placed = self.collection.distributions().iter().filter_map(|d| match d {
            ChargeDistribution::Point(q) => Some(q),
            _ => None,
        });
        loose.chain(placed).map(ChargeVertex::from).collect()
    }

    /// Forget every handle from the previous graphics context.
    pub fn on_context_restored(&mut self) {
        debug!("Graphics context restored, dropping {} cached meshes", self.registry.len());
        self.registry.clear();
        self.uploads = None;
    }

    /// Issue one full frame.
    ///
    /// Charges first, then field lines, then charged surfaces blended with
    /// back-face culling, then Gaussian surfaces without depth testing.
    pub fn render<B>(&mut self, backend: &mut B) -> Result<(), SceneError>
    where
        B: RenderBackend<Buffer = H>,
    {
        backend.clear();

        let uploads = match self.uploads.take() {
            Some(uploads) => uploads,
            None => self.upload(backend),
        };
        self.draw_charges(backend, &uploads);
        self.draw_lines(backend, &uploads);
        self.uploads = Some(uploads);

        let distributions = self.collection.distributions();
        if self.gaussian_surfaces.is_empty() && distributions.is_empty() {
            return Ok(());
        }

        backend.set_blending(true);
        backend.set_culling(Some(CullFace::Back));
        if !distributions.is_empty() {
            self.begin_surfaces(backend);
            for distribution in distributions {
                distribution.render(backend, &mut self.registry)?;
            }
        }

        backend.set_depth_test(false);
        if !self.gaussian_surfaces.is_empty() {
            self.begin_surfaces(backend);
            backend.set_uniform_vec4(uniform::SURFACE_COLOR, GAUSSIAN_SURFACE);
            for surface in &self.gaussian_surfaces {
                surface.render(backend, &mut self.registry)?;
            }
        }
        backend.set_depth_test(true);
        backend.set_blending(false);
        backend.set_culling(None);
        Ok(())
    }

    fn upload<B: RenderBackend<Buffer = H>>(&self, backend: &mut B) -> Uploads<H> {
        let vertices = self.charge_vertices();
        let charges = if vertices.is_empty() {
            None
        } else {
            let buffer = backend.create_vertex_buffer("charges", bytemuck::cast_slice(&vertices));
            Some((buffer, vertices.len() as u32))
        };

        let lines = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let arrows = (!line.arrows.is_empty()).then(|| {
                    let buffer = backend.create_vertex_buffer(&format!("field line {} arrows", i), &line.arrows_f32());
                    (buffer, line.arrows.len() as u32)
                });
                LineBuffers {
                    points: backend.create_vertex_buffer(&format!("field line {}", i), &line.points_f32()),
                    point_count: line.points.len() as u32,
                    arrows,
                }
            })
            .collect::<Vec<_>>();

        debug!("Uploaded {} charges and {} field lines", vertices.len(), lines.len());
        Uploads { charges, lines }
    }

    fn set_camera<B: RenderBackend<Buffer = H>>(&self, backend: &mut B) {
        backend.set_uniform_mat4(uniform::MODEL_VIEW, &self.model_view);
        backend.set_uniform_mat4(uniform::PROJECTION, &self.projection);
    }

    fn draw_charges<B: RenderBackend<Buffer = H>>(&self, backend: &mut B, uploads: &Uploads<H>) {
        let Some((buffer, count)) = &uploads.charges else {
            return;
        };
        backend.use_program(Program::Charge);
        self.set_camera(backend);
        backend.bind_attribute(attribute::POSITION, buffer, 3, CHARGE_STRIDE, 0);
        backend.bind_attribute(attribute::CHARGE, buffer, 1, CHARGE_STRIDE, CHARGE_OFFSET);
        backend.draw_arrays(Primitive::Points, 0, *count);
    }

    fn draw_lines<B: RenderBackend<Buffer = H>>(&self, backend: &mut B, uploads: &Uploads<H>) {
        if uploads.lines.is_empty() {
            return;
        }
        backend.use_program(Program::FluxLine);
        self.set_camera(backend);
        for line in &uploads.lines {
            backend.bind_attribute(attribute::POSITION, &line.points, 3, POINT_STRIDE, 0);
            backend.draw_arrays(Primitive::LineStrip, 0, line.point_count);
            if let Some((arrows, count)) = &line.arrows {
                backend.bind_attribute(attribute::POSITION, arrows, 3, POINT_STRIDE, 0);
                backend.draw_arrays(Primitive::Lines, 0, *count);
            }
        }
    }

    fn begin_surfaces<B: RenderBackend<Buffer = H>>(&self, backend: &mut B) {
        backend.use_program(Program::Surface);
        self.set_camera(backend);
        backend.set_uniform_mat3(uniform::NORMAL_MATRIX, &self.normal_matrix);
        self.config.lighting.upload(backend);
    }
}
