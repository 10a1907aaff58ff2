//! The render back end the core draws through.
//!
//! The core never talks to a graphics API directly. Shader compilation,
//! buffer upload and draw submission belong to an implementation of
//! [`RenderBackend`] supplied by the host. Handles returned by the back end
//! are opaque to the core and are only passed back into it.
//!
//! [`CommandRecorder`] is a headless back end that records every call. It is
//! useful for tests and for inspecting a frame without a GPU.

use glam::{Mat3, Mat4, Vec3, Vec4};

/// Primitive assembly mode for a draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Which faces to discard when culling is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CullFace {
    Front,
    Back,
}

/// Shader programs the scene switches between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Program {
    /// Lit, translucent surfaces (distributions and Gaussian surfaces).
    Surface,
    /// Flat coloured field lines and their arrows.
    FluxLine,
    /// Point charges drawn as points, coloured by sign.
    Charge,
}

/// Operations the core needs from a graphics API.
///
/// Index offsets passed to [`draw_elements`](RenderBackend::draw_elements)
/// are counted in indices, not bytes.
pub trait RenderBackend {
    /// Opaque handle to an uploaded vertex or index buffer.
    type Buffer: Clone;

    /// Upload a float vertex attribute buffer.
    fn create_vertex_buffer(&mut self, label: &str, data: &[f32]) -> Self::Buffer;

    /// Upload a 16-bit index buffer.
    fn create_index_buffer(&mut self, label: &str, data: &[u16]) -> Self::Buffer;

    /// Make `program` current for subsequent uniforms and draws.
    fn use_program(&mut self, program: Program);

    /// Bind a named shader attribute to a buffer.
    ///
    /// `stride` and `offset` are in bytes; a stride of 0 means tightly packed.
    fn bind_attribute(&mut self, name: &str, buffer: &Self::Buffer, components: u32, stride: u32, offset: u32);

    /// Bind the index buffer used by `draw_elements`.
    fn bind_index_buffer(&mut self, buffer: &Self::Buffer);

    /// Draw `count` vertices starting at `first`.
    fn draw_arrays(&mut self, primitive: Primitive, first: u32, count: u32);

    /// Draw `count` indices starting at index `offset`.
    fn draw_elements(&mut self, primitive: Primitive, count: u32, offset: u32);

    fn set_uniform_f32(&mut self, name: &str, value: f32);
    fn set_uniform_vec3(&mut self, name: &str, value: Vec3);
    fn set_uniform_vec4(&mut self, name: &str, value: Vec4);
    fn set_uniform_mat3(&mut self, name: &str, value: &Mat3);
    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4);

    /// Enable culling of `face`, or disable culling with `None`.
    fn set_culling(&mut self, face: Option<CullFace>);

    fn set_blending(&mut self, enabled: bool);

    fn set_depth_test(&mut self, enabled: bool);

    /// Clear colour and depth.
    fn clear(&mut self);
}

/// Handle issued by [`CommandRecorder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Contents of a buffer uploaded to the recorder.
#[derive(Clone, Debug, PartialEq)]
pub enum BufferData {
    Vertex(Vec<f32>),
    Index(Vec<u16>),
}

/// One recorded back end call.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    CreateBuffer { id: BufferId, label: String },
    UseProgram(Program),
    BindAttribute { name: String, buffer: BufferId, components: u32, stride: u32, offset: u32 },
    BindIndexBuffer(BufferId),
    DrawArrays { primitive: Primitive, first: u32, count: u32 },
    DrawElements { primitive: Primitive, count: u32, offset: u32 },
    UniformF32 { name: String, value: f32 },
    UniformVec3 { name: String, value: Vec3 },
    UniformVec4 { name: String, value: Vec4 },
    UniformMat3 { name: String, value: Mat3 },
    UniformMat4 { name: String, value: Mat4 },
    Culling(Option<CullFace>),
    Blending(bool),
    DepthTest(bool),
    Clear,
}

/// Headless back end that records calls instead of drawing.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    buffers: Vec<(String, BufferData)>,
    commands: Vec<Command>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded so far, in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Forget recorded commands but keep uploaded buffers.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of buffers uploaded so far.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Label and contents of an uploaded buffer.
    pub fn buffer(&self, id: BufferId) -> Option<(&str, &BufferData)> {
        self.buffers
            .get(id.0 as usize)
            .map(|(label, data)| (label.as_str(), data))
    }

    /// Draw calls (array and indexed) recorded so far.
    pub fn draw_calls(&self) -> impl Iterator<Item = &Command> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::DrawArrays { .. } | Command::DrawElements { .. }))
    }

    /// Last value uploaded for a 4×4 matrix uniform.
    pub fn last_mat4(&self, uniform: &str) -> Option<Mat4> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::UniformMat4 { name, value } if name == uniform => Some(*value),
            _ => None,
        })
    }

    fn push_buffer(&mut self, label: &str, data: BufferData) -> BufferId {
        let id = BufferId(self.buffers.len() as u32);
        self.buffers.push((label.to_string(), data));
        self.commands.push(Command::CreateBuffer { id, label: label.to_string() });
        id
    }
}

impl RenderBackend for CommandRecorder {
    type Buffer = BufferId;

    fn create_vertex_buffer(&mut self, label: &str, data: &[f32]) -> BufferId {
        self.push_buffer(label, BufferData::Vertex(data.to_vec()))
    }

    fn create_index_buffer(&mut self, label: &str, data: &[u16]) -> BufferId {
        self.push_buffer(label, BufferData::Index(data.to_vec()))
    }

    fn use_program(&mut self, program: Program) {
        self.commands.push(Command::UseProgram(program));
    }

    fn bind_attribute(&mut self, name: &str, buffer: &BufferId, components: u32, stride: u32, offset: u32) {
        self.commands.push(Command::BindAttribute {
            name: name.to_string(),
            buffer: *buffer,
            components,
            stride,
            offset,
        });
    }

    fn bind_index_buffer(&mut self, buffer: &BufferId) {
        self.commands.push(Command::BindIndexBuffer(*buffer));
    }

    fn draw_arrays(&mut self, primitive: Primitive, first: u32, count: u32) {
        self.commands.push(Command::DrawArrays { primitive, first, count });
    }

    fn draw_elements(&mut self, primitive: Primitive, count: u32, offset: u32) {
        self.commands.push(Command::DrawElements { primitive, count, offset });
    }

    fn set_uniform_f32(&mut self, name: &str, value: f32) {
        self.commands.push(Command::UniformF32 { name: name.to_string(), value });
    }

    fn set_uniform_vec3(&mut self, name: &str, value: Vec3) {
        self.commands.push(Command::UniformVec3 { name: name.to_string(), value });
    }

    fn set_uniform_vec4(&mut self, name: &str, value: Vec4) {
        self.commands.push(Command::UniformVec4 { name: name.to_string(), value });
    }

    fn set_uniform_mat3(&mut self, name: &str, value: &Mat3) {
        self.commands.push(Command::UniformMat3 { name: name.to_string(), value: *value });
    }

    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4) {
        self.commands.push(Command::UniformMat4 { name: name.to_string(), value: *value });
    }

    fn set_culling(&mut self, face: Option<CullFace>) {
        self.commands.push(Command::Culling(face));
    }

    fn set_blending(&mut self, enabled: bool) {
        self.commands.push(Command::Blending(enabled));
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.commands.push(Command::DepthTest(enabled));
    }

    fn clear(&mut self) {
        self.commands.push(Command::Clear);
    }
}
