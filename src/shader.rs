//! WGSL sources for the three render programs.
//!
//! A [`RenderBackend`](crate::backend::RenderBackend) compiles these once per
//! graphics context. Each program reads a single uniform block whose member
//! names are the names the core passes to the `set_uniform_*` calls, and its
//! vertex inputs are the attribute names passed to `bind_attribute`.
//!
//! | Program | Vertex inputs | Uniforms |
//! |---------|---------------|----------|
//! | [`SURFACE_WGSL`] | `position`, `normal` | all of [`uniform`] |
//! | [`FLUX_LINE_WGSL`] | `position` | `projection`, `model_view` |
//! | [`CHARGE_WGSL`] | `position`, `charge` | `projection`, `model_view` |

/// Uniform member names.
pub mod uniform {
    pub const PROJECTION: &str = "projection";
    /// The camera transform applied to the whole scene.
    pub const MODEL_VIEW: &str = "model_view";
    /// Per-instance placement of a canonical mesh.
    pub const MODEL: &str = "model";
    pub const NORMAL_MATRIX: &str = "normal_matrix";
    pub const SURFACE_COLOR: &str = "surface_color";
    pub const AMBIENT_LIGHTING: &str = "ambient_lighting";
    pub const DIRECTIONAL_LIGHTING: &str = "directional_lighting";
    pub const DIRECTIONAL_COLOR: &str = "directional_color";
}

/// Vertex attribute names.
pub mod attribute {
    pub const POSITION: &str = "position";
    pub const NORMAL: &str = "normal";
    pub const CHARGE: &str = "charge";
}

/// Lit translucent surfaces.
pub const SURFACE_WGSL: &str = r#"
struct Uniforms {
    projection: mat4x4<f32>,
    model_view: mat4x4<f32>,
    model: mat4x4<f32>,
    normal_matrix: mat3x3<f32>,
    surface_color: vec4<f32>,
    ambient_lighting: vec3<f32>,
    directional_lighting: vec3<f32>,
    directional_color: vec3<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) lighting: vec3<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.model_view * uniforms.model * vec4<f32>(position, 1.0);

    let transformed_normal = uniforms.normal_matrix * normal;
    let weight = max(dot(transformed_normal, uniforms.directional_lighting), 0.0);
    out.lighting = uniforms.ambient_lighting + uniforms.directional_color * weight;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.surface_color.rgb * in.lighting, uniforms.surface_color.a);
}
"#;

/// Field lines and arrow glyphs in a fixed colour.
pub const FLUX_LINE_WGSL: &str = r#"
struct Uniforms {
    projection: mat4x4<f32>,
    model_view: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.projection * uniforms.model_view * vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(0.8, 0.3, 0.3, 1.0);
}
"#;

/// Point charges as round sprites coloured by sign.
///
/// WGSL has no point size, so the back end is expected to draw each point
/// as a small quad; the fragment stage only needs the sign.
pub const CHARGE_WGSL: &str = r#"
struct Uniforms {
    projection: mat4x4<f32>,
    model_view: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) charge: f32,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) charge: f32,
) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.model_view * vec4<f32>(position, 1.0);
    out.charge = charge;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if (in.charge > 0.0) {
        return vec4<f32>(0.05, 0.05, 0.8, 1.0);
    }
    return vec4<f32>(0.8, 0.05, 0.05, 1.0);
}
"#;
