//! Surface colours and lighting for the surface program.
//!
//! Charged surfaces are tinted by the sign of their charge (blue positive,
//! red negative, grey neutral). Each kind has its own opacity so nested
//! shells and overlapping distributions stay readable when blended.

use glam::{Vec3, Vec4};

use crate::backend::RenderBackend;
use crate::seed::Sign;
use crate::shader::uniform;

/// Tint for positively charged surfaces.
pub const POSITIVE: Vec3 = Vec3::new(0.05, 0.05, 0.8);
/// Tint for negatively charged surfaces.
pub const NEGATIVE: Vec3 = Vec3::new(0.8, 0.05, 0.05);
/// Tint for neutral surfaces.
pub const NEUTRAL: Vec3 = Vec3::new(0.5, 0.5, 0.5);

/// Off-white translucent colour shared by all Gaussian surfaces.
pub const GAUSSIAN_SURFACE: Vec4 = Vec4::new(0.5, 0.5, 0.5, 0.5);

/// Colour of traced field lines and their arrows.
pub const FLUX_LINE: Vec4 = Vec4::new(0.8, 0.3, 0.3, 1.0);

/// Which kind of surface is being tinted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Line,
    Cylinder,
    Plane,
    Sphere,
}

impl SurfaceKind {
    /// Opacity of this kind of surface for a given charge sign.
    pub fn alpha(self, sign: Sign) -> f32 {
        match (self, sign) {
            (SurfaceKind::Line, _) => 0.8,
            (SurfaceKind::Cylinder, _) => 0.3,
            (SurfaceKind::Plane, Sign::Neutral) => 0.2,
            (SurfaceKind::Plane, _) => 0.4,
            (SurfaceKind::Sphere, _) => 0.2,
        }
    }
}

/// Tint for a charge sign.
pub fn sign_color(sign: Sign) -> Vec3 {
    match sign {
        Sign::Positive => POSITIVE,
        Sign::Negative => NEGATIVE,
        Sign::Neutral => NEUTRAL,
    }
}

/// RGBA surface colour for a charged surface.
pub fn surface_color(kind: SurfaceKind, sign: Sign) -> Vec4 {
    sign_color(sign).extend(kind.alpha(sign))
}

/// Fixed ambient plus one directional light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: Vec3,
    /// Direction toward the light. Not required to be unit length.
    pub direction: Vec3,
    pub directional_color: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.3),
            direction: Vec3::ONE,
            directional_color: Vec3::splat(0.4),
        }
    }
}

impl Lighting {
    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_directional_color(mut self, color: Vec3) -> Self {
        self.directional_color = color;
        self
    }

    /// Upload the lighting uniforms to the current program.
    pub fn upload<B: RenderBackend>(&self, backend: &mut B) {
        backend.set_uniform_vec3(uniform::AMBIENT_LIGHTING, self.ambient);
        backend.set_uniform_vec3(uniform::DIRECTIONAL_LIGHTING, self.direction);
        backend.set_uniform_vec3(uniform::DIRECTIONAL_COLOR, self.directional_color);
    }
}
