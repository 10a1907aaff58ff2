//! Vector and matrix utilities for placing canonical meshes in the scene.
//!
//! Every finite primitive (line, cylinder, plane, sphere) is drawn by taking a
//! canonical unit mesh centered at the origin and applying a placement matrix
//! of the form
//!
//! ```text
//! M = T(translation) · Rz(γ) · Rx(β) · Ry(α) · S(scale)
//! ```
//!
//! [`Placement`] derives that matrix from user geometry (segment endpoints or
//! rectangle corners) so the canonical mesh lands exactly on the requested
//! bounds.
//!
//! All math here is double precision. Conversion to the single precision
//! matrices the GPU consumes happens at the render back end boundary.

use glam::{DMat3, DMat4, DVec3, Mat3, Mat4};

/// Lengths below this are treated as zero when building a frame.
const FRAME_EPSILON: f64 = 1e-12;

/// Rotate a point about the X axis by `angle` radians.
pub fn rotate_x(point: DVec3, angle: f64) -> DVec3 {
    DMat3::from_rotation_x(angle) * point
}

/// Rotate a point about the Y axis by `angle` radians.
pub fn rotate_y(point: DVec3, angle: f64) -> DVec3 {
    DMat3::from_rotation_y(angle) * point
}

/// Rotate a point about the Z axis by `angle` radians.
pub fn rotate_z(point: DVec3, angle: f64) -> DVec3 {
    DMat3::from_rotation_z(angle) * point
}

/// Rotation expressed as three angles applied in Z·X·Y order.
///
/// The composed rotation is `Rz(gamma) · Rx(beta) · Ry(alpha)`, so a vector is
/// rotated about Y first, then X, then Z.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EulerZxy {
    /// Rotation about the Y axis, radians.
    pub alpha: f64,
    /// Rotation about the X axis, radians.
    pub beta: f64,
    /// Rotation about the Z axis, radians.
    pub gamma: f64,
}

impl EulerZxy {
    /// Create a rotation from the Y, X and Z angles.
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// The 3×3 rotation matrix `Rz(γ) · Rx(β) · Ry(α)`.
    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_rotation_z(self.gamma)
            * DMat3::from_rotation_x(self.beta)
            * DMat3::from_rotation_y(self.alpha)
    }

    /// Decompose a pure rotation matrix into Z·X·Y angles.
    ///
    /// With `R = Rz(γ)·Rx(β)·Ry(α)` the bottom row is
    /// `(-cosβ sinα, sinβ, cosβ cosα)` and the middle column is
    /// `(-sinγ cosβ, cosγ cosβ, sinβ)`. At gimbal lock (`cosβ = 0`) only
    /// `γ ± α` is determined, so γ is pinned to zero.
    pub fn from_mat3(rotation: &DMat3) -> Self {
        // glam matrices are column-major: r_ij is row i of column j.
        let r20 = rotation.x_axis.z;
        let r21 = rotation.y_axis.z;
        let r22 = rotation.z_axis.z;
        let r01 = rotation.y_axis.x;
        let r11 = rotation.y_axis.y;

        let beta = r21.clamp(-1.0, 1.0).asin();
        if beta.cos().abs() > 1e-9 {
            Self {
                alpha: (-r20).atan2(r22),
                beta,
                gamma: (-r01).atan2(r11),
            }
        } else {
            let r00 = rotation.x_axis.x;
            let r02 = rotation.z_axis.x;
            Self {
                alpha: r02.atan2(r00),
                beta,
                gamma: 0.0,
            }
        }
    }
}

/// Compose `T(translation) · Rz(γ) · Rx(β) · Ry(α) · S(scale)`.
pub fn compose(translation: DVec3, angles: EulerZxy, scale: DVec3) -> DMat4 {
    DMat4::from_translation(translation)
        * DMat4::from_mat3(angles.to_mat3())
        * DMat4::from_scale(scale)
}

/// Orthographic projection of the box `[-width, width] × [-height, height] × [near, far]`
/// into clip space.
///
/// The default scene projects a `scale × scale × scale` cube with
/// `orthographic(scale, scale, -scale, scale)`.
pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(-width, width, -height, height, near, far)
}

/// Upper-left 3×3 block of a model matrix, for transforming normals.
///
/// Only valid while the model matrix is built from rotations, translations
/// and uniform scale. With uniform scale the shader must renormalize;
/// shear or non-uniform scale would need the inverse transpose instead.
pub fn normal_matrix(model: &Mat4) -> Mat3 {
    Mat3::from_mat4(*model)
}

/// Affine placement of a canonical unit primitive in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// World position of the primitive's origin.
    pub translation: DVec3,
    /// Orientation of the canonical axes.
    pub angles: EulerZxy,
    /// Scale applied along the canonical X, Y and Z axes before rotating.
    pub scale: DVec3,
    matrix: DMat4,
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

impl Placement {
    /// Placement that leaves the canonical primitive where it is.
    pub fn identity() -> Self {
        Self::from_parts(DVec3::ZERO, EulerZxy::default(), DVec3::ONE)
    }

    /// Build a placement from its translation, rotation and scale.
    pub fn from_parts(translation: DVec3, angles: EulerZxy, scale: DVec3) -> Self {
        Self {
            translation,
            angles,
            scale,
            matrix: compose(translation, angles, scale),
        }
    }

    /// Uniformly scaled, unrotated placement centered at `center`.
    pub fn centered(center: DVec3, radius: f64) -> Self {
        Self::from_parts(center, EulerZxy::default(), DVec3::splat(radius))
    }

    /// Fit the canonical axes to a world-space frame.
    ///
    /// `x_axis` fixes the direction of canonical X. `y_axis` is
    /// orthogonalized against it, and canonical Z becomes `x × y`.
    /// Returns `None` when `x_axis` is zero or `y_axis` is parallel to it.
    pub fn fit(center: DVec3, x_axis: DVec3, y_axis: DVec3, scale: DVec3) -> Option<Self> {
        let x_len = x_axis.length();
        if !(x_len > FRAME_EPSILON) {
            return None;
        }
        let x_hat = x_axis / x_len;
        let y_perp = y_axis - x_hat * x_hat.dot(y_axis);
        let y_len = y_perp.length();
        if !(y_len > FRAME_EPSILON) {
            return None;
        }
        let y_hat = y_perp / y_len;
        let z_hat = x_hat.cross(y_hat);

        let rotation = DMat3::from_cols(x_hat, y_hat, z_hat);
        Some(Self::from_parts(center, EulerZxy::from_mat3(&rotation), scale))
    }

    /// Fit the unit cylinder (radius 1, `z ∈ [-½, ½]`) to the segment `p0 → p1`.
    ///
    /// The segment is centered at the origin, rotated about Z by the azimuth φ
    /// of the axis and about Y by its polar angle θ, then scaled by
    /// `(radius, radius, |p1 - p0|)`. Canonical `z = +½` lands on `p1`.
    pub fn segment(p0: DVec3, p1: DVec3, radius: f64) -> Option<Self> {
        let axis = p1 - p0;
        let height = axis.length();
        if !(height > FRAME_EPSILON) {
            return None;
        }
        let dir = axis / height;
        let phi = dir.y.atan2(dir.x);
        let theta = dir.z.clamp(-1.0, 1.0).acos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();

        let x_axis = DVec3::new(cos_phi * cos_theta, sin_phi * cos_theta, -sin_theta);
        let y_axis = DVec3::new(-sin_phi, cos_phi, 0.0);
        let center = (p0 + p1) * 0.5;
        Self::fit(center, x_axis, y_axis, DVec3::new(radius, radius, height))
    }

    /// Fit the unit square to a rectangle given by four ordered corners.
    ///
    /// Corner order matches the canonical square: `c0 → (-½, ½)`,
    /// `c1 → (½, ½)`, `c2 → (½, -½)`, `c3 → (-½, -½)`. The canonical Z axis
    /// (unscaled) becomes the rectangle's unit normal.
    pub fn rectangle(corners: &[DVec3; 4]) -> Option<Self> {
        let [c0, c1, c2, c3] = *corners;
        let x_axis = c1 - c0;
        let y_axis = c0 - c3;
        let x_len = x_axis.length();
        if !(x_len > FRAME_EPSILON) {
            return None;
        }
        let y_len = (y_axis - x_axis * (x_axis.dot(y_axis) / (x_len * x_len))).length();
        let center = (c0 + c2) * 0.5;
        Self::fit(center, x_axis, y_axis, DVec3::new(x_len, y_len, 1.0))
    }

    /// The composed 4×4 placement matrix.
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// Single precision copy for uploading as a uniform.
    pub fn to_mat4(&self) -> Mat4 {
        self.matrix.as_mat4()
    }

    /// Map a point from the canonical frame into world space.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.matrix.transform_point3(point)
    }

    /// Rotation-only part of the placement.
    pub fn rotation(&self) -> DMat3 {
        self.angles.to_mat3()
    }

    /// Same position and orientation with a different scale.
    pub fn with_scale(&self, scale: DVec3) -> Self {
        Self::from_parts(self.translation, self.angles, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_single_axis_rotations() {
        assert_close(rotate_z(DVec3::X, FRAC_PI_2), DVec3::Y);
        assert_close(rotate_x(DVec3::Y, FRAC_PI_2), DVec3::Z);
        assert_close(rotate_y(DVec3::Z, FRAC_PI_2), DVec3::X);
    }

    #[test]
    fn test_euler_round_trip() {
        let angles = EulerZxy::new(0.3, -0.7, 1.9);
        let back = EulerZxy::from_mat3(&angles.to_mat3());
        assert!((back.alpha - angles.alpha).abs() < 1e-12);
        assert!((back.beta - angles.beta).abs() < 1e-12);
        assert!((back.gamma - angles.gamma).abs() < 1e-12);
    }

    #[test]
    fn test_euler_gimbal_lock_reproduces_rotation() {
        let angles = EulerZxy::new(0.4, FRAC_PI_2, 0.9);
        let rotation = angles.to_mat3();
        let back = EulerZxy::from_mat3(&rotation);
        assert_eq!(back.gamma, 0.0);
        let diff = back.to_mat3() - rotation;
        assert!(diff.x_axis.length() + diff.y_axis.length() + diff.z_axis.length() < 1e-9);
    }

    #[test]
    fn test_compose_order() {
        // Scale first, then rotate, then translate.
        let m = compose(
            DVec3::new(10.0, 0.0, 0.0),
            EulerZxy::new(0.0, 0.0, FRAC_PI_2),
            DVec3::new(2.0, 1.0, 1.0),
        );
        assert_close(m.transform_point3(DVec3::X), DVec3::new(10.0, 2.0, 0.0));
    }

    #[test]
    fn test_normal_matrix_is_rotation_block() {
        let m = Mat4::from_rotation_y(0.5) * Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let n = normal_matrix(&m);
        assert!((n * glam::Vec3::X - Mat3::from_rotation_y(0.5) * glam::Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_orthographic_maps_box_to_ndc() {
        let p = orthographic(150.0, 150.0, -150.0, 150.0);
        let corner = p.project_point3(glam::Vec3::new(150.0, -150.0, 0.0));
        assert!((corner.x - 1.0).abs() < 1e-6);
        assert!((corner.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_segment_endpoints_round_trip() {
        let p0 = DVec3::new(-3.0, 4.0, 1.0);
        let p1 = DVec3::new(5.0, -2.0, 7.0);
        let placement = Placement::segment(p0, p1, 2.0).unwrap();
        assert_close(placement.transform_point(DVec3::new(0.0, 0.0, -0.5)), p0);
        assert_close(placement.transform_point(DVec3::new(0.0, 0.0, 0.5)), p1);
        // Radius is perpendicular to the axis.
        let rim = placement.transform_point(DVec3::new(1.0, 0.0, 0.0)) - (p0 + p1) * 0.5;
        assert!((rim.length() - 2.0).abs() < 1e-9);
        assert!(rim.dot(p1 - p0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_along_z_has_no_rotation() {
        let placement = Placement::segment(DVec3::new(0.0, 0.0, -1.0), DVec3::new(0.0, 0.0, 1.0), 1.0).unwrap();
        assert!(placement.angles.alpha.abs() < 1e-12);
        assert!(placement.angles.beta.abs() < 1e-12);
        assert!(placement.angles.gamma.abs() < 1e-12);
    }

    #[test]
    fn test_segment_zero_length_rejected() {
        assert!(Placement::segment(DVec3::ONE, DVec3::ONE, 1.0).is_none());
    }

    #[test]
    fn test_rectangle_corners_round_trip() {
        // Square tilted 45 degrees about the X axis.
        let (s, c) = FRAC_PI_4.sin_cos();
        let corners = [
            DVec3::new(-1.0, c, s),
            DVec3::new(1.0, c, s),
            DVec3::new(1.0, -c, -s),
            DVec3::new(-1.0, -c, -s),
        ];
        let placement = Placement::rectangle(&corners).unwrap();
        let canonical = [
            DVec3::new(-0.5, 0.5, 0.0),
            DVec3::new(0.5, 0.5, 0.0),
            DVec3::new(0.5, -0.5, 0.0),
            DVec3::new(-0.5, -0.5, 0.0),
        ];
        for (corner, unit) in corners.iter().zip(canonical) {
            assert_close(placement.transform_point(unit), *corner);
        }
    }

    #[test]
    fn test_rectangle_collinear_rejected() {
        let corners = [DVec3::ZERO, DVec3::X, DVec3::X * 2.0, DVec3::X * 3.0];
        assert!(Placement::rectangle(&corners).is_none());
    }
}
