// MATH - shared linear-algebra aliases and small helpers used across the core

use cgmath::*;

pub type Vec2 = Vector2<f32>;
pub type Vec3 = Vector3<f32>;
pub type Vec4 = Vector4<f32>;
pub type Mat3 = Matrix3<f32>;
pub type Mat4 = Matrix4<f32>;
pub type Color = Vec4;

/// Tolerance used for face/pole classification on polyhedral and singular
/// surfaces (cube faces, sphere poles, cone apex).
pub const EPSILON: f32 = 1e-4;

/// Self-intersection offset for shadow/reflection rays. The original
/// reference implementation used 1e-1 for the reflection bias specifically,
/// which is large enough to leak light around thin geometry; this crate
/// uses 1e-3 for every recursive ray (see DESIGN.md).
pub const RAY_BIAS: f32 = 1e-3;

pub fn within_epsilon(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Lifts an object-space point into homogeneous coordinates (w = 1).
pub fn point4(p: Vec3) -> Vec4 {
    Vec4::new(p.x, p.y, p.z, 1.0)
}

/// Lifts an object-space direction into homogeneous coordinates (w = 0).
pub fn vector4(v: Vec3) -> Vec4 {
    Vec4::new(v.x, v.y, v.z, 0.0)
}

/// Drops the homogeneous coordinate, ignoring `w`.
pub fn truncate(v: Vec4) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Top-left 3x3 (linear part) of a 4x4 transform, used for normal transforms.
pub fn linear_part(m: Mat4) -> Mat3 {
    Mat3::new(
        m.x.x, m.x.y, m.x.z, m.y.x, m.y.y, m.y.z, m.z.x, m.z.y, m.z.z,
    )
}

pub fn reflect(incoming: Vec3, normal: Vec3) -> Vec3 {
    2.0 * incoming.dot(normal) * normal - incoming
}

pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_and_vector_have_correct_w() {
        let p = point4(Vec3::new(1.0, 2.0, 3.0));
        let v = vector4(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(p.w, 1.0);
        assert_relative_eq!(v.w, 0.0);
    }

    #[test]
    fn reflect_parallel_to_normal_is_unchanged() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        let r = reflect(n, n);
        assert_relative_eq!(r.x, n.x, epsilon = 1e-5);
        assert_relative_eq!(r.y, n.y, epsilon = 1e-5);
    }

    #[test]
    fn reflect_perpendicular_to_normal_negates() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        let v = Vec3::new(1.0, 0.0, 0.0);
        let r = reflect(v, n);
        assert_relative_eq!(r.x, -v.x, epsilon = 1e-5);
        assert_relative_eq!(r.y, 0.0, epsilon = 1e-5);
    }
}
