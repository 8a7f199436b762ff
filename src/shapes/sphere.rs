use super::moving_center;
use crate::math::Vec3;
use cgmath::InnerSpace;

/// Sphere of radius 0.5 centered at the object-space origin.
pub fn sphere_intersect(point: Vec3, direction: Vec3) -> Option<f32> {
    let a = direction.dot(direction);
    let b = 2.0 * point.dot(direction);
    let c = point.dot(point) - 0.25;
    smallest_nonneg_root(a, b, c)
}

pub fn sphere_normal(x: Vec3) -> Vec3 {
    2.0 * x
}

pub fn moving_sphere_intersect(point: Vec3, direction: Vec3, time: f32, center2: Vec3) -> Option<f32> {
    let center = moving_center(center2, time);
    sphere_intersect(point - center, direction)
}

pub fn moving_sphere_normal(x: Vec3, time: f32, center2: Vec3) -> Vec3 {
    let center = moving_center(center2, time);
    (x - center).normalize()
}

/// Smallest non-negative root of `a*t^2 + b*t + c = 0`, or `None` if both
/// roots are negative or the discriminant is negative.
pub(super) fn smallest_nonneg_root(a: f32, b: f32, c: f32) -> Option<f32> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    if discriminant == 0.0 {
        let t = -b / (2.0 * a);
        return (t >= 0.0).then_some(t);
    }
    let sqrt_d = discriminant.sqrt();
    let t1 = (-b + sqrt_d) / (2.0 * a);
    let t2 = (-b - sqrt_d) / (2.0 * a);
    match (t1 >= 0.0, t2 >= 0.0) {
        (true, true) => Some(t1.min(t2)),
        (true, false) => Some(t1),
        (false, true) => Some(t2),
        (false, false) => None,
    }
}
