// SHAPE KERNELS - closed-form ray/primitive intersection and surface normals
// for each canonical object-space primitive. Each kernel works purely in
// object space; the traversal boundary (crate::trace) is the only place that
// knows about world-space transforms.

mod cone;
mod cube;
mod cylinder;
mod sphere;

use crate::math::Vec3;

pub use cone::{cone_intersect, cone_normal};
pub use cube::{cube_intersect, cube_normal, moving_cube_intersect, moving_cube_normal};
pub use cylinder::{cylinder_intersect, cylinder_normal};
pub use sphere::{moving_sphere_intersect, moving_sphere_normal, sphere_intersect, sphere_normal};

/// The finite tagged set of primitive kinds a `RenderShape` can be.
///
/// Dispatch on this enum happens only at the scene-traversal boundary
/// (`trace::trace_ray`/`trace_shadow_ray`); no per-ray heap allocation or
/// dynamic dispatch is introduced for shape behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Cone,
    Cylinder,
    SphereMoving,
    CubeMoving,
}

/// Effective center of a moving primitive at motion-blur time `time`,
/// linearly interpolated between the object-space origin and `center2`.
pub fn moving_center(center2: Vec3, time: f32) -> Vec3 {
    center2 * time
}

/// Intersects `(point, direction)` against the primitive in its own object
/// frame, returning the smallest non-negative root, or `None` if the ray
/// misses. `time` is only consulted for the moving variants.
pub fn intersect(
    kind: PrimitiveKind,
    point: Vec3,
    direction: Vec3,
    time: f32,
    center2: Option<Vec3>,
) -> Option<f32> {
    match kind {
        PrimitiveKind::Cube => cube_intersect(point, direction),
        PrimitiveKind::Sphere => sphere_intersect(point, direction),
        PrimitiveKind::Cone => cone_intersect(point, direction),
        PrimitiveKind::Cylinder => cylinder_intersect(point, direction),
        PrimitiveKind::SphereMoving => {
            moving_sphere_intersect(point, direction, time, center2.unwrap_or(Vec3::new(0.0, 0.0, 0.0)))
        }
        PrimitiveKind::CubeMoving => {
            moving_cube_intersect(point, direction, time, center2.unwrap_or(Vec3::new(0.0, 0.0, 0.0)))
        }
    }
}

/// Outward object-space normal at the hit point `x` (not required to be
/// unit length; callers normalize where needed).
pub fn normal(kind: PrimitiveKind, x: Vec3, time: f32, center2: Option<Vec3>) -> Vec3 {
    match kind {
        PrimitiveKind::Cube => cube_normal(x),
        PrimitiveKind::Sphere => sphere_normal(x),
        PrimitiveKind::Cone => cone_normal(x),
        PrimitiveKind::Cylinder => cylinder_normal(x),
        PrimitiveKind::SphereMoving => {
            moving_sphere_normal(x, time, center2.unwrap_or(Vec3::new(0.0, 0.0, 0.0)))
        }
        PrimitiveKind::CubeMoving => {
            moving_cube_normal(x, time, center2.unwrap_or(Vec3::new(0.0, 0.0, 0.0)))
        }
    }
}
