// UV MAPPING - per-primitive-kind texture coordinate formulas, all operating
// on the object-space hit point. Pole and apex hits collapse `u` to 0.5
// rather than leaving it undefined.

use std::f32::consts::PI;

use crate::material::TextureMap;
use crate::math::{within_epsilon, Vec3};
use crate::shapes::PrimitiveKind;

fn azimuthal_u(x: f32, z: f32) -> f32 {
    let theta = z.atan2(x);
    if theta < 0.0 {
        -theta / (2.0 * PI)
    } else {
        1.0 - theta / (2.0 * PI)
    }
}

fn sphere_uv(hit: Vec3) -> (f32, f32) {
    let phi = (hit.y / 0.5).asin();
    let v = phi / PI + 0.5;
    if within_epsilon(v, 1.0) || within_epsilon(v, 0.0) {
        (0.5, v)
    } else {
        (azimuthal_u(hit.x, hit.z), v)
    }
}

fn cube_uv(hit: Vec3) -> (f32, f32) {
    let (x, y, z) = (hit.x, hit.y, hit.z);
    if within_epsilon(x, 0.5) {
        (-z + 0.5, y + 0.5)
    } else if within_epsilon(x, -0.5) {
        (z + 0.5, y + 0.5)
    } else if within_epsilon(y, 0.5) {
        (x + 0.5, -z + 0.5)
    } else if within_epsilon(y, -0.5) {
        (x + 0.5, z + 0.5)
    } else if within_epsilon(z, 0.5) {
        (x + 0.5, y + 0.5)
    } else if within_epsilon(z, -0.5) {
        (-x + 0.5, y + 0.5)
    } else {
        (-1.0, -1.0)
    }
}

fn cone_uv(hit: Vec3) -> (f32, f32) {
    let (x, y, z) = (hit.x, hit.y, hit.z);
    if within_epsilon(y, -0.5) {
        (x + 0.5, z + 0.5)
    } else if within_epsilon(x * x + z * z, ((0.5 - y) / 2.0) * ((0.5 - y) / 2.0)) {
        let v = y + 0.5;
        if within_epsilon(v, 1.0) {
            (0.5, v)
        } else {
            (azimuthal_u(x, z), v)
        }
    } else {
        (-1.0, -1.0)
    }
}

fn cylinder_uv(hit: Vec3) -> (f32, f32) {
    let (x, y, z) = (hit.x, hit.y, hit.z);
    if within_epsilon(y, -0.5) {
        (x + 0.5, z + 0.5)
    } else if within_epsilon(y, 0.5) {
        (x + 0.5, -z + 0.5)
    } else if within_epsilon(x * x + z * z, 0.25) {
        (azimuthal_u(x, z), y + 0.5)
    } else {
        (-1.0, -1.0)
    }
}

/// Object-space UV coordinates of a hit point, dispatched by primitive kind.
/// The moving variants share their stationary counterpart's UV formula
/// (the shape itself, not its center, moves).
pub fn shape_uv(kind: PrimitiveKind, hit: Vec3) -> (f32, f32) {
    match kind {
        PrimitiveKind::Cube | PrimitiveKind::CubeMoving => cube_uv(hit),
        PrimitiveKind::Sphere | PrimitiveKind::SphereMoving => sphere_uv(hit),
        PrimitiveKind::Cone => cone_uv(hit),
        PrimitiveKind::Cylinder => cylinder_uv(hit),
    }
}

/// Row/column texel index for `(u, v)` against an image of the given
/// dimensions, honoring the texture map's repeat factors. `v` is flipped
/// (image row 0 is the top) before scaling.
pub fn texel_index(uv: (f32, f32), map: &TextureMap, width: u32, height: u32) -> (u32, u32) {
    let (u, v) = uv;
    let mut col = (u * map.repeat_u * width as f32) as i64 % width as i64;
    if col == (map.repeat_u * width as f32) as i64 {
        col -= 1;
    }
    let mut row = ((1.0 - v) * map.repeat_v * height as f32) as i64 % height as i64;
    if row == (map.repeat_v * height as f32) as i64 {
        row -= 1;
    }
    (col.max(0) as u32, row.max(0) as u32)
}
