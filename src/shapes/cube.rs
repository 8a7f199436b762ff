use super::moving_center;
use crate::math::{within_epsilon, Vec3};

/// Axis-aligned cube of side 1 centered at the object-space origin.
pub fn cube_intersect(point: Vec3, direction: Vec3) -> Option<f32> {
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 {
            best = Some(best.map_or(t, |b| b.min(t)));
        }
    };

    let Vec3 { x: px, y: py, z: pz } = point;
    let Vec3 { x: dx, y: dy, z: dz } = direction;

    if dx != 0.0 {
        for plane in [0.5f32, -0.5] {
            let t = (plane - px) / dx;
            let (y, z) = (py + dy * t, pz + dz * t);
            if in_unit_range(y) && in_unit_range(z) {
                consider(t);
            }
        }
    }
    if dy != 0.0 {
        for plane in [0.5f32, -0.5] {
            let t = (plane - py) / dy;
            let (x, z) = (px + dx * t, pz + dz * t);
            if in_unit_range(x) && in_unit_range(z) {
                consider(t);
            }
        }
    }
    if dz != 0.0 {
        for plane in [0.5f32, -0.5] {
            let t = (plane - pz) / dz;
            let (x, y) = (px + dx * t, py + dy * t);
            if in_unit_range(x) && in_unit_range(y) {
                consider(t);
            }
        }
    }
    best
}

fn in_unit_range(v: f32) -> bool {
    v <= 0.5 && v >= -0.5
}

pub fn cube_normal(x: Vec3) -> Vec3 {
    face_normal(x.x, x.y, x.z)
}

fn face_normal(x: f32, y: f32, z: f32) -> Vec3 {
    if within_epsilon(x, 0.5) {
        Vec3::new(1.0, 0.0, 0.0)
    } else if within_epsilon(x, -0.5) {
        Vec3::new(-1.0, 0.0, 0.0)
    } else if within_epsilon(y, 0.5) {
        Vec3::new(0.0, 1.0, 0.0)
    } else if within_epsilon(y, -0.5) {
        Vec3::new(0.0, -1.0, 0.0)
    } else if within_epsilon(z, 0.5) {
        Vec3::new(0.0, 0.0, 1.0)
    } else if within_epsilon(z, -0.5) {
        Vec3::new(0.0, 0.0, -1.0)
    } else {
        // should never be reached for a point actually on the cube's surface
        Vec3::new(0.0, 0.0, 0.0)
    }
}

pub fn moving_cube_intersect(point: Vec3, direction: Vec3, time: f32, center2: Vec3) -> Option<f32> {
    let center = moving_center(center2, time);
    cube_intersect(point - center, direction)
}

pub fn moving_cube_normal(x: Vec3, time: f32, center2: Vec3) -> Vec3 {
    let center = moving_center(center2, time);
    cube_normal(x - center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_through_center_hits_near_face() {
        let point = Vec3::new(0.0, 0.0, -2.0);
        let direction = Vec3::new(0.0, 0.0, 1.0);
        let t = cube_intersect(point, direction).expect("should hit");
        let hit = point + direction * t;
        assert_relative_eq!(hit.z, -0.5, epsilon = 1e-4);
    }

    #[test]
    fn grazing_edge_direction_does_not_panic() {
        let point = Vec3::new(0.0, 0.0, -2.0);
        let direction = Vec3::new(0.0, 0.5, 1.0);
        // must not divide by zero for the dx=0 slab pair
        let _ = cube_intersect(point, direction);
    }

    #[test]
    fn face_normal_matches_hit_face() {
        assert_relative_eq!(cube_normal(Vec3::new(0.5, 0.1, 0.2)).x, 1.0);
        assert_relative_eq!(cube_normal(Vec3::new(-0.5, 0.1, 0.2)).x, -1.0);
        assert_relative_eq!(cube_normal(Vec3::new(0.1, 0.5, 0.2)).y, 1.0);
    }
}
