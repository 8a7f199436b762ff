use crate::math::{within_epsilon, Vec3};

/// Cone of height 1 and base radius 0.5, apex at `y = 0.5`, base at `y = -0.5`.
pub fn cone_intersect(point: Vec3, direction: Vec3) -> Option<f32> {
    let mut t_values: Vec<f32> = Vec::new();

    let (px, py, pz) = (point.x, point.y, point.z);
    let (dx, dy, dz) = (direction.x, direction.y, direction.z);

    let a = dx * dx + dz * dz - 0.25 * dy * dy;
    let b = 2.0 * px * dx + 2.0 * pz * dz - 0.5 * py * dy + 0.25 * dy;
    let c = px * px + pz * pz - 0.25 * py * py + 0.25 * py - 1.0 / 16.0;
    let d = b * b - 4.0 * a * c;

    let on_lateral_surface = |t: f32| {
        let y = py + dy * t;
        y <= 0.5 && y >= -0.5
    };

    if d > 0.0 {
        let sqrt_d = d.sqrt();
        let t1 = (-b + sqrt_d) / (2.0 * a);
        let t2 = (-b - sqrt_d) / (2.0 * a);
        if on_lateral_surface(t1) && t1 >= 0.0 {
            t_values.push(t1);
        }
        if on_lateral_surface(t2) && t2 >= 0.0 {
            t_values.push(t2);
        }
    } else if d == 0.0 {
        let t = -b / (2.0 * a);
        if on_lateral_surface(t) && t >= 0.0 {
            t_values.push(t);
        }
    }

    // flat base at y = -0.5
    let t_base = (-0.5 - py) / dy;
    let x = px + dx * t_base;
    let z = pz + dz * t_base;
    if x * x + z * z <= 0.25 && t_base >= 0.0 {
        t_values.push(t_base);
    }

    t_values.into_iter().fold(None, |acc, t| match acc {
        None => Some(t),
        Some(best) => Some(best.min(t)),
    })
}

pub fn cone_normal(x: Vec3) -> Vec3 {
    let (px, py, pz) = (x.x, x.y, x.z);
    if within_epsilon(py, -0.5) {
        Vec3::new(0.0, -1.0, 0.0)
    } else if within_epsilon(px * px + pz * pz, ((0.5 - py) / 2.0) * ((0.5 - py) / 2.0)) {
        Vec3::new(2.0 * px, 0.25 - 0.5 * py, 2.0 * pz)
    } else {
        // should never be reached for a point actually on the cone's surface
        Vec3::new(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_straight_down_hits_base() {
        let point = Vec3::new(0.0, 0.0, 0.0);
        let direction = Vec3::new(0.0, -1.0, 0.0);
        let t = cone_intersect(point, direction).expect("should hit");
        let hit = point + direction * t;
        assert_relative_eq!(hit.y, -0.5, epsilon = 1e-4);
    }

    #[test]
    fn ray_along_axis_upward_hits_apex_region() {
        let point = Vec3::new(0.0, -1.0, 0.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let t = cone_intersect(point, direction).expect("should hit");
        let hit = point + direction * t;
        assert_relative_eq!(hit.y, -0.5, epsilon = 1e-4);
    }

    #[test]
    fn base_normal_points_down() {
        let n = cone_normal(Vec3::new(0.1, -0.5, 0.1));
        assert_relative_eq!(n.y, -1.0, epsilon = 1e-5);
    }
}
