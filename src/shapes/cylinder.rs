use crate::math::{within_epsilon, Vec3};

/// Cylinder of radius 0.5 and height 1, capped at `y = -0.5` and `y = 0.5`.
pub fn cylinder_intersect(point: Vec3, direction: Vec3) -> Option<f32> {
    let mut t_values: Vec<f32> = Vec::new();

    let (px, py, pz) = (point.x, point.y, point.z);
    let (dx, dy, dz) = (direction.x, direction.y, direction.z);

    let a = dx * dx + dz * dz;
    let b = 2.0 * px * dx + 2.0 * pz * dz;
    let c = px * px + pz * pz - 0.25;
    let d = b * b - 4.0 * a * c;

    let within_height = |t: f32| {
        let y = py + dy * t;
        y <= 0.5 && y >= -0.5
    };

    if d > 0.0 {
        let sqrt_d = d.sqrt();
        let t1 = (-b + sqrt_d) / (2.0 * a);
        let t2 = (-b - sqrt_d) / (2.0 * a);
        if within_height(t1) && t1 >= 0.0 {
            t_values.push(t1);
        }
        if within_height(t2) && t2 >= 0.0 {
            t_values.push(t2);
        }
    } else if d == 0.0 {
        let t = -b / (2.0 * a);
        if within_height(t) && t >= 0.0 {
            t_values.push(t);
        }
    }

    let within_radius = |t: f32| {
        let x = px + dx * t;
        let z = pz + dz * t;
        x * x + z * z <= 0.25
    };

    let t_bottom = (-0.5 - py) / dy;
    if within_radius(t_bottom) && t_bottom >= 0.0 {
        t_values.push(t_bottom);
    }
    let t_top = (0.5 - py) / dy;
    if within_radius(t_top) && t_top >= 0.0 {
        t_values.push(t_top);
    }

    t_values.into_iter().fold(None, |acc, t| match acc {
        None => Some(t),
        Some(best) => Some(best.min(t)),
    })
}

pub fn cylinder_normal(x: Vec3) -> Vec3 {
    let (px, py, pz) = (x.x, x.y, x.z);
    if within_epsilon(py, -0.5) {
        Vec3::new(0.0, -1.0, 0.0)
    } else if within_epsilon(py, 0.5) {
        Vec3::new(0.0, 1.0, 0.0)
    } else if within_epsilon(px * px + pz * pz, 0.25) {
        Vec3::new(2.0 * px, 0.0, 2.0 * pz)
    } else {
        // should never be reached for a point actually on the cylinder's surface
        Vec3::new(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_through_axis_hits_side() {
        let point = Vec3::new(-2.0, 0.0, 0.0);
        let direction = Vec3::new(1.0, 0.0, 0.0);
        let t = cylinder_intersect(point, direction).expect("should hit");
        let hit = point + direction * t;
        assert_relative_eq!(hit.x, -0.5, epsilon = 1e-4);
    }

    #[test]
    fn ray_down_axis_hits_top_cap() {
        let point = Vec3::new(0.0, 2.0, 0.0);
        let direction = Vec3::new(0.0, -1.0, 0.0);
        let t = cylinder_intersect(point, direction).expect("should hit");
        let hit = point + direction * t;
        assert_relative_eq!(hit.y, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn side_normal_is_radial() {
        let n = cylinder_normal(Vec3::new(0.5, 0.0, 0.0));
        assert_relative_eq!(n.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(n.y, 0.0, epsilon = 1e-5);
    }
}
