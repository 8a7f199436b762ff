// LENS ASSEMBLY - an ordered stack of spherical refracting elements plus an
// aperture stop, traced front-to-back through Snell's law. A ray that never
// finds a valid intersection with an element (outside the lens) is rejected
// rather than treated as a miss; the renderer paints those pixels white.

use cgmath::InnerSpace;

use crate::math::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct LensElement {
    /// Signed radius of curvature; root selection (nearest vs. farthest
    /// intersection) depends on its sign.
    pub radius: f32,
    pub eta: f32,
    /// Distance from the previous element (or the sensor, for the first).
    pub thickness: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Aperture {
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct LensAssembly {
    pub elements: Vec<LensElement>,
    pub aperture: Aperture,
}

/// Outcome of tracing a ray through a lens assembly. `Outside` means the ray
/// never found a valid intersection with some element (or cleared the
/// aperture radius) — the renderer treats this as a vignetted pixel and
/// paints it white rather than treating it as a geometric miss.
#[derive(Debug, Clone, Copy)]
pub enum LensResult {
    Through { direction: Vec3, position: Vec3 },
    Outside,
}

/// Intersects a ray against a sphere of `radius` centered on the optical axis
/// at `z_offset`, in the lens's local frame.
fn lens_sphere_intersect(point: Vec3, direction: Vec3, radius: f32, z_offset: f32) -> Vec<f32> {
    let local = Vec3::new(point.x, point.y, point.z - z_offset);
    let a = direction.dot(direction);
    let b = 2.0 * local.dot(direction);
    let c = local.dot(local) - radius * radius;
    let d = b * b - 4.0 * a * c;

    let mut t_values = Vec::new();
    if d > 0.0 {
        let sqrt_d = d.sqrt();
        let t1 = (-b + sqrt_d) / (2.0 * a);
        let t2 = (-b - sqrt_d) / (2.0 * a);
        match (t1 >= 0.0, t2 >= 0.0) {
            (true, true) => {
                t_values.push(t1);
                t_values.push(t2);
            }
            (true, false) => t_values.push(t1),
            (false, true) => t_values.push(t2),
            (false, false) => {}
        }
    } else if d == 0.0 {
        let t = -b / (2.0 * a);
        if t >= 0.0 {
            t_values.push(t);
        }
    }
    t_values
}

fn lens_sphere_normal(point: Vec3) -> Vec3 {
    2.0 * point
}

/// Snell's-law refraction of `-incident` through a surface with unit normal
/// `normal`, given the incident/transmit cosines and the eta ratio
/// (incident medium's eta / transmitted medium's eta).
fn refraction(incident: Vec3, normal: Vec3, eta_ratio: f32, cos_incident: f32, cos_transmit: f32) -> Vec3 {
    eta_ratio * -incident + (eta_ratio * cos_incident - cos_transmit) * normal
}

/// Refracts a ray through a single lens element. Returns the new direction
/// and hit position, or `None` if the ray misses the element's sphere.
fn trace_through_element(
    direction: Vec3,
    position: Vec3,
    element: LensElement,
    cumulative_thickness: f32,
) -> Option<(Vec3, Vec3)> {
    let z_offset = cumulative_thickness + element.thickness;
    let t_values = lens_sphere_intersect(position, direction, element.radius, z_offset);
    if t_values.is_empty() {
        return None;
    }

    let t = if element.radius > 0.0 {
        t_values.iter().cloned().fold(f32::INFINITY, f32::min)
    } else {
        t_values.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    };
    let hit = direction * t + position;

    let normal = lens_sphere_normal(hit - Vec3::new(0.0, 0.0, z_offset)).normalize();
    let cos_incident = (-direction).normalize().dot(normal);
    let eta_ratio = 1.0 / element.eta;

    let sin2_incident = (1.0 - cos_incident * cos_incident).max(0.0);
    let sin2_transmit = eta_ratio * eta_ratio * sin2_incident;
    let cos_transmit = (1.0 - sin2_transmit).sqrt();

    let new_direction = refraction((-direction).normalize(), normal, eta_ratio, cos_incident, cos_transmit);
    Some((new_direction, hit))
}

impl LensAssembly {
    /// Traces a camera-space ray front-to-back through every element and
    /// the aperture stop.
    pub fn trace(&self, initial_direction: Vec3) -> LensResult {
        let mut direction = initial_direction;
        let mut position = Vec3::new(0.0, 0.0, 0.0);
        let mut cumulative_thickness = 0.0f32;

        for element in &self.elements {
            match trace_through_element(direction, position, *element, cumulative_thickness) {
                Some((next_direction, next_position)) => {
                    direction = next_direction;
                    position = next_position;
                    cumulative_thickness += element.thickness;
                }
                None => return LensResult::Outside,
            }
        }

        if position.x * position.x + position.y * position.y > self.aperture.radius * self.aperture.radius {
            return LensResult::Outside;
        }

        LensResult::Through { direction, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_assembly() -> LensAssembly {
        LensAssembly {
            elements: vec![
                LensElement { radius: 1.1, eta: 1.2, thickness: 1.1 },
                LensElement { radius: 1.5, eta: 1.3, thickness: 4.5 },
            ],
            aperture: Aperture { radius: 0.5 },
        }
    }

    #[test]
    fn on_axis_ray_passes_straight_through() {
        let assembly = sample_assembly();
        match assembly.trace(Vec3::new(0.0, 0.0, 1.0)) {
            LensResult::Through { direction, .. } => {
                assert_relative_eq!(direction.x, 0.0, epsilon = 1e-3);
                assert_relative_eq!(direction.y, 0.0, epsilon = 1e-3);
            }
            LensResult::Outside => panic!("on-axis ray should not be vignetted"),
        }
    }

    #[test]
    fn ray_far_off_axis_is_rejected() {
        let assembly = sample_assembly();
        assert!(matches!(
            assembly.trace(Vec3::new(5.0, 5.0, 1.0)),
            LensResult::Outside
        ));
    }
}
