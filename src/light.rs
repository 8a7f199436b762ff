// LIGHTS - world-space light data produced by scene flattening. Point,
// Directional and Spot mirror the original fixed-function light types; Area
// is this crate's own addition (soft shadows via grid-jittered sampling).

use rand::Rng;

use crate::math::{Color, Vec3};

#[derive(Debug, Clone)]
pub enum Light {
    Point {
        position: Vec3,
        color: Color,
        attenuation: Vec3,
    },
    Directional {
        direction: Vec3,
        color: Color,
    },
    Spot {
        position: Vec3,
        direction: Vec3,
        color: Color,
        attenuation: Vec3,
        angle: f32,
        penumbra: f32,
    },
    Area {
        position: Vec3,
        /// half-extents along two axes spanning the light's rectangle
        u_axis: Vec3,
        v_axis: Vec3,
        color: Color,
        attenuation: Vec3,
    },
}

/// `std::min(1, 1 / (c0 + c1*d + c2*d^2))` attenuation used by point/spot lights.
pub fn attenuate(function: Vec3, distance: f32) -> f32 {
    (1.0 / (function.x + distance * function.y + distance * distance * function.z)).min(1.0)
}

/// Cubic-smoothstep spotlight falloff between the inner and outer cone angle.
/// `angle` is the angle between the spotlight's axis and the direction to the
/// shaded point, in radians.
pub fn spot_falloff(angle: f32, outer: f32, inner: f32) -> f32 {
    if angle <= inner {
        1.0
    } else if angle <= outer {
        let t = (angle - inner) / (outer - inner);
        1.0 - (-2.0 * t.powi(3) + 3.0 * t.powi(2))
    } else {
        0.0
    }
}

const AREA_GRID: usize = 6;

/// Jittered sample points over an area light's rectangle: a 6x6 grid with one
/// random offset per cell, matching this crate's documented Monte Carlo
/// sampling scheme (see DESIGN.md for the `hits / 36` normalization it pairs
/// with in shading).
pub fn area_light_samples(
    position: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
    rng: &mut impl Rng,
) -> Vec<Vec3> {
    let mut samples = Vec::with_capacity(AREA_GRID * AREA_GRID);
    let cell = 1.0 / AREA_GRID as f32;
    for i in 0..AREA_GRID {
        for j in 0..AREA_GRID {
            let jitter_u = (i as f32 + rng.gen::<f32>()) * cell * 2.0 - 1.0;
            let jitter_v = (j as f32 + rng.gen::<f32>()) * cell * 2.0 - 1.0;
            samples.push(position + u_axis * jitter_u + v_axis * jitter_v);
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    #[test]
    fn spot_falloff_is_full_inside_inner_cone() {
        assert_relative_eq!(spot_falloff(0.1, 0.5, 0.3), 1.0);
    }

    #[test]
    fn spot_falloff_is_zero_outside_outer_cone() {
        assert_relative_eq!(spot_falloff(0.9, 0.5, 0.3), 0.0);
    }

    #[test]
    fn area_light_produces_36_samples() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let samples = area_light_samples(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            &mut rng,
        );
        assert_eq!(samples.len(), 36);
    }
}
