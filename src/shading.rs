// SHADING KERNEL - the Phong lighting model: ambient term, per-light
// diffuse/specular with shadow gating, optional diffuse texture blending,
// and bounded recursive mirror reflection.

use cgmath::{ElementWise, InnerSpace};
use rand::SeedableRng;

use crate::light::{area_light_samples, attenuate, spot_falloff, Light};
use crate::material::Material;
use crate::math::{clamp01, reflect, truncate, vector4, Color, Vec3, Vec4, RAY_BIAS};
use crate::scene::{GlobalCoefficients, RenderScene};
use crate::shapes::PrimitiveKind;
use crate::texture::TextureCache;
use crate::trace::{trace_ray, trace_shadow_ray, Hit};
use crate::uv::shape_uv;

pub struct ShadingConfig {
    pub enable_shadows: bool,
    pub enable_reflection: bool,
    pub enable_texture_map: bool,
    pub max_recursive_depth: u32,
}

/// Samples the material's diffuse color at a hit, blending in the texture
/// map's texel when texturing is enabled and the material requests it.
fn diffuse_color(
    material: &Material,
    global: &GlobalCoefficients,
    kind: PrimitiveKind,
    object_hit: Vec3,
    textures: &TextureCache,
    config: &ShadingConfig,
) -> Color {
    let plain = global.diffuse * material.diffuse;
    if !config.enable_texture_map || !material.is_textured() {
        return plain;
    }
    let map = material.texture.as_ref().expect("is_textured implies Some");
    match textures.get(&map.filename) {
        Ok(texture) => {
            let uv = shape_uv(kind, object_hit);
            let texel = texture.texel_color(uv, map);
            material.blend * texel + (1.0 - material.blend) * plain
        }
        Err(_) => plain,
    }
}

/// Phong-shades a single hit, recursing into reflected rays when the
/// material is reflective and the recursion budget allows it.
#[allow(clippy::too_many_arguments)]
pub fn phong(
    scene: &RenderScene,
    hit: &Hit,
    direction_to_camera: Vec4,
    config: &ShadingConfig,
    textures: &TextureCache,
    time: f32,
    completed_reflections: u32,
    pixel_seed: u64,
) -> Color {
    let material = &hit.shape.material;
    let global = &scene.global;
    let position = hit.world_position;
    let normal = hit.world_normal;
    let view = truncate(direction_to_camera).normalize();

    let mut illumination = global.ambient * material.ambient;

    for light in &scene.lights {
        illumination += light_contribution(
            scene, light, hit, position, normal, view, material, global, config, textures, time,
            pixel_seed,
        );
    }

    if config.enable_reflection
        && completed_reflections < config.max_recursive_depth
        && material.is_reflective()
    {
        let reflected = reflect(view, normal);
        let origin = position + vector4(reflected) * RAY_BIAS;
        if let Some(next_hit) = trace_ray(scene, origin, vector4(reflected), time) {
            let bounced = phong(
                scene,
                &next_hit,
                vector4(reflected),
                config,
                textures,
                time,
                completed_reflections + 1,
                pixel_seed,
            );
            illumination += (global.specular * material.reflective).mul_element_wise(bounced);
        }
    }

    illumination
}

#[allow(clippy::too_many_arguments)]
fn light_contribution(
    scene: &RenderScene,
    light: &Light,
    hit: &Hit,
    position: Vec4,
    normal: Vec3,
    view: Vec3,
    material: &Material,
    global: &GlobalCoefficients,
    config: &ShadingConfig,
    textures: &TextureCache,
    time: f32,
    pixel_seed: u64,
) -> Color {
    match *light {
        Light::Point { position: light_pos, color, attenuation } => {
            let to_light = light_pos - truncate(position);
            let distance = to_light.magnitude();
            let direction = to_light.normalize();
            let fatt = attenuate(attenuation, distance);
            let lit = !config.enable_shadows
                || shadow_unblocked(scene, position, direction, distance, time);
            point_like_term(
                hit, direction, normal, view, color, fatt, lit, material, global, config,
                textures,
            )
        }
        Light::Directional { direction, color } => {
            let to_light = (-direction).normalize();
            let lit = !config.enable_shadows
                || trace_shadow_ray(scene, position + vector4(to_light) * RAY_BIAS, vector4(to_light), time)
                    .is_none();
            point_like_term(
                hit, to_light, normal, view, color, 1.0, lit, material, global, config,
                textures,
            )
        }
        Light::Spot { position: light_pos, direction, color, attenuation, angle, penumbra } => {
            let to_light = light_pos - truncate(position);
            let distance = to_light.magnitude();
            let light_direction = to_light.normalize();
            let fatt = attenuate(attenuation, distance);

            let direction_to_object = (truncate(position) - light_pos).normalize();
            let cos_angle = direction.normalize().dot(direction_to_object).clamp(-1.0, 1.0);
            let theta = cos_angle.acos();
            let intensity = spot_falloff(theta, angle, angle - penumbra);

            let lit = !config.enable_shadows
                || shadow_unblocked(scene, position, light_direction, distance, time);
            point_like_term(
                hit,
                light_direction,
                normal,
                view,
                color * intensity,
                fatt,
                lit,
                material,
                global,
                config,
                textures,
            )
        }
        Light::Area { position: light_pos, u_axis, v_axis, color, attenuation } => {
            let mut rng = rand::rngs::StdRng::seed_from_u64(pixel_seed);
            let samples = area_light_samples(light_pos, u_axis, v_axis, &mut rng);
            let mut hits = 0u32;
            let mut accumulated = Color::new(0.0, 0.0, 0.0, 0.0);
            for sample in &samples {
                let to_light = *sample - truncate(position);
                let distance = to_light.magnitude();
                let direction = to_light.normalize();
                let fatt = attenuate(attenuation, distance);
                if config.enable_shadows
                    && trace_shadow_ray(
                        scene,
                        position + vector4(direction) * RAY_BIAS,
                        vector4(direction),
                        time,
                    )
                    .is_some_and(|d| d <= distance)
                {
                    continue;
                }
                hits += 1;
                accumulated += point_like_term(
                    hit, direction, normal, view, color, fatt, true, material, global,
                    config, textures,
                );
            }
            // `hits` counts cells whose Lambert term was positive and
            // unoccluded; dividing the sum by `hits/36` (spec §4.5) rather
            // than a flat 36 inflates the contribution whenever cells fail,
            // which spec §9 flags as the documented fidelity choice (kept
            // here rather than "corrected" to the standard `/36`).
            if hits == 0 {
                Color::new(0.0, 0.0, 0.0, 0.0)
            } else {
                accumulated * (36.0 / hits as f32)
            }
        }
    }
}

fn shadow_unblocked(
    scene: &RenderScene,
    position: Vec4,
    direction_to_light: Vec3,
    distance_to_light: f32,
    time: f32,
) -> bool {
    let origin = position + vector4(direction_to_light) * RAY_BIAS;
    match trace_shadow_ray(scene, origin, vector4(direction_to_light), time) {
        None => true,
        Some(min_distance) => min_distance > distance_to_light,
    }
}

#[allow(clippy::too_many_arguments)]
fn point_like_term(
    hit: &Hit,
    direction_to_light: Vec3,
    normal: Vec3,
    view: Vec3,
    light_color: Color,
    attenuation: f32,
    lit: bool,
    material: &Material,
    global: &GlobalCoefficients,
    config: &ShadingConfig,
    textures: &TextureCache,
) -> Color {
    let lambert = direction_to_light.dot(normal);
    if lambert <= 0.0 || !lit {
        return Color::new(0.0, 0.0, 0.0, 0.0);
    }

    let diffuse = diffuse_color(material, global, hit.shape.kind, hit.object_hit, textures, config);
    let mut term = (light_color * attenuation).mul_element_wise(diffuse) * lambert;

    let reflected = reflect(direction_to_light, normal);
    let specular_dot = reflected.dot(view).max(0.0);
    let specular_color = global.specular * material.specular;
    term += (light_color * attenuation).mul_element_wise(specular_color)
        * specular_dot.powf(material.shininess);

    term
}

pub fn tone_map(color: Color) -> [u8; 4] {
    [
        (clamp01(color.x) * 255.0) as u8,
        (clamp01(color.y) * 255.0) as u8,
        (clamp01(color.z) * 255.0) as u8,
        255,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_map_clamps_out_of_range_channels() {
        let over = Color::new(2.0, -1.0, 0.5, 0.0);
        assert_eq!(tone_map(over), [255, 0, 127, 255]);
    }
}
