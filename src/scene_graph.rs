// SCENE GRAPH INPUT TYPES - the hierarchical description a scene file
// deserializes into, before flattening collapses it into a RenderScene.
// Mirrors the transform/primitive/light node shape of the original scene
// format closely enough that a JSON/RON scene file maps onto it directly.

use serde::{Deserialize, Serialize};

use crate::light::Light;
use crate::material::{Material, TextureMap};
use crate::math::{Color, Vec3};
use crate::shapes::PrimitiveKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneTransformation {
    Translate(Vec3),
    Scale(Vec3),
    /// axis, angle in radians
    Rotate(Vec3, f32),
    Matrix(crate::math::Mat4),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePrimitiveMaterial {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub reflective: Color,
    pub shininess: f32,
    pub blend: f32,
    pub texture: Option<TextureMap>,
}

impl From<ScenePrimitiveMaterial> for Material {
    fn from(m: ScenePrimitiveMaterial) -> Self {
        Material {
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            reflective: m.reflective,
            shininess: m.shininess,
            blend: m.blend,
            texture: m.texture,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePrimitive {
    pub kind: PrimitiveKind,
    pub material: ScenePrimitiveMaterial,
    /// object-space secondary center used by the moving variants; ignored
    /// by stationary primitives.
    pub center2: Option<Vec3>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneLightKind {
    Point { attenuation: Vec3 },
    Directional,
    Spot { attenuation: Vec3, angle: f32, penumbra: f32 },
    Area { width: f32, height: f32, attenuation: Vec3 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneLight {
    pub kind: SceneLightKind,
    pub color: Color,
    /// object-space direction; only meaningful for Directional and Spot.
    pub direction: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SceneNode {
    pub transformations: Vec<SceneTransformation>,
    pub primitives: Vec<ScenePrimitive>,
    pub lights: Vec<SceneLight>,
    pub children: Vec<SceneNode>,
}

/// Flattened world-space light, produced by `crate::flatten` from a
/// `SceneLight` and the cumulative transform active at its node. `u_axis`
/// and `v_axis` are the area light's already-world-transformed half-extent
/// axes; ignored for every other light kind.
pub fn instantiate_light(
    light: &SceneLight,
    world_position: Vec3,
    world_direction: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
) -> Light {
    match light.kind {
        SceneLightKind::Point { attenuation } => Light::Point {
            position: world_position,
            color: light.color,
            attenuation,
        },
        SceneLightKind::Directional => Light::Directional {
            direction: world_direction,
            color: light.color,
        },
        SceneLightKind::Spot { attenuation, angle, penumbra } => Light::Spot {
            position: world_position,
            direction: world_direction,
            color: light.color,
            attenuation,
            angle,
            penumbra,
        },
        SceneLightKind::Area { attenuation, .. } => Light::Area {
            position: world_position,
            u_axis,
            v_axis,
            color: light.color,
            attenuation,
        },
    }
}
