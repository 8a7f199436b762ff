// MATERIAL - per-shape Phong coefficients and optional diffuse texture map.

use crate::math::Color;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TextureMap {
    pub filename: String,
    pub repeat_u: f32,
    pub repeat_v: f32,
}

#[derive(Debug, Clone)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub reflective: Color,
    pub shininess: f32,
    /// `0.0` disables texturing even when `texture` is set; `1.0` replaces
    /// the diffuse color outright. Values in between linearly blend.
    pub blend: f32,
    pub texture: Option<TextureMap>,
}

impl Material {
    pub fn is_textured(&self) -> bool {
        self.texture.is_some() && self.blend > 0.0
    }

    pub fn is_reflective(&self) -> bool {
        self.reflective.x != 0.0 || self.reflective.y != 0.0 || self.reflective.z != 0.0
    }
}
