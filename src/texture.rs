// TEXTURE CACHE - lazily loads diffuse texture images from disk and keeps
// them around for the life of a render. Insertion-only and read-mostly, so a
// shared RwLock is enough: concurrent renderer threads all read the same
// handful of images after the first few pixels have warmed the cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use image::RgbaImage;

use crate::material::TextureMap;
use crate::math::Color;
use crate::uv::texel_index;

pub struct Texture {
    pub image: RgbaImage,
}

impl Texture {
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn texel_color(&self, uv: (f32, f32), map: &TextureMap) -> Color {
        let (w, h) = self.dimensions();
        let (col, row) = texel_index(uv, map, w, h);
        let pixel = self.image.get_pixel(col, row);
        Color::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
            0.0,
        )
    }
}

#[derive(Default)]
pub struct TextureCache {
    loaded: RwLock<HashMap<String, Arc<Texture>>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached texture for `filename`, loading and inserting it
    /// on first use. Load failures are logged and surfaced to the caller so
    /// shading can fall back to the material's plain diffuse color.
    pub fn get(&self, filename: &str) -> anyhow::Result<Arc<Texture>> {
        if let Some(texture) = self.loaded.read().unwrap().get(filename) {
            return Ok(Arc::clone(texture));
        }

        let image = image::open(filename)
            .map(|img| img.to_rgba8())
            .map_err(|err| {
                log::warn!("failed to load texture {filename}: {err}");
                err
            })?;
        let texture = Arc::new(Texture { image });
        self.loaded
            .write()
            .unwrap()
            .insert(filename.to_string(), Arc::clone(&texture));
        Ok(texture)
    }
}
