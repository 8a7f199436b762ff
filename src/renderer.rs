// RENDERER - drives the per-pixel primary-ray loop: view-plane mapping,
// optional lens routing, N stochastic time samples for motion blur, and
// tone mapping into an 8-bit image. Rows render one task per row, over
// rayon when `enable_parallelism` is set, with an indicatif progress bar
// matching the reference renderer's console feel.

use image::RgbaImage;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rayon::prelude::*;

use crate::lens::{LensAssembly, LensResult};
use crate::math::{truncate, vector4, Vec3, Vec4};
use crate::rng::pixel_rng;
use crate::scene::RenderScene;
use crate::shading::{phong, tone_map, ShadingConfig};
use crate::texture::TextureCache;
use crate::trace::trace_ray;

/// Render feature toggles, mirroring the reference raytracer's fixed
/// `Config` defaults (everything off except the max recursion budget).
/// `enable_texture_filter`, `enable_super_sample`, `enable_acceleration` and
/// `only_render_normals` are carried over from the original configuration
/// surface but are no-ops here: this crate has no texture filtering mode,
/// no separate supersampling pass (motion-blur time sampling already
/// multi-samples every pixel), no acceleration structure, and no
/// normals-only debug mode.
#[derive(Debug, Clone, Copy)]
pub struct RendererConfig {
    pub enable_shadows: bool,
    pub enable_reflection: bool,
    pub enable_refraction: bool,
    pub enable_texture_map: bool,
    pub enable_texture_filter: bool,
    pub enable_parallelism: bool,
    pub enable_super_sample: bool,
    pub enable_acceleration: bool,
    pub enable_depth_of_field: bool,
    pub max_recursive_depth: u32,
    pub only_render_normals: bool,
    /// motion-blur time samples per pixel.
    pub time_samples: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            enable_shadows: false,
            enable_reflection: false,
            enable_refraction: false,
            enable_texture_map: false,
            enable_texture_filter: false,
            enable_parallelism: false,
            enable_super_sample: false,
            enable_acceleration: false,
            enable_depth_of_field: false,
            max_recursive_depth: 4,
            only_render_normals: false,
            time_samples: 100,
        }
    }
}

pub struct Renderer {
    pub scene: RenderScene,
    pub config: RendererConfig,
    pub lens: Option<LensAssembly>,
    pub textures: TextureCache,
}

impl Renderer {
    pub fn new(scene: RenderScene, config: RendererConfig, lens: Option<LensAssembly>) -> Self {
        Renderer {
            scene,
            config,
            lens,
            textures: TextureCache::new(),
        }
    }

    fn shading_config(&self) -> ShadingConfig {
        ShadingConfig {
            enable_shadows: self.config.enable_shadows,
            enable_reflection: self.config.enable_reflection,
            enable_texture_map: self.config.enable_texture_map,
            max_recursive_depth: self.config.max_recursive_depth,
        }
    }

    /// Traces and shades the primary ray through pixel `(i, j)` at a single
    /// motion-blur `time`, or `None` if the lens assembly vignettes the ray.
    fn sample_pixel(&self, i: u32, j: u32, time: f32, pixel_seed: u64) -> Option<crate::math::Color> {
        let width = self.scene.width;
        let height = self.scene.height;

        let lens = self.lens.as_ref().filter(|_| self.config.enable_refraction);
        let (world_eye, world_direction) = match lens {
            None => self.scene.camera.primary_ray(i, j, width, height),
            Some(assembly) => {
                // lens space is camera space reflected across z (optical axis
                // points to +z); flip in, trace, flip back out before
                // transforming to world space (spec §4.3/§4.6 step 3).
                let camera_ray = truncate(self.scene.camera.camera_space_ray(i, j, width, height));
                let lens_ray = Vec3::new(camera_ray.x, camera_ray.y, -camera_ray.z);
                let LensResult::Through { direction: adjusted, .. } = assembly.trace(lens_ray) else {
                    return None;
                };
                let camera_direction = Vec3::new(adjusted.x, adjusted.y, -adjusted.z);
                let view = self.scene.camera.view_matrix_inverse();
                let eye = view * crate::math::point4(Vec3::new(0.0, 0.0, 0.0));
                (eye, view * vector4(camera_direction))
            }
        };

        match trace_ray(&self.scene, world_eye, world_direction, time) {
            None => Some(crate::math::Color::new(0.0, 0.0, 0.0, 0.0)),
            Some(hit) => {
                let shading_config = self.shading_config();
                let direction_to_camera: Vec4 = -world_direction;
                Some(phong(
                    &self.scene,
                    &hit,
                    direction_to_camera,
                    &shading_config,
                    &self.textures,
                    time,
                    0,
                    pixel_seed,
                ))
            }
        }
    }

    /// Renders the scene into an RGBA image, averaging `time_samples`
    /// stochastic motion-blur samples per pixel.
    pub fn render(&self) -> RgbaImage {
        let width = self.scene.width;
        let height = self.scene.height;
        let mut image = RgbaImage::new(width, height);

        log::info!("rendering {width}x{height} ({} shapes, {} lights)", self.scene.shapes.len(), self.scene.lights.len());

        let progress = ProgressBar::new((width as u64) * (height as u64));
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}, {eta_precise}] {wide_bar:.green/blue} {pos:>7}/{len:7}")
                .unwrap()
                .progress_chars("##-"),
        );

        let vignetted_pixels = std::sync::atomic::AtomicU64::new(0);
        let render_row = |j: u32| -> Vec<[u8; 4]> {
            (0..width)
                .map(|i| {
                    let mut accumulated = crate::math::Color::new(0.0, 0.0, 0.0, 0.0);
                    let mut samples_taken = 0u32;
                    let n = self.config.time_samples.max(1);
                    for sample_index in 0..n {
                        let mut rng = pixel_rng(i, j, sample_index);
                        // stratified: t_k ~ U(k/n, (k+1)/n), one jittered sample per stratum
                        let time = (sample_index as f32 + rng.gen::<f32>()) / n as f32;
                        let seed = ((i as u64) << 32) ^ (j as u64) ^ ((sample_index as u64) << 16);
                        if let Some(color) = self.sample_pixel(i, j, time, seed) {
                            accumulated += color;
                            samples_taken += 1;
                        }
                    }
                    let averaged = if samples_taken > 0 {
                        accumulated * (1.0 / samples_taken as f32)
                    } else {
                        // every sample was vignetted by the lens assembly
                        vignetted_pixels.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                        crate::math::Color::new(1.0, 1.0, 1.0, 1.0)
                    };
                    progress.inc(1);
                    tone_map(averaged)
                })
                .collect()
        };

        // each pixel's samples only read immutable scene state and write a
        // disjoint row, so rows can render independently with no locking.
        let rows: Vec<Vec<[u8; 4]>> = if self.config.enable_parallelism {
            (0..height).into_par_iter().map(render_row).collect()
        } else {
            (0..height).map(render_row).collect()
        };

        for (j, row) in rows.into_iter().enumerate() {
            for (i, px) in row.into_iter().enumerate() {
                image.put_pixel(i as u32, j as u32, image::Rgba(px));
            }
        }

        progress.finish();
        let vignetted = vignetted_pixels.load(std::sync::atomic::Ordering::Relaxed);
        if vignetted > 0 {
            log::info!("{vignetted} pixel(s) fully vignetted by the lens assembly");
        }
        log::info!("render complete");
        image
    }
}
