pub mod camera;
pub mod flatten;
pub mod lens;
pub mod light;
pub mod material;
pub mod math;
pub mod renderer;
pub mod rng;
pub mod scene;
pub mod scene_graph;
pub mod shading;
pub mod shapes;
pub mod texture;
pub mod trace;
pub mod uv;

pub use camera::Camera;
pub use flatten::flatten;
pub use lens::{Aperture, LensAssembly, LensElement};
pub use material::Material;
pub use renderer::{Renderer, RendererConfig};
pub use scene::{GlobalCoefficients, RenderScene, RenderShape};
pub use scene_graph::SceneNode;

#[cfg(test)]
mod end_to_end_tests {
    use crate::light::Light;
    use crate::math::{Color, Vec3};
    use crate::scene_graph::{SceneLight, SceneLightKind, ScenePrimitive, ScenePrimitiveMaterial};
    use crate::shapes::PrimitiveKind;
    use crate::{flatten, Camera, GlobalCoefficients, Renderer, RendererConfig, SceneNode};

    fn unit_sphere_scene() -> SceneNode {
        let mut root = SceneNode::default();
        root.primitives.push(ScenePrimitive {
            kind: PrimitiveKind::Sphere,
            material: ScenePrimitiveMaterial {
                ambient: Color::new(1.0, 1.0, 1.0, 1.0),
                diffuse: Color::new(1.0, 1.0, 1.0, 1.0),
                specular: Color::new(0.0, 0.0, 0.0, 1.0),
                reflective: Color::new(0.0, 0.0, 0.0, 1.0),
                shininess: 1.0,
                blend: 0.0,
                texture: None,
            },
            center2: None,
        });
        root.lights.push(SceneLight {
            kind: SceneLightKind::Directional,
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        });
        root
    }

    // Scenario 1 (spec): a unit sphere at the origin lit by a single white
    // directional light along -z, ka=0.1/kd=0.9, shadows off. The center
    // pixel should be lit with R=G=B, and the render should be mirror
    // symmetric about both midlines since the sphere/light setup is too.
    #[test]
    fn single_sphere_directional_light_is_centered_and_symmetric() {
        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            0.8,
        );
        let scene = flatten(
            &unit_sphere_scene(),
            20,
            20,
            camera,
            GlobalCoefficients { ambient: 0.1, diffuse: 0.9, specular: 0.0 },
        );

        let renderer = Renderer::new(
            scene,
            RendererConfig { time_samples: 4, ..RendererConfig::default() },
            None,
        );
        let image = renderer.render();

        let center = image.get_pixel(10, 10);
        assert!(center[0] > 0, "center pixel should be lit");
        assert_eq!(center[0], center[1]);
        assert_eq!(center[1], center[2]);

        let corner = image.get_pixel(0, 0);
        assert_eq!([corner[0], corner[1], corner[2], corner[3]], [0, 0, 0, 255]);

        for (x, y) in [(6, 10), (14, 10), (10, 6), (10, 14)] {
            let p = image.get_pixel(x, y);
            let mirror = match (x, y) {
                (6, 10) => image.get_pixel(14, 10),
                (14, 10) => image.get_pixel(6, 10),
                (10, 6) => image.get_pixel(10, 14),
                _ => image.get_pixel(10, 6),
            };
            assert_eq!(p[0], mirror[0]);
        }
    }

    // Scenario (spec §8 invariant): zero lights and ka=0 must render all
    // black, since ambient contributes nothing and there is nothing left
    // to light the surface.
    #[test]
    fn no_lights_and_zero_ambient_renders_all_black() {
        let mut root = SceneNode::default();
        root.primitives.push(ScenePrimitive {
            kind: PrimitiveKind::Sphere,
            material: ScenePrimitiveMaterial {
                ambient: Color::new(1.0, 1.0, 1.0, 1.0),
                diffuse: Color::new(1.0, 1.0, 1.0, 1.0),
                specular: Color::new(0.0, 0.0, 0.0, 1.0),
                reflective: Color::new(0.0, 0.0, 0.0, 1.0),
                shininess: 1.0,
                blend: 0.0,
                texture: None,
            },
            center2: None,
        });

        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            0.8,
        );
        let scene = flatten(
            &root,
            8,
            8,
            camera,
            GlobalCoefficients { ambient: 0.0, diffuse: 1.0, specular: 1.0 },
        );
        let renderer = Renderer::new(scene, RendererConfig { time_samples: 2, ..RendererConfig::default() }, None);
        let image = renderer.render();

        for pixel in image.pixels() {
            assert_eq!([pixel[0], pixel[1], pixel[2]], [0, 0, 0]);
        }
    }

    #[test]
    fn flattening_preserves_light_count_and_kind() {
        let scene = flatten(
            &unit_sphere_scene(),
            4,
            4,
            Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0), 1.0, 0.8),
            GlobalCoefficients { ambient: 0.1, diffuse: 0.9, specular: 0.0 },
        );
        assert_eq!(scene.lights.len(), 1);
        assert!(matches!(scene.lights[0], Light::Directional { .. }));
    }
}
