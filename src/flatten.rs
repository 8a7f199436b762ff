// SCENE FLATTENING - depth-first composition of the scene graph's nested
// transformations into a flat list of render-ready shapes and lights, each
// carrying the cumulative transform matrix (CTM) active at its node.

use cgmath::{Rotation3, SquareMatrix};

use crate::camera::Camera;
use crate::light::Light;
use crate::math::{truncate, vector4, Mat4, Vec3};
use crate::scene::{GlobalCoefficients, RenderScene, RenderShape};
use crate::scene_graph::{instantiate_light, SceneLightKind, SceneNode, SceneTransformation};

fn compose(transformation: &SceneTransformation) -> Mat4 {
    match *transformation {
        SceneTransformation::Translate(t) => Mat4::from_translation(t),
        SceneTransformation::Scale(s) => Mat4::from_nonuniform_scale(s.x, s.y, s.z),
        SceneTransformation::Rotate(axis, angle) => {
            Mat4::from_axis_angle(axis, cgmath::Rad(angle))
        }
        SceneTransformation::Matrix(m) => m,
    }
}

fn dfs_build(node: &SceneNode, ctm: Mat4, shapes: &mut Vec<RenderShape>, lights: &mut Vec<Light>) {
    let mut new_ctm = ctm;
    for transformation in &node.transformations {
        new_ctm = new_ctm * compose(transformation);
    }

    for primitive in &node.primitives {
        let inverse_ctm = new_ctm
            .invert()
            .expect("scene transform must be invertible");
        shapes.push(RenderShape {
            kind: primitive.kind,
            material: primitive.material.clone().into(),
            center2: primitive.center2,
            ctm: new_ctm,
            inverse_ctm,
        });
    }

    for light in &node.lights {
        let world_position = truncate(new_ctm * crate::math::point4(Vec3::new(0.0, 0.0, 0.0)));
        let world_direction = truncate(new_ctm * vector4(light.direction));
        let (u_axis, v_axis) = match light.kind {
            SceneLightKind::Area { width, height, .. } => {
                let linear = crate::math::linear_part(new_ctm);
                (
                    linear * Vec3::new(width / 2.0, 0.0, 0.0),
                    linear * Vec3::new(0.0, 0.0, height / 2.0),
                )
            }
            _ => (Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0)),
        };
        lights.push(instantiate_light(
            light,
            world_position,
            world_direction,
            u_axis,
            v_axis,
        ));
    }

    for child in &node.children {
        dfs_build(child, new_ctm, shapes, lights);
    }
}

/// Flattens a scene graph rooted at `root` into a render-ready `RenderScene`.
pub fn flatten(
    root: &SceneNode,
    width: u32,
    height: u32,
    camera: Camera,
    global: GlobalCoefficients,
) -> RenderScene {
    let mut shapes = Vec::new();
    let mut lights = Vec::new();
    dfs_build(root, Mat4::from_scale(1.0), &mut shapes, &mut lights);
    RenderScene {
        width,
        height,
        camera,
        global,
        shapes,
        lights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;
    use crate::scene_graph::{ScenePrimitive, ScenePrimitiveMaterial};
    use crate::shapes::PrimitiveKind;
    use approx::assert_relative_eq;

    fn flat_material() -> ScenePrimitiveMaterial {
        ScenePrimitiveMaterial {
            ambient: Color::new(0.1, 0.1, 0.1, 1.0),
            diffuse: Color::new(0.5, 0.5, 0.5, 1.0),
            specular: Color::new(0.5, 0.5, 0.5, 1.0),
            reflective: Color::new(0.0, 0.0, 0.0, 1.0),
            shininess: 10.0,
            blend: 0.0,
            texture: None,
        }
    }

    fn test_camera() -> Camera {
        Camera::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            1.0,
        )
    }

    #[test]
    fn translate_composes_into_child_shape_ctm() {
        let mut root = SceneNode::default();
        root.transformations.push(SceneTransformation::Translate(Vec3::new(2.0, 0.0, 0.0)));
        root.primitives.push(ScenePrimitive {
            kind: PrimitiveKind::Sphere,
            material: flat_material(),
            center2: None,
        });

        let scene = flatten(
            &root,
            10,
            10,
            test_camera(),
            GlobalCoefficients { ambient: 1.0, diffuse: 1.0, specular: 1.0 },
        );
        let world_origin = scene.shapes[0].ctm * crate::math::point4(Vec3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(world_origin.x, 2.0, epsilon = 1e-4);
    }
}
