// SCENE TRAVERSAL - finds the nearest shape a world-space ray hits (or, for
// shadow rays, just the distance to it) by transforming the ray into each
// shape's object space and dispatching to its closed-form intersection
// kernel. The global minimum is tracked across all shapes, exactly as the
// reference raytracer does it.

use cgmath::{InnerSpace, Matrix, SquareMatrix};

use crate::math::{linear_part, truncate, Mat3, Vec3, Vec4};
use crate::scene::{RenderScene, RenderShape};
use crate::shapes::{self, PrimitiveKind};

pub struct Hit<'a> {
    pub t: f32,
    pub shape: &'a RenderShape,
    pub world_position: Vec4,
    pub world_normal: Vec3,
    /// object-space hit point, needed for UV mapping.
    pub object_hit: Vec3,
}

fn intersect_shape(shape: &RenderShape, position: Vec4, direction: Vec4, time: f32) -> Option<f32> {
    let object_position = truncate(shape.inverse_ctm * position);
    let object_direction = truncate(shape.inverse_ctm * direction);
    shapes::intersect(shape.kind, object_position, object_direction, time, shape.center2)
}

/// Finds the nearest shape hit by the ray `(position, direction)`, or `None`
/// if it misses every shape in the scene.
pub fn trace_ray<'a>(
    scene: &'a RenderScene,
    position: Vec4,
    direction: Vec4,
    time: f32,
) -> Option<Hit<'a>> {
    let mut best: Option<(f32, &RenderShape)> = None;

    for shape in &scene.shapes {
        if let Some(t) = intersect_shape(shape, position, direction, time) {
            if best.map_or(true, |(best_t, _)| t < best_t) {
                best = Some((t, shape));
            }
        }
    }

    let (t, shape) = best?;

    let object_position = truncate(shape.inverse_ctm * position);
    let object_direction = truncate(shape.inverse_ctm * direction);
    let object_hit = object_position + object_direction * t;
    let object_normal = shapes::normal(shape.kind, object_hit, time, shape.center2);

    let normal_matrix = linear_part(shape.ctm)
        .invert()
        .map(|m| m.transpose())
        .unwrap_or(Mat3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0));
    let mut world_normal = normal_matrix * object_normal;
    if world_normal.dot(truncate(-direction)) < 0.0 {
        world_normal = -world_normal;
    }

    let world_position = position + direction * t;

    Some(Hit {
        t,
        shape,
        world_position,
        world_normal: world_normal.normalize(),
        object_hit,
    })
}

/// Traces a shadow ray and returns the distance to the nearest shape it
/// hits, or `None` if it reaches no shape (an unobstructed path to the
/// light).
pub fn trace_shadow_ray(scene: &RenderScene, position: Vec4, direction: Vec4, time: f32) -> Option<f32> {
    let mut min_t = f32::MAX;
    let mut hit = false;

    for shape in &scene.shapes {
        if let Some(t) = intersect_shape(shape, position, direction, time) {
            if t < min_t {
                min_t = t;
                hit = true;
            }
        }
    }

    hit.then(|| (direction * min_t).magnitude())
}
