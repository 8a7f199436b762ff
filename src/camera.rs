// CAMERA - Gram-Schmidt view matrix construction and primary ray generation.

use cgmath::{InnerSpace, SquareMatrix};

use crate::math::{point4, vector4, Mat4, Vec3, Vec4};

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub look: Vec3,
    pub up: Vec3,
    pub aspect_ratio: f32,
    pub height_angle: f32,
    view_matrix: Mat4,
    view_matrix_inverse: Mat4,
}

impl Camera {
    pub fn new(position: Vec3, look: Vec3, up: Vec3, aspect_ratio: f32, height_angle: f32) -> Self {
        let translate = Mat4::from_translation(-position);

        let w = (-look).normalize();
        let v = (up - up.dot(w) * w).normalize();
        let u = v.cross(w);
        #[rustfmt::skip]
        let rotate = Mat4::new(
            u.x, v.x, w.x, 0.0,
            u.y, v.y, w.y, 0.0,
            u.z, v.z, w.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        let view_matrix = rotate * translate;
        let view_matrix_inverse = view_matrix
            .invert()
            .expect("camera view matrix must be invertible");

        Camera {
            position,
            look,
            up,
            aspect_ratio,
            height_angle,
            view_matrix,
            view_matrix_inverse,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    pub fn view_matrix_inverse(&self) -> Mat4 {
        self.view_matrix_inverse
    }

    /// This assembly is intentionally thin: focal length and aperture are
    /// properties of a lens assembly, not of the pinhole camera itself.
    pub fn focal_length(&self) -> f32 {
        unimplemented!("focal length is a lens assembly property, not a camera property")
    }

    pub fn aperture(&self) -> f32 {
        unimplemented!("aperture is a lens assembly property, not a camera property")
    }

    /// Builds the world-space primary ray through pixel `(i, j)` of an
    /// image `width` x `height` pixels, in homogeneous `(point, direction)`
    /// form. `k` is the view-plane distance (always 1, kept explicit to
    /// mirror the view-plane derivation it comes from).
    pub fn primary_ray(&self, i: u32, j: u32, width: u32, height: u32) -> (Vec4, Vec4) {
        let k = 1.0f32;
        let view_plane_height = 2.0 * k * (self.height_angle / 2.0).tan();
        let view_plane_width = self.aspect_ratio * view_plane_height;

        let y = view_plane_height
            * (((height as f32 - 1.0 - j as f32 + 0.5) / height as f32) - 0.5);
        let x = view_plane_width * ((i as f32 + 0.5) / width as f32 - 0.5);

        let uvk = point4(Vec3::new(x, y, -k));
        let eye = point4(Vec3::new(0.0, 0.0, 0.0));
        let direction = uvk - eye;

        let world_eye = self.view_matrix_inverse * eye;
        let world_direction = self.view_matrix_inverse * direction;
        (world_eye, world_direction)
    }

    /// Camera-space primary ray direction only, used by the lens assembly to
    /// trace refraction before the ray is transformed into world space.
    pub fn camera_space_ray(&self, i: u32, j: u32, width: u32, height: u32) -> Vec4 {
        let k = 1.0f32;
        let view_plane_height = 2.0 * k * (self.height_angle / 2.0).tan();
        let view_plane_width = self.aspect_ratio * view_plane_height;

        let y = view_plane_height
            * (((height as f32 - 1.0 - j as f32 + 0.5) / height as f32) - 0.5);
        let x = view_plane_width * ((i as f32 + 0.5) / width as f32 - 0.5);

        vector4(Vec3::new(x, y, -k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Matrix4;

    #[test]
    fn looking_down_negative_z_is_identity_rotation() {
        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            std::f32::consts::FRAC_PI_2,
        );
        let identity: Matrix4<f32> = Matrix4::from_scale(1.0);
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(camera.view_matrix()[i][j], identity[i][j], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn view_matrix_and_its_inverse_compose_to_identity() {
        let camera = Camera::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            1.3333,
            1.0,
        );
        let product = camera.view_matrix() * camera.view_matrix_inverse();
        let identity: Matrix4<f32> = Matrix4::from_scale(1.0);
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(product[i][j], identity[i][j], epsilon = 1e-3);
            }
        }
    }

    #[test]
    #[should_panic]
    fn focal_length_is_unimplemented_on_the_pinhole_camera() {
        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            1.0,
        );
        camera.focal_length();
    }
}
