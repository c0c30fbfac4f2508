//! Per-invocation parameters of the atmosphere pass.

use aether_math::{Ray, Sphere};
use aether_scatter::{Atmosphere, LightSet};
use glam::{Mat4, Vec2, Vec4};

/// Camera state supplied by the host pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewInputs {
    pub projection_matrix_inverse: Mat4,
    pub view_matrix_inverse: Mat4,
    /// Converts the view matrix translation into world units.
    pub reference_distance: f32,
}

impl ViewInputs {
    pub fn new(projection_matrix_inverse: Mat4, view_matrix_inverse: Mat4, reference_distance: f32) -> Self {
        Self {
            projection_matrix_inverse,
            view_matrix_inverse,
            reference_distance,
        }
    }

    /// Build inputs from forward camera matrices.
    pub fn from_camera(projection: Mat4, view: Mat4, reference_distance: f32) -> Self {
        Self::new(projection.inverse(), view.inverse(), reference_distance)
    }

    /// Ray through the far plane at screen position `uv` in `[0, 1]²`.
    ///
    /// The direction is the xyz part of the normalised homogeneous vector, so
    /// it is unit length only when the homogeneous `w` vanishes.
    pub fn view_ray(&self, uv: Vec2) -> Ray {
        let clip = 2.0 * uv - Vec2::ONE;
        let origin = self.view_matrix_inverse.w_axis.truncate() * self.reference_distance;
        let far = self.view_matrix_inverse * self.projection_matrix_inverse * Vec4::new(clip.x, clip.y, 1.0, 1.0);
        Ray::new(origin, far.normalize().truncate())
    }
}

/// World, atmosphere and lighting shared by every pixel of a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneInputs {
    pub world: Sphere,
    pub atmosphere: Atmosphere,
    pub lights: LightSet,
    /// Intensity that a fully white background signal represents, W/m².
    pub insolation_max: f32,
}

impl SceneInputs {
    pub fn new(world: Sphere, atmosphere: Atmosphere, lights: LightSet, insolation_max: f32) -> Self {
        Self {
            world,
            atmosphere,
            lights,
            insolation_max,
        }
    }
}
