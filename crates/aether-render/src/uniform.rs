//! GPU-side layout of the atmosphere pass parameters.

use aether_math::{MAX_LIGHT_COUNT, Sphere};
use aether_scatter::{Atmosphere, LightSet, LightSource, ScatterError, ScatteringCoefficients};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::{SceneInputs, ViewInputs};

/// Uniform buffer for the atmosphere fragment pass.
///
/// std140-compatible, 496 bytes.
/// Vec3 members are padded to 16 bytes; light arrays use vec4 slots with an
/// unused fourth component.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniform {
    /// Inverse projection matrix, column major. (offset 0)
    pub projection_matrix_inverse: [[f32; 4]; 4],
    /// Inverse view matrix, column major. (offset 64)
    pub view_matrix_inverse: [[f32; 4]; 4],
    /// World centre. (offset 128)
    pub world_position: [f32; 3],
    /// World radius. (offset 140)
    pub world_radius: f32,
    /// (offset 144)
    pub reference_distance: f32,
    /// (offset 148)
    pub insolation_max: f32,
    /// (offset 152)
    pub atmosphere_scale_height: f32,
    /// Number of active entries in the light arrays. (offset 156)
    pub light_count: u32,
    /// (offset 160)
    pub rayleigh_coefficients: [f32; 3],
    pub _pad_rayleigh: f32,
    /// (offset 176)
    pub mie_coefficients: [f32; 3],
    pub _pad_mie: f32,
    /// (offset 192)
    pub absorption_coefficients: [f32; 3],
    pub _pad_absorption: f32,
    /// Unit vectors toward each light. (offset 208)
    pub light_directions: [[f32; 4]; MAX_LIGHT_COUNT],
    /// RGB intensity of each light. (offset 352)
    pub light_intensities: [[f32; 4]; MAX_LIGHT_COUNT],
}

impl SceneUniform {
    /// Pack view and scene inputs into the uniform layout.
    pub fn new(view: &ViewInputs, scene: &SceneInputs) -> Self {
        let mut light_directions = [[0.0; 4]; MAX_LIGHT_COUNT];
        let mut light_intensities = [[0.0; 4]; MAX_LIGHT_COUNT];
        for (i, light) in scene.lights.iter().enumerate() {
            light_directions[i] = light.direction.extend(0.0).to_array();
            light_intensities[i] = light.intensity.extend(0.0).to_array();
        }
        let beta = &scene.atmosphere.coefficients;

        Self {
            projection_matrix_inverse: view.projection_matrix_inverse.to_cols_array_2d(),
            view_matrix_inverse: view.view_matrix_inverse.to_cols_array_2d(),
            world_position: scene.world.center.to_array(),
            world_radius: scene.world.radius,
            reference_distance: view.reference_distance,
            insolation_max: scene.insolation_max,
            atmosphere_scale_height: scene.atmosphere.scale_height,
            light_count: scene.lights.len() as u32,
            rayleigh_coefficients: beta.rayleigh.to_array(),
            _pad_rayleigh: 0.0,
            mie_coefficients: beta.mie.to_array(),
            _pad_mie: 0.0,
            absorption_coefficients: beta.absorption.to_array(),
            _pad_absorption: 0.0,
            light_directions,
            light_intensities,
        }
    }

    pub fn view_inputs(&self) -> ViewInputs {
        ViewInputs::new(
            Mat4::from_cols_array_2d(&self.projection_matrix_inverse),
            Mat4::from_cols_array_2d(&self.view_matrix_inverse),
            self.reference_distance,
        )
    }

    /// Unpack the scene, failing if `light_count` exceeds the array size.
    pub fn scene_inputs(&self) -> Result<SceneInputs, ScatterError> {
        let count = self.light_count as usize;
        if count > MAX_LIGHT_COUNT {
            return Err(ScatterError::TooManyLights {
                count,
                max: MAX_LIGHT_COUNT,
            });
        }
        let lights = LightSet::from_lights((0..count).map(|i| {
            LightSource::new(
                Vec3::from_slice(&self.light_directions[i]),
                Vec3::from_slice(&self.light_intensities[i]),
            )
        }))?;
        let coefficients = ScatteringCoefficients::new(
            Vec3::from_array(self.rayleigh_coefficients),
            Vec3::from_array(self.mie_coefficients),
            Vec3::from_array(self.absorption_coefficients),
        );
        Ok(SceneInputs::new(
            Sphere::new(Vec3::from_array(self.world_position), self.world_radius),
            Atmosphere::new(self.atmosphere_scale_height, coefficients),
            lights,
            self.insolation_max,
        ))
    }
}
