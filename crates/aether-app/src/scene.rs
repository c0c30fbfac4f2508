//! Turns a loaded [`Config`] into renderer inputs.

use aether_config::{Config, LightConfig};
use aether_math::Sphere;
use aether_render::{Background, RenderError, SceneInputs, SignalImage, ViewInputs};
use aether_scatter::{Atmosphere, LightSet, LightSource, ScatterError, ScatteringCoefficients};
use glam::{Mat4, Vec3};

/// Near and far planes of the camera frustum, in view units. Only ray
/// directions are used, so the far plane just needs to be distant.
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1e9;

/// Camera above the world's +Y pole looking along the configured direction.
pub fn view_inputs(config: &Config) -> ViewInputs {
    let camera = &config.camera;
    let aspect = config.output.width as f32 / config.output.height.max(1) as f32;
    let projection = Mat4::perspective_rh_gl(camera.vertical_fov_deg.to_radians(), aspect, NEAR_PLANE, FAR_PLANE);

    let eye = Vec3::new(0.0, config.world.radius_m + camera.altitude_m, 0.0) / camera.reference_distance;
    let forward = Vec3::from_array(camera.look_direction).try_normalize().unwrap_or(Vec3::X);
    let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 { Vec3::Z } else { Vec3::Y };
    let view = Mat4::look_at_rh(eye, eye + forward, up);

    ViewInputs::from_camera(projection, view, camera.reference_distance)
}

pub fn light_source(light: &LightConfig) -> LightSource {
    match *light {
        LightConfig::Direct { direction, intensity } => LightSource::new(
            Vec3::from_array(direction).normalize_or_zero(),
            Vec3::from_array(intensity),
        ),
        LightConfig::Star {
            temperature_k,
            radius_m,
            distance_m,
            direction,
            samples,
        } => LightSource::from_star(temperature_k, radius_m, distance_m, Vec3::from_array(direction), samples),
    }
}

pub fn scene_inputs(config: &Config) -> Result<SceneInputs, ScatterError> {
    let world = &config.world;
    let coefficients = ScatteringCoefficients::new(
        Vec3::from_array(world.rayleigh),
        Vec3::from_array(world.mie),
        Vec3::from_array(world.absorption),
    );
    let lights = LightSet::from_lights(config.lights.iter().map(light_source))?;
    Ok(SceneInputs::new(
        Sphere::new(Vec3::ZERO, world.radius_m),
        Atmosphere::new(world.scale_height_m, coefficients),
        lights,
        config.background.insolation_max,
    ))
}

pub fn background(config: &Config) -> Result<Background, RenderError> {
    match &config.background.image {
        Some(path) => Ok(Background::Image(SignalImage::load_png(path)?)),
        None => Ok(Background::Solid(Vec3::from_array(config.background.color))),
    }
}
