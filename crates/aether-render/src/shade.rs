//! Per-pixel compositing of scattered light over the background.

use aether_math::interval_difference;
use aether_physics::{EXPOSURE_INTENSITY, rgb_intensity_of_rgb_signal, rgb_signal_of_rgb_intensity, tone_map};
use aether_scatter::{air_transmittance, scattered_radiance_for_lights};
use glam::{Vec2, Vec3, Vec4};

use crate::{SceneInputs, ViewInputs};

/// Thickness of the raymarched shell above the surface, in scale heights.
pub const ATMOSPHERE_SCALE_HEIGHTS: f32 = 12.0;

/// Background light is attenuated over this fraction of the view span so the
/// segment end never sits exactly on the shell or the ground.
pub const BACKGROUND_PATH_FRACTION: f32 = 0.999;

/// Output signal colour of one pixel.
///
/// `background_signal` is the gamma-encoded background colour at `uv`. Returns
/// RGBA with alpha 1. Pixels whose view ray misses the atmosphere (or whose
/// only intersection is hidden behind the planet) show the background
/// unchanged apart from tone mapping.
pub fn shade_pixel(uv: Vec2, background_signal: Vec3, view: &ViewInputs, scene: &SceneInputs) -> Vec4 {
    let ray = view.view_ray(uv);
    let world = &scene.world;
    let atmosphere = &scene.atmosphere;
    let background = scene.insolation_max * rgb_intensity_of_rgb_signal(background_signal);

    let shell = world.grown(ATMOSPHERE_SCALE_HEIGHTS * atmosphere.scale_height);
    let atmosphere_region = ray.sphere_interval(&shell);
    let obstructed_region = ray.sphere_interval(world);

    let e = match interval_difference(atmosphere_region, obstructed_region) {
        Some(region) => {
            let span = region.clamp_to_forward();
            let scattered = scattered_radiance_for_lights(&ray, span, world, &scene.lights, atmosphere);
            let transmitted = air_transmittance(&ray, span.exit * BACKGROUND_PATH_FRACTION, world, atmosphere);
            scattered + background * transmitted
        }
        None => background,
    };

    rgb_signal_of_rgb_intensity(tone_map(e, EXPOSURE_INTENSITY)).extend(1.0)
}
