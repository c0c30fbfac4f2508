//! Single-scattering raymarch and straight-line transmittance through air.

use aether_math::{Interval, Ray, Sphere};
use aether_physics::{mie_phase, rayleigh_phase};
use glam::Vec3;

use super::Atmosphere;
use super::column_density::{column_density_ratio_2d_scaled, column_density_ratio_3d};
use crate::{LightSet, LightSource};

/// Number of midpoint samples taken along the view ray.
///
/// Changing it changes output values.
pub const STEP_COUNT: u32 = 16;

/// Fraction of light surviving straight passage along a segment, per channel.
///
/// `segment.direction` must be unit length so that `length` is a distance.
/// Segments that pass through the ground transmit nothing.
pub fn air_transmittance(segment: &Ray, length: f32, world: &Sphere, atmosphere: &Atmosphere) -> Vec3 {
    let sigma = column_density_ratio_3d(
        segment.origin - world.center,
        segment.direction,
        length,
        world.radius,
        atmosphere.scale_height,
    );
    (-sigma * atmosphere.coefficients.extinction()).exp()
}

/// Light from one source scattered toward the viewer along `view`, W/m² per channel.
///
/// Integrates the parameter span `[span.entrance, span.exit]` of the view ray
/// with [`STEP_COUNT`] midpoint steps. At every step the sunlight reaching the
/// sample is attenuated by the column toward the light, scattered by the local
/// air density and phase functions, and attenuated again on its way back to the
/// viewer. The light ray is integrated out to `3 · world.radius` past its
/// closest approach, which stands in for infinity.
///
/// The phase angle is measured between the view direction and the direction
/// toward the light, so forward scattering peaks when looking at the source.
///
/// `view.direction` and `light.direction` must be unit length; a longer view
/// direction is not renormalised and skews the closest-approach geometry.
pub fn scattered_radiance(
    view: &Ray,
    span: Interval,
    world: &Sphere,
    light: &LightSource,
    atmosphere: &Atmosphere,
) -> Vec3 {
    // Scalars are terse on purpose: `z` closest approach, `r` radius from the
    // world centre, `h` height above the surface, `*v*` view ray, `*l*` light
    // ray, `*2` squares, `sigma` column density ratio, `gamma` phase factor.
    let v_dir = view.direction;
    let l_dir = light.direction;
    let p = view.origin - world.center;
    let r = world.radius;
    let hs = atmosphere.scale_height;
    let beta = &atmosphere.coefficients;

    let v = (-p).dot(v_dir);
    let z2 = p.dot(p) - v * v;

    let cos_angle = v_dir.dot(l_dir);
    let gamma_ray = rayleigh_phase(cos_angle);
    let gamma_mie = mie_phase(cos_angle);
    let beta_gamma = beta.rayleigh * gamma_ray + beta.mie * gamma_mie;
    let beta_sum = beta.extinction();

    let dx = span.length() / STEP_COUNT as f32;
    let mut vi = span.entrance - v + 0.5 * dx;
    let mut e = Vec3::ZERO;

    for _ in 0..STEP_COUNT {
        let r2 = vi * vi + z2;
        let h = r2.sqrt() - r;
        let sigma_v = column_density_ratio_2d_scaled(-v, vi, z2, r, hs);

        let l = (p + v_dir * (vi + v)).dot(-l_dir);
        let zl2 = r2 - l * l;
        let sigma_l = column_density_ratio_2d_scaled(-l, 3.0 * r, zl2, r, hs);

        e += light.intensity
            // fraction scattered toward the viewer
            * (-h / hs).exp()
            * beta_gamma
            * dx
            // fraction lost on the way in and on the way out
            * (-beta_sum * (sigma_l + sigma_v)).exp();

        vi += dx;
    }

    e
}

/// Sum of [`scattered_radiance`] over every light in the set.
pub fn scattered_radiance_for_lights(
    view: &Ray,
    span: Interval,
    world: &Sphere,
    lights: &LightSet,
    atmosphere: &Atmosphere,
) -> Vec3 {
    lights
        .iter()
        .map(|light| scattered_radiance(view, span, world, light, atmosphere))
        .fold(Vec3::ZERO, |acc, e| acc + e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScatteringCoefficients;
    use aether_math::interval_difference;

    const EARTH_RADIUS: f32 = aether_physics::constants::EARTH_RADIUS as f32;

    fn earth() -> Sphere {
        Sphere::new(Vec3::ZERO, EARTH_RADIUS)
    }

    /// Portion of the view ray inside the atmosphere shell and above ground.
    fn view_span(view: &Ray, world: &Sphere, atmosphere: &Atmosphere) -> Interval {
        let shell = world.grown(12.0 * atmosphere.scale_height);
        interval_difference(view.sphere_interval(&shell), view.sphere_interval(world))
            .expect("view ray should cross the atmosphere")
            .clamp_to_forward()
    }

    fn sky(view_dir: Vec3, sun_dir: Vec3) -> Vec3 {
        let atmosphere = Atmosphere::earth_like();
        let view = Ray::new(Vec3::new(0.0, EARTH_RADIUS + 100.0, 0.0), view_dir.normalize());
        let span = view_span(&view, &earth(), &atmosphere);
        let sun = LightSource::new(sun_dir.normalize(), Vec3::splat(166.0));
        scattered_radiance(&view, span, &earth(), &sun, &atmosphere)
    }

    #[test]
    fn test_zero_coefficients_transmit_everything() {
        let atmosphere = Atmosphere::new(8500.0, ScatteringCoefficients::zero());
        let origin = Vec3::new(0.0, EARTH_RADIUS + 10.0, 0.0);
        for (dir, length) in [
            (Vec3::X, 1.0),
            (Vec3::X, 1e6),
            (Vec3::Y, 5e7),
            // straight into the ground
            (-Vec3::Y, 1e7),
        ] {
            let t = air_transmittance(&Ray::new(origin, dir), length, &earth(), &atmosphere);
            assert_eq!(t, Vec3::ONE, "dir {dir:?}, length {length}");
        }
    }

    #[test]
    fn test_transmittance_into_ground_is_zero() {
        let atmosphere = Atmosphere::earth_like();
        let origin = Vec3::new(0.0, EARTH_RADIUS + 10.0, 0.0);
        let t = air_transmittance(&Ray::new(origin, -Vec3::Y), 1e5, &earth(), &atmosphere);
        assert_eq!(t, Vec3::ZERO);
    }

    #[test]
    fn test_transmittance_composes_over_adjoining_segments() {
        // Small world keeps f32 cancellation out of the comparison.
        let world = Sphere::new(Vec3::ZERO, 1000.0);
        let atmosphere = Atmosphere::new(
            10.0,
            ScatteringCoefficients::new(
                Vec3::new(0.004, 0.01, 0.02),
                Vec3::splat(0.01),
                Vec3::new(0.001, 0.002, 0.0),
            ),
        );
        let dir = Vec3::new(1.0, 0.3, 0.0).normalize();
        let origin = Vec3::new(0.0, 1005.0, 0.0);

        let first = air_transmittance(&Ray::new(origin, dir), 30.0, &world, &atmosphere);
        let second = air_transmittance(&Ray::new(origin + dir * 30.0, dir), 50.0, &world, &atmosphere);
        let whole = air_transmittance(&Ray::new(origin, dir), 80.0, &world, &atmosphere);

        let composed = first * second;
        assert!(
            (composed - whole).abs().max_element() < 1e-4,
            "{composed:?} vs {whole:?}"
        );
        assert!(whole.max_element() < 1.0);
    }

    #[test]
    fn test_transmittance_decreases_with_length() {
        let atmosphere = Atmosphere::earth_like();
        let ray = Ray::new(Vec3::new(0.0, EARTH_RADIUS + 10.0, 0.0), Vec3::X);
        let near = air_transmittance(&ray, 1_000.0, &earth(), &atmosphere);
        let far = air_transmittance(&ray, 100_000.0, &earth(), &atmosphere);
        assert!(far.x < near.x && far.z < near.z);
        // blue is extinguished faster than red
        assert!(far.z < far.x);
    }

    #[test]
    fn test_noon_sky_is_blue() {
        let noon = sky(Vec3::new(1.0, 0.5, 0.0), Vec3::Y);
        assert!(noon.z > noon.x, "{noon:?}");
    }

    #[test]
    fn test_sunset_sky_is_redder_than_noon() {
        let view_dir = Vec3::new(1.0, 0.5, 0.0);
        let noon = sky(view_dir, Vec3::Y);
        let sunset = sky(view_dir, Vec3::new(1.0, 0.01, 0.0));

        let noon_ratio = noon.x / noon.z.max(1e-10);
        let sunset_ratio = sunset.x / sunset.z.max(1e-10);
        assert!(sunset_ratio > 1.0, "sunset {sunset:?}");
        assert!(sunset_ratio > noon_ratio, "{sunset_ratio} <= {noon_ratio}");
    }

    #[test]
    fn test_night_sky_is_dark() {
        let night = sky(Vec3::new(1.0, 0.5, 0.0), -Vec3::Y);
        assert!(night.max_element() < 1e-3, "{night:?}");
    }

    #[test]
    fn test_aerosol_glow_around_sun() {
        let sun_dir = Vec3::new(1.0, 0.2, 0.0);
        let toward = sky(sun_dir, sun_dir);
        let away = sky(Vec3::new(-1.0, 0.2, 0.0), sun_dir);
        assert!(toward.element_sum() > 10.0 * away.element_sum(), "{toward:?} vs {away:?}");
    }

    #[test]
    fn test_radiance_is_linear_in_intensity() {
        let atmosphere = Atmosphere::earth_like();
        let view = Ray::new(Vec3::new(0.0, EARTH_RADIUS + 100.0, 0.0), Vec3::new(1.0, 0.5, 0.0).normalize());
        let span = view_span(&view, &earth(), &atmosphere);

        let dim = LightSource::new(Vec3::Y, Vec3::splat(100.0));
        let bright = LightSource::new(Vec3::Y, Vec3::splat(200.0));
        let e1 = scattered_radiance(&view, span, &earth(), &dim, &atmosphere);
        let e2 = scattered_radiance(&view, span, &earth(), &bright, &atmosphere);
        assert!((e2 - 2.0 * e1).abs().max_element() <= e2.max_element() * 1e-5);
    }

    #[test]
    fn test_empty_span_scatters_nothing() {
        let atmosphere = Atmosphere::earth_like();
        let view = Ray::new(Vec3::new(0.0, EARTH_RADIUS + 100.0, 0.0), Vec3::X);
        let sun = LightSource::new(Vec3::Y, Vec3::splat(166.0));
        let e = scattered_radiance(&view, Interval::new(0.0, 0.0), &earth(), &sun, &atmosphere);
        assert_eq!(e, Vec3::ZERO);
    }

    #[test]
    fn test_lights_sum_independently() {
        let atmosphere = Atmosphere::earth_like();
        let view = Ray::new(Vec3::new(0.0, EARTH_RADIUS + 100.0, 0.0), Vec3::new(1.0, 0.5, 0.0).normalize());
        let span = view_span(&view, &earth(), &atmosphere);

        let a = LightSource::new(Vec3::Y, Vec3::new(100.0, 80.0, 60.0));
        let b = LightSource::new(Vec3::new(1.0, 0.1, 0.0).normalize(), Vec3::splat(50.0));
        let lights = LightSet::from_lights([a, b]).unwrap();

        let total = scattered_radiance_for_lights(&view, span, &earth(), &lights, &atmosphere);
        let separate = scattered_radiance(&view, span, &earth(), &a, &atmosphere)
            + scattered_radiance(&view, span, &earth(), &b, &atmosphere);
        assert!((total - separate).abs().max_element() <= total.max_element() * 1e-6);

        let none = scattered_radiance_for_lights(&view, span, &earth(), &LightSet::new(), &atmosphere);
        assert_eq!(none, Vec3::ZERO);
    }
}
