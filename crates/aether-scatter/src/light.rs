//! Directional light sources.

use aether_math::MAX_LIGHT_COUNT;
use aether_physics::black_body_rgb_intensity;
use glam::Vec3;

use crate::ScatterError;

/// A distant light source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    /// Unit vector from the lit point toward the source.
    pub direction: Vec3,
    /// Intensity arriving at the top of the atmosphere, W/m² per channel.
    pub intensity: Vec3,
}

impl LightSource {
    pub fn new(direction: Vec3, intensity: Vec3) -> Self {
        Self {
            direction,
            intensity,
        }
    }

    /// Light from a black-body star seen from `distance` meters away.
    ///
    /// Surface flux is diluted by the ratio of the star's surface area to the
    /// area of a sphere at `distance`, then divided evenly across `samples`
    /// sample positions when a moving star is smeared over several directions.
    pub fn from_star(
        temperature: f32,
        star_radius: f64,
        distance: f64,
        direction: Vec3,
        samples: u32,
    ) -> Self {
        let attenuation = (star_radius / distance).powi(2);
        let exposure = 1.0 / samples.max(1) as f64;
        let intensity = black_body_rgb_intensity(temperature) * (attenuation * exposure) as f32;
        Self::new(direction.normalize_or_zero(), intensity)
    }
}

/// An ordered set of at most [`MAX_LIGHT_COUNT`] light sources.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightSet {
    lights: Vec<LightSource>,
}

impl LightSet {
    pub fn new() -> Self {
        Self {
            lights: Vec::with_capacity(MAX_LIGHT_COUNT),
        }
    }

    /// Build a set from an iterator, failing if it yields too many lights.
    pub fn from_lights(lights: impl IntoIterator<Item = LightSource>) -> Result<Self, ScatterError> {
        let mut set = Self::new();
        for light in lights {
            set.try_push(light)?;
        }
        Ok(set)
    }

    /// Append a light, or fail if the set is already full.
    pub fn try_push(&mut self, light: LightSource) -> Result<(), ScatterError> {
        if self.lights.len() >= MAX_LIGHT_COUNT {
            return Err(ScatterError::TooManyLights {
                count: self.lights.len() + 1,
                max: MAX_LIGHT_COUNT,
            });
        }
        self.lights.push(light);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LightSource> {
        self.lights.iter()
    }

    pub fn as_slice(&self) -> &[LightSource] {
        &self.lights
    }
}

impl<'a> IntoIterator for &'a LightSet {
    type Item = &'a LightSource;
    type IntoIter = std::slice::Iter<'a, LightSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.lights.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aether_physics::constants::{ASTRONOMICAL_UNIT, SOLAR_RADIUS, SOLAR_TEMPERATURE};

    fn light(i: usize) -> LightSource {
        LightSource::new(Vec3::Y, Vec3::splat(i as f32))
    }

    #[test]
    fn test_set_keeps_order() {
        let set = LightSet::from_lights((0..3).map(light)).unwrap();
        let order: Vec<f32> = set.iter().map(|l| l.intensity.x).collect();
        assert_eq!(order, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_set_accepts_maximum() {
        let set = LightSet::from_lights((0..MAX_LIGHT_COUNT).map(light)).unwrap();
        assert_eq!(set.len(), MAX_LIGHT_COUNT);
    }

    #[test]
    fn test_set_rejects_overflow() {
        let err = LightSet::from_lights((0..MAX_LIGHT_COUNT + 1).map(light)).unwrap_err();
        assert_eq!(
            err,
            ScatterError::TooManyLights {
                count: MAX_LIGHT_COUNT + 1,
                max: MAX_LIGHT_COUNT
            }
        );
    }

    #[test]
    fn test_sunlight_at_one_au() {
        let sun = LightSource::from_star(
            SOLAR_TEMPERATURE as f32,
            SOLAR_RADIUS,
            ASTRONOMICAL_UNIT,
            Vec3::new(0.0, 2.0, 0.0),
            1,
        );
        assert_eq!(sun.direction, Vec3::Y);
        // Visible part of the ~1361 W/m² solar constant.
        let visible = sun.intensity.x + sun.intensity.y + sun.intensity.z;
        assert!((400.0..600.0).contains(&visible), "{visible}");
    }

    #[test]
    fn test_star_samples_share_intensity() {
        let one = LightSource::from_star(SOLAR_TEMPERATURE as f32, SOLAR_RADIUS, ASTRONOMICAL_UNIT, Vec3::X, 1);
        let four = LightSource::from_star(SOLAR_TEMPERATURE as f32, SOLAR_RADIUS, ASTRONOMICAL_UNIT, Vec3::X, 4);
        assert!((one.intensity / 4.0 - four.intensity).abs().max_element() < 1e-3);
    }
}
