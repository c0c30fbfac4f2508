//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use aether_math::MAX_LIGHT_COUNT;
use aether_physics::constants::{
    ASTRONOMICAL_UNIT, EARTH_RADIUS, EARTH_SCALE_HEIGHT, SOLAR_RADIUS, SOLAR_TEMPERATURE,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level renderer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output image settings.
    pub output: OutputConfig,
    /// Camera placement.
    pub camera: CameraConfig,
    /// Planet and atmosphere.
    pub world: WorldConfig,
    /// Light sources, at most nine.
    pub lights: Vec<LightConfig>,
    /// Light behind the atmosphere.
    pub background: BackgroundConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Output image configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Worker threads (0 = one per core, minus one).
    pub threads: usize,
    /// Where the PNG is written.
    pub path: PathBuf,
}

/// Camera configuration. The camera sits above the world's +Y pole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Height above the surface in meters.
    pub altitude_m: f32,
    /// Direction the camera looks in, need not be normalized.
    pub look_direction: [f32; 3],
    /// Vertical field of view in degrees.
    pub vertical_fov_deg: f32,
    /// Meters per view-space unit.
    pub reference_distance: f32,
}

/// Planet and atmosphere configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Planet radius in meters.
    pub radius_m: f32,
    /// Atmospheric scale height in meters.
    pub scale_height_m: f32,
    /// Rayleigh scattering coefficients at the surface (m⁻¹, RGB).
    pub rayleigh: [f32; 3],
    /// Mie scattering coefficients at the surface (m⁻¹, RGB).
    pub mie: [f32; 3],
    /// Absorption coefficients at the surface (m⁻¹, RGB).
    pub absorption: [f32; 3],
}

/// A single light source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LightConfig {
    /// Fixed direction and RGB intensity in W/m².
    Direct {
        direction: [f32; 3],
        intensity: [f32; 3],
    },
    /// A black-body star; intensity follows from temperature, size and distance.
    Star {
        temperature_k: f32,
        radius_m: f64,
        distance_m: f64,
        direction: [f32; 3],
        /// Number of sample positions this star is spread over.
        samples: u32,
    },
}

/// Background configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Gamma-encoded RGB used when no image is given.
    pub color: [f32; 3],
    /// Optional PNG sampled across the screen.
    pub image: Option<PathBuf>,
    /// Intensity in W/m² that a full-white background represents.
    pub insolation_max: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a JSON log file next to the config in debug builds.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            threads: 0,
            path: PathBuf::from("atmosphere.png"),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            altitude_m: 100.0,
            look_direction: [1.0, 0.15, 0.0],
            vertical_fov_deg: 60.0,
            reference_distance: 1.0,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius_m: EARTH_RADIUS as f32,
            scale_height_m: EARTH_SCALE_HEIGHT as f32,
            rayleigh: [5.5e-6, 13.0e-6, 22.4e-6],
            mie: [21e-6; 3],
            absorption: [2.04e-6, 4.97e-6, 1.95e-7],
        }
    }
}

impl LightConfig {
    /// The Sun seen from Earth, a little above the horizon.
    pub fn sun() -> Self {
        Self::Star {
            temperature_k: SOLAR_TEMPERATURE as f32,
            radius_m: SOLAR_RADIUS,
            distance_m: ASTRONOMICAL_UNIT,
            direction: [1.0, 0.1, 0.2],
            samples: 1,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            color: [0.0; 3],
            image: None,
            insolation_max: 1000.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

/// Platform config directory for the renderer, e.g. `~/.config/aether`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aether"))
}

// --- Load / Save / Reload / Validate ---

impl Config {
    /// A config with the default world lit by the Sun.
    pub fn with_sun() -> Self {
        Self {
            lights: vec![LightConfig::sun()],
            ..Self::default()
        }
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::with_sun();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Check that every value can be rendered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Result<(), ConfigError> {
            Err(ConfigError::ValidationError {
                field,
                reason: reason.into(),
            })
        }

        if self.output.width == 0 || self.output.height == 0 {
            return invalid("output", "width and height must be non-zero");
        }
        if !(self.world.radius_m > 0.0) {
            return invalid("world.radius_m", "must be positive");
        }
        if !(self.world.scale_height_m > 0.0) {
            return invalid("world.scale_height_m", "must be positive");
        }
        if !(self.camera.vertical_fov_deg > 0.0 && self.camera.vertical_fov_deg < 180.0) {
            return invalid("camera.vertical_fov_deg", "must lie in (0, 180)");
        }
        if !(self.camera.reference_distance > 0.0) {
            return invalid("camera.reference_distance", "must be positive");
        }
        if self.camera.look_direction == [0.0; 3] {
            return invalid("camera.look_direction", "must be non-zero");
        }
        if self.lights.len() > MAX_LIGHT_COUNT {
            return invalid(
                "lights",
                format!("{} lights given, at most {MAX_LIGHT_COUNT} supported", self.lights.len()),
            );
        }
        for light in &self.lights {
            if let LightConfig::Star {
                radius_m,
                distance_m,
                ..
            } = light
                && !(*radius_m > 0.0 && *distance_m > 0.0)
            {
                return invalid("lights", "star radius and distance must be positive");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::with_sun();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 640"));
        assert!(ron_str.contains("scale_height_m: 8500"));
        assert!(ron_str.contains("Star("));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::with_sun();
        config.lights.push(LightConfig::Direct {
            direction: [0.0, 1.0, 0.0],
            intensity: [10.0, 20.0, 30.0],
        });
        config.background.image = Some(PathBuf::from("stars.png"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(output: (width: 100), world: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.output.width, 100);
        assert_eq!(config.output.height, 360);
        assert_eq!(config.world, WorldConfig::default());
        assert!(config.lights.is_empty());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_sun();
        config.output.width = 1920;
        config.camera.altitude_m = 5000.0;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("nested");
        let config = Config::load_or_create(&config_dir).unwrap();
        assert_eq!(config, Config::with_sun());
        assert!(config_dir.join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_sun();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.world.scale_height_m = 7000.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().world.scale_height_m, 7000.0);
        assert!(modified.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_defaults_use_reference_constants() {
        let world = WorldConfig::default();
        assert_eq!(world.radius_m, EARTH_RADIUS as f32);
        assert_eq!(world.scale_height_m, EARTH_SCALE_HEIGHT as f32);
        let LightConfig::Star { temperature_k, distance_m, .. } = LightConfig::sun() else {
            panic!("sun should be a star light");
        };
        assert_eq!(temperature_k, SOLAR_TEMPERATURE as f32);
        assert_eq!(distance_m, ASTRONOMICAL_UNIT);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
        assert!(Config::with_sun().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::with_sun();
        config.world.scale_height_m = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { field: "world.scale_height_m", .. })
        ));

        let mut config = Config::with_sun();
        config.output.height = 0;
        assert!(config.validate().is_err());

        let mut config = Config::with_sun();
        config.world.radius_m = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_limits_light_count() {
        let mut config = Config::default();
        config.lights = vec![LightConfig::sun(); MAX_LIGHT_COUNT];
        assert!(config.validate().is_ok());

        config.lights.push(LightConfig::sun());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at most 9"), "{err}");
    }
}
