//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`FOIL_SECTION__KEY`)
//!
//! Every section and field has a default, so partial files are fine.

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use foilcard_input::{
    TiltSettings, DEFAULT_PITCH_LIMIT, DEFAULT_YAW_LIMIT, DEFAULT_SENSITIVITY,
    DEFAULT_RELEASE_DURATION, DEFAULT_RELEASE_STEPS,
};
use foilcard_render::light::{
    DEFAULT_LIGHT_INTENSITY, DEFAULT_LIGHT_RANGE, DEFAULT_NEUTRAL_DISTANCE,
};
use foilcard_render::card::DEFAULT_FOV_DEGREES;
use foilcard_render::{CardSources, LightFollower};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Drag and release tuning
    #[serde(default)]
    pub tilt: TiltConfig,
    /// Light follow tuning
    #[serde(default)]
    pub light: LightConfig,
    /// Card texture sources
    #[serde(default)]
    pub card: CardConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`FOIL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // FOIL_TILT__SENSITIVITY=0.02 -> tilt.sensitivity = 0.02
        figment = figment.merge(Env::prefixed("FOIL_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Foilcard".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

/// Tilt controller configuration (angles in radians)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Maximum absolute pitch
    pub pitch_limit: f32,
    /// Maximum absolute yaw
    pub yaw_limit: f32,
    /// Radians of tilt per pixel dragged
    pub sensitivity: f32,
    /// Release animation length in seconds
    pub release_duration: f32,
    /// Number of release steps
    pub release_steps: u32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            pitch_limit: DEFAULT_PITCH_LIMIT,
            yaw_limit: DEFAULT_YAW_LIMIT,
            sensitivity: DEFAULT_SENSITIVITY,
            release_duration: DEFAULT_RELEASE_DURATION,
            release_steps: DEFAULT_RELEASE_STEPS,
        }
    }
}

impl TiltConfig {
    /// Convert to controller settings
    pub fn to_tilt_settings(&self) -> TiltSettings {
        TiltSettings::default()
            .with_limits(self.pitch_limit, self.yaw_limit)
            .with_sensitivity(self.sensitivity)
            .with_release(self.release_duration, self.release_steps)
            .sanitized()
    }
}

/// Light follow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Light travel per radian of tilt
    pub range: f32,
    /// Light distance from the card at rest
    pub neutral_distance: f32,
    /// Directional light intensity
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            range: DEFAULT_LIGHT_RANGE,
            neutral_distance: DEFAULT_NEUTRAL_DISTANCE,
            intensity: DEFAULT_LIGHT_INTENSITY,
        }
    }
}

impl LightConfig {
    /// Convert to a light follower
    pub fn to_follower(&self) -> LightFollower {
        LightFollower::new(self.range, self.neutral_distance)
    }
}

/// Card texture sources (local paths or http(s) URLs)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Front face image
    pub front: String,
    /// Back face image
    pub back: String,
    /// Foil sheen image
    pub foil: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            front: "assets/front.png".to_string(),
            back: "assets/back.png".to_string(),
            foil: "assets/foil.jpg".to_string(),
        }
    }
}

impl CardConfig {
    /// Convert to rig texture sources
    pub fn to_sources(&self) -> CardSources {
        CardSources {
            front: self.front.clone(),
            back: self.back.clone(),
            foil: self.foil.clone(),
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV_DEGREES,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level used when `RUST_LOG` is unset (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show tilt and light readout in the window title
    pub show_overlay: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_overlay: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
