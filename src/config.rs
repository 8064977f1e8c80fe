//! Demo configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `config.ron` file (if exists)
//! 3. Environment variables prefixed with `QUICKBOX_`
//!
//! Example environment variable: `QUICKBOX_CAMERA__ZOOM_STEP=0.25`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::physics::StepParams;

/// Rejected configuration values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("physics.pixels_per_meter must be positive, got {0}")]
    NonPositiveScale(f32),
    #[error("physics.timestep must be positive, got {0}")]
    NonPositiveTimestep(f32),
    #[error("physics.{name} must be at least 1")]
    ZeroIterations { name: &'static str },
    #[error("camera.min_zoom must be positive, got {0}")]
    NonPositiveMinZoom(f32),
    #[error("camera.min_zoom ({min}) is greater than camera.max_zoom ({max})")]
    InvertedZoomRange { min: f32, max: f32 },
    #[error("camera.start_zoom {zoom} is outside [{min}, {max}]")]
    StartZoomOutOfRange { zoom: f32, min: f32, max: f32 },
    #[error("window size must be non-zero, got {width}x{height}")]
    EmptyWindow { width: u32, height: u32 },
}

/// Main demo configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct QuickboxConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub physics: PhysicsConfig,

    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub assets: AssetConfig,
}

/// Window settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Frames per second the loop is capped at
    pub frame_limit: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            title: "Quick Rapier + wgpu Example".to_string(),
            frame_limit: 60,
        }
    }
}

/// World and solver settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhysicsConfig {
    pub gravity_x: f32,
    /// Positive y points down the screen
    pub gravity_y: f32,
    /// Screen pixels per physics metre
    pub pixels_per_meter: f32,
    /// Fixed step in seconds
    pub timestep: f32,
    pub velocity_iterations: u32,
    pub position_iterations: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_x: 0.0,
            gravity_y: 9.8,
            pixels_per_meter: 30.0,
            timestep: 1.0 / 60.0,
            velocity_iterations: 10,
            position_iterations: 5,
        }
    }
}

impl PhysicsConfig {
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity_x, self.gravity_y)
    }

    pub fn step_params(&self) -> StepParams {
        StepParams {
            dt: self.timestep,
            velocity_iterations: self.velocity_iterations,
            position_iterations: self.position_iterations,
        }
    }
}

/// Camera start state and input response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Initial offset in metres
    pub start_x: f32,
    pub start_y: f32,
    pub start_zoom: f32,
    /// Offset change per W/A/S/D press, in metres
    pub pan_step: f32,
    /// Zoom change per Up/Down press
    pub zoom_step: f32,
    /// Smallest zoom reachable with Down (must stay positive)
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            start_y: 6.5,
            start_zoom: 1.0,
            pan_step: 1.0,
            zoom_step: 0.1,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

/// Sprite image locations, relative to the working directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetConfig {
    pub directory: PathBuf,
    pub ground: String,
    #[serde(rename = "box")]
    pub box_: String,
    pub circle: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets"),
            ground: "ground.png".to_string(),
            box_: "box.png".to_string(),
            circle: "circle.png".to_string(),
        }
    }
}

impl AssetConfig {
    pub fn ground_path(&self) -> PathBuf {
        self.directory.join(&self.ground)
    }

    pub fn box_path(&self) -> PathBuf {
        self.directory.join(&self.box_)
    }

    pub fn circle_path(&self) -> PathBuf {
        self.directory.join(&self.circle)
    }
}

impl QuickboxConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `config.ron` file in the working directory (if exists)
    /// 3. Environment variables prefixed with `QUICKBOX_` (highest priority)
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// Same as [`QuickboxConfig::load`] with an explicit config file stem.
    pub fn load_from(file_stem: impl AsRef<Path>) -> Result<Self> {
        let file_stem = file_stem.as_ref().to_string_lossy().into_owned();

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("window.width", 640_i64)?
            .set_default("window.height", 360_i64)?
            .set_default("window.title", WindowConfig::default().title)?
            .set_default("window.frame_limit", 60_i64)?
            .set_default("physics.gravity_x", 0.0)?
            .set_default("physics.gravity_y", 9.8)?
            .set_default("physics.pixels_per_meter", 30.0)?
            .set_default("physics.timestep", 1.0 / 60.0)?
            .set_default("physics.velocity_iterations", 10_i64)?
            .set_default("physics.position_iterations", 5_i64)?
            .set_default("camera.start_x", 0.0)?
            .set_default("camera.start_y", 6.5)?
            .set_default("camera.start_zoom", 1.0)?
            .set_default("camera.pan_step", 1.0)?
            .set_default("camera.zoom_step", 0.1)?
            .set_default("camera.min_zoom", 0.1)?
            .set_default("camera.max_zoom", 10.0)?
            .set_default("assets.directory", "assets")?
            .set_default("assets.ground", "ground.png")?
            .set_default("assets.box", "box.png")?
            .set_default("assets.circle", "circle.png")?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(&file_stem)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (QUICKBOX_CAMERA__ZOOM_STEP, etc.)
            .add_source(
                Environment::with_prefix("QUICKBOX")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    /// Check the invariants the frame loop relies on.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let physics = &self.physics;
        if physics.pixels_per_meter <= 0.0 {
            return Err(ConfigError::NonPositiveScale(physics.pixels_per_meter));
        }
        if physics.timestep <= 0.0 {
            return Err(ConfigError::NonPositiveTimestep(physics.timestep));
        }
        if physics.velocity_iterations == 0 {
            return Err(ConfigError::ZeroIterations {
                name: "velocity_iterations",
            });
        }
        if physics.position_iterations == 0 {
            return Err(ConfigError::ZeroIterations {
                name: "position_iterations",
            });
        }

        let camera = &self.camera;
        if camera.min_zoom <= 0.0 {
            return Err(ConfigError::NonPositiveMinZoom(camera.min_zoom));
        }
        if camera.min_zoom > camera.max_zoom {
            return Err(ConfigError::InvertedZoomRange {
                min: camera.min_zoom,
                max: camera.max_zoom,
            });
        }
        if !(camera.min_zoom..=camera.max_zoom).contains(&camera.start_zoom) {
            return Err(ConfigError::StartZoomOutOfRange {
                zoom: camera.start_zoom,
                min: camera.min_zoom,
                max: camera.max_zoom,
            });
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::EmptyWindow {
                width: self.window.width,
                height: self.window.height,
            });
        }

        Ok(())
    }

    /// Render this configuration as a `config.ron` document.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuickboxConfig::default();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 360);
        assert_eq!(config.window.frame_limit, 60);
        assert_eq!(config.physics.gravity(), Vec2::new(0.0, 9.8));
        assert_eq!(config.physics.pixels_per_meter, 30.0);
        assert_eq!(config.physics.velocity_iterations, 10);
        assert_eq!(config.physics.position_iterations, 5);
        assert_eq!(config.camera.start_y, 6.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuickboxConfig::load_from(dir.path().join("missing")).unwrap();
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.assets, AssetConfig::default());
        assert_eq!(config.physics.velocity_iterations, 10);
        assert!((config.physics.timestep - 1.0 / 60.0).abs() < 1e-6);
        assert!((config.camera.start_y - 6.5).abs() < 1e-6);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut custom = QuickboxConfig::default();
        custom.camera.zoom_step = 0.25;
        custom.physics.gravity_y = 20.0;
        std::fs::write(dir.path().join("custom.ron"), custom.to_ron().unwrap()).unwrap();

        let loaded = QuickboxConfig::load_from(dir.path().join("custom")).unwrap();
        assert_eq!(loaded.camera.zoom_step, 0.25);
        assert_eq!(loaded.physics.gravity_y, 20.0);
        assert_eq!(loaded.window, WindowConfig::default());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("QUICKBOX_CAMERA__ZOOM_STEP", "0.25");
        let loaded = QuickboxConfig::load_from(dir.path().join("missing"));
        std::env::remove_var("QUICKBOX_CAMERA__ZOOM_STEP");

        let loaded = loaded.unwrap();
        assert_eq!(loaded.camera.zoom_step, 0.25);
        assert_eq!(loaded.camera.pan_step, CameraConfig::default().pan_step);
    }

    #[test]
    fn test_validate_rejects_non_positive_min_zoom() {
        let mut config = QuickboxConfig::default();
        config.camera.min_zoom = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveMinZoom(0.0))
        );
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let mut config = QuickboxConfig::default();
        config.physics.position_iterations = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroIterations {
                name: "position_iterations"
            })
        );
    }

    #[test]
    fn test_validate_rejects_start_zoom_outside_range() {
        let mut config = QuickboxConfig::default();
        config.camera.start_zoom = 20.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartZoomOutOfRange { .. })
        ));
    }

    #[test]
    fn test_asset_paths() {
        let assets = AssetConfig::default();
        assert_eq!(assets.ground_path(), PathBuf::from("assets/ground.png"));
        assert_eq!(assets.box_path(), PathBuf::from("assets/box.png"));
        assert_eq!(assets.circle_path(), PathBuf::from("assets/circle.png"));
    }
}
