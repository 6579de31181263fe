//! Viewer configuration loading and validation
//!
//! Settings for the rendering surface and the camera controller. The
//! components themselves take no parameters; this configures the
//! collaborators that realize them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Invalid configuration: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title on the desktop (the page heading is used when unset)
    #[serde(default)]
    pub title: Option<String>,
    /// CSS selector of the canvas the web build renders into
    #[serde(default = "default_canvas")]
    pub canvas: String,
    /// Resize the canvas to fill its parent element
    #[serde(default = "default_true")]
    pub fit_canvas_to_parent: bool,
    /// Background color as RGB (0.0-1.0)
    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: None,
            canvas: default_canvas(),
            fit_canvas_to_parent: true,
            clear_color: default_clear_color(),
        }
    }
}

impl WindowConfig {
    /// Element id of the canvas, without the leading `#`
    pub fn canvas_id(&self) -> &str {
        self.canvas.trim_start_matches('#')
    }
}

fn default_canvas() -> String {
    "#skylight-canvas".to_string()
}

fn default_clear_color() -> [f32; 3] {
    [0.1, 0.1, 0.15]
}

fn default_true() -> bool {
    true
}

/// Default camera of the rendering surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    /// Initial eye position; the camera looks at the origin
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            position: default_camera_position(),
        }
    }
}

fn default_fov() -> f32 {
    75.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    1000.0
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 5.0]
}

/// Orbit controller tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default = "default_speed")]
    pub rotate_speed: f32,
    #[serde(default = "default_speed")]
    pub pan_speed: f32,
    #[serde(default = "default_speed")]
    pub zoom_speed: f32,
    /// Ease toward the goal pose instead of jumping to it
    #[serde(default = "default_true")]
    pub enable_damping: bool,
    /// Fraction of the remaining motion applied per 60 Hz frame
    #[serde(default = "default_damping_factor")]
    pub damping_factor: f32,
    #[serde(default)]
    pub min_distance: f32,
    /// Upper zoom bound; `None` leaves zoom-out unbounded
    #[serde(default)]
    pub max_distance: Option<f32>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_speed: default_speed(),
            pan_speed: default_speed(),
            zoom_speed: default_speed(),
            enable_damping: true,
            damping_factor: default_damping_factor(),
            min_distance: 0.0,
            max_distance: None,
        }
    }
}

fn default_speed() -> f32 {
    1.0
}

fn default_damping_factor() -> f32 {
    0.05
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingConfig {
    /// Engine brightness per unit of ambient intensity
    #[serde(default = "default_ambient_scale")]
    pub ambient_brightness_scale: f32,
    /// Point light luminous power in lumens
    #[serde(default = "default_point_intensity")]
    pub point_light_intensity: f32,
    /// Distance past which the point light has no effect
    #[serde(default = "default_point_range")]
    pub point_light_range: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_brightness_scale: default_ambient_scale(),
            point_light_intensity: default_point_intensity(),
            point_light_range: default_point_range(),
        }
    }
}

impl LightingConfig {
    /// Engine brightness for an ambient light of the given intensity
    pub fn ambient_brightness(&self, intensity: f32) -> f32 {
        intensity * self.ambient_brightness_scale
    }
}

fn default_ambient_scale() -> f32 {
    400.0
}

fn default_point_intensity() -> f32 {
    1_000_000.0
}

fn default_point_range() -> f32 {
    50.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    /// Parsed level; unknown names fall back to INFO
    pub fn max_level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ViewerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file, falling back to defaults when the file
    /// does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config = Self::from_toml(&content)?;
            info!(path = %path.display(), "Loaded configuration");
            Ok(config)
        } else {
            info!(
                path = %path.display(),
                "Configuration file not found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Write the default configuration to file
    pub fn save_default(path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(&Self::default())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Checks are written in accept form so NaN never passes
        if !self
            .window
            .clear_color
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
        {
            return Err(invalid("window.clear_color", "components must be within [0, 1]"));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid("camera.fov_degrees", "must be within (0, 180)"));
        }
        if !(camera.near > 0.0 && camera.near.is_finite()) {
            return Err(invalid("camera.near", "must be positive and finite"));
        }
        if !(camera.far > camera.near && camera.far.is_finite()) {
            return Err(invalid("camera.far", "must be finite and greater than camera.near"));
        }
        if !camera.position.iter().all(|v| v.is_finite()) {
            return Err(invalid("camera.position", "must be finite"));
        }

        let controls = &self.controls;
        for (field, speed) in [
            ("controls.rotate_speed", controls.rotate_speed),
            ("controls.pan_speed", controls.pan_speed),
            ("controls.zoom_speed", controls.zoom_speed),
        ] {
            if !(speed >= 0.0 && speed.is_finite()) {
                return Err(invalid(field, "must be finite and not negative"));
            }
        }
        if !(controls.damping_factor > 0.0 && controls.damping_factor <= 1.0) {
            return Err(invalid("controls.damping_factor", "must be within (0, 1]"));
        }
        if !(controls.min_distance >= 0.0 && controls.min_distance.is_finite()) {
            return Err(invalid("controls.min_distance", "must be finite and not negative"));
        }
        if let Some(max) = controls.max_distance {
            // Infinity is allowed and means unbounded
            if !(max >= controls.min_distance) {
                return Err(invalid(
                    "controls.max_distance",
                    "must not be less than controls.min_distance",
                ));
            }
        }

        let lighting = &self.lighting;
        if !(lighting.ambient_brightness_scale >= 0.0 && lighting.ambient_brightness_scale.is_finite()) {
            return Err(invalid(
                "lighting.ambient_brightness_scale",
                "must be finite and not negative",
            ));
        }
        if !(lighting.point_light_intensity >= 0.0 && lighting.point_light_intensity.is_finite()) {
            return Err(invalid(
                "lighting.point_light_intensity",
                "must be finite and not negative",
            ));
        }
        if !(lighting.point_light_range > 0.0 && lighting.point_light_range.is_finite()) {
            return Err(invalid("lighting.point_light_range", "must be positive and finite"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.canvas_id(), "skylight-canvas");
        assert_eq!(config.camera.position, [0.0, 0.0, 5.0]);
        assert_eq!(config.camera.fov_degrees, 75.0);
        assert!(config.controls.enable_damping);
        assert_eq!(config.controls.max_distance, None);
        assert_eq!(config.lighting.ambient_brightness(0.5), 200.0);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let toml = r#"
[window]
title = "Demo"

[controls]
zoom_speed = 0.5
max_distance = 40.0
"#;

        let config = ViewerConfig::from_toml(toml).unwrap();
        assert_eq!(config.window.title.as_deref(), Some("Demo"));
        assert_eq!(config.window.canvas, "#skylight-canvas");
        assert_eq!(config.controls.zoom_speed, 0.5);
        assert_eq!(config.controls.rotate_speed, 1.0);
        assert_eq!(config.controls.max_distance, Some(40.0));
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            ("[camera]\nnear = 0.0", "camera.near"),
            ("[camera]\nnear = 10.0\nfar = 5.0", "camera.far"),
            ("[camera]\nfov_degrees = 180.0", "camera.fov_degrees"),
            ("[controls]\ndamping_factor = 0.0", "controls.damping_factor"),
            ("[controls]\npan_speed = -1.0", "controls.pan_speed"),
            (
                "[controls]\nmin_distance = 3.0\nmax_distance = 2.0",
                "controls.max_distance",
            ),
            ("[camera]\nnear = nan", "camera.near"),
            ("[camera]\nfar = inf", "camera.far"),
            ("[camera]\nfov_degrees = nan", "camera.fov_degrees"),
            ("[camera]\nposition = [0.0, nan, 5.0]", "camera.position"),
            ("[controls]\nrotate_speed = nan", "controls.rotate_speed"),
            ("[controls]\ndamping_factor = nan", "controls.damping_factor"),
            ("[controls]\nmin_distance = nan", "controls.min_distance"),
            ("[controls]\nmax_distance = nan", "controls.max_distance"),
            ("[lighting]\nambient_brightness_scale = nan", "lighting.ambient_brightness_scale"),
            ("[lighting]\npoint_light_range = nan", "lighting.point_light_range"),
            ("[lighting]\npoint_light_intensity = -1.0", "lighting.point_light_intensity"),
            ("[lighting]\npoint_light_intensity = inf", "lighting.point_light_intensity"),
            ("[window]\nclear_color = [0.1, 1.5, 0.2]", "window.clear_color"),
            ("[window]\nclear_color = [nan, 0.1, 0.2]", "window.clear_color"),
        ];

        for (toml, expected) in cases {
            match ViewerConfig::from_toml(toml) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_log_level() {
        let mut log = LogConfig::default();
        assert_eq!(log.max_level(), tracing::Level::INFO);

        log.level = "DEBUG".to_string();
        assert_eq!(log.max_level(), tracing::Level::DEBUG);

        log.level = "chatty".to_string();
        assert_eq!(log.max_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_unbounded_max_distance_is_valid() {
        let config = ViewerConfig::from_toml("[controls]\nmax_distance = inf").unwrap();
        assert_eq!(config.controls.max_distance, Some(f32::INFINITY));
    }

    #[test]
    fn test_parse_error() {
        let result = ViewerConfig::from_toml("[camera\nnear = 1");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ViewerConfig::load(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_save_default_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("skylight.toml");

        ViewerConfig::save_default(&path).unwrap();
        let config = ViewerConfig::load(&path).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }
}
