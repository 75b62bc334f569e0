// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves layout settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Rect;

/// Settings that shape pane geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Width of the grab band drawn over each divider, in pixels
    pub divider_thickness: f32,

    /// Smallest extent a divider drag may leave on either side
    pub min_pane_extent: f32,

    /// Initial editor area dimensions
    pub width: f32,
    pub height: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            divider_thickness: 5.0,
            min_pane_extent: 20.0,
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl LayoutSettings {
    /// The editor area these settings describe, anchored at the origin
    pub fn area(&self) -> Rect {
        Rect::sized(self.width, self.height)
    }

    /// Every dimension must be finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("divider_thickness", self.divider_thickness),
            ("min_pane_extent", self.min_pane_extent),
            ("width", self.width),
            ("height", self.height),
        ];
        match fields
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((field, value)) => Err(ConfigError::InvalidLayout { field, value }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pane geometry settings
    pub layout: LayoutSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid layout setting {field}: {value}")]
    InvalidLayout { field: &'static str, value: f32 },

    #[error("Could not determine config directory")]
    NoConfigDir,
}

impl Config {
    /// ~/.config/split-view/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("split-view").join("config.toml"))
    }

    /// Parse and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(&std::fs::read_to_string(path)?)?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Config from the default path; defaults when it is missing or broken
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path().filter(|path| path.exists()) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Write the default config to `path`, or the default path when `None`
    pub fn write_default(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path().ok_or(ConfigError::NoConfigDir)?,
        };
        Self::default().save(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.layout.divider_thickness, 5.0);
        assert_eq!(config.layout.area(), Rect::sized(1200.0, 800.0));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[layout]\nwidth = 640.0\n").unwrap();
        assert_eq!(config.layout.width, 640.0);
        assert_eq!(config.layout.height, 800.0);
        assert_eq!(config.layout.min_pane_extent, 20.0);
    }

    #[test]
    fn test_save_and_load() {
        let mut config = Config::default();
        config.layout.divider_thickness = 3.0;

        let temp_path = std::env::temp_dir()
            .join(format!("sv-config-{}", std::process::id()))
            .join("config.toml");
        config.save(&temp_path).unwrap();

        let loaded = Config::load(&temp_path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/split-view.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_load_rejects_non_finite_dimensions() {
        let temp_path = std::env::temp_dir()
            .join(format!("sv-config-nan-{}", std::process::id()))
            .join("config.toml");
        std::fs::create_dir_all(temp_path.parent().unwrap()).unwrap();
        std::fs::write(&temp_path, "[layout]\nwidth = nan\n").unwrap();

        let err = Config::load(&temp_path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidLayout { field: "width", .. }
        ));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        let mut layout = LayoutSettings::default();
        assert!(layout.validate().is_ok());

        layout.height = -1.0;
        assert!(matches!(
            layout.validate(),
            Err(ConfigError::InvalidLayout { field: "height", value }) if value == -1.0
        ));
    }

    #[test]
    fn test_write_default() {
        let temp_path = std::env::temp_dir()
            .join(format!("sv-config-default-{}", std::process::id()))
            .join("config.toml");

        let written = Config::write_default(Some(&temp_path)).unwrap();
        assert_eq!(written, temp_path);
        assert_eq!(Config::load(&temp_path).unwrap(), Config::default());

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_default_path() {
        if let Some(p) = Config::default_path() {
            assert!(p.ends_with("split-view/config.toml"));
        }
    }
}
