//! Configuration Management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BridgeConfig {
    /// Gaze source settings
    #[serde(default)]
    pub source: SourceConfig,
    /// Tick loop settings
    #[serde(default, rename = "loop")]
    pub tick: LoopConfig,
    /// Coordinate-to-action mapping settings
    #[serde(default)]
    pub mapping: MappingConfig,
}

/// Gaze source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the shared gaze file written by the eye tracker
    pub path: PathBuf,
}

/// Tick loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Milliseconds between ticks
    pub interval_ms: u64,
}

/// Mapping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Width of the central dead zone, centered on 0.5
    pub dead_zone_width: f64,
    /// Extra distance beyond a zone boundary required to flip a decision
    pub hysteresis_margin: f64,
    /// Follow horizontal gaze position by default
    pub follow_x: bool,
    /// Follow vertical gaze position by default
    pub follow_y: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("eye_gaze.json"),
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { interval_ms: 30 }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            dead_zone_width: 0.30,
            hysteresis_margin: 0.02,
            follow_x: false,
            follow_y: false,
        }
    }
}

impl BridgeConfig {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.source.path.as_os_str().is_empty() {
            return Err(crate::Error::Config("source.path must not be empty".to_string()));
        }
        if self.tick.interval_ms == 0 || self.tick.interval_ms > 1000 {
            return Err(crate::Error::Config(format!(
                "loop.interval_ms must be in [1, 1000], got {}",
                self.tick.interval_ms
            )));
        }
        if self.mapping.dead_zone_width <= 0.0 || self.mapping.dead_zone_width >= 1.0 {
            return Err(crate::Error::Config(format!(
                "mapping.dead_zone_width must be in (0, 1), got {}",
                self.mapping.dead_zone_width
            )));
        }
        if self.mapping.hysteresis_margin < 0.0 {
            return Err(crate::Error::Config(format!(
                "mapping.hysteresis_margin must be >= 0, got {}",
                self.mapping.hysteresis_margin
            )));
        }
        // Dead zone must dominate the margin, and both must leave room for
        // the outer action zones, or the hysteresis bands overlap.
        if self.mapping.dead_zone_width <= 2.0 * self.mapping.hysteresis_margin {
            return Err(crate::Error::Config(format!(
                "mapping.dead_zone_width ({}) must exceed twice the hysteresis margin ({})",
                self.mapping.dead_zone_width, self.mapping.hysteresis_margin
            )));
        }
        if self.mapping.dead_zone_width / 2.0 + self.mapping.hysteresis_margin >= 0.5 {
            return Err(crate::Error::Config(format!(
                "mapping.dead_zone_width ({}) plus margins leaves no outer action zones",
                self.mapping.dead_zone_width
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gaze_bridge").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.source.path, PathBuf::from("eye_gaze.json"));
        assert_eq!(config.tick.interval_ms, 30);
        assert_eq!(config.mapping.dead_zone_width, 0.30);
        assert_eq!(config.mapping.hysteresis_margin, 0.02);
        assert!(!config.mapping.follow_x);
        assert!(!config.mapping.follow_y);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(BridgeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = BridgeConfig::default();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[loop]"));
        assert!(toml_str.contains("[mapping]"));
    }

    #[test]
    fn test_config_roundtrip_serialization() {
        let original = BridgeConfig::default();
        let toml_str = original.to_toml().unwrap();
        let deserialized: BridgeConfig = toml::from_str(&toml_str).expect("Failed to deserialize");

        assert_eq!(original.source.path, deserialized.source.path);
        assert_eq!(original.tick.interval_ms, deserialized.tick.interval_ms);
        assert_eq!(original.mapping.dead_zone_width, deserialized.mapping.dead_zone_width);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("test_config.toml");

        let mut original = BridgeConfig::default();
        original.tick.interval_ms = 50;
        original.mapping.dead_zone_width = 0.2;
        original.mapping.follow_x = true;

        original.save(&config_path).expect("Failed to save config");
        assert!(config_path.exists());

        let loaded = BridgeConfig::load(&config_path).expect("Failed to load config");
        assert_eq!(loaded.tick.interval_ms, 50);
        assert_eq!(loaded.mapping.dead_zone_width, 0.2);
        assert!(loaded.mapping.follow_x);
    }

    #[test]
    fn test_config_save_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested_path = temp_dir.path().join("nested").join("path").join("config.toml");

        BridgeConfig::default().save(&nested_path).expect("Failed to save config");
        assert!(nested_path.exists());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let path = PathBuf::from("/tmp/nonexistent_gaze_bridge_config_12345.toml");
        assert!(BridgeConfig::load(&path).is_err());
    }

    #[test]
    fn test_partial_config_uses_section_defaults() {
        // A config file carrying only the loop section still deserializes;
        // the other sections fall back to their defaults.
        let config: BridgeConfig = toml::from_str("[loop]\ninterval_ms = 60\n").unwrap();
        assert_eq!(config.tick.interval_ms, 60);
        assert_eq!(config.source.path, PathBuf::from("eye_gaze.json"));
        assert_eq!(config.mapping.dead_zone_width, 0.30);
    }

    #[test]
    fn test_validate_interval_zero() {
        let mut config = BridgeConfig::default();
        config.tick.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_interval_too_large() {
        let mut config = BridgeConfig::default();
        config.tick.interval_ms = 5000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_dead_zone_out_of_range() {
        let mut config = BridgeConfig::default();
        config.mapping.dead_zone_width = 0.0;
        assert!(config.validate().is_err());

        config.mapping.dead_zone_width = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_margin() {
        let mut config = BridgeConfig::default();
        config.mapping.hysteresis_margin = -0.01;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_margin_swallows_dead_zone() {
        let mut config = BridgeConfig::default();
        config.mapping.dead_zone_width = 0.05;
        config.mapping.hysteresis_margin = 0.04;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_no_room_for_action_zones() {
        let mut config = BridgeConfig::default();
        config.mapping.dead_zone_width = 0.98;
        config.mapping.hysteresis_margin = 0.01;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("bad_config.toml");
        std::fs::write(
            &config_path,
            "[loop]\ninterval_ms = 0\n",
        )
        .expect("Failed to write config");

        assert!(BridgeConfig::load(&config_path).is_err());
    }

    #[test]
    fn test_default_path() {
        let path = BridgeConfig::default_path();
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
