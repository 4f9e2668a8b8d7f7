//! Configuration parsing and management for HeadOrbit

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, HeadOrbitError};
use crate::puppet::catalog::Prop;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tracking: TrackingConfig,
    pub scene: SceneConfig,
    pub http: HttpConfig,
    pub snapshot: SnapshotConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracking: TrackingConfig::default(),
            scene: SceneConfig::default(),
            http: HttpConfig::default(),
            snapshot: SnapshotConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HeadOrbitError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> Result<Self, HeadOrbitError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Load configuration from default paths
    pub fn load() -> Result<Self, HeadOrbitError> {
        // Try config paths in order
        let paths = [
            PathBuf::from("config.toml"),
            PathBuf::from("config/default.toml"),
            dirs_path().join("config.toml"),
        ];

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), HeadOrbitError> {
        if self.tracking.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tracking.port".to_string(),
                message: "Port must be greater than 0".to_string(),
            }
            .into());
        }

        if Prop::from_index(self.scene.default_prop).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "scene.default_prop".to_string(),
                message: format!(
                    "Prop index must be 0..={}",
                    Prop::COUNT - 1
                ),
            }
            .into());
        }

        if self.http.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.port".to_string(),
                message: "Port must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Face tracker receiver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// UDP port to receive face tracking packets on
    pub port: u16,
    /// Listen address for the UDP socket
    pub listen_address: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            port: 12360,
            listen_address: "127.0.0.1".to_string(),
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Catalog index of the prop mounted on startup
    pub default_prop: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { default_prop: 1 }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Enable HTTP server
    pub enabled: bool,
    /// HTTP server host
    pub host: String,
    /// HTTP server port
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 8090,
            cors_enabled: true,
        }
    }
}

/// Snapshot export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Directory snapshots are written to
    pub output_dir: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./snapshots"),
        }
    }
}

/// Get the platform-specific configuration directory
fn dirs_path() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        if let Some(config_dir) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(config_dir).join("headorbit");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config/headorbit");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Library/Application Support/headorbit");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("headorbit");
        }
    }

    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tracking.port, 12360);
        assert_eq!(config.scene.default_prop, 1);
        assert!(config.http.enabled);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_prop_index() {
        let mut config = Config::default();
        config.scene.default_prop = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [tracking]
            port = 23456

            [scene]
            default_prop = 0

            [snapshot]
            output_dir = "/tmp/shots"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.tracking.port, 23456);
        assert_eq!(config.scene.default_prop, 0);
        assert_eq!(config.snapshot.output_dir, PathBuf::from("/tmp/shots"));
        // Unspecified sections fall back to defaults
        assert_eq!(config.http.port, 8090);
    }
}
