//! Error types for HeadOrbit

use thiserror::Error;

/// Main error type for HeadOrbit
#[derive(Error, Debug)]
pub enum HeadOrbitError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Face tracking receiver errors
#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Receiver error: {0}")]
    Receiver(String),

    #[error("Packet parse error: {0}")]
    Parse(String),
}

/// Snapshot export errors
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to create snapshot directory: {0}")]
    CreateDir(String),

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(String),

    #[error("Failed to write snapshot file: {0}")]
    WriteFile(String),
}

/// Result type alias for HeadOrbit operations
pub type Result<T> = std::result::Result<T, HeadOrbitError>;
