//! Error types
//!
//! The tick path never fails; these cover construction and settings I/O.

use thiserror::Error;

/// Invalid simulation inputs rejected at construction time
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("body mass must be positive and finite (got {0})")]
    InvalidMass(f32),
    #[error("body radius must be positive and finite (got {0})")]
    InvalidRadius(f32),
    #[error("viewport must have positive size (got {width}x{height})")]
    InvalidViewport { width: f32, height: f32 },
}

/// Failure loading host settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
