//! Configuration errors
//!
//! The simulation itself never fails once constructed. Everything that could
//! corrupt collision geometry or progression is rejected up front.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{what}: size must be positive and finite, got {width}x{height}")]
    InvalidSize {
        what: &'static str,
        width: f32,
        height: f32,
    },
    #[error("{what}: fire rate must be at least one tick")]
    ZeroFireRate { what: &'static str },
    #[error("fire-rate floor {floor} exceeds base fire rate {rate}")]
    FireRateFloorTooHigh { floor: u32, rate: u32 },
    #[error("{what}: probability must be within [0, 1], got {value}")]
    InvalidProbability { what: &'static str, value: f64 },
    #[error("{what}: speed must be positive and finite, got {value}")]
    InvalidSpeed { what: &'static str, value: f32 },
    #[error("{what}: must be greater than zero")]
    Zero { what: &'static str },
    #[error("{what}: must not be negative")]
    Negative { what: &'static str },
    #[error("{what}: must lie within [0, {max}], got {value}")]
    OutOfField {
        what: &'static str,
        value: f32,
        max: f32,
    },
    #[error("invalid tuning document: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
