//! Configuration errors surfaced to the collaborator layer.
//!
//! The simulation itself never fails: boundary conditions are clamped in
//! place. Only bad inputs from outside (viewport sizes, tuning files) are
//! reported, and the caller decides what to do with them.

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// Viewport dimensions were zero, negative or not finite.
    InvalidViewport { width: f32, height: f32 },

    /// A tuning constant is outside its usable range.
    InvalidTuning {
        /// Field name (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// Tuning or settings JSON could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidViewport { width, height } => {
                write!(f, "invalid viewport {}x{} (both sides must be > 0)", width, height)
            }
            ConfigError::InvalidTuning {
                name,
                value,
                expected,
            } => write!(f, "tuning '{}' = {} is outside {}", name, value, expected),
            ConfigError::Parse(err) => write!(f, "malformed config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reject viewports the ratio math cannot handle.
pub fn validate_viewport(width: f32, height: f32) -> ConfigResult<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidViewport { width, height })
    }
}
