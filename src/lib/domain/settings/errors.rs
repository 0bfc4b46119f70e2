//! Settings errors

use thiserror::Error;

use crate::domain::config::ConfigError;

/// Errors raised while reading or writing mail settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The port is outside the valid range
    #[error("port must be between 1 and 65535")]
    InvalidPort,

    /// The configuration store failed
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}
