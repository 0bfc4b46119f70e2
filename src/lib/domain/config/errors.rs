//! Configuration errors

use thiserror::Error;

/// Errors raised while reading or writing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration store could not be reached
    #[error("configuration store is unavailable")]
    Unavailable(#[source] anyhow::Error),

    /// A stored value could not be converted to the required type
    #[error("invalid value \"{value}\" for {key}, expected {expected}")]
    InvalidValue {
        /// The configuration key
        key: String,

        /// The stored value
        value: String,

        /// A description of the expected type
        expected: &'static str,
    },
}

impl From<anyhow::Error> for ConfigError {
    fn from(err: anyhow::Error) -> Self {
        ConfigError::Unavailable(err)
    }
}
