//! Dispatch errors

use thiserror::Error;

use crate::domain::{config::ConfigError, dispatcher::DeliveryError};

/// Errors returned by [`crate::domain::dispatcher::MailDispatcher::send`]
#[derive(Debug, Error)]
pub enum MailError {
    /// The transport configuration could not be read or parsed
    #[error("could not resolve mail transport configuration")]
    Configuration(#[from] ConfigError),

    /// The channel failed to connect, authenticate or transmit
    #[error("could not deliver message")]
    Delivery(#[from] DeliveryError),
}
