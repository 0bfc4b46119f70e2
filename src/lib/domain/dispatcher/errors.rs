//! Delivery errors

use thiserror::Error;

/// Errors raised by a [`super::ChannelConnector`]
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// An address could not be used by the channel
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The message could not be encoded
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// The TLS settings could not be applied
    #[error("invalid TLS settings: {0}")]
    Tls(String),

    /// Connecting, authenticating or transmitting failed
    #[error(transparent)]
    Transport(anyhow::Error),
}

impl From<anyhow::Error> for DeliveryError {
    fn from(err: anyhow::Error) -> Self {
        DeliveryError::Transport(err)
    }
}
