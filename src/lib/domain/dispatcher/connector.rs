//! Delivery channel seam

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::transport::TransportConfig;

use super::{DeliveryError, OutboundMessage};

/// Delivers assembled messages over a configured channel
#[async_trait]
pub trait ChannelConnector: Clone + Send + Sync + 'static {
    /// Delivers `message` using the host, port, credentials and encryption in `config`.
    ///
    /// # Arguments
    /// * `config` - The resolved [`TransportConfig`].
    /// * `message` - The fully assembled [`OutboundMessage`].
    ///
    /// # Returns
    /// [`Ok`] once the server accepted the message, or a [`DeliveryError`].
    async fn deliver(
        &self,
        config: &TransportConfig,
        message: &OutboundMessage,
    ) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mock! {
    pub ChannelConnector {}

    impl Clone for ChannelConnector {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl ChannelConnector for ChannelConnector {
        async fn deliver(&self, config: &TransportConfig, message: &OutboundMessage) -> Result<(), DeliveryError>;
    }
}
