//! Message assembly and delivery

mod connector;
mod message;
mod service;

pub mod errors;

pub use connector::ChannelConnector;
pub use errors::DeliveryError;
pub use message::OutboundMessage;
pub use service::{MailDispatcher, MailDispatcherImpl};

#[cfg(test)]
pub mod tests {
    pub use super::connector::MockChannelConnector;
    pub use super::service::MockMailDispatcher;
}
