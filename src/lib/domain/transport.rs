//! Delivery channel configuration

mod config;
mod encryption;

pub mod keys;

pub use config::{MailMethod, TransportConfig};
pub use encryption::{Encryption, EncryptionMode, TlsPolicy};
