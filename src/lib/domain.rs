//! Domain layer: message composition, transport configuration and dispatch

pub mod config;
pub mod dispatcher;
pub mod mail;
pub mod settings;
pub mod transport;
