//! Concrete collaborators: SMTP delivery, configuration stores, templates and HTTP

pub mod config;
pub mod database;
pub mod email;
pub mod http;
pub mod templates;
