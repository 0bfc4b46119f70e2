//! Administrative mail settings

mod service;
mod mail_settings;

pub mod errors;

pub use errors::SettingsError;
pub use service::{SettingsManagement, SettingsService};
pub use mail_settings::{MailSettings, MailSettingsView};
