//! Tenant-scoped key/value configuration

mod provider;
mod reader;
mod tenant;

pub mod errors;

pub use errors::ConfigError;
pub use provider::{ConfigProvider, ConfigStore};
pub use reader::TypedReader;
pub use tenant::TenantId;

#[cfg(test)]
pub mod tests {
    pub use super::provider::{MockConfigProvider, MockConfigStore};
}
