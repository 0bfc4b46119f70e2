//! Configuration provider and store seams

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use super::{ConfigError, TenantId};

/// Read access to tenant-scoped configuration
#[async_trait]
pub trait ConfigProvider: Clone + Send + Sync + 'static {
    /// Gets the value stored for `key`
    ///
    /// # Arguments
    /// * `key` - The configuration key.
    /// * `tenant_id` - The [`TenantId`] the value is scoped to.
    ///
    /// # Returns
    /// [`Ok`] with [`None`] when the key is absent, or a [`ConfigError`] if the
    /// store could not be read.
    async fn get(&self, key: &str, tenant_id: TenantId) -> Result<Option<String>, ConfigError>;
}

/// Read/write access to tenant-scoped configuration
#[async_trait]
pub trait ConfigStore: ConfigProvider {
    /// Stores `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str, tenant_id: TenantId) -> Result<(), ConfigError>;

    /// Removes `key`; removing an absent key is not an error
    async fn delete(&self, key: &str, tenant_id: TenantId) -> Result<(), ConfigError>;
}

#[cfg(test)]
mock! {
    pub ConfigProvider {}

    impl Clone for ConfigProvider {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl ConfigProvider for ConfigProvider {
        async fn get(&self, key: &str, tenant_id: TenantId) -> Result<Option<String>, ConfigError>;
    }
}

#[cfg(test)]
mock! {
    pub ConfigStore {}

    impl Clone for ConfigStore {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl ConfigProvider for ConfigStore {
        async fn get(&self, key: &str, tenant_id: TenantId) -> Result<Option<String>, ConfigError>;
    }

    #[async_trait]
    impl ConfigStore for ConfigStore {
        async fn set(&self, key: &str, value: &str, tenant_id: TenantId) -> Result<(), ConfigError>;
        async fn delete(&self, key: &str, tenant_id: TenantId) -> Result<(), ConfigError>;
    }
}
