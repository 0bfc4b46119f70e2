//! In-memory configuration store

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use anyhow::anyhow;
use async_trait::async_trait;

use crate::domain::config::{ConfigError, ConfigProvider, ConfigStore, TenantId};

type Values = HashMap<(TenantId, String), String>;

/// A process-local configuration store; clones share the same values
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    values: Arc<RwLock<Values>>,
}

impl InMemoryConfigStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ConfigError {
    ConfigError::Unavailable(anyhow!("configuration lock poisoned"))
}

#[async_trait]
impl ConfigProvider for InMemoryConfigStore {
    async fn get(&self, key: &str, tenant_id: TenantId) -> Result<Option<String>, ConfigError> {
        let values = self.values.read().map_err(|_| poisoned())?;

        Ok(values.get(&(tenant_id, key.to_string())).cloned())
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn set(&self, key: &str, value: &str, tenant_id: TenantId) -> Result<(), ConfigError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;

        values.insert((tenant_id, key.to_string()), value.to_string());

        Ok(())
    }

    async fn delete(&self, key: &str, tenant_id: TenantId) -> Result<(), ConfigError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;

        values.remove(&(tenant_id, key.to_string()));

        Ok(())
    }
}
