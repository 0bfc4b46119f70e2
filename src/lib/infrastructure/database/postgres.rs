//! Postgres module

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use sqlx::{query, query_scalar, PgPool};

use crate::domain::config::{ConfigError, ConfigProvider, ConfigStore, TenantId};

/// Database connection
#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    /// The database connection pool
    pub pool: PgPool,
}

impl PostgresDatabase {
    /// Create a new database connection
    #[mutants::skip]
    pub async fn new(connection_string: &str) -> Result<Self> {
        Ok(Self {
            pool: PgPool::connect(connection_string)
                .await
                .context("failed to connect to the database")?,
        })
    }

    /// Applies pending migrations
    #[mutants::skip]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("failed to run migrations")?;

        Ok(())
    }

    /// Returns the underlying database connection
    pub fn connection(&self) -> &PgPool {
        &self.pool
    }
}

/// Database connection details
#[derive(Debug, Clone, Parser)]
pub struct DatabaseConnectionDetails {
    /// The database connection string; configuration is kept in memory without it
    #[arg(long, env = "DATABASE_URL")]
    pub connection_string: Option<String>,
}

fn unavailable(err: sqlx::Error) -> ConfigError {
    ConfigError::Unavailable(err.into())
}

#[async_trait]
impl ConfigProvider for PostgresDatabase {
    #[mutants::skip]
    async fn get(&self, key: &str, tenant_id: TenantId) -> Result<Option<String>, ConfigError> {
        query_scalar::<_, String>(
            r#"
            SELECT value FROM configuration
            WHERE tenant_id = $1 AND key = $2
            "#,
        )
        .bind(tenant_id.0)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)
    }
}

#[async_trait]
impl ConfigStore for PostgresDatabase {
    #[mutants::skip]
    async fn set(&self, key: &str, value: &str, tenant_id: TenantId) -> Result<(), ConfigError> {
        query(
            r#"
            INSERT INTO configuration (tenant_id, key, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (tenant_id, key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = now()
            "#,
        )
        .bind(tenant_id.0)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(())
    }

    #[mutants::skip]
    async fn delete(&self, key: &str, tenant_id: TenantId) -> Result<(), ConfigError> {
        query(
            r#"
            DELETE FROM configuration
            WHERE tenant_id = $1 AND key = $2
            "#,
        )
        .bind(tenant_id.0)
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(())
    }
}
