//! Settings service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    config::{ConfigStore, TenantId, TypedReader},
    transport::{keys, EncryptionMode, MailMethod, TlsPolicy},
};

use super::{MailSettings, MailSettingsView, SettingsError};

/// Reads and writes the mail settings of a tenant
#[async_trait]
pub trait SettingsManagement: Clone + Send + Sync + 'static {
    /// Loads the stored settings, applying defaults for absent keys
    ///
    /// # Arguments
    /// * `tenant_id` - The [`TenantId`] to load settings for.
    ///
    /// # Returns
    /// A [`MailSettingsView`], which never contains the password.
    async fn load(&self, tenant_id: TenantId) -> Result<MailSettingsView, SettingsError>;

    /// Stores `settings`.
    ///
    /// The password is only written when one is supplied and not blank, so an
    /// empty password field keeps the stored password.
    async fn update(
        &self,
        tenant_id: TenantId,
        settings: &MailSettings,
    ) -> Result<MailSettingsView, SettingsError>;

    /// Writes the default value of every key that is not stored yet
    async fn ensure_defaults(&self, tenant_id: TenantId) -> Result<(), SettingsError>;

    /// Deletes every mail setting of the tenant
    async fn remove(&self, tenant_id: TenantId) -> Result<(), SettingsError>;
}

#[cfg(test)]
mock! {
    pub SettingsManagement {}

    impl Clone for SettingsManagement {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl SettingsManagement for SettingsManagement {
        async fn load(&self, tenant_id: TenantId) -> Result<MailSettingsView, SettingsError>;
        async fn update(&self, tenant_id: TenantId, settings: &MailSettings) -> Result<MailSettingsView, SettingsError>;
        async fn ensure_defaults(&self, tenant_id: TenantId) -> Result<(), SettingsError>;
        async fn remove(&self, tenant_id: TenantId) -> Result<(), SettingsError>;
    }
}

/// Settings service backed by a [`ConfigStore`]
#[derive(Debug, Clone)]
pub struct SettingsService<S>
where
    S: ConfigStore,
{
    store: Arc<S>,
}

impl<S> SettingsService<S>
where
    S: ConfigStore,
{
    /// Creates a new settings service
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn defaults() -> [(&'static str, String); 11] {
    let tls = TlsPolicy::default();
    let encryption = EncryptionMode::default();

    [
        (keys::MAIL_METHOD, MailMethod::default().as_str().to_string()),
        (keys::MAIL_SERVER, String::new()),
        (keys::MAIL_USER, String::new()),
        (keys::MAIL_PASSWD, String::new()),
        (keys::MAIL_SMTP_ENCRYPTION, encryption.as_str().to_string()),
        (keys::MAIL_SMTP_PORT, encryption.default_port().to_string()),
        (keys::SSL_ALLOW_SELF_SIGN, flag(tls.allow_self_signed).to_string()),
        (keys::SSL_VERIFY_PEER, flag(tls.verify_peer).to_string()),
        (keys::SSL_VERIFY_PEER_NAME, flag(tls.verify_peer_name).to_string()),
        (keys::SSL_PEER_NAME, String::new()),
        (keys::SSL_CA_FILE, String::new()),
    ]
}

#[async_trait]
impl<S> SettingsManagement for SettingsService<S>
where
    S: ConfigStore,
{
    async fn load(&self, tenant_id: TenantId) -> Result<MailSettingsView, SettingsError> {
        let reader = TypedReader::new(self.store.as_ref(), tenant_id);
        let tls = TlsPolicy::default();

        let encryption = reader
            .string(keys::MAIL_SMTP_ENCRYPTION)
            .await?
            .map(|value| EncryptionMode::parse_lenient(&value))
            .unwrap_or_default();

        let has_password = self
            .store
            .get(keys::MAIL_PASSWD, tenant_id)
            .await?
            .is_some_and(|password| !password.is_empty());

        Ok(MailSettingsView {
            method: reader
                .string(keys::MAIL_METHOD)
                .await?
                .map(|value| MailMethod::parse_lenient(&value))
                .unwrap_or_default(),
            host: reader.string(keys::MAIL_SERVER).await?.unwrap_or_default(),
            username: reader.string(keys::MAIL_USER).await?.unwrap_or_default(),
            has_password,
            encryption,
            port: reader
                .port(keys::MAIL_SMTP_PORT)
                .await?
                .unwrap_or_else(|| encryption.default_port()),
            verify_peer: reader.bool(keys::SSL_VERIFY_PEER, tls.verify_peer).await?,
            verify_peer_name: reader
                .bool(keys::SSL_VERIFY_PEER_NAME, tls.verify_peer_name)
                .await?,
            allow_self_signed: reader
                .bool(keys::SSL_ALLOW_SELF_SIGN, tls.allow_self_signed)
                .await?,
            peer_name: reader.string(keys::SSL_PEER_NAME).await?,
            ca_file: reader.string(keys::SSL_CA_FILE).await?,
        })
    }

    async fn update(
        &self,
        tenant_id: TenantId,
        settings: &MailSettings,
    ) -> Result<MailSettingsView, SettingsError> {
        if settings.port == 0 {
            return Err(SettingsError::InvalidPort);
        }

        let port = settings.port.to_string();

        let values = [
            (keys::MAIL_METHOD, settings.method.as_str()),
            (keys::MAIL_SERVER, settings.host.trim()),
            (keys::MAIL_USER, settings.username.trim()),
            (keys::MAIL_SMTP_ENCRYPTION, settings.encryption.as_str()),
            (keys::MAIL_SMTP_PORT, port.as_str()),
            (keys::SSL_PEER_NAME, settings.peer_name.as_deref().unwrap_or_default()),
            (keys::SSL_CA_FILE, settings.ca_file.as_deref().unwrap_or_default()),
            (keys::SSL_ALLOW_SELF_SIGN, flag(settings.allow_self_signed)),
            (keys::SSL_VERIFY_PEER, flag(settings.verify_peer)),
            (keys::SSL_VERIFY_PEER_NAME, flag(settings.verify_peer_name)),
        ];

        for (key, value) in values {
            self.store.set(key, value, tenant_id).await?;
        }

        match settings.password.as_deref() {
            Some(password) if !password.is_empty() => {
                self.store.set(keys::MAIL_PASSWD, password, tenant_id).await?;
            }
            _ => debug!(%tenant_id, "keeping stored password"),
        }

        info!(%tenant_id, settings = ?settings, "mail settings updated");

        self.load(tenant_id).await
    }

    async fn ensure_defaults(&self, tenant_id: TenantId) -> Result<(), SettingsError> {
        for (key, value) in defaults() {
            if self.store.get(key, tenant_id).await?.is_none() {
                self.store.set(key, &value, tenant_id).await?;
            }
        }

        debug!(%tenant_id, "mail settings defaults ensured");

        Ok(())
    }

    async fn remove(&self, tenant_id: TenantId) -> Result<(), SettingsError> {
        for key in keys::ALL {
            self.store.delete(key, tenant_id).await?;
        }

        info!(%tenant_id, "mail settings removed");

        Ok(())
    }
}
