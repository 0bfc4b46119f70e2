//! Transport configuration resolved per send

use std::{fmt, path::PathBuf};

use tracing::{debug, warn};

use crate::domain::config::{ConfigError, ConfigProvider, TenantId, TypedReader};

use super::{keys, Encryption, EncryptionMode, TlsPolicy};

/// How mail is delivered for a tenant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MailMethod {
    /// Deliver over SMTP
    #[default]
    Smtp,

    /// Accept every message without contacting any server
    Disabled,
}

impl MailMethod {
    /// Parses a stored value, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "smtp" => Some(Self::Smtp),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Parses a stored value, normalising anything unrecognised to [`MailMethod::Smtp`]
    pub fn parse_lenient(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// The stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smtp => "smtp",
            Self::Disabled => "disabled",
        }
    }
}

/// Settings for one delivery channel
#[derive(Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Delivery method
    pub method: MailMethod,

    /// SMTP host
    pub host: String,

    /// SMTP port
    pub port: u16,

    /// SMTP username, empty when the server needs no authentication
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Channel encryption with its TLS policy
    pub encryption: Encryption,
}

impl TransportConfig {
    /// Reads the configuration for `tenant_id`, applying defaults for absent keys
    pub async fn resolve<P: ConfigProvider>(
        provider: &P,
        tenant_id: TenantId,
    ) -> Result<Self, ConfigError> {
        let reader = TypedReader::new(provider, tenant_id);

        let method = reader
            .string(keys::MAIL_METHOD)
            .await?
            .map(|value| MailMethod::parse_lenient(&value))
            .unwrap_or_default();

        let mode = match reader.string(keys::MAIL_SMTP_ENCRYPTION).await? {
            Some(value) => EncryptionMode::parse(&value).unwrap_or_else(|| {
                warn!(%tenant_id, value = %value, "unrecognised encryption mode, using none");
                EncryptionMode::None
            }),
            None => EncryptionMode::None,
        };

        let encryption = match mode {
            EncryptionMode::None => Encryption::None,
            _ => Encryption::new(mode, read_tls_policy(&reader).await?),
        };

        let port = reader
            .port(keys::MAIL_SMTP_PORT)
            .await?
            .unwrap_or_else(|| mode.default_port());

        let config = Self {
            method,
            host: reader.string(keys::MAIL_SERVER).await?.unwrap_or_default(),
            port,
            username: reader.string(keys::MAIL_USER).await?.unwrap_or_default(),
            password: provider
                .get(keys::MAIL_PASSWD, tenant_id)
                .await?
                .unwrap_or_default(),
            encryption,
        };

        debug!(%tenant_id, config = ?config, "resolved transport configuration");

        Ok(config)
    }

    /// Username and password, when a username is configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.username.is_empty() {
            None
        } else {
            Some((&self.username, &self.password))
        }
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("method", &self.method)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"********")
            .field("encryption", &self.encryption)
            .finish()
    }
}

async fn read_tls_policy<P: ConfigProvider>(
    reader: &TypedReader<'_, P>,
) -> Result<TlsPolicy, ConfigError> {
    let defaults = TlsPolicy::default();

    Ok(TlsPolicy {
        verify_peer: reader.bool(keys::SSL_VERIFY_PEER, defaults.verify_peer).await?,
        verify_peer_name: reader
            .bool(keys::SSL_VERIFY_PEER_NAME, defaults.verify_peer_name)
            .await?,
        allow_self_signed: reader
            .bool(keys::SSL_ALLOW_SELF_SIGN, defaults.allow_self_signed)
            .await?,
        peer_name: reader.string(keys::SSL_PEER_NAME).await?,
        ca_file: reader.string(keys::SSL_CA_FILE).await?.map(PathBuf::from),
    })
}
