//! Mail settings handlers

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        settings::{MailSettings, MailSettingsView},
        transport::{EncryptionMode, MailMethod, TlsPolicy},
    },
    infrastructure::http::errors::ApiError,
};

pub mod ensure_defaults;
pub mod get_settings;
pub mod remove_settings;
pub mod update_settings;

/// Mail settings request body
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct MailSettingsBody {
    /// `smtp` or `disabled`
    #[schema(example = "smtp")]
    #[serde(default)]
    pub method: Option<String>,

    /// SMTP host
    #[schema(example = "smtp.example.com")]
    pub host: String,

    /// SMTP username; leave empty for unauthenticated relays
    #[schema(example = "mailer")]
    #[serde(default)]
    pub username: String,

    /// New password; omit or leave empty to keep the stored one
    #[serde(default)]
    pub password: Option<String>,

    /// `ssl`, `tls` or `none`
    #[schema(example = "tls")]
    #[serde(default)]
    pub encryption: Option<String>,

    /// SMTP port; defaults to the conventional port of the encryption mode
    #[schema(example = 587)]
    #[serde(default)]
    pub port: Option<u16>,

    /// Require a valid server certificate
    #[serde(default)]
    pub verify_peer: Option<bool>,

    /// Require the certificate to match the peer name
    #[serde(default)]
    pub verify_peer_name: Option<bool>,

    /// Accept self-signed certificates
    #[serde(default)]
    pub allow_self_signed: Option<bool>,

    /// Name to verify instead of the host
    #[serde(default)]
    pub peer_name: Option<String>,

    /// Path of a PEM bundle of trusted certificate authorities
    #[serde(default)]
    pub ca_file: Option<String>,
}

impl TryFrom<MailSettingsBody> for MailSettings {
    type Error = ApiError;

    fn try_from(body: MailSettingsBody) -> Result<Self, Self::Error> {
        let method = match body.method.as_deref() {
            None => MailMethod::default(),
            Some(value) => MailMethod::parse(value).ok_or_else(|| {
                ApiError::new_422(&format!(
                    "Unknown mail method \"{value}\", expected smtp or disabled"
                ))
            })?,
        };

        let encryption = match body.encryption.as_deref() {
            None => EncryptionMode::default(),
            Some(value) => EncryptionMode::parse(value).ok_or_else(|| {
                ApiError::new_422(&format!(
                    "Unknown encryption \"{value}\", expected ssl, tls or none"
                ))
            })?,
        };

        let tls = TlsPolicy::default();

        Ok(Self {
            method,
            host: body.host,
            username: body.username,
            password: body.password,
            encryption,
            port: body.port.unwrap_or_else(|| encryption.default_port()),
            verify_peer: body.verify_peer.unwrap_or(tls.verify_peer),
            verify_peer_name: body.verify_peer_name.unwrap_or(tls.verify_peer_name),
            allow_self_signed: body.allow_self_signed.unwrap_or(tls.allow_self_signed),
            peer_name: body.peer_name.filter(|name| !name.trim().is_empty()),
            ca_file: body.ca_file.filter(|path| !path.trim().is_empty()),
        })
    }
}

/// Mail settings response body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MailSettingsResponse {
    #[schema(example = "smtp")]
    pub method: String,

    #[schema(example = "smtp.example.com")]
    pub host: String,

    #[schema(example = "mailer")]
    pub username: String,

    /// Whether a password is stored; the password itself is never returned
    pub has_password: bool,

    #[schema(example = "tls")]
    pub encryption: String,

    #[schema(example = 587)]
    pub port: u16,

    pub verify_peer: bool,

    pub verify_peer_name: bool,

    pub allow_self_signed: bool,

    pub peer_name: Option<String>,

    pub ca_file: Option<String>,
}

impl From<MailSettingsView> for MailSettingsResponse {
    fn from(view: MailSettingsView) -> Self {
        Self {
            method: view.method.as_str().to_string(),
            host: view.host,
            username: view.username,
            has_password: view.has_password,
            encryption: view.encryption.as_str().to_string(),
            port: view.port,
            verify_peer: view.verify_peer,
            verify_peer_name: view.verify_peer_name,
            allow_self_signed: view.allow_self_signed,
            peer_name: view.peer_name,
            ca_file: view.ca_file,
        }
    }
}
