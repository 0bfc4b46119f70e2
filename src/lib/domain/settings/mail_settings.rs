//! Settings as edited by an administrator

use std::fmt;

use crate::domain::transport::{EncryptionMode, MailMethod, TlsPolicy};

/// Mail settings submitted by an administrator
#[derive(Clone, PartialEq, Eq)]
pub struct MailSettings {
    /// Delivery method
    pub method: MailMethod,

    /// SMTP host
    pub host: String,

    /// SMTP username
    pub username: String,

    /// New SMTP password; [`None`] or blank keeps the stored one
    pub password: Option<String>,

    /// Encryption mode
    pub encryption: EncryptionMode,

    /// SMTP port
    pub port: u16,

    /// Require a valid server certificate
    pub verify_peer: bool,

    /// Require the certificate to match the peer name
    pub verify_peer_name: bool,

    /// Accept self-signed certificates
    pub allow_self_signed: bool,

    /// Name to verify instead of the host
    pub peer_name: Option<String>,

    /// Path of a PEM bundle of trusted certificate authorities
    pub ca_file: Option<String>,
}

impl Default for MailSettings {
    fn default() -> Self {
        let tls = TlsPolicy::default();

        Self {
            method: MailMethod::default(),
            host: String::new(),
            username: String::new(),
            password: None,
            encryption: EncryptionMode::default(),
            port: EncryptionMode::default().default_port(),
            verify_peer: tls.verify_peer,
            verify_peer_name: tls.verify_peer_name,
            allow_self_signed: tls.allow_self_signed,
            peer_name: None,
            ca_file: None,
        }
    }
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("method", &self.method)
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("encryption", &self.encryption)
            .field("port", &self.port)
            .field("verify_peer", &self.verify_peer)
            .field("verify_peer_name", &self.verify_peer_name)
            .field("allow_self_signed", &self.allow_self_signed)
            .field("peer_name", &self.peer_name)
            .field("ca_file", &self.ca_file)
            .finish()
    }
}

/// Stored mail settings; the password itself is never read back
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailSettingsView {
    /// Delivery method
    pub method: MailMethod,

    /// SMTP host
    pub host: String,

    /// SMTP username
    pub username: String,

    /// Whether a password is stored
    pub has_password: bool,

    /// Encryption mode
    pub encryption: EncryptionMode,

    /// SMTP port
    pub port: u16,

    /// Require a valid server certificate
    pub verify_peer: bool,

    /// Require the certificate to match the peer name
    pub verify_peer_name: bool,

    /// Accept self-signed certificates
    pub allow_self_signed: bool,

    /// Name to verify instead of the host
    pub peer_name: Option<String>,

    /// Path of a PEM bundle of trusted certificate authorities
    pub ca_file: Option<String>,
}
