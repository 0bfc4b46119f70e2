//! Encryption modes and TLS verification policy

use std::{fmt, path::PathBuf};

/// The encryption setting as stored in configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EncryptionMode {
    /// Plaintext, typically port 25
    #[default]
    None,

    /// Implicit TLS (`ssl`), typically port 465
    Ssl,

    /// STARTTLS upgrade (`tls`), typically port 587
    Tls,
}

impl EncryptionMode {
    /// Parses a stored value, case-insensitively.
    ///
    /// Returns [`None`] for anything other than `ssl`, `tls` or `none`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ssl" => Some(Self::Ssl),
            "tls" => Some(Self::Tls),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Parses a stored value, normalising anything unrecognised to [`EncryptionMode::None`]
    pub fn parse_lenient(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// The stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ssl => "ssl",
            Self::Tls => "tls",
        }
    }

    /// The conventional port for this mode
    pub fn default_port(&self) -> u16 {
        match self {
            Self::None => 25,
            Self::Ssl => 465,
            Self::Tls => 587,
        }
    }
}

impl fmt::Display for EncryptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// TLS options forwarded verbatim to the channel connector
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TlsPolicy {
    /// Require a valid server certificate
    pub verify_peer: bool,

    /// Require the certificate to match the peer name
    pub verify_peer_name: bool,

    /// Accept self-signed certificates
    pub allow_self_signed: bool,

    /// Name to verify instead of the host
    pub peer_name: Option<String>,

    /// Additional trusted certificate authorities
    pub ca_file: Option<PathBuf>,
}

impl Default for TlsPolicy {
    fn default() -> Self {
        Self {
            verify_peer: true,
            verify_peer_name: true,
            allow_self_signed: false,
            peer_name: None,
            ca_file: None,
        }
    }
}

/// A resolved channel encryption; TLS options only exist alongside TLS
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Encryption {
    /// Plaintext
    #[default]
    None,

    /// Connect already encrypted
    ImplicitTls(TlsPolicy),

    /// Connect in plaintext and upgrade with STARTTLS
    StartTls(TlsPolicy),
}

impl Encryption {
    /// Pairs a mode with its TLS policy
    pub fn new(mode: EncryptionMode, policy: TlsPolicy) -> Self {
        match mode {
            EncryptionMode::None => Self::None,
            EncryptionMode::Ssl => Self::ImplicitTls(policy),
            EncryptionMode::Tls => Self::StartTls(policy),
        }
    }

    /// The mode this encryption was resolved from
    pub fn mode(&self) -> EncryptionMode {
        match self {
            Self::None => EncryptionMode::None,
            Self::ImplicitTls(_) => EncryptionMode::Ssl,
            Self::StartTls(_) => EncryptionMode::Tls,
        }
    }

    /// The TLS policy, absent for plaintext channels
    pub fn tls_policy(&self) -> Option<&TlsPolicy> {
        match self {
            Self::None => None,
            Self::ImplicitTls(policy) | Self::StartTls(policy) => Some(policy),
        }
    }
}
