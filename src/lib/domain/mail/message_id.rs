//! Message-ID generation

use std::{env, fmt, fs};

use chrono::{DateTime, Utc};
use rand::Rng;

/// Fixed tag placed between the random part and the host
pub const MESSAGE_ID_TAG: &str = "maildispatch";

const FALLBACK_HOSTNAME: &str = "localhost";

/// A globally unique message identifier, `<utc>.<random>.<tag>@<host>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Generates a new message id for `host`, see [`message_host`]
    pub fn generate(host: &str) -> Self {
        Self::new(Utc::now(), rand::thread_rng().gen(), host)
    }

    /// Builds a message id from its parts
    pub fn new(at: DateTime<Utc>, random: u32, host: &str) -> Self {
        Self(format!(
            "{}.{}.{}@{}",
            at.format("%Y%m%d%H%M%S"),
            random,
            MESSAGE_ID_TAG,
            host
        ))
    }

    /// The id without angle brackets
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id in header form, `<...>`
    pub fn header_value(&self) -> String {
        format!("<{}>", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The host part of generated message ids.
///
/// When `server_name` is absent or blank the local machine name is used. This
/// may read `/etc/hostname`, so resolve it once rather than per message.
pub fn message_host(server_name: Option<&str>) -> String {
    match server_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => local_hostname(),
    }
}

fn local_hostname() -> String {
    env::var("HOSTNAME")
        .ok()
        .or_else(|| fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_HOSTNAME.to_string())
}
