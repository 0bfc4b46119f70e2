//! Configuration keys, one namespace per tenant

/// Delivery method: `smtp` or `disabled`
pub const MAIL_METHOD: &str = "MAILER_MAIL_METHOD";

/// SMTP host
pub const MAIL_SERVER: &str = "MAILER_MAIL_SERVER";

/// SMTP username
pub const MAIL_USER: &str = "MAILER_MAIL_USER";

/// SMTP password
pub const MAIL_PASSWD: &str = "MAILER_MAIL_PASSWD";

/// Encryption mode: `ssl`, `tls` or `none`
pub const MAIL_SMTP_ENCRYPTION: &str = "MAILER_MAIL_SMTP_ENCRYPTION";

/// SMTP port
pub const MAIL_SMTP_PORT: &str = "MAILER_MAIL_SMTP_PORT";

/// Accept self-signed certificates
pub const SSL_ALLOW_SELF_SIGN: &str = "MAILER_SSL_ALLOW_SELF_SIGN";

/// Verify the server certificate
pub const SSL_VERIFY_PEER: &str = "MAILER_SSL_VERIFY_PEER";

/// Verify the server name against the certificate
pub const SSL_VERIFY_PEER_NAME: &str = "MAILER_SSL_VERIFY_PEER_NAME";

/// Name expected in the server certificate
pub const SSL_PEER_NAME: &str = "MAILER_SSL_PEER_NAME";

/// PEM bundle of trusted certificate authorities
pub const SSL_CA_FILE: &str = "MAILER_SSL_CA_FILE";

/// Every key owned by the mailer
pub const ALL: [&str; 11] = [
    MAIL_METHOD,
    MAIL_SERVER,
    MAIL_USER,
    MAIL_PASSWD,
    MAIL_SMTP_ENCRYPTION,
    MAIL_SMTP_PORT,
    SSL_ALLOW_SELF_SIGN,
    SSL_VERIFY_PEER,
    SSL_VERIFY_PEER_NAME,
    SSL_PEER_NAME,
    SSL_CA_FILE,
];
