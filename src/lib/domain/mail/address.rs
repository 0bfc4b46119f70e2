//! Email addresses and mail participants

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use EmailAddressError::*;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]*?@[^@\s]*?\.[^@\s]*$").unwrap();
}

/// An error that can occur when creating an email address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailAddressError {
    /// The email address is empty
    #[error("email is empty")]
    EmptyEmailAddress,

    /// The email address is invalid
    #[error("email is invalid")]
    InvalidEmailAddress,
}

/// An email address
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address
    pub fn new(raw: &str) -> Result<Self, EmailAddressError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EmptyEmailAddress);
        }

        if !EMAIL_REGEX.is_match(trimmed) {
            return Err(InvalidEmailAddress);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create an email address without validating it
    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// The address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

/// A message participant: an address with an optional display name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailAddress {
    /// The email address
    pub email: EmailAddress,

    /// The display name, if any
    pub name: Option<String>,
}

impl MailAddress {
    /// Creates a participant, treating a blank display name as absent
    pub fn new(email: EmailAddress, name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from);

        Self { email, name }
    }

    /// Parses and validates the address before building the participant
    pub fn parse(email: &str, name: Option<&str>) -> Result<Self, EmailAddressError> {
        Ok(Self::new(EmailAddress::new(email)?, name))
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_email_address_display() -> TestResult {
        let email = EmailAddress::new("email@example.com")?;

        assert_eq!(format!("{}", email), "email@example.com".to_string());

        Ok(())
    }

    #[test]
    fn test_email_address_is_trimmed() -> TestResult {
        let email = EmailAddress::new("  email@example.com ")?;

        assert_eq!(email.as_str(), "email@example.com");

        Ok(())
    }

    #[test]
    fn test_empty_email_address_is_invalid() {
        let result = EmailAddress::new("");

        assert!(matches!(result, Err(EmptyEmailAddress)));
    }

    #[test]
    fn test_email_address_without_at_symbol_is_invalid() {
        let result = EmailAddress::new("email");

        assert!(matches!(result, Err(InvalidEmailAddress)));
    }

    #[test]
    fn test_mail_address_with_name_display() -> TestResult {
        let address = MailAddress::parse("a@x.com", Some("A"))?;

        assert_eq!(address.to_string(), "A <a@x.com>");

        Ok(())
    }

    #[test]
    fn test_mail_address_blank_name_is_dropped() -> TestResult {
        let address = MailAddress::parse("a@x.com", Some("   "))?;

        assert_eq!(address.name, None);
        assert_eq!(address.to_string(), "a@x.com");

        Ok(())
    }
}
