//! Send requests

use std::fmt;

use crate::domain::config::TenantId;

use super::{Attachment, InlineImage, MailAddress, RenderedTemplate};

/// Identifies the language the message was rendered in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocaleId(pub i64);

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One outbound message, as handed to the dispatcher
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendRequest {
    /// The tenant whose transport configuration applies
    pub tenant_id: TenantId,

    /// The locale the templates were rendered for
    pub locale_id: LocaleId,

    /// The sender
    pub from: MailAddress,

    /// Where replies should go
    pub reply_to: Option<MailAddress>,

    /// Primary recipients
    pub to: Vec<MailAddress>,

    /// Blind copy recipients
    pub bcc: Vec<MailAddress>,

    /// The subject line
    pub subject: String,

    /// Rendered body alternatives
    pub templates: Vec<RenderedTemplate>,

    /// Images referenced from the body as `cid:` resources
    pub inline_images: Vec<InlineImage>,

    /// Files attached to the message
    pub attachments: Vec<Attachment>,
}

impl SendRequest {
    /// Creates a request with a sender, recipients and subject, and nothing else
    pub fn new(tenant_id: TenantId, from: MailAddress, to: Vec<MailAddress>, subject: &str) -> Self {
        Self {
            tenant_id,
            locale_id: LocaleId::default(),
            from,
            reply_to: None,
            to,
            bcc: vec![],
            subject: subject.to_string(),
            templates: vec![],
            inline_images: vec![],
            attachments: vec![],
        }
    }
}
