//! Assembled messages

use crate::domain::mail::{Attachment, InlineImage, MailAddress, MessageBody, MessageId};

/// A fully assembled message, independent of the delivery library
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    /// The Message-ID header value
    pub message_id: MessageId,

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

    /// The selected body
    pub body: MessageBody,

    /// Images referenced from the body
    pub inline_images: Vec<InlineImage>,

    /// Attached files
    pub attachments: Vec<Attachment>,
}
