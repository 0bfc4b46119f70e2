//! Mail message building blocks

mod address;
mod attachment;
mod body;
mod composer;
mod images;
mod message_id;
mod request;
mod template;

pub mod errors;

pub use address::{EmailAddress, EmailAddressError, MailAddress};
pub use attachment::{Attachment, InlineImage};
pub use body::MessageBody;
pub use composer::{ComposedMail, MailComposer};
pub use images::{embed_images, EmbeddedImages};
pub use message_id::{message_host, MessageId, MESSAGE_ID_TAG};
pub use request::{LocaleId, SendRequest};
pub use template::{
    ContentKind, RenderedTemplate, TemplateError, TemplateRenderer, TemplateSource, TemplateVariable,
};
