//! Attachments and inline resources

use std::{fmt, path::Path, path::PathBuf};

/// Content type used when the caller does not supply one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A named binary blob attached to a message
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// The file name shown to the recipient
    pub name: String,

    /// The raw content
    pub content: Vec<u8>,

    /// The MIME type of the content, if known
    pub content_type: Option<String>,
}

impl Attachment {
    /// Creates a new attachment
    pub fn new(name: &str, content: Vec<u8>, content_type: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            content,
            content_type: content_type.map(String::from),
        }
    }

    /// The MIME type to declare for this attachment
    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("name", &self.name)
            .field("content", &format_args!("{} bytes", self.content.len()))
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// An image embedded in the message body and referenced as `cid:<content_id>`
#[derive(Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// The content id referenced from the body
    pub content_id: String,

    /// Where the image was read from
    pub path: PathBuf,

    /// The image bytes
    pub content: Vec<u8>,
}

impl InlineImage {
    /// The body reference for this image
    pub fn reference(&self) -> String {
        format!("cid:{}", self.content_id)
    }

    /// The MIME type guessed from the file extension
    pub fn content_type(&self) -> &'static str {
        guess_image_type(&self.path)
    }
}

impl fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineImage")
            .field("content_id", &self.content_id)
            .field("path", &self.path)
            .field("content", &format_args!("{} bytes", self.content.len()))
            .finish()
    }
}

fn guess_image_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
