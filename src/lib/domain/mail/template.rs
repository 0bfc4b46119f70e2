//! Template sources, rendered templates and the renderer seam

use std::{collections::BTreeMap, fmt, path::PathBuf};

use thiserror::Error;

#[cfg(test)]
use mockall::mock;

/// The MIME alternative a template produces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// `text/html`
    Html,

    /// `text/plain`
    Text,
}

impl ContentKind {
    /// Maps a MIME type (parameters ignored) onto a content kind
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();

        match essence.to_ascii_lowercase().as_str() {
            "text/html" => Some(Self::Html),
            "text/plain" => Some(Self::Text),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// One MIME alternative of the message body, already rendered
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedTemplate {
    /// The content kind
    pub kind: ContentKind,

    /// The rendered payload
    pub payload: String,
}

impl RenderedTemplate {
    /// An HTML alternative
    pub fn html(payload: &str) -> Self {
        Self {
            kind: ContentKind::Html,
            payload: payload.to_string(),
        }
    }

    /// A plain text alternative
    pub fn text(payload: &str) -> Self {
        Self {
            kind: ContentKind::Text,
            payload: payload.to_string(),
        }
    }
}

/// An unrendered template
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateSource {
    /// Name used in error messages
    pub name: String,

    /// The content kind the template renders to
    pub kind: ContentKind,

    /// The template text
    pub source: String,
}

impl TemplateSource {
    /// Creates a new template source
    pub fn new(name: &str, kind: ContentKind, source: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            source: source.to_string(),
        }
    }
}

/// A value supplied to template rendering
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateVariable {
    /// A literal value
    Value(String),

    /// A reference to an image on disk, to be embedded inline
    ImageFile(PathBuf),
}

impl From<&str> for TemplateVariable {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

/// Template rendering errors
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template could not be parsed or rendered
    #[error("could not render template \"{name}\": {message}")]
    RenderFailed {
        /// The template name
        name: String,

        /// What went wrong
        message: String,
    },
}

/// Renders template sources with a flat variable mapping
pub trait TemplateRenderer: Clone + Send + Sync + 'static {
    /// Renders `template` with `variables`
    ///
    /// # Arguments
    /// * `template` - The [`TemplateSource`] to render.
    /// * `variables` - The resolved variables, keyed by name.
    ///
    /// # Returns
    /// The [`RenderedTemplate`] of the same [`ContentKind`], or a [`TemplateError`].
    fn render(
        &self,
        template: &TemplateSource,
        variables: &BTreeMap<String, String>,
    ) -> Result<RenderedTemplate, TemplateError>;
}

#[cfg(test)]
mock! {
    pub TemplateRenderer {}

    impl Clone for TemplateRenderer {
        fn clone(&self) -> Self;
    }

    impl TemplateRenderer for TemplateRenderer {
        fn render(
            &self,
            template: &TemplateSource,
            variables: &BTreeMap<String, String>,
        ) -> Result<RenderedTemplate, TemplateError>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_from_mime_type() {
        assert_eq!(
            ContentKind::from_mime_type("text/html; charset=utf-8"),
            Some(ContentKind::Html)
        );
        assert_eq!(
            ContentKind::from_mime_type("TEXT/PLAIN"),
            Some(ContentKind::Text)
        );
        assert_eq!(ContentKind::from_mime_type("image/png"), None);
    }
}
