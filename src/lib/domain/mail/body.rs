//! Body selection

use super::{ContentKind, RenderedTemplate};

/// The body of an assembled message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageBody {
    /// An HTML body with an optional plain text fallback
    Html {
        /// The HTML payload
        html: String,

        /// The fallback for non-HTML readers
        alternative: Option<String>,
    },

    /// A plain text body
    Plain(String),

    /// No usable template was supplied
    Empty,
}

impl MessageBody {
    /// Selects the body from the rendered templates.
    ///
    /// The last template of each kind wins; if its payload is empty that kind
    /// is unset. HTML is primary when present, with plain text as its alternative.
    pub fn select(templates: &[RenderedTemplate]) -> Self {
        let last_of = |kind: ContentKind| {
            templates
                .iter()
                .rev()
                .find(|template| template.kind == kind)
                .filter(|template| !template.payload.is_empty())
                .map(|template| template.payload.clone())
        };

        match (last_of(ContentKind::Html), last_of(ContentKind::Text)) {
            (Some(html), alternative) => Self::Html { html, alternative },
            (None, Some(text)) => Self::Plain(text),
            (None, None) => Self::Empty,
        }
    }

    /// Whether the primary body is HTML
    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html { .. })
    }

    /// The primary body text
    pub fn primary(&self) -> &str {
        match self {
            Self::Html { html, .. } => html,
            Self::Plain(text) => text,
            Self::Empty => "",
        }
    }

    /// The alternative body, only ever set for HTML bodies
    pub fn alternative(&self) -> Option<&str> {
        match self {
            Self::Html { alternative, .. } => alternative.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_is_primary_and_text_is_alternative() {
        let body = MessageBody::select(&[
            RenderedTemplate::text("Hi"),
            RenderedTemplate::html("<p>Hi</p>"),
        ]);

        assert!(body.is_html());
        assert_eq!(body.primary(), "<p>Hi</p>");
        assert_eq!(body.alternative(), Some("Hi"));
    }

    #[test]
    fn test_plain_text_only() {
        let body = MessageBody::select(&[RenderedTemplate::text("Hi")]);

        assert!(!body.is_html());
        assert_eq!(body.primary(), "Hi");
        assert_eq!(body.alternative(), None);
    }

    #[test]
    fn test_html_only_has_no_alternative() {
        let body = MessageBody::select(&[RenderedTemplate::html("<p>Hi</p>")]);

        assert_eq!(
            body,
            MessageBody::Html {
                html: "<p>Hi</p>".to_string(),
                alternative: None
            }
        );
    }

    #[test]
    fn test_last_template_of_each_kind_wins() {
        let body = MessageBody::select(&[
            RenderedTemplate::html("<p>first</p>"),
            RenderedTemplate::text("first"),
            RenderedTemplate::html("<p>second</p>"),
            RenderedTemplate::text("second"),
        ]);

        assert_eq!(body.primary(), "<p>second</p>");
        assert_eq!(body.alternative(), Some("second"));
    }

    #[test]
    fn test_trailing_empty_html_unsets_html() {
        let body = MessageBody::select(&[
            RenderedTemplate::html("<p>a</p>"),
            RenderedTemplate::html(""),
            RenderedTemplate::text("Hi"),
        ]);

        assert_eq!(body, MessageBody::Plain("Hi".to_string()));
    }

    #[test]
    fn test_empty_html_falls_back_to_text() {
        let body = MessageBody::select(&[RenderedTemplate::html(""), RenderedTemplate::text("Hi")]);

        assert_eq!(body, MessageBody::Plain("Hi".to_string()));
    }

    #[test]
    fn test_no_templates() {
        let body = MessageBody::select(&[]);

        assert_eq!(body, MessageBody::Empty);
        assert_eq!(body.primary(), "");
    }
}
