//! Tera template renderer

use std::{collections::BTreeMap, error::Error as _};

use tera::{Context, Tera};

use crate::domain::mail::{
    ContentKind, RenderedTemplate, TemplateError, TemplateRenderer, TemplateSource,
};

/// Renders templates with Tera.
///
/// Variable keys are exposed with `{` and `}` removed, so `{shop_name}` is
/// referenced as `{{ shop_name }}`. HTML templates are autoescaped.
#[derive(Debug, Clone, Default)]
pub struct TeraRenderer;

impl TeraRenderer {
    /// Creates a new renderer
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(
        &self,
        template: &TemplateSource,
        variables: &BTreeMap<String, String>,
    ) -> Result<RenderedTemplate, TemplateError> {
        let mut context = Context::new();

        for (key, value) in variables {
            context.insert(key.replace(['{', '}'], ""), value);
        }

        let autoescape = template.kind == ContentKind::Html;

        let payload = Tera::one_off(&template.source, &context, autoescape).map_err(|err| {
            let message = match err.source() {
                Some(source) => format!("{err}: {source}"),
                None => err.to_string(),
            };

            TemplateError::RenderFailed {
                name: template.name.clone(),
                message,
            }
        })?;

        Ok(RenderedTemplate {
            kind: template.kind,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn variables(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_render_html_with_braced_keys() -> TestResult {
        let template = TemplateSource::new(
            "welcome",
            ContentKind::Html,
            r#"<p>Hello {{ firstname }}</p><img src="{{ shop_logo }}">"#,
        );

        let rendered = TeraRenderer::new().render(
            &template,
            &variables(&[("{firstname}", "Ada"), ("{shop_logo}", "cid:shop_logo")]),
        )?;

        assert_eq!(rendered.kind, ContentKind::Html);
        assert_eq!(
            rendered.payload,
            r#"<p>Hello Ada</p><img src="cid:shop_logo">"#
        );

        Ok(())
    }

    #[test]
    fn test_html_is_escaped_but_text_is_not() -> TestResult {
        let vars = variables(&[("name", "<b>Ada</b>")]);

        let html = TeraRenderer::new().render(
            &TemplateSource::new("html", ContentKind::Html, "{{ name }}"),
            &vars,
        )?;
        let text = TeraRenderer::new().render(
            &TemplateSource::new("text", ContentKind::Text, "{{ name }}"),
            &vars,
        )?;

        assert_eq!(html.payload, "&lt;b&gt;Ada&lt;&#x2F;b&gt;");
        assert_eq!(text.payload, "<b>Ada</b>");

        Ok(())
    }

    #[test]
    fn test_syntax_error_names_the_template() {
        let result = TeraRenderer::new().render(
            &TemplateSource::new("broken", ContentKind::Text, "{{ name "),
            &BTreeMap::new(),
        );

        assert!(matches!(result, Err(TemplateError::RenderFailed { name, .. }) if name == "broken"));
    }
}
