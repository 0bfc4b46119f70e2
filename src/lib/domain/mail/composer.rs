//! Caller-side composition: image embedding followed by rendering

use std::{
    collections::BTreeMap,
    path::PathBuf,
    sync::Arc,
};

use tracing::debug;

use super::{
    embed_images, InlineImage, RenderedTemplate, TemplateError, TemplateRenderer, TemplateSource,
    TemplateVariable,
};

/// The rendered parts of a message, ready to be placed in a [`super::SendRequest`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposedMail {
    /// Rendered body alternatives
    pub templates: Vec<RenderedTemplate>,

    /// Inline images referenced by the rendered bodies
    pub inline_images: Vec<InlineImage>,
}

/// Renders templates after resolving image placeholders
#[derive(Debug, Clone)]
pub struct MailComposer<R>
where
    R: TemplateRenderer,
{
    renderer: Arc<R>,
    image_root: Option<PathBuf>,
}

impl<R> MailComposer<R>
where
    R: TemplateRenderer,
{
    /// Creates a new composer.
    ///
    /// Image variables are only embedded from files inside `image_root`; with
    /// [`None`] every image placeholder resolves to an empty string.
    pub fn new(renderer: Arc<R>, image_root: Option<PathBuf>) -> Self {
        Self {
            renderer,
            image_root,
        }
    }

    /// Embeds images, then renders every template with the resolved variables
    pub async fn compose(
        &self,
        templates: &[TemplateSource],
        variables: &BTreeMap<String, TemplateVariable>,
    ) -> Result<ComposedMail, TemplateError> {
        let embedded = embed_images(variables, self.image_root.as_deref()).await;

        debug!(
            templates = templates.len(),
            inline_images = embedded.inline_images.len(),
            "composing mail"
        );

        let templates = templates
            .iter()
            .map(|template| self.renderer.render(template, &embedded.variables))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComposedMail {
            templates,
            inline_images: embedded.inline_images,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::mail::{tests::MockTemplateRenderer, ContentKind};

    use super::*;

    #[tokio::test]
    async fn test_renderer_sees_resolved_image_variables() -> TestResult {
        let mut renderer = MockTemplateRenderer::new();

        renderer
            .expect_render()
            .times(1)
            .withf(|template, variables| {
                template.kind == ContentKind::Html
                    && variables.get("{shop_logo}") == Some(&String::new())
                    && variables.get("{name}") == Some(&"Ada".to_string())
            })
            .returning(|_, _| Ok(RenderedTemplate::html("<p>Ada</p>")));

        let composer = MailComposer::new(Arc::new(renderer), Some(std::env::temp_dir()));

        let mut variables = BTreeMap::new();
        variables.insert("{name}".to_string(), TemplateVariable::from("Ada"));
        variables.insert(
            "{shop_logo}".to_string(),
            TemplateVariable::ImageFile(PathBuf::from("/missing/logo.png")),
        );

        let composed = composer
            .compose(
                &[TemplateSource::new("welcome", ContentKind::Html, "<p>{{ name }}</p>")],
                &variables,
            )
            .await?;

        assert_eq!(composed.templates, vec![RenderedTemplate::html("<p>Ada</p>")]);
        assert!(composed.inline_images.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_render_failure_is_returned() {
        let mut renderer = MockTemplateRenderer::new();

        renderer.expect_render().returning(|template, _| {
            Err(TemplateError::RenderFailed {
                name: template.name.clone(),
                message: "boom".to_string(),
            })
        });

        let composer = MailComposer::new(Arc::new(renderer), Some(std::env::temp_dir()));

        let result = composer
            .compose(
                &[TemplateSource::new("broken", ContentKind::Text, "{{")],
                &BTreeMap::new(),
            )
            .await;

        assert!(matches!(result, Err(TemplateError::RenderFailed { name, .. }) if name == "broken"));
    }
}
