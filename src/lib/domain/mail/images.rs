//! Image placeholder embedding

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::debug;

use super::{InlineImage, TemplateVariable};

/// The result of resolving image placeholders in a variable mapping
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmbeddedImages {
    /// Variables with every image placeholder replaced by a `cid:` reference or `""`
    pub variables: BTreeMap<String, String>,

    /// The inline images to add to the message, in variable order
    pub inline_images: Vec<InlineImage>,
}

/// Replaces every [`TemplateVariable::ImageFile`] with a `cid:` reference.
///
/// Image paths are resolved against `image_root`, and only files that stay
/// inside it after resolving symlinks and `..` are read. Without a root no
/// image is embedded. The content id is the variable key with `{` and `}`
/// removed. A file that is missing, unreadable or outside the root resolves
/// to an empty string and adds nothing.
pub async fn embed_images(
    variables: &BTreeMap<String, TemplateVariable>,
    image_root: Option<&Path>,
) -> EmbeddedImages {
    let mut embedded = EmbeddedImages::default();

    for (key, variable) in variables {
        let value = match variable {
            TemplateVariable::Value(value) => value.clone(),
            TemplateVariable::ImageFile(path) => {
                let content_id = key.replace(['{', '}'], "");

                embed(&mut embedded.inline_images, content_id, path, image_root).await
            }
        };

        embedded.variables.insert(key.clone(), value);
    }

    embedded
}

async fn embed(
    images: &mut Vec<InlineImage>,
    content_id: String,
    path: &Path,
    image_root: Option<&Path>,
) -> String {
    if let Some(existing) = images.iter().find(|image| image.content_id == content_id) {
        return existing.reference();
    }

    if path.as_os_str().is_empty() {
        return String::new();
    }

    let Some(resolved) = confine(path, image_root).await else {
        return String::new();
    };

    match fs::read(&resolved).await {
        Ok(content) => {
            let image = InlineImage {
                content_id,
                path: resolved,
                content,
            };
            let reference = image.reference();

            images.push(image);

            reference
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "skipping inline image");

            String::new()
        }
    }
}

async fn confine(path: &Path, image_root: Option<&Path>) -> Option<PathBuf> {
    let Some(root) = image_root else {
        debug!(path = %path.display(), "no image directory configured, skipping inline image");
        return None;
    };

    let root = match fs::canonicalize(root).await {
        Ok(root) => root,
        Err(err) => {
            debug!(root = %root.display(), error = %err, "image directory is not readable");
            return None;
        }
    };

    let resolved = match fs::canonicalize(root.join(path)).await {
        Ok(resolved) => resolved,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "skipping inline image");
            return None;
        }
    };

    if resolved.starts_with(&root) {
        Some(resolved)
    } else {
        debug!(path = %path.display(), root = %root.display(), "inline image outside image directory");
        None
    }
}
