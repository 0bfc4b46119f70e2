//! Send mail handler

use std::{collections::BTreeMap, path::PathBuf};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        config::TenantId,
        dispatcher::MailDispatcher,
        mail::{
            Attachment, ContentKind, LocaleId, MailAddress, SendRequest, TemplateRenderer,
            TemplateSource, TemplateVariable,
        },
        settings::SettingsManagement,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// A sender or recipient
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AddressBody {
    #[schema(example = "orders@example.com")]
    pub email: String,

    #[schema(example = "Example Shop")]
    #[serde(default)]
    pub name: Option<String>,
}

impl TryFrom<&AddressBody> for MailAddress {
    type Error = ApiError;

    fn try_from(body: &AddressBody) -> Result<Self, Self::Error> {
        Ok(MailAddress::parse(&body.email, body.name.as_deref())?)
    }
}

/// A template to render into one body alternative
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TemplateBody {
    /// Name used in error messages
    #[schema(example = "order_conf")]
    #[serde(default)]
    pub name: Option<String>,

    /// `text/html` or `text/plain`
    #[schema(example = "text/html")]
    pub content_type: String,

    /// Tera template source
    #[schema(example = "<p>Hello {{ firstname }}</p>")]
    pub source: String,
}

impl TemplateBody {
    fn to_source(&self, position: usize) -> Result<TemplateSource, ApiError> {
        let kind = ContentKind::from_mime_type(&self.content_type).ok_or_else(|| {
            ApiError::new_422(&format!(
                "Unsupported template content type \"{}\"",
                self.content_type
            ))
        })?;

        let name = match &self.name {
            Some(name) => name.clone(),
            None => format!("template_{position}"),
        };

        Ok(TemplateSource::new(&name, kind, &self.source))
    }
}

/// Marker for image variables
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema)]
pub enum ImageFileTag {
    /// `imageFile`
    #[serde(rename = "imageFile")]
    ImageFile,
}

/// A template variable: a literal string, or an image file to embed inline
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum VariableBody {
    /// A literal value
    Value(String),

    /// An image on the server's disk, referenced as `cid:` once embedded
    ImageFile {
        /// Always `imageFile`
        #[serde(rename = "type")]
        kind: ImageFileTag,

        /// Path of the image file
        filepath: String,
    },
}

impl From<VariableBody> for TemplateVariable {
    fn from(body: VariableBody) -> Self {
        match body {
            VariableBody::Value(value) => TemplateVariable::Value(value),
            VariableBody::ImageFile { filepath, .. } => {
                TemplateVariable::ImageFile(PathBuf::from(filepath))
            }
        }
    }
}

/// A file to attach
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AttachmentBody {
    #[schema(example = "invoice.pdf")]
    pub name: String,

    /// Base64 encoded file content
    #[schema(example = "JVBERi0xLjQK")]
    pub content: String,

    #[schema(example = "application/pdf")]
    #[serde(default)]
    pub content_type: Option<String>,
}

impl TryFrom<&AttachmentBody> for Attachment {
    type Error = ApiError;

    fn try_from(body: &AttachmentBody) -> Result<Self, Self::Error> {
        let content = STANDARD.decode(body.content.as_bytes()).map_err(|err| {
            ApiError::new_422(&format!(
                "Attachment \"{}\" is not valid base64: {err}",
                body.name
            ))
        })?;

        Ok(Attachment::new(
            &body.name,
            content,
            body.content_type.as_deref(),
        ))
    }
}

/// Send mail request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SendMailBody {
    pub from: AddressBody,

    #[serde(default)]
    pub reply_to: Option<AddressBody>,

    pub to: Vec<AddressBody>,

    #[serde(default)]
    pub bcc: Vec<AddressBody>,

    #[schema(example = "Your order")]
    pub subject: String,

    #[serde(default)]
    pub locale_id: Option<i64>,

    #[serde(default)]
    pub templates: Vec<TemplateBody>,

    /// Variables by placeholder, e.g. `{firstname}`
    #[serde(default)]
    pub variables: BTreeMap<String, VariableBody>,

    #[serde(default)]
    pub attachments: Vec<AttachmentBody>,
}

/// Send mail response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendMailResponse {
    /// Number of recipients the message was handed over for
    #[schema(example = 2)]
    pub recipients: usize,
}

/// Render and send a message using the tenant's transport settings
#[utoipa::path(
    post,
    operation_id = "send_mail",
    tag = "Mail",
    path = "/api/v1/tenants/{tenant_id}/mail",
    params(("tenant_id" = i64, Path, description = "Tenant identifier")),
    request_body = SendMailBody,
    responses(
        (status = StatusCode::ACCEPTED, description = "Message accepted by the channel", body = SendMailResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Unprocessable entity", body = ErrorResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Transport settings could not be read", body = ErrorResponse),
        (status = StatusCode::BAD_GATEWAY, description = "The mail server rejected the message", body = ErrorResponse),
    )
)]
pub async fn handler<D, S, R>(
    State(state): State<AppState<D, S, R>>,
    tenant_id: Result<Path<i64>, PathRejection>,
    request: Result<Json<SendMailBody>, JsonRejection>,
) -> Result<(StatusCode, Json<SendMailResponse>), ApiError>
where
    D: MailDispatcher,
    S: SettingsManagement,
    R: TemplateRenderer,
{
    let Path(tenant_id) = tenant_id?;
    let Json(request) = request?;

    let from = MailAddress::try_from(&request.from)?;
    let reply_to = request
        .reply_to
        .as_ref()
        .map(MailAddress::try_from)
        .transpose()?;
    let to = addresses(&request.to)?;
    let bcc = addresses(&request.bcc)?;

    if to.is_empty() && bcc.is_empty() {
        return Err(ApiError::new_422("Please provide at least one recipient"));
    }

    let templates = request
        .templates
        .iter()
        .enumerate()
        .map(|(position, template)| template.to_source(position))
        .collect::<Result<Vec<_>, _>>()?;

    let attachments = request
        .attachments
        .iter()
        .map(Attachment::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let variables: BTreeMap<String, TemplateVariable> = request
        .variables
        .into_iter()
        .map(|(key, value)| (key, value.into()))
        .collect();

    let composed = state.composer.compose(&templates, &variables).await?;

    let recipients = to.len() + bcc.len();

    let mut send_request = SendRequest::new(TenantId(tenant_id), from, to, &request.subject);
    send_request.locale_id = LocaleId(request.locale_id.unwrap_or_default());
    send_request.reply_to = reply_to;
    send_request.bcc = bcc;
    send_request.templates = composed.templates;
    send_request.inline_images = composed.inline_images;
    send_request.attachments = attachments;

    state.dispatcher.send(send_request).await?;

    Ok((StatusCode::ACCEPTED, Json(SendMailResponse { recipients })))
}

fn addresses(bodies: &[AddressBody]) -> Result<Vec<MailAddress>, ApiError> {
    bodies.iter().map(MailAddress::try_from).collect()
}
