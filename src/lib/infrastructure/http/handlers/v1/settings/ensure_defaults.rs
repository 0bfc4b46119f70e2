//! Install default mail settings handler

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
};

use crate::{
    domain::{
        config::TenantId, dispatcher::MailDispatcher, mail::TemplateRenderer,
        settings::SettingsManagement,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Store the default value of every mail setting the tenant has not set yet
#[utoipa::path(
    post,
    operation_id = "ensure_mail_settings_defaults",
    tag = "Settings",
    path = "/api/v1/tenants/{tenant_id}/mail-settings/defaults",
    params(("tenant_id" = i64, Path, description = "Tenant identifier")),
    responses(
        (status = StatusCode::NO_CONTENT, description = "Defaults stored"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Settings could not be written", body = ErrorResponse),
    )
)]
pub async fn handler<D, S, R>(
    State(state): State<AppState<D, S, R>>,
    tenant_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
    D: MailDispatcher,
    S: SettingsManagement,
    R: TemplateRenderer,
{
    let Path(tenant_id) = tenant_id?;

    state.settings.ensure_defaults(TenantId(tenant_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
