//! Remove mail settings handler

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

/// Delete every mail setting of a tenant
#[utoipa::path(
    delete,
    operation_id = "remove_mail_settings",
    tag = "Settings",
    path = "/api/v1/tenants/{tenant_id}/mail-settings",
    params(("tenant_id" = i64, Path, description = "Tenant identifier")),
    responses(
        (status = StatusCode::NO_CONTENT, description = "Settings deleted"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Settings could not be deleted", body = ErrorResponse),
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

    state.settings.remove(TenantId(tenant_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
