//! Update mail settings handler

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    domain::{
        config::TenantId, dispatcher::MailDispatcher, mail::TemplateRenderer,
        settings::{MailSettings, SettingsManagement},
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

use super::{MailSettingsBody, MailSettingsResponse};

/// Replace the mail settings of a tenant
#[utoipa::path(
    put,
    operation_id = "update_mail_settings",
    tag = "Settings",
    path = "/api/v1/tenants/{tenant_id}/mail-settings",
    params(("tenant_id" = i64, Path, description = "Tenant identifier")),
    request_body = MailSettingsBody,
    responses(
        (status = StatusCode::OK, description = "Settings stored", body = MailSettingsResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Unprocessable entity", body = ErrorResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Settings could not be written", body = ErrorResponse),
    )
)]
pub async fn handler<D, S, R>(
    State(state): State<AppState<D, S, R>>,
    tenant_id: Result<Path<i64>, PathRejection>,
    request: Result<Json<MailSettingsBody>, JsonRejection>,
) -> Result<Json<MailSettingsResponse>, ApiError>
where
    D: MailDispatcher,
    S: SettingsManagement,
    R: TemplateRenderer,
{
    let Path(tenant_id) = tenant_id?;
    let Json(request) = request?;

    let settings: MailSettings = request.try_into()?;

    let view = state.settings.update(TenantId(tenant_id), &settings).await?;

    Ok(Json(view.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::{
            config::TenantId,
            settings::{tests::MockSettingsManagement, MailSettingsView, SettingsError},
            transport::{EncryptionMode, MailMethod},
        },
        infrastructure::http::{
            errors::ErrorResponse, handlers::v1::settings::MailSettingsResponse, router,
            state::tests::test_state,
        },
    };

    #[tokio::test]
    async fn test_update_settings() -> TestResult {
        let mut settings = MockSettingsManagement::new();

        settings
            .expect_update()
            .withf(|tenant_id, settings| {
                *tenant_id == TenantId(9)
                    && settings.host == "smtp.example.com"
                    && settings.encryption == EncryptionMode::Ssl
                    && settings.port == 465
                    && settings.password.as_deref() == Some("hunter2")
                    && !settings.verify_peer
            })
            .returning(|_, settings| {
                Ok(MailSettingsView {
                    method: settings.method,
                    host: settings.host.clone(),
                    username: settings.username.clone(),
                    has_password: true,
                    encryption: settings.encryption,
                    port: settings.port,
                    verify_peer: settings.verify_peer,
                    verify_peer_name: settings.verify_peer_name,
                    allow_self_signed: settings.allow_self_signed,
                    peer_name: settings.peer_name.clone(),
                    ca_file: settings.ca_file.clone(),
                })
            });

        let response = TestServer::new(router(test_state(None, Some(settings))))?
            .put("/api/v1/tenants/9/mail-settings")
            .json(&json!({
                "host": "smtp.example.com",
                "username": "mailer",
                "password": "hunter2",
                "encryption": "ssl",
                "verify_peer": false,
            }))
            .await;

        response.assert_status_ok();

        let json = response.json::<MailSettingsResponse>();

        assert_eq!(json.method, MailMethod::Smtp.as_str());
        assert_eq!(json.encryption, "ssl");
        assert_eq!(json.port, 465);
        assert!(json.has_password);
        assert!(!json.verify_peer);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_settings_invalid_encryption() -> TestResult {
        let response = TestServer::new(router(test_state(None, None)))?
            .put("/api/v1/tenants/9/mail-settings")
            .json(&json!({ "host": "smtp.example.com", "encryption": "starttls" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.json::<ErrorResponse>().error,
            "Unknown encryption \"starttls\", expected ssl, tls or none"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_settings_zero_port() -> TestResult {
        let mut settings = MockSettingsManagement::new();

        settings
            .expect_update()
            .returning(|_, _| Err(SettingsError::InvalidPort));

        let response = TestServer::new(router(test_state(None, Some(settings))))?
            .put("/api/v1/tenants/9/mail-settings")
            .json(&json!({ "host": "smtp.example.com", "port": 0 }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_settings_missing_host() -> TestResult {
        let response = TestServer::new(router(test_state(None, None)))?
            .put("/api/v1/tenants/9/mail-settings")
            .json(&json!({ "username": "mailer" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        Ok(())
    }
}
