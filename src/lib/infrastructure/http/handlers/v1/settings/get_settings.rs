//! Get mail settings handler

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    domain::{
        config::TenantId, dispatcher::MailDispatcher, mail::TemplateRenderer,
        settings::SettingsManagement,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

use super::MailSettingsResponse;

/// Get the mail settings of a tenant
#[utoipa::path(
    get,
    operation_id = "get_mail_settings",
    tag = "Settings",
    path = "/api/v1/tenants/{tenant_id}/mail-settings",
    params(("tenant_id" = i64, Path, description = "Tenant identifier")),
    responses(
        (status = StatusCode::OK, description = "Stored mail settings", body = MailSettingsResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Settings could not be read", body = ErrorResponse),
    )
)]
pub async fn handler<D, S, R>(
    State(state): State<AppState<D, S, R>>,
    tenant_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MailSettingsResponse>, ApiError>
where
    D: MailDispatcher,
    S: SettingsManagement,
    R: TemplateRenderer,
{
    let Path(tenant_id) = tenant_id?;

    let view = state.settings.load(TenantId(tenant_id)).await?;

    Ok(Json(view.into()))
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::{
        domain::{
            config::{ConfigError, TenantId},
            settings::{tests::MockSettingsManagement, MailSettingsView, SettingsError},
            transport::{EncryptionMode, MailMethod},
        },
        infrastructure::http::{
            errors::ErrorResponse, handlers::v1::settings::MailSettingsResponse, router,
            state::tests::test_state,
        },
    };

    fn view() -> MailSettingsView {
        MailSettingsView {
            method: MailMethod::Smtp,
            host: "smtp.example.com".to_string(),
            username: "mailer".to_string(),
            has_password: true,
            encryption: EncryptionMode::Tls,
            port: 587,
            verify_peer: true,
            verify_peer_name: true,
            allow_self_signed: false,
            peer_name: None,
            ca_file: None,
        }
    }

    #[tokio::test]
    async fn test_get_settings() -> TestResult {
        let mut settings = MockSettingsManagement::new();

        settings
            .expect_load()
            .withf(|tenant_id| *tenant_id == TenantId(3))
            .returning(|_| Ok(view()));

        let response = TestServer::new(router(test_state(None, Some(settings))))?
            .get("/api/v1/tenants/3/mail-settings")
            .await;

        response.assert_status_ok();

        let json = response.json::<MailSettingsResponse>();

        assert_eq!(json.host, "smtp.example.com");
        assert_eq!(json.encryption, "tls");
        assert_eq!(json.port, 587);
        assert!(json.has_password);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_settings_store_failure() -> TestResult {
        let mut settings = MockSettingsManagement::new();

        settings.expect_load().returning(|_| {
            Err(SettingsError::Configuration(ConfigError::Unavailable(
                anyhow!("pool timed out"),
            )))
        });

        let response = TestServer::new(router(test_state(None, Some(settings))))?
            .get("/api/v1/tenants/3/mail-settings")
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<ErrorResponse>().error,
            "Mail settings could not be accessed"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_settings_invalid_tenant() -> TestResult {
        let response = TestServer::new(router(test_state(None, None)))?
            .get("/api/v1/tenants/acme/mail-settings")
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}
