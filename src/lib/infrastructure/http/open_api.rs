//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::{errors::ErrorResponse, handlers::v1::*};

/// OpenAPI document of the HTTP API
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Mail Dispatch"),
    paths(
        mail::send_mail::handler,
        settings::ensure_defaults::handler,
        settings::get_settings::handler,
        settings::remove_settings::handler,
        settings::update_settings::handler,
        uptime::handler
    ),
    components(schemas(
        mail::send_mail::AddressBody,
        mail::send_mail::AttachmentBody,
        mail::send_mail::ImageFileTag,
        mail::send_mail::SendMailBody,
        mail::send_mail::SendMailResponse,
        mail::send_mail::TemplateBody,
        mail::send_mail::VariableBody,
        settings::MailSettingsBody,
        settings::MailSettingsResponse,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::infrastructure::http::{router, state::tests::test_state};

    #[tokio::test]
    async fn test_openapi_document_lists_mail_routes() -> TestResult {
        let response = TestServer::new(router(test_state(None, None)))?
            .get("/api/v1/openapi.json")
            .await;

        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();

        assert!(json["paths"]["/api/v1/tenants/{tenant_id}/mail"]["post"].is_object());
        assert!(json["paths"]["/api/v1/tenants/{tenant_id}/mail-settings"]["put"].is_object());

        Ok(())
    }
}
