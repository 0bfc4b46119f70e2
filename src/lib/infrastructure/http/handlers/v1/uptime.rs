//! Uptime handler

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        dispatcher::MailDispatcher, mail::TemplateRenderer, settings::SettingsManagement,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// The uptime response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UptimeResponse {
    /// Seconds since the server started
    #[schema(example = 123)]
    pub uptime: i64,
}

/// Get the uptime of the mail dispatch server
#[utoipa::path(
    get,
    operation_id = "uptime",
    tag = "System",
    path = "/api/v1/uptime",
    responses(
        (status = StatusCode::OK, description = "Uptime response", body = UptimeResponse),
    )
)]
pub async fn handler<D, S, R>(
    State(state): State<AppState<D, S, R>>,
) -> Result<Json<UptimeResponse>, ApiError>
where
    D: MailDispatcher,
    S: SettingsManagement,
    R: TemplateRenderer,
{
    let uptime = Utc::now().timestamp() - state.start_time.timestamp();

    Ok(Json(UptimeResponse { uptime }))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::infrastructure::http::{router, state::tests::test_state};

    use super::UptimeResponse;

    #[tokio::test]
    async fn test_uptime_handler() -> TestResult {
        let state = test_state(None, None);

        let response = TestServer::new(router(state))?.get("/api/v1/uptime").await;

        response.assert_status_ok();

        let json = response.json::<UptimeResponse>();

        assert!(json.uptime >= 0);
        assert!(json.uptime < 5, "a fresh server reports a small uptime");

        Ok(())
    }
}
