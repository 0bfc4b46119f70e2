//! API handler modules

use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::error;

use super::errors::ErrorResponse;

pub mod v1;

/// Converts a panic inside a handler into a 500 response
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = match (err.downcast_ref::<String>(), err.downcast_ref::<&str>()) {
        (Some(message), _) => message.clone(),
        (None, Some(message)) => message.to_string(),
        (None, None) => "Internal server error".to_string(),
    };

    error!(details = %details, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: details }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use axum::body::to_bytes;
    use testresult::TestResult;

    use super::*;

    fn simulate_panic() -> Box<dyn Any + Send + 'static> {
        match panic::catch_unwind(AssertUnwindSafe(|| panic!("SMTP pool exploded"))) {
            Err(err) => err,
            Ok(()) => panic!("the closure did not panic"),
        }
    }

    #[tokio::test]
    async fn test_panic_handler() -> TestResult {
        let response = panic_handler(simulate_panic());

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json = serde_json::from_slice::<serde_json::Value>(&body)?;

        assert_eq!(json, serde_json::json!({ "error": "SMTP pool exploded" }));

        Ok(())
    }

    #[tokio::test]
    async fn test_panic_handler_with_opaque_payload() -> TestResult {
        let response = panic_handler(Box::new(42_u8));

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json = serde_json::from_slice::<serde_json::Value>(&body)?;

        assert_eq!(json, serde_json::json!({ "error": "Internal server error" }));

        Ok(())
    }
}
