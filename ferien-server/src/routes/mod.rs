pub mod health;
pub mod holidays;
pub mod stats;
pub mod vacations;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ferien_core::FerienError;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application with all routes and layers.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::router())
        .merge(vacations::router())
        .merge(holidays::router())
        .merge(stats::router())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors to HTTP responses. Invalid input maps to 400, the rest to 500.
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!(message.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.error, "Request failed");
        }

        let body = Json(ErrorResponse {
            error: self.error.to_string(),
        });
        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let error: anyhow::Error = err.into();

        let status = match error.downcast_ref::<FerienError>() {
            Some(e) if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        AppError { status, error }
    }
}

#[cfg(test)]
pub mod test_support {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use ferien_core::CoverageSettings;
    use ferien_core::holidays::bavarian_school_holidays;
    use ferien_core::store::MemoryStore;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::state::AppState;

    /// State over an in-memory store. The school holiday API points at a
    /// closed port, so the built-in table is served.
    pub fn state(settings: CoverageSettings) -> AppState {
        AppState::new(
            Box::new(MemoryStore::new()),
            bavarian_school_holidays("http://127.0.0.1:9", Duration::from_millis(100)),
            settings,
        )
    }

    pub async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }
}
