use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health_check", get(health_check))
}

/// Liveness probe: 200 with an empty body.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
