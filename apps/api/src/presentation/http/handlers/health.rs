use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: &'static str,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_status = match state.customer_repo.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::error!("Health check failed: customer store unreachable: {}", e);
            "down"
        }
    };

    let (code, status) = if store_status == "up" {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let response = HealthResponse {
        status,
        store: store_status,
        version: env!("CARGO_PKG_VERSION"),
    };

    (code, Json(response))
}
