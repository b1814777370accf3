use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::{health, power_quality, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/power-quality/analyse", post(power_quality::analyse))
        .route("/power-quality/form", post(power_quality::analyse_form))
        .route("/power-quality/summary", post(power_quality::summary))
        .route("/power-quality/presets", get(power_quality::list_presets))
        .route("/power-quality/presets/:key", get(power_quality::get_preset))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Probes live at the root so orchestrators need no API prefix
pub fn health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
