use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::time::Instant;

use super::AppState;
use crate::power_quality::{PowerQualityInput, SystemType};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    engine: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_us: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentHealth {
    fn healthy(latency_us: u64) -> Self {
        Self {
            status: "healthy".to_string(),
            latency_us: Some(latency_us),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            latency_us: None,
            error: Some(error),
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Run a reference calculation with a known answer: 10 A with a 3 A
/// third and 4 A fifth harmonic is exactly 50 % THDi.
fn check_engine(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let reference = PowerQualityInput::new(10.0, SystemType::SinglePhase)
        .with_harmonic(3, 3.0)
        .with_harmonic(5, 4.0);

    match state.engine.calculate(&reference) {
        Ok(result) if (result.thdi_current - 50.0).abs() < 1e-9 => {
            ComponentHealth::healthy(start.elapsed().as_micros() as u64)
        }
        Ok(result) => ComponentHealth::unhealthy(format!(
            "reference THDi mismatch: {}",
            result.thdi_current
        )),
        Err(e) => ComponentHealth::unhealthy(e.to_string()),
    }
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let engine_health = check_engine(&state);
    let all_healthy = engine_health.is_healthy();

    let response = HealthResponse {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now(),
        checks: HealthChecks {
            engine: engine_health,
        },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(healthy = all_healthy, "Health check completed");

    (status_code, Json(response))
}

/// GET /health/ready - Readiness probe for Kubernetes
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if check_engine(&state).is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - Liveness probe for Kubernetes
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
