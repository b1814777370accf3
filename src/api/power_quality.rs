//! Power quality calculator API endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use super::{error::ApiError, AppState};
use crate::power_quality::{
    find_preset, text_summary, HarmonicPreset, PowerQualityForm, PowerQualityInput,
    PowerQualityResult, HARMONIC_PRESETS,
};

/// Body errors are reported in the same JSON shape as every other error
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Run the analysis on structured readings
#[cfg_attr(feature = "swagger", utoipa::path(
    post,
    path = "/api/v1/power-quality/analyse",
    request_body = PowerQualityInput,
    responses(
        (status = 200, description = "Analysis result", body = PowerQualityResult),
        (status = 400, description = "Rejected readings", body = super::error::ErrorResponse),
    )
))]
pub async fn analyse(
    State(st): State<AppState>,
    payload: Result<Json<PowerQualityInput>, JsonRejection>,
) -> Result<Json<PowerQualityResult>, ApiError> {
    let input = body(payload)?;
    let result = st.engine.calculate(&input)?;

    info!(
        system = %input.system_type,
        harmonics = input.harmonics.len(),
        thdi = result.thdi_current,
        compliance = %result.compliance_status,
        "analysis served"
    );

    Ok(Json(result))
}

/// Parsed input alongside its result, so callers can see which defaults were applied
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct FormAnalysis {
    pub input: PowerQualityInput,
    pub result: PowerQualityResult,
}

/// Run the analysis on raw calculator form fields
#[cfg_attr(feature = "swagger", utoipa::path(
    post,
    path = "/api/v1/power-quality/form",
    request_body = PowerQualityForm,
    responses(
        (status = 200, description = "Parsed input and analysis result", body = FormAnalysis),
        (status = 400, description = "Rejected form field", body = super::error::ErrorResponse),
        (status = 404, description = "Unknown preset", body = super::error::ErrorResponse),
    )
))]
pub async fn analyse_form(
    State(st): State<AppState>,
    payload: Result<Json<PowerQualityForm>, JsonRejection>,
) -> Result<Json<FormAnalysis>, ApiError> {
    let form = body(payload)?;
    let input = form.into_input(&st.form_defaults)?;
    let result = st.engine.calculate(&input)?;

    info!(thdi = result.thdi_current, "form analysis served");

    Ok(Json(FormAnalysis { input, result }))
}

/// Plain-text summary for clipboard export
#[cfg_attr(feature = "swagger", utoipa::path(
    post,
    path = "/api/v1/power-quality/summary",
    request_body = PowerQualityInput,
    responses(
        (status = 200, description = "Text summary", body = String, content_type = "text/plain"),
        (status = 400, description = "Rejected readings", body = super::error::ErrorResponse),
    )
))]
pub async fn summary(
    State(st): State<AppState>,
    payload: Result<Json<PowerQualityInput>, JsonRejection>,
) -> Result<String, ApiError> {
    let input = body(payload)?;
    let result = st.engine.calculate(&input)?;
    Ok(text_summary(&input, &result))
}

#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/api/v1/power-quality/presets",
    responses((status = 200, description = "Typical harmonic profiles"))
))]
pub async fn list_presets() -> Json<&'static [HarmonicPreset]> {
    Json(HARMONIC_PRESETS)
}

#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/api/v1/power-quality/presets/{key}",
    params(("key" = String, Path, description = "Preset key, e.g. vfd")),
    responses(
        (status = 200, description = "Harmonic profile"),
        (status = 404, description = "Unknown preset", body = super::error::ErrorResponse),
    )
))]
pub async fn get_preset(Path(key): Path<String>) -> Result<Json<&'static HarmonicPreset>, ApiError> {
    Ok(Json(find_preset(&key)?))
}
