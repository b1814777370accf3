use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::api::power_quality::FormAnalysis;
use crate::power_quality::{
    ComplianceStatus, HarmonicComponent, HarmonicField, HarmonicSpectrumEntry, HarmonicStatus,
    LoadType, PowerQualityForm, PowerQualityInput, PowerQualityRating, PowerQualityResult,
    RiskLevel, SystemType,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::power_quality::analyse,
        crate::api::power_quality::analyse_form,
        crate::api::power_quality::summary,
        crate::api::power_quality::list_presets,
        crate::api::power_quality::get_preset,
    ),
    components(
        schemas(
            PowerQualityInput, HarmonicComponent, SystemType, LoadType,
            PowerQualityResult, HarmonicSpectrumEntry, HarmonicStatus,
            PowerQualityRating, RiskLevel, ComplianceStatus,
            PowerQualityForm, HarmonicField, FormAnalysis, ErrorResponse
        )
    ),
    tags((name = "power-quality", description = "Harmonic distortion analysis API v1"))
)]
pub struct ApiDoc;
