//! # Regulatory Limits and Classification Breakpoints
//!
//! Every threshold the engine compares against lives here so the rating,
//! risk and compliance rules stay consistent with each other.
//!
//! ## Breakpoints (upper bounds inclusive)
//!
//! | THDi        | Rating    | IEEE 519 | BS 7671 |
//! |-------------|-----------|----------|---------|
//! | <= 5 %      | excellent | pass     | pass    |
//! | <= 8 %      | good      | fail     | pass    |
//! | <= 12 %     | fair      | fail     | fail    |
//! | > 12 %      | poor      | fail     | fail    |
//!
//! Individual harmonic limits follow the IEC 61000-3-12 current emission
//! table referenced by G5/5 for equipment connected to LV networks.

use super::types::{ComplianceStatus, HarmonicStatus, PowerQualityRating, RiskLevel};

// ===== FORM DEFAULTS =====

/// UK nominal single-phase voltage
pub const DEFAULT_VOLTAGE_V: f64 = 230.0;

pub const DEFAULT_FREQUENCY_HZ: f64 = 50.0;

/// Used whenever the displacement power factor is missing or outside (0, 1]
pub const DEFAULT_DISPLACEMENT_PF: f64 = 0.95;

/// Highest harmonic order accepted (G5/5 tables stop at the 50th)
pub const MAX_HARMONIC_ORDER: u32 = 50;

// ===== COMPLIANCE LIMITS =====

/// IEEE 519 current distortion limit, inclusive ("<= 5 %")
pub const IEEE_519_THDI_LIMIT: f64 = 5.0;

/// BS 7671 18th Edition guidance limit on current distortion
pub const BS7671_THDI_LIMIT: f64 = 8.0;

/// A harmonic above this share of its own limit is flagged as a warning
pub const HARMONIC_WARNING_RATIO: f64 = 0.8;

/// IEEE C57.110 simplified eddy-current loss share used for derating
pub const EDDY_CURRENT_LOSS_FACTOR: f64 = 0.05;

// ===== RATING BREAKPOINTS =====

pub const RATING_EXCELLENT_MAX_THDI: f64 = 5.0;
pub const RATING_GOOD_MAX_THDI: f64 = 8.0;
pub const RATING_FAIR_MAX_THDI: f64 = 12.0;

// ===== RISK THRESHOLDS =====

pub const RISK_HIGH_THDI: f64 = 15.0;
/// Above K-9 standard transformers run noticeably hot
pub const RISK_HIGH_K_FACTOR: f64 = 9.0;
/// Above 2.5 thermal-magnetic protection may trip on peaks
pub const RISK_HIGH_CREST_FACTOR: f64 = 2.5;

pub const RISK_MEDIUM_THDI: f64 = 5.0;
pub const RISK_MEDIUM_K_FACTOR: f64 = 4.0;
pub const RISK_MEDIUM_CREST_FACTOR: f64 = 1.8;

// ===== GUIDANCE THRESHOLDS =====

/// Below this true power factor correction is worth recommending
pub const LOW_TRUE_POWER_FACTOR: f64 = 0.9;

/// BS 7671 Appendix 4: third harmonic content above 33 % means the neutral
/// must be sized on neutral current
pub const NEUTRAL_SIZING_THIRD_HARMONIC_PERCENT: f64 = 33.0;

/// BS 7671 Appendix 4: 15-33 % third harmonic attracts the 0.86 rating factor
pub const NEUTRAL_REDUCTION_THIRD_HARMONIC_PERCENT: f64 = 15.0;

/// Individual current limits for orders 3..=13, % of fundamental
const ODD_HARMONIC_LIMITS: [(u32, f64); 6] = [
    (3, 21.6),
    (5, 10.7),
    (7, 7.2),
    (9, 3.8),
    (11, 3.1),
    (13, 2.0),
];

/// Individual current limit for a harmonic order, as a percentage of the fundamental.
///
/// Orders without a tabulated value use 16/h %.
pub fn g5_individual_limit(order: u32) -> f64 {
    ODD_HARMONIC_LIMITS
        .iter()
        .find(|(h, _)| *h == order)
        .map(|(_, limit)| *limit)
        .unwrap_or_else(|| 16.0 / order as f64)
}

/// Classify a harmonic percentage against its limit
pub fn classify_harmonic(percentage: f64, limit: f64) -> HarmonicStatus {
    if percentage <= limit * HARMONIC_WARNING_RATIO {
        HarmonicStatus::Pass
    } else if percentage <= limit {
        HarmonicStatus::Warning
    } else {
        HarmonicStatus::Fail
    }
}

pub fn rating_for_thd(thdi_percent: f64) -> PowerQualityRating {
    if thdi_percent <= RATING_EXCELLENT_MAX_THDI {
        PowerQualityRating::Excellent
    } else if thdi_percent <= RATING_GOOD_MAX_THDI {
        PowerQualityRating::Good
    } else if thdi_percent <= RATING_FAIR_MAX_THDI {
        PowerQualityRating::Fair
    } else {
        PowerQualityRating::Poor
    }
}

/// Highest risk triggered by any of THDi, K-factor or crest factor
pub fn risk_level(thdi_percent: f64, k_factor: f64, crest_factor: f64) -> RiskLevel {
    if thdi_percent > RISK_HIGH_THDI
        || k_factor > RISK_HIGH_K_FACTOR
        || crest_factor > RISK_HIGH_CREST_FACTOR
    {
        RiskLevel::High
    } else if thdi_percent > RISK_MEDIUM_THDI
        || k_factor > RISK_MEDIUM_K_FACTOR
        || crest_factor > RISK_MEDIUM_CREST_FACTOR
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn ieee_compliant(thdi_percent: f64) -> bool {
    thdi_percent <= IEEE_519_THDI_LIMIT
}

pub fn bs7671_compliant(thdi_percent: f64) -> bool {
    thdi_percent <= BS7671_THDI_LIMIT
}

/// All pass: compliant. Exactly one failure: borderline. Otherwise non-compliant.
pub fn compliance_status(flags: &[bool]) -> ComplianceStatus {
    match flags.iter().filter(|passed| !**passed).count() {
        0 => ComplianceStatus::Compliant,
        1 => ComplianceStatus::Borderline,
        _ => ComplianceStatus::NonCompliant,
    }
}
