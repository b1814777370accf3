//! # Harmonic Analysis Engine
//!
//! Closed-form evaluation of harmonic current readings. Every harmonic is
//! first expressed as a ratio to the fundamental, rh = Ih / I1:
//!
//! - THDi = 100 x sqrt(sum rh^2)
//! - Irms = I1 x sqrt(1 + sum rh^2)
//! - K = 1 + sum h^2 rh^2
//! - Derating = 100 / sqrt(1 + (K - 1) x 0.05)   (IEEE C57.110 simplified)
//! - IN = sqrt(3) x I1 x sqrt(sum r_triplen^2)   (three-phase only)
//! - PF_true = DPF / sqrt(1 + (THDi / 100)^2)
//!
//! ## Crest factor
//!
//! The peak is taken from the waveform reconstructed with every component
//! peaking at the same instant, the worst case for protective devices.
//! Each RMS component contributes sqrt(2) x I to that peak, so
//! CF = sqrt(2) x (1 + sum rh) / sqrt(1 + sum rh^2), which is sqrt(2) for a
//! pure sine.

use std::collections::HashSet;
use std::f64::consts::SQRT_2;

use tracing::debug;

use super::error::AnalysisError;
use super::guidance::{practical_guidance, GuidanceFigures};
use super::limits::{
    bs7671_compliant, classify_harmonic, compliance_status, g5_individual_limit, ieee_compliant,
    rating_for_thd, risk_level, DEFAULT_DISPLACEMENT_PF, EDDY_CURRENT_LOSS_FACTOR,
    MAX_HARMONIC_ORDER,
};
use super::types::{
    is_triplen, HarmonicComponent, HarmonicSpectrumEntry, HarmonicStatus, PowerQualityInput,
    PowerQualityResult, SystemType,
};

/// Stateless evaluator; the only setting is the power factor fallback.
#[derive(Debug, Clone, Copy)]
pub struct HarmonicAnalysisEngine {
    default_displacement_pf: f64,
}

impl Default for HarmonicAnalysisEngine {
    fn default() -> Self {
        Self {
            default_displacement_pf: DEFAULT_DISPLACEMENT_PF,
        }
    }
}

impl HarmonicAnalysisEngine {
    /// Engine with a custom power factor fallback; invalid values keep 0.95.
    pub fn new(default_displacement_pf: f64) -> Self {
        if is_valid_power_factor(default_displacement_pf) {
            Self {
                default_displacement_pf,
            }
        } else {
            Self::default()
        }
    }

    pub fn default_displacement_pf(&self) -> f64 {
        self.default_displacement_pf
    }

    /// Resolve the displacement power factor, substituting the default outside (0, 1]
    pub fn effective_displacement_pf(&self, pf: f64) -> f64 {
        if is_valid_power_factor(pf) {
            pf
        } else {
            self.default_displacement_pf
        }
    }

    /// Run the full analysis. Rejects malformed input; never has side effects.
    pub fn calculate(&self, input: &PowerQualityInput) -> Result<PowerQualityResult, AnalysisError> {
        validate(input)?;

        let i1 = input.fundamental_current;
        let mut harmonics: Vec<HarmonicComponent> = input
            .harmonics
            .iter()
            .copied()
            .filter(|h| h.current > 0.0)
            .collect();
        harmonics.sort_by_key(|h| h.order);

        // Ratios to the fundamental keep the squares in range at any scale
        let ratios: Vec<(u32, f64)> = harmonics.iter().map(|h| (h.order, h.current / i1)).collect();
        let distortion = ratios.iter().fold(0.0_f64, |acc, &(_, r)| acc.hypot(r));
        let ratio_sum: f64 = ratios.iter().map(|&(_, r)| r).sum();

        let thdi_current = 100.0 * distortion;
        let rms_ratio = 1.0_f64.hypot(distortion);
        let rms_current_total = i1 * rms_ratio;
        let crest_factor_current = SQRT_2 * (1.0 + ratio_sum) / rms_ratio;

        let k_factor = 1.0
            + ratios
                .iter()
                .map(|&(order, r)| {
                    let weighted = order as f64 * r;
                    weighted * weighted
                })
                .sum::<f64>();
        let transformer_derating = 100.0 / (1.0 + (k_factor - 1.0) * EDDY_CURRENT_LOSS_FACTOR).sqrt();

        let neutral_current = match input.system_type {
            SystemType::ThreePhase => {
                let triplen_distortion = ratios
                    .iter()
                    .filter(|&&(order, _)| is_triplen(order))
                    .fold(0.0_f64, |acc, &(_, r)| acc.hypot(r));
                3.0_f64.sqrt() * i1 * triplen_distortion
            }
            SystemType::SinglePhase => 0.0,
        };

        let displacement_pf = self.effective_displacement_pf(input.displacement_pf);
        let true_power_factor = displacement_pf / rms_ratio;

        let harmonic_spectrum: Vec<HarmonicSpectrumEntry> = harmonics
            .iter()
            .map(|h| spectrum_entry(h, i1, input.frequency))
            .collect();

        let g_code5_compliance = harmonic_spectrum
            .iter()
            .all(|entry| entry.status != HarmonicStatus::Fail);
        let ieee_compliance = ieee_compliant(thdi_current);
        let bs7671_compliance = bs7671_compliant(thdi_current);

        let third_harmonic_percent = harmonic_spectrum
            .iter()
            .find(|entry| entry.order == 3)
            .map(|entry| entry.current_percentage)
            .unwrap_or(0.0);

        let practical_guidance = practical_guidance(&GuidanceFigures {
            system_type: input.system_type,
            fundamental_current: i1,
            thdi_current,
            k_factor,
            crest_factor: crest_factor_current,
            true_power_factor,
            neutral_current,
            third_harmonic_percent,
            harmonic_limit_exceeded: !g_code5_compliance,
        });

        let result = PowerQualityResult {
            thdi_current,
            rms_current_total,
            crest_factor_current,
            k_factor,
            transformer_derating,
            true_power_factor,
            neutral_current,
            power_quality_rating: rating_for_thd(thdi_current),
            risk_level: risk_level(thdi_current, k_factor, crest_factor_current),
            compliance_status: compliance_status(&[
                bs7671_compliance,
                ieee_compliance,
                g_code5_compliance,
            ]),
            bs7671_compliance,
            ieee_compliance,
            g_code5_compliance,
            harmonic_spectrum,
            practical_guidance,
        };

        debug!(
            thdi = result.thdi_current,
            k_factor = result.k_factor,
            crest_factor = result.crest_factor_current,
            rating = %result.power_quality_rating,
            compliance = %result.compliance_status,
            "power quality analysis complete"
        );

        Ok(result)
    }
}

/// Analyse with the default engine
pub fn calculate(input: &PowerQualityInput) -> Result<PowerQualityResult, AnalysisError> {
    HarmonicAnalysisEngine::default().calculate(input)
}

fn is_valid_power_factor(pf: f64) -> bool {
    pf > 0.0 && pf <= 1.0
}

fn spectrum_entry(h: &HarmonicComponent, i1: f64, frequency: f64) -> HarmonicSpectrumEntry {
    let current_percentage = 100.0 * (h.current / i1);
    let limit = g5_individual_limit(h.order);
    HarmonicSpectrumEntry {
        order: h.order,
        frequency: h.order as f64 * frequency,
        current: h.current,
        current_percentage,
        limit,
        triplen: h.is_triplen(),
        status: classify_harmonic(current_percentage, limit),
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), AnalysisError> {
    if !value.is_finite() {
        return Err(AnalysisError::validation(field, format!("must be finite, got {value}")));
    }
    if value <= 0.0 {
        return Err(AnalysisError::validation(
            field,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(())
}

/// Reject input outside the engine's domain
pub fn validate(input: &PowerQualityInput) -> Result<(), AnalysisError> {
    require_positive("fundamentalCurrent", input.fundamental_current)?;
    require_positive("fundamentalVoltage", input.fundamental_voltage)?;
    require_positive("frequency", input.frequency)?;

    let mut seen = HashSet::with_capacity(input.harmonics.len());
    for h in &input.harmonics {
        let field = format!("harmonics[{}]", h.order);
        if h.order < 2 || h.order > MAX_HARMONIC_ORDER {
            return Err(AnalysisError::validation(
                field,
                format!("order must be between 2 and {MAX_HARMONIC_ORDER}"),
            ));
        }
        if !h.current.is_finite() || h.current < 0.0 {
            return Err(AnalysisError::validation(
                field,
                format!("current must be a finite non-negative value, got {}", h.current),
            ));
        }
        if !seen.insert(h.order) {
            return Err(AnalysisError::validation(field, "duplicate harmonic order"));
        }
    }

    Ok(())
}
