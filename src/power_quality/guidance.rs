//! Practical guidance rule table.
//!
//! Rules are evaluated in order against the computed figures; every rule
//! whose predicate holds contributes its message.

use super::limits::{
    LOW_TRUE_POWER_FACTOR, NEUTRAL_REDUCTION_THIRD_HARMONIC_PERCENT,
    NEUTRAL_SIZING_THIRD_HARMONIC_PERCENT, RISK_HIGH_CREST_FACTOR, RISK_HIGH_K_FACTOR,
    RISK_MEDIUM_K_FACTOR, BS7671_THDI_LIMIT, IEEE_519_THDI_LIMIT,
};
use super::types::SystemType;

/// Emitted when no rule fires
pub const NO_ACTION_GUIDANCE: &str =
    "Harmonic levels are within typical limits; no remedial action required.";

/// Computed values the guidance rules look at
#[derive(Debug, Clone, Copy)]
pub struct GuidanceFigures {
    pub system_type: SystemType,
    pub fundamental_current: f64,
    pub thdi_current: f64,
    pub k_factor: f64,
    pub crest_factor: f64,
    pub true_power_factor: f64,
    pub neutral_current: f64,
    /// Third harmonic as a percentage of the fundamental
    pub third_harmonic_percent: f64,
    /// Any individual harmonic above its limit
    pub harmonic_limit_exceeded: bool,
}

impl GuidanceFigures {
    fn three_phase(&self) -> bool {
        self.system_type == SystemType::ThreePhase
    }
}

pub struct GuidanceRule {
    pub applies: fn(&GuidanceFigures) -> bool,
    pub message: &'static str,
}

pub static GUIDANCE_RULES: &[GuidanceRule] = &[
    GuidanceRule {
        applies: |f| f.k_factor > RISK_HIGH_K_FACTOR,
        message: "K-factor above 9: expect elevated transformer temperature. Specify a K-13 or higher rated transformer or derate the existing unit.",
    },
    GuidanceRule {
        applies: |f| f.k_factor > RISK_MEDIUM_K_FACTOR && f.k_factor <= RISK_HIGH_K_FACTOR,
        message: "K-factor above 4: a K-rated transformer (K-4 to K-9) is recommended for this load.",
    },
    GuidanceRule {
        applies: |f| f.crest_factor > RISK_HIGH_CREST_FACTOR,
        message: "Crest factor above 2.5: RMS-sensing protection recommended; peak-sensing devices may nuisance trip or under-read.",
    },
    GuidanceRule {
        applies: |f| f.thdi_current > BS7671_THDI_LIMIT,
        message: "THDi above 8%: detuned capacitors required for any power factor correction to avoid resonance.",
    },
    GuidanceRule {
        applies: |f| f.thdi_current > IEEE_519_THDI_LIMIT,
        message: "THDi exceeds the IEEE 519 5% limit: consider passive or active harmonic filtering at the source.",
    },
    GuidanceRule {
        applies: |f| {
            f.three_phase() && f.third_harmonic_percent > NEUTRAL_SIZING_THIRD_HARMONIC_PERCENT
        },
        message: "Third harmonic above 33%: size the neutral on neutral current (BS 7671 Appendix 4) and consider an oversized neutral.",
    },
    GuidanceRule {
        applies: |f| {
            f.three_phase()
                && f.third_harmonic_percent > NEUTRAL_REDUCTION_THIRD_HARMONIC_PERCENT
                && f.third_harmonic_percent <= NEUTRAL_SIZING_THIRD_HARMONIC_PERCENT
        },
        message: "Third harmonic between 15% and 33%: apply the 0.86 rating factor to four- and five-core cables (BS 7671 Appendix 4).",
    },
    GuidanceRule {
        applies: |f| f.three_phase() && f.neutral_current > f.fundamental_current,
        message: "Neutral current exceeds phase current: inspect the neutral conductor and terminations for overheating.",
    },
    GuidanceRule {
        applies: |f| f.true_power_factor < LOW_TRUE_POWER_FACTOR,
        message: "True power factor below 0.9: distortion is adding to the apparent power; correct at the harmonic source rather than with plain capacitors.",
    },
    GuidanceRule {
        applies: |f| f.harmonic_limit_exceeded,
        message: "One or more individual harmonics exceed G5/5 limits: assess with the DNO before connecting further non-linear load.",
    },
];

/// Evaluate the rule table in order
pub fn practical_guidance(figures: &GuidanceFigures) -> Vec<String> {
    let guidance: Vec<String> = GUIDANCE_RULES
        .iter()
        .filter(|rule| (rule.applies)(figures))
        .map(|rule| rule.message.to_string())
        .collect();

    if guidance.is_empty() {
        vec![NO_ACTION_GUIDANCE.to_string()]
    } else {
        guidance
    }
}
