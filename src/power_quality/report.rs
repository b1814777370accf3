//! Plain-text summary of a calculation, as copied to the clipboard.

use std::fmt;

use itertools::Itertools;

use super::types::{PowerQualityInput, PowerQualityResult, SystemType};

fn pass_fail(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

/// Input and result paired for display
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    pub input: &'a PowerQualityInput,
    pub result: &'a PowerQualityResult,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Summary { input, result } = *self;

        writeln!(f, "Power Quality Analysis")?;
        writeln!(f, "======================")?;
        writeln!(f, "System: {}, {} load", input.system_type, input.load_type)?;
        writeln!(
            f,
            "Fundamental: {:.2} A @ {:.1} V, {:.1} Hz",
            input.fundamental_current, input.fundamental_voltage, input.frequency
        )?;
        writeln!(f)?;

        writeln!(f, "THDi: {:.2} %", result.thdi_current)?;
        writeln!(f, "True RMS current: {:.2} A", result.rms_current_total)?;
        writeln!(f, "Crest factor: {:.2}", result.crest_factor_current)?;
        writeln!(f, "K-factor: {:.2}", result.k_factor)?;
        writeln!(f, "Transformer derating: {:.2} %", result.transformer_derating)?;
        writeln!(f, "True power factor: {:.3}", result.true_power_factor)?;
        if input.system_type == SystemType::ThreePhase {
            writeln!(f, "Neutral current: {:.2} A", result.neutral_current)?;
        }
        writeln!(f)?;

        writeln!(f, "Rating: {}", result.power_quality_rating)?;
        writeln!(f, "Risk level: {}", result.risk_level)?;
        writeln!(f, "Compliance: {}", result.compliance_status)?;
        writeln!(
            f,
            "{}",
            [
                ("BS 7671", result.bs7671_compliance),
                ("IEEE 519", result.ieee_compliance),
                ("G5/5", result.g_code5_compliance),
            ]
            .iter()
            .map(|(name, passed)| format!("{name}: {}", pass_fail(*passed)))
            .join(" | ")
        )?;

        if !result.harmonic_spectrum.is_empty() {
            writeln!(f)?;
            writeln!(f, "Harmonic spectrum:")?;
            for entry in &result.harmonic_spectrum {
                writeln!(
                    f,
                    "  H{:<3} {:>7.2} %  (limit {:.2} %)  {}{}",
                    entry.order,
                    entry.current_percentage,
                    entry.limit,
                    entry.status.to_string().to_uppercase(),
                    if entry.triplen { "  triplen" } else { "" }
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Guidance:")?;
        for line in &result.practical_guidance {
            writeln!(f, "  - {line}")?;
        }
        Ok(())
    }
}

/// Render a human-readable summary of one analysis
pub fn text_summary(input: &PowerQualityInput, result: &PowerQualityResult) -> String {
    Summary { input, result }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power_quality::engine::calculate;
    use crate::power_quality::types::LoadType;

    #[test]
    fn test_summary_contains_headline_figures() {
        let input = PowerQualityInput::new(10.0, SystemType::SinglePhase)
            .with_harmonic(3, 3.0)
            .with_harmonic(5, 2.0);
        let result = calculate(&input).unwrap();
        let text = text_summary(&input, &result);

        assert!(text.contains("System: single-phase, non-linear load"));
        assert!(text.contains("THDi: 36.06 %"));
        assert!(text.contains("True RMS current: 10.63 A"));
        assert!(text.contains("K-factor: 2.81"));
        assert!(text.contains("Compliance: non-compliant"));
        assert!(text.contains("BS 7671: FAIL | IEEE 519: FAIL | G5/5: FAIL"));
        assert!(text.contains("H3"));
        assert!(text.contains("triplen"));
        assert!(!text.contains("Neutral current"));
    }

    #[test]
    fn test_summary_reports_neutral_for_three_phase() {
        let input = PowerQualityInput::new(10.0, SystemType::ThreePhase)
            .with_load_type(LoadType::Mixed)
            .with_harmonic(3, 1.0);
        let result = calculate(&input).unwrap();
        let text = Summary { input: &input, result: &result }.to_string();

        assert!(text.starts_with("Power Quality Analysis\n"));
        assert!(text.contains("System: three-phase, mixed load"));
        assert!(text.contains("Neutral current: 1.73 A"));
        assert!(text.contains("Guidance:"));
    }
}
