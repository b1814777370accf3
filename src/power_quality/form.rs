//! Conversion of user-entered form fields into a calculation input.
//!
//! Fields arrive as the raw decimal strings typed into the calculator.
//! Blank voltage, frequency and power factor fall back to configured
//! defaults; a blank fundamental current is an error.

use serde::Deserialize;
use tracing::debug;

use super::error::AnalysisError;
use super::limits::{DEFAULT_DISPLACEMENT_PF, DEFAULT_FREQUENCY_HZ, DEFAULT_VOLTAGE_V};
use super::presets::find_preset;
use super::types::{HarmonicComponent, LoadType, PowerQualityInput, SystemType};

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonicField {
    pub order: u32,
    #[serde(default)]
    pub current: String,
}

/// Calculator form as submitted
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerQualityForm {
    #[serde(default)]
    pub fundamental_current: String,
    #[serde(default)]
    pub fundamental_voltage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(rename = "displacementPF", default)]
    pub displacement_pf: String,
    pub system_type: SystemType,
    #[serde(default)]
    pub load_type: LoadType,
    #[serde(default)]
    pub harmonics: Vec<HarmonicField>,
    /// Preset key used when no harmonic field is filled in
    #[serde(default)]
    pub preset: Option<String>,
}

/// Values substituted for blank form fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormDefaults {
    pub voltage_v: f64,
    pub frequency_hz: f64,
    pub displacement_pf: f64,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            voltage_v: DEFAULT_VOLTAGE_V,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            displacement_pf: DEFAULT_DISPLACEMENT_PF,
        }
    }
}

/// Blank is `None`; anything else must parse as a decimal.
fn parse_decimal(field: &str, raw: &str) -> Result<Option<f64>, AnalysisError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| AnalysisError::validation(field, format!("'{trimmed}' is not a number")))
}

impl PowerQualityForm {
    pub fn into_input(self, defaults: &FormDefaults) -> Result<PowerQualityInput, AnalysisError> {
        let fundamental_current = parse_decimal("fundamentalCurrent", &self.fundamental_current)?
            .ok_or_else(|| AnalysisError::validation("fundamentalCurrent", "is required"))?;
        let fundamental_voltage =
            parse_decimal("fundamentalVoltage", &self.fundamental_voltage)?.unwrap_or(defaults.voltage_v);
        let frequency = parse_decimal("frequency", &self.frequency)?.unwrap_or(defaults.frequency_hz);

        // Power factor never blocks a calculation
        let displacement_pf = self
            .displacement_pf
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|pf| *pf > 0.0 && *pf <= 1.0)
            .unwrap_or(defaults.displacement_pf);

        let mut harmonics = Vec::with_capacity(self.harmonics.len());
        for field in &self.harmonics {
            let name = format!("harmonics[{}]", field.order);
            if let Some(current) = parse_decimal(&name, &field.current)? {
                harmonics.push(HarmonicComponent::new(field.order, current));
            }
        }

        if let Some(key) = self.preset.as_deref().filter(|k| !k.trim().is_empty()) {
            let preset = find_preset(key)?;
            if harmonics.is_empty() {
                debug!(preset = preset.key, "populating harmonics from preset");
                harmonics = preset.harmonics_for(fundamental_current);
            }
        }

        Ok(PowerQualityInput {
            fundamental_current,
            fundamental_voltage,
            frequency,
            harmonics,
            system_type: self.system_type,
            load_type: self.load_type,
            displacement_pf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(current: &str) -> PowerQualityForm {
        PowerQualityForm {
            fundamental_current: current.to_string(),
            fundamental_voltage: String::new(),
            frequency: String::new(),
            displacement_pf: String::new(),
            system_type: SystemType::SinglePhase,
            load_type: LoadType::NonLinear,
            harmonics: Vec::new(),
            preset: None,
        }
    }

    fn field(order: u32, current: &str) -> HarmonicField {
        HarmonicField {
            order,
            current: current.to_string(),
        }
    }

    #[test]
    fn test_blank_fields_take_defaults() {
        let input = form(" 12.5 ").into_input(&FormDefaults::default()).unwrap();
        assert_eq!(input.fundamental_current, 12.5);
        assert_eq!(input.fundamental_voltage, 230.0);
        assert_eq!(input.frequency, 50.0);
        assert_eq!(input.displacement_pf, 0.95);
    }

    #[test]
    fn test_missing_fundamental_current_is_rejected() {
        let err = form("").into_input(&FormDefaults::default()).unwrap_err();
        assert_eq!(err.field(), Some("fundamentalCurrent"));

        let err = form("ten").into_input(&FormDefaults::default()).unwrap_err();
        assert!(err.to_string().contains("'ten' is not a number"));
    }

    #[test]
    fn test_bad_power_factor_falls_back() {
        let defaults = FormDefaults {
            displacement_pf: 0.9,
            ..FormDefaults::default()
        };
        for raw in ["abc", "1.4", "0", "-0.5"] {
            let mut f = form("10");
            f.displacement_pf = raw.to_string();
            assert_eq!(f.into_input(&defaults).unwrap().displacement_pf, 0.9);
        }

        let mut f = form("10");
        f.displacement_pf = "0.8".to_string();
        assert_eq!(f.into_input(&defaults).unwrap().displacement_pf, 0.8);
    }

    #[test]
    fn test_blank_harmonic_fields_are_skipped() {
        let mut f = form("10");
        f.harmonics = vec![field(3, "2.0"), field(5, ""), field(7, " 0.5")];
        let input = f.into_input(&FormDefaults::default()).unwrap();
        assert_eq!(
            input.harmonics,
            vec![HarmonicComponent::new(3, 2.0), HarmonicComponent::new(7, 0.5)]
        );

        let mut f = form("10");
        f.harmonics = vec![field(9, "x")];
        let err = f.into_input(&FormDefaults::default()).unwrap_err();
        assert_eq!(err.field(), Some("harmonics[9]"));
    }

    #[test]
    fn test_preset_fills_empty_harmonics_only() {
        let mut f = form("20");
        f.preset = Some("ev-charger".to_string());
        let input = f.clone().into_input(&FormDefaults::default()).unwrap();
        assert_eq!(input.harmonics.len(), 3);
        assert_eq!(input.harmonics[0], HarmonicComponent::new(3, 1.0));

        f.harmonics = vec![field(5, "4")];
        let input = f.into_input(&FormDefaults::default()).unwrap();
        assert_eq!(input.harmonics, vec![HarmonicComponent::new(5, 4.0)]);
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let mut f = form("20");
        f.preset = Some("arc-furnace".to_string());
        assert!(matches!(
            f.into_input(&FormDefaults::default()),
            Err(AnalysisError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_form_deserializes_from_json() {
        let json = r#"{
            "fundamentalCurrent": "16",
            "systemType": "three-phase",
            "displacementPF": "0.92",
            "harmonics": [{ "order": 3, "current": "3.2" }]
        }"#;
        let f: PowerQualityForm = serde_json::from_str(json).unwrap();
        let input = f.into_input(&FormDefaults::default()).unwrap();
        assert_eq!(input.system_type, SystemType::ThreePhase);
        assert_eq!(input.displacement_pf, 0.92);
        assert_eq!(input.harmonics, vec![HarmonicComponent::new(3, 3.2)]);
    }
}
