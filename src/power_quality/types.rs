use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::limits::{
    DEFAULT_DISPLACEMENT_PF, DEFAULT_FREQUENCY_HZ, DEFAULT_VOLTAGE_V,
};

// ============================================================================
// Input model
// ============================================================================

/// A single harmonic current reading
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicComponent {
    /// Harmonic order (2 = second harmonic, 3 = third, ...)
    pub order: u32,
    /// RMS magnitude in amperes
    pub current: f64,
}

impl HarmonicComponent {
    pub fn new(order: u32, current: f64) -> Self {
        Self { order, current }
    }

    /// Odd multiples of three add arithmetically in a three-phase neutral.
    pub fn is_triplen(&self) -> bool {
        is_triplen(self.order)
    }
}

/// True for orders 3, 9, 15, 21, ...
pub fn is_triplen(order: u32) -> bool {
    order % 6 == 3
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SystemType {
    SinglePhase,
    ThreePhase,
}

/// Informational only; the formulas do not depend on it.
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LoadType {
    Linear,
    NonLinear,
    Mixed,
}

impl Default for LoadType {
    fn default() -> Self {
        LoadType::NonLinear
    }
}

/// Readings for one power quality calculation
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerQualityInput {
    /// Fundamental (50/60 Hz) current in amperes
    pub fundamental_current: f64,

    /// Fundamental voltage in volts
    #[serde(default = "default_voltage")]
    pub fundamental_voltage: f64,

    /// Supply frequency in Hz
    #[serde(default = "default_frequency")]
    pub frequency: f64,

    /// Measured harmonic currents
    #[serde(default)]
    pub harmonics: Vec<HarmonicComponent>,

    pub system_type: SystemType,

    #[serde(default)]
    pub load_type: LoadType,

    /// Fundamental (cosine) power factor; values outside (0, 1] fall back to 0.95
    #[serde(rename = "displacementPF", default = "default_displacement_pf")]
    pub displacement_pf: f64,
}

fn default_voltage() -> f64 {
    DEFAULT_VOLTAGE_V
}

fn default_frequency() -> f64 {
    DEFAULT_FREQUENCY_HZ
}

fn default_displacement_pf() -> f64 {
    DEFAULT_DISPLACEMENT_PF
}

impl PowerQualityInput {
    /// Create an undistorted reading at 230 V / 50 Hz with the default power factor
    pub fn new(fundamental_current: f64, system_type: SystemType) -> Self {
        Self {
            fundamental_current,
            fundamental_voltage: DEFAULT_VOLTAGE_V,
            frequency: DEFAULT_FREQUENCY_HZ,
            harmonics: Vec::new(),
            system_type,
            load_type: LoadType::default(),
            displacement_pf: DEFAULT_DISPLACEMENT_PF,
        }
    }

    pub fn with_harmonic(mut self, order: u32, current: f64) -> Self {
        self.harmonics.push(HarmonicComponent::new(order, current));
        self
    }

    pub fn with_harmonics(mut self, harmonics: impl IntoIterator<Item = HarmonicComponent>) -> Self {
        self.harmonics.extend(harmonics);
        self
    }

    pub fn with_voltage(mut self, voltage_v: f64) -> Self {
        self.fundamental_voltage = voltage_v;
        self
    }

    pub fn with_frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency = frequency_hz;
        self
    }

    pub fn with_load_type(mut self, load_type: LoadType) -> Self {
        self.load_type = load_type;
        self
    }

    pub fn with_displacement_pf(mut self, pf: f64) -> Self {
        self.displacement_pf = pf;
        self
    }
}

// ============================================================================
// Result model
// ============================================================================

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PowerQualityRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    Borderline,
    NonCompliant,
}

/// Per-harmonic classification against its individual limit
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HarmonicStatus {
    Pass,
    Warning,
    Fail,
}

/// One line of the harmonic spectrum breakdown
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonicSpectrumEntry {
    pub order: u32,
    /// Harmonic frequency in Hz
    pub frequency: f64,
    /// Harmonic current in amperes
    pub current: f64,
    /// Current as a percentage of the fundamental
    pub current_percentage: f64,
    /// Individual limit as a percentage of the fundamental
    pub limit: f64,
    pub triplen: bool,
    pub status: HarmonicStatus,
}

/// Outcome of one power quality calculation
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerQualityResult {
    /// Current total harmonic distortion (%)
    pub thdi_current: f64,
    /// True RMS current (A)
    pub rms_current_total: f64,
    pub crest_factor_current: f64,
    pub k_factor: f64,
    /// Usable transformer capacity (%)
    pub transformer_derating: f64,
    pub true_power_factor: f64,
    /// Neutral current (A); zero on single-phase systems
    pub neutral_current: f64,

    pub power_quality_rating: PowerQualityRating,
    pub risk_level: RiskLevel,
    pub compliance_status: ComplianceStatus,

    pub bs7671_compliance: bool,
    pub ieee_compliance: bool,
    pub g_code5_compliance: bool,

    pub harmonic_spectrum: Vec<HarmonicSpectrumEntry>,
    pub practical_guidance: Vec<String>,
}
