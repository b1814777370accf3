//! Power Quality / Harmonic Analysis
//!
//! Evaluates fundamental and harmonic current readings into THD, RMS,
//! crest factor, K-factor, transformer derating, neutral current and
//! compliance against BS 7671, IEEE 519 and G5/5.

pub mod engine;
pub mod error;
pub mod form;
pub mod guidance;
pub mod limits;
pub mod presets;
pub mod report;
pub mod types;

pub use engine::{calculate, HarmonicAnalysisEngine};
pub use error::AnalysisError;
pub use form::{FormDefaults, HarmonicField, PowerQualityForm};
pub use presets::{find_preset, HarmonicPreset, HARMONIC_PRESETS};
pub use report::{text_summary, Summary};
pub use types::*;
