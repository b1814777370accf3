use thiserror::Error;

/// Reasons an analysis request is rejected before any calculation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown harmonic preset: {0}")]
    UnknownPreset(String),
}

impl AnalysisError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field, if the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::UnknownPreset(_) => None,
        }
    }
}
