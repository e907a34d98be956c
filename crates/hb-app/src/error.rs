//! Error types for the hb-app service layer.

use hb_core::{Diagnostics, HbError};
use hb_envelope::EnvelopeError;
use hb_equipment::EquipError;
use hb_input::{InputError, ValidationError};
use hb_optics::OpticsError;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Document validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("Optics error: {0}")]
    Optics(#[from] OpticsError),

    #[error("Equipment error: {0}")]
    Equipment(#[from] EquipError),

    /// Start-up collected Severe diagnostics; all of them are kept.
    #[error("Start-up failed: {} severe error(s) found", .diagnostics.error_count())]
    Startup { diagnostics: Diagnostics },

    #[error("{what} not found: {name}")]
    NotFound { what: &'static str, name: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for hb-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub(crate) fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        AppError::NotFound {
            what,
            name: name.into(),
        }
    }
}

impl From<AppError> for HbError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Startup { diagnostics } => HbError::ErrorsFound {
                count: diagnostics.error_count(),
            },
            AppError::Envelope(e) => e.into(),
            AppError::Optics(e) => e.into(),
            AppError::Equipment(e) => e.into(),
            other => HbError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_error_counts_severe_only() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warning("Start-up", "thin layer");
        diagnostics.severe("Start-up", "bad layer");
        diagnostics.severe("Start-up", "bad gas");
        let err = AppError::Startup { diagnostics };
        assert_eq!(err.to_string(), "Start-up failed: 2 severe error(s) found");
        assert!(matches!(
            HbError::from(err),
            HbError::ErrorsFound { count: 2 }
        ));
    }

    #[test]
    fn not_found_message() {
        let err = AppError::not_found("Surface", "North Window");
        assert_eq!(err.to_string(), "Surface not found: North Window");
    }
}
