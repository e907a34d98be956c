//! Error types for screen optics.

use hb_core::HbError;
use hb_envelope::EnvelopeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpticsError {
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error("Surface \"{surface}\" has no screen")]
    NoScreen { surface: String },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type OpticsResult<T> = Result<T, OpticsError>;

impl From<OpticsError> for HbError {
    fn from(e: OpticsError) -> Self {
        match e {
            OpticsError::Envelope(e) => e.into(),
            OpticsError::NonFinite { what, value } => HbError::NonFinite { what, value },
            other => HbError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
