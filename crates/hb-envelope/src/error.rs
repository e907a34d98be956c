//! Envelope-specific error types.

use hb_core::{HbError, Id};
use thiserror::Error;

pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// Errors raised while building or querying the envelope model.
///
/// Rule violations inside a well-formed model are not errors; they are
/// reported as diagnostics by the validator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    #[error("{what} {id} does not exist")]
    UnknownId { what: &'static str, id: Id },

    #[error("{what} name \"{name}\" is already in use")]
    DuplicateName { what: &'static str, name: String },

    #[error("Construction \"{name}\" has {count} layers (max {max})")]
    TooManyLayers {
        name: String,
        count: usize,
        max: usize,
    },

    #[error("Invalid value for {what}: {value}")]
    InvalidValue { what: &'static str, value: f64 },

    #[error("Material \"{name}\" is not a {expected} material")]
    WrongMaterialKind {
        name: String,
        expected: &'static str,
    },

    #[error("Gas mixture has {count} components (max {max})")]
    TooManyGases { count: usize, max: usize },
}

impl From<EnvelopeError> for HbError {
    fn from(err: EnvelopeError) -> Self {
        HbError::Invariant {
            what: err.to_string(),
        }
    }
}
