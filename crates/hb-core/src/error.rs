use thiserror::Error;

pub type HbResult<T> = Result<T, HbError>;

#[derive(Error, Debug)]
pub enum HbError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },

    #[error("{count} severe error(s) found")]
    ErrorsFound { count: usize },
}
