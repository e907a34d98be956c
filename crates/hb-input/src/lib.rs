//! hb-input: input document format, heat-balance settings and validation.
//!
//! A document is read from YAML or JSON (chosen by file extension),
//! validated, and handed to start-up. Components that read their own
//! objects see it through [`InputReader`].

pub mod reader;
pub mod schema;
pub mod settings;
pub mod validate;

use std::path::Path;

pub use reader::{AUTOSIZE, BASEBOARD_OBJECT, InputObject, InputReader, ObjectTable};
pub use schema::*;
pub use settings::{
    ConvectionAlgorithm, ConvectionSide, HeatBalanceSettings, HeatTransferAlgorithm,
    SolarDistribution, ZoneAirSolutionAlgorithm,
};
pub use validate::{ValidationError, validate_document};

pub type InputResult<T> = Result<T, InputError>;

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported input format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<InputError> for hb_core::HbError {
    fn from(e: InputError) -> Self {
        hb_core::HbError::Invariant {
            what: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> InputResult<Format> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("yaml" | "yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(InputError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Load and validate a document, picking the parser by extension.
pub fn load_document(path: &Path) -> InputResult<InputDocument> {
    match format_of(path)? {
        Format::Yaml => load_yaml(path),
        Format::Json => load_json(path),
    }
}

/// Validate and write a document, picking the format by extension.
pub fn save_document(path: &Path, doc: &InputDocument) -> InputResult<()> {
    match format_of(path)? {
        Format::Yaml => save_yaml(path, doc),
        Format::Json => save_json(path, doc),
    }
}

pub fn load_yaml(path: &Path) -> InputResult<InputDocument> {
    let content = std::fs::read_to_string(path)?;
    let doc: InputDocument = serde_yaml::from_str(&content)?;
    validate_document(&doc)?;
    tracing::debug!(path = %path.display(), name = %doc.name, "loaded input document");
    Ok(doc)
}

pub fn save_yaml(path: &Path, doc: &InputDocument) -> InputResult<()> {
    validate_document(doc)?;
    let content = serde_yaml::to_string(doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> InputResult<InputDocument> {
    let content = std::fs::read_to_string(path)?;
    let doc: InputDocument = serde_json::from_str(&content)?;
    validate_document(&doc)?;
    tracing::debug!(path = %path.display(), name = %doc.name, "loaded input document");
    Ok(doc)
}

pub fn save_json(path: &Path, doc: &InputDocument) -> InputResult<()> {
    validate_document(doc)?;
    let content = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(format_of(Path::new("a.yaml")).unwrap(), Format::Yaml);
        assert_eq!(format_of(Path::new("a.YML")).unwrap(), Format::Yaml);
        assert_eq!(format_of(Path::new("a.json")).unwrap(), Format::Json);
        assert!(matches!(
            format_of(Path::new("a.idf")),
            Err(InputError::UnsupportedFormat { .. })
        ));
    }
}
