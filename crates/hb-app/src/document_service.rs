//! Document loading, saving, validation, and introspection.

use std::path::Path;

use hb_input::{InputDocument, validate_document};

use crate::error::AppResult;

/// Object counts of a document, for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub name: String,
    pub version: u32,
    pub materials: usize,
    pub blinds: usize,
    pub constructions: usize,
    pub zones: usize,
    pub surfaces: usize,
    pub gains: usize,
    pub baseboards: usize,
}

/// Load a YAML or JSON document; the loader validates it.
pub fn load_document(path: &Path) -> AppResult<InputDocument> {
    Ok(hb_input::load_document(path)?)
}

/// Save a document in the format named by the extension.
pub fn save_document(path: &Path, doc: &InputDocument) -> AppResult<()> {
    Ok(hb_input::save_document(path, doc)?)
}

/// Check names, references and value ranges of a document.
pub fn validate(doc: &InputDocument) -> AppResult<()> {
    validate_document(doc)?;
    Ok(())
}

pub fn summarize(doc: &InputDocument) -> DocumentSummary {
    DocumentSummary {
        name: doc.name.clone(),
        version: doc.version,
        materials: doc.materials.len(),
        blinds: doc.blinds.len(),
        constructions: doc.constructions.len(),
        zones: doc.zones.len(),
        surfaces: doc.surfaces.len(),
        gains: doc.gains.len(),
        baseboards: doc.baseboards.len(),
    }
}
