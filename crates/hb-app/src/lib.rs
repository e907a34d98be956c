//! Shared application service layer for heatbal.
//!
//! This crate gives the CLI one interface to the backend crates: document
//! loading and validation, the ordered start-up that builds the envelope
//! model, construction and surface reports, screen optics for named windows,
//! and single-timestep baseboard runs.

pub mod baseboard_service;
pub mod document_service;
pub mod error;
pub mod report;
pub mod screen_service;
pub mod startup;

// Re-export key types for convenience
pub use baseboard_service::{BaseboardService, BaseboardStep};
pub use document_service::{DocumentSummary, load_document, save_document, summarize, validate};
pub use error::{AppError, AppResult};
pub use report::{
    ConstructionReport, SurfaceReport, construction_report, construction_report_by_name,
    construction_reports, surface_reports,
};
pub use screen_service::{SunPosition, evaluate_screen};
pub use startup::{
    HIGH_DIFFUSIVITY_THRESHOLD, Startup, THIN_MATERIAL_LAYER_THRESHOLD, build_model, sanity_check,
};
