//! hb-core: stable foundation for heatbal.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + float helpers)
//! - ids (stable compact handles for registry entries)
//! - error (shared error types)
//! - diagnostics (warning/severe/fatal messages collected during start-up)

pub mod diagnostics;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use diagnostics::{Diagnostic, Diagnostics, Severity, Subject};
pub use error::{HbError, HbResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
