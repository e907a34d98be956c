//! Common utilities for zone equipment calculations.

use crate::error::{EquipError, EquipResult};
use hb_core::numeric::ensure_finite;

/// Loads below this are treated as no load (W).
pub const SMALL_LOAD: f64 = 1.0;

/// Relative gap between design and hard-sized values that earns a warning.
pub const AUTO_VS_HARD_SIZING_THRESHOLD: f64 = 0.1;

/// Ensure a value is finite, returning EquipError if not.
pub fn check_finite(value: f64, what: &'static str) -> EquipResult<f64> {
    ensure_finite(value, what).map_err(|_| EquipError::NonPhysical { what, value })
}

/// Format with `digits` decimals, as sizing messages print capacities.
pub fn round_sig(value: f64, digits: usize) -> String {
    format!("{value:.digits$}")
}
