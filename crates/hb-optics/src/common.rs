//! Common utilities for optics calculations.

use crate::error::{OpticsError, OpticsResult};
use hb_core::numeric::ensure_finite;

/// Used to approximate zero in angle comparisons.
pub const SMALL: f64 = 1e-9;

/// Ensure a value is finite, returning OpticsError if not.
pub fn check_finite(value: f64, what: &'static str) -> OpticsResult<f64> {
    ensure_finite(value, what).map_err(|_| OpticsError::NonFinite { what, value })
}

/// `acos` with the argument clamped into its domain.
pub fn acos_clamped(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}
