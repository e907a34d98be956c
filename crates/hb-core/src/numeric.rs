use crate::HbError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HbError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HbError::NonFinite { what, value: v })
    }
}

/// Sum a set of values in ascending magnitude order.
///
/// The result depends only on the multiset of values, never on their order.
pub fn sum_order_independent(values: impl IntoIterator<Item = Real>) -> Real {
    let mut values: Vec<Real> = values.into_iter().collect();
    values.sort_by(|a, b| a.abs().total_cmp(&b.abs()).then(a.total_cmp(b)));
    values.into_iter().sum()
}

pub const PI_OVER_2: Real = core::f64::consts::FRAC_PI_2;
pub const DEG_TO_RAD: Real = core::f64::consts::PI / 180.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ordered_sum_ignores_input_order() {
        let forward = sum_order_independent([0.11, 1.25, 0.08, 0.3]);
        let backward = sum_order_independent([0.3, 0.08, 1.25, 0.11]);
        assert_eq!(forward.to_bits(), backward.to_bits());
    }
}
