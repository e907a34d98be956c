//! Moist-air properties needed by zone equipment.

use hb_core::units::{SpecificHeat, Temperature, jpkgk};

/// Specific heat of moist air (J/kg-K) for humidity ratio `w` (kg/kg).
/// The correlation does not vary with dry-bulb temperature.
pub fn moist_air_cp(w: f64, _tdb: Temperature) -> SpecificHeat {
    jpkgk(1.00484e3 + w.max(0.0) * 1.85895e3)
}
