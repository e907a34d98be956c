//! Error types for zone equipment.

use hb_core::HbError;
use thiserror::Error;

/// Conditions that stop an equipment simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquipError {
    #[error("SimElectricBaseboard: Unit not found={name}")]
    UnitNotFound { name: String },

    #[error(
        "SimElectricBaseboard:  Invalid CompIndex passed={index}, Number of Units={count}, Entered Unit name={name}"
    )]
    InvalidCompIndex {
        index: usize,
        count: usize,
        name: String,
    },

    #[error(
        "SimElectricBaseboard: Invalid CompIndex passed={index}, Unit name={name}, stored Unit Name for that index={stored}"
    )]
    CompIndexNameMismatch {
        index: usize,
        name: String,
        stored: String,
    },

    #[error("{routine}: Errors found in getting input.  Preceding condition(s) cause termination.")]
    Input { routine: &'static str, count: usize },

    #[error("No zone sizing data available for {object_type}=\"{name}\"")]
    SizingUnavailable { object_type: String, name: String },

    #[error("No air node conditions for controlled zone {zone}")]
    MissingZoneNode { zone: usize },

    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },
}

pub type EquipResult<T> = Result<T, EquipError>;

impl From<EquipError> for HbError {
    fn from(e: EquipError) -> Self {
        match e {
            EquipError::NonPhysical { what, value } => HbError::NonFinite { what, value },
            EquipError::Input { count, .. } => HbError::ErrorsFound { count },
            other => HbError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EquipError::UnitNotFound {
            name: "BB-9".into(),
        };
        assert_eq!(err.to_string(), "SimElectricBaseboard: Unit not found=BB-9");
    }

    #[test]
    fn invalid_index_message() {
        let err = EquipError::InvalidCompIndex {
            index: 4,
            count: 2,
            name: "BB".into(),
        };
        assert!(err.to_string().contains("Invalid CompIndex passed=4, Number of Units=2"));
    }

    #[test]
    fn error_conversion() {
        let hb: HbError = EquipError::Input {
            routine: "GetBaseboardInput",
            count: 3,
        }
        .into();
        assert!(matches!(hb, HbError::ErrorsFound { count: 3 }));
    }
}
