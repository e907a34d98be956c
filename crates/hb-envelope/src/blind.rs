//! Window blind records.

use hb_core::BlindId;

use crate::error::{EnvelopeError, EnvelopeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlatAngleMode {
    Fixed,
    /// Movable slats; angle set by a shading control.
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlatOrientation {
    Horizontal,
    Vertical,
}

/// Slat geometry of a blind (lengths in m, angles in degrees).
#[derive(Debug, Clone, PartialEq)]
pub struct Blind {
    pub name: String,
    pub mode: SlatAngleMode,
    pub orientation: SlatOrientation,
    pub slat_width: f64,
    pub slat_separation: f64,
    pub slat_thickness: f64,
    pub slat_angle: f64,
    pub min_slat_angle: f64,
    pub max_slat_angle: f64,
    /// Variable-slat copy of this blind, once one has been made.
    pub variable_twin: Option<BlindId>,
    /// Fixed-slat blind this one was copied from.
    pub variable_of: Option<BlindId>,
}

impl Blind {
    /// Fixed horizontal blind with a 45 deg slat angle and a 0..180 deg range.
    pub fn new(
        name: impl Into<String>,
        slat_width: f64,
        slat_separation: f64,
        slat_thickness: f64,
    ) -> Self {
        Self {
            name: name.into(),
            mode: SlatAngleMode::Fixed,
            orientation: SlatOrientation::Horizontal,
            slat_width,
            slat_separation,
            slat_thickness,
            slat_angle: 45.0,
            min_slat_angle: 0.0,
            max_slat_angle: 180.0,
            variable_twin: None,
            variable_of: None,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.mode == SlatAngleMode::Variable
    }

    pub(crate) fn check_values(&self) -> EnvelopeResult<()> {
        let lengths = [
            ("slat width", self.slat_width),
            ("slat separation", self.slat_separation),
            ("slat thickness", self.slat_thickness),
        ];
        for (what, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(EnvelopeError::InvalidValue { what, value });
            }
        }
        let angles = [
            ("slat angle", self.slat_angle),
            ("minimum slat angle", self.min_slat_angle),
            ("maximum slat angle", self.max_slat_angle),
        ];
        for (what, value) in angles {
            if !(0.0..=180.0).contains(&value) {
                return Err(EnvelopeError::InvalidValue { what, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_blind_is_fixed() {
        let b = Blind::new("B", 0.025, 0.02, 0.001);
        assert!(!b.is_variable());
        assert!(b.check_values().is_ok());
    }

    #[test]
    fn rejects_zero_separation() {
        let b = Blind::new("B", 0.025, 0.0, 0.001);
        assert!(matches!(
            b.check_values(),
            Err(EnvelopeError::InvalidValue {
                what: "slat separation",
                ..
            })
        ));
    }
}
