//! Variable-slat twins of fixed-slat blinds.
//!
//! A blind used by a shading control with movable slats needs variable-slat
//! properties, while the same blind may still be used elsewhere as a fixed
//! blind. The twin is a copy with [`SlatAngleMode::Variable`] whose angle
//! range is checked against the slat geometry.

use hb_core::{BlindId, Diagnostic, Diagnostics, Severity, Subject};

use crate::blind::{Blind, SlatAngleMode};
use crate::error::EnvelopeResult;
use crate::model::{Model, lookup};

#[derive(Debug, Clone, PartialEq)]
pub struct SlatOutcome {
    pub id: BlindId,
    pub created: bool,
    pub diagnostics: Diagnostics,
}

/// Smallest and largest slat angles (deg) the slat geometry allows.
pub fn geometric_slat_limits(blind: &Blind) -> (f64, f64) {
    let min = if blind.slat_width > blind.slat_separation {
        (blind.slat_thickness / (blind.slat_thickness + blind.slat_separation))
            .asin()
            .to_degrees()
    } else {
        0.0
    };
    (min, 180.0 - min)
}

impl Model {
    /// Variable-slat version of `blind`, creating it on first use.
    pub fn ensure_variable(&mut self, blind: BlindId) -> EnvelopeResult<SlatOutcome> {
        let source = lookup(&self.blinds, blind, "Blind")?;
        let existing = match (source.mode, source.variable_twin) {
            (SlatAngleMode::Variable, _) => Some(blind),
            (SlatAngleMode::Fixed, twin) => twin,
        };
        if let Some(id) = existing {
            return Ok(SlatOutcome {
                id,
                created: false,
                diagnostics: Diagnostics::new(),
            });
        }

        let mut twin = source.clone();
        twin.mode = SlatAngleMode::Variable;
        twin.variable_of = Some(blind);
        twin.variable_twin = None;
        let twin_id = BlindId::next_for(self.blinds.len());
        let diagnostics = check_slat_angles(&mut twin, twin_id);
        tracing::debug!(blind = %twin.name, "variable-slat blind");

        self.blinds.push(twin);
        self.blinds[blind.slot()].variable_twin = Some(twin_id);
        Ok(SlatOutcome {
            id: twin_id,
            created: true,
            diagnostics,
        })
    }
}

fn check_slat_angles(twin: &mut Blind, id: BlindId) -> Diagnostics {
    let context = format!("WindowMaterial:Blind=\"{}\"", twin.name);
    let subject = Subject::new("Blind", id, twin.name.clone());
    let mut diags = Diagnostics::new();
    let mut report = |severity, detail: Vec<String>| {
        let mut d = Diagnostic::new(severity, context.clone(), "Illegal value combination.")
            .with_subject(subject.clone());
        d.details = detail;
        diags.push(d);
    };

    let (min_geom, max_geom) = geometric_slat_limits(twin);

    if twin.max_slat_angle < twin.min_slat_angle {
        report(
            Severity::Severe,
            vec![format!(
                "Minimum Slat Angle=[{:.1}], is greater than Maximum Slat Angle=[{:.1}] deg.",
                twin.min_slat_angle, twin.max_slat_angle
            )],
        );
    }

    if twin.max_slat_angle > twin.min_slat_angle
        && (twin.slat_angle < twin.min_slat_angle || twin.slat_angle > twin.max_slat_angle)
    {
        report(
            Severity::Severe,
            vec![format!(
                "Slat Angle=[{:.1}] is outside of the input min/max range, min=[{:.1}], max=[{:.1}] deg.",
                twin.slat_angle, twin.min_slat_angle, twin.max_slat_angle
            )],
        );
    }

    if twin.min_slat_angle < min_geom {
        report(
            Severity::Warning,
            vec![
                format!(
                    "Minimum Slat Angle=[{:.1}] is less than the smallest allowed by slat dimensions and spacing, min=[{min_geom:.1}] deg.",
                    twin.min_slat_angle
                ),
                format!("Minimum Slat Angle will be set to {min_geom:.1} deg."),
            ],
        );
        twin.min_slat_angle = min_geom;
    }

    if twin.max_slat_angle > max_geom {
        report(
            Severity::Warning,
            vec![
                format!(
                    "Maximum Slat Angle=[{:.1}] is greater than the largest allowed by slat dimensions and spacing, [{max_geom:.1}] deg.",
                    twin.max_slat_angle
                ),
                format!("Maximum Slat Angle will be set to {max_geom:.1} deg."),
            ],
        );
        twin.max_slat_angle = max_geom;
    }

    diags
}
