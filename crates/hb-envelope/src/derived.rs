//! Derived quantities for reporting.

use hb_core::SurfaceId;

use crate::error::EnvelopeResult;
use crate::material::Roughness;
use crate::model::Model;
use crate::surface::{BoundaryCondition, SurfaceClass};

// Still-air film resistances (m2-K/W), ASHRAE 90.1-2004 Appendix A.
pub const FILM_VERTICAL: f64 = 0.1197548;
pub const FILM_HORIZONTAL_DOWN: f64 = 0.1620212;
pub const FILM_HORIZONTAL_UP: f64 = 0.1074271;
pub const FILM_EXTERIOR: f64 = 0.0299387;
pub const FILM_SEMI_EXTERIOR: f64 = 0.0810106;

/// Canonical roughness name; blank when unset.
pub fn roughness_name(roughness: Option<Roughness>) -> &'static str {
    roughness.map(Roughness::name).unwrap_or("")
}

/// Nominal U including film resistances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmedU {
    pub value: f64,
    /// `false` when the films or the construction U could not be applied.
    pub valid: bool,
}

fn inside_film(class: SurfaceClass) -> Option<f64> {
    match class {
        SurfaceClass::Wall | SurfaceClass::Door => Some(FILM_VERTICAL),
        SurfaceClass::Floor => Some(FILM_HORIZONTAL_DOWN),
        SurfaceClass::Roof => Some(FILM_HORIZONTAL_UP),
        _ => None,
    }
}

impl Model {
    /// `1 / (R_in + 1/U + R_out)` for a surface's construction.
    ///
    /// Surfaces of a class without a still-air film get no films and are
    /// flagged invalid. A construction without a positive U is flagged
    /// invalid and its U (0 if undefined) is returned unchanged.
    pub fn nominal_u_with_films(&self, surface: SurfaceId) -> EnvelopeResult<FilmedU> {
        let s = self.surface(surface)?;
        let u = match s.construction {
            Some(c) => self.construction(c)?.nominal_u.unwrap_or(0.0),
            None => 0.0,
        };

        let outside = match s.boundary {
            BoundaryCondition::External => FILM_EXTERIOR,
            BoundaryCondition::Ground | BoundaryCondition::GroundFCfactor => 0.0,
            BoundaryCondition::Interzone(other) => {
                inside_film(self.surface(other)?.class).unwrap_or(FILM_SEMI_EXTERIOR)
            }
            _ => FILM_SEMI_EXTERIOR,
        };

        if u <= 0.0 {
            return Ok(FilmedU {
                value: u,
                valid: false,
            });
        }
        match inside_film(s.class) {
            Some(inside) => Ok(FilmedU {
                value: 1.0 / (inside + 1.0 / u + outside),
                valid: true,
            }),
            None => Ok(FilmedU {
                value: u,
                valid: false,
            }),
        }
    }
}
