//! Insect/solar screen data and per-surface screen records.

use hb_core::{MaterialId, SurfaceId};

use crate::error::{EnvelopeError, EnvelopeResult};

/// How beam reflected off the screen cylinders is accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BeamReflectanceAccounting {
    DoNotModel,
    ModelAsDirectBeam,
    #[default]
    ModelAsDiffuse,
}

/// Screen geometry and cylinder reflectance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMaterial {
    /// Cylinder diameter over centre-to-centre spacing.
    pub gamma: f64,
    pub reflectance: f64,
    pub reflectance_visible: f64,
    pub accounting: BeamReflectanceAccounting,
}

impl ScreenMaterial {
    pub fn new(gamma: f64, reflectance: f64, reflectance_visible: f64) -> EnvelopeResult<Self> {
        if !gamma.is_finite() || gamma <= 0.0 || gamma >= 1.0 {
            return Err(EnvelopeError::InvalidValue {
                what: "screen diameter-to-spacing ratio",
                value: gamma,
            });
        }
        for (what, value) in [
            ("screen reflectance", reflectance),
            ("screen visible reflectance", reflectance_visible),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(EnvelopeError::InvalidValue { what, value });
            }
        }
        Ok(Self {
            gamma,
            reflectance,
            reflectance_visible,
            accounting: BeamReflectanceAccounting::default(),
        })
    }

    pub fn with_accounting(mut self, accounting: BeamReflectanceAccounting) -> Self {
        self.accounting = accounting;
        self
    }
}

/// Latest directional optical properties of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenOptics {
    pub bm_bm_trans: f64,
    pub bm_bm_trans_back: f64,
    pub bm_bm_trans_vis: f64,
    pub bm_dif_trans: f64,
    pub bm_dif_trans_back: f64,
    pub bm_dif_trans_vis: f64,
    pub refl_front: f64,
    pub refl_back: f64,
    pub refl_vis_front: f64,
    pub refl_vis_back: f64,
    pub abs_front: f64,
    pub abs_back: f64,
}

/// Runtime screen record, one per screened window.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub material: MaterialId,
    pub data: ScreenMaterial,
    pub surface: Option<SurfaceId>,
    pub optics: ScreenOptics,
}
