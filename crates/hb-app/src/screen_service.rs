//! Screen optics for named windows.

use hb_core::{DEG_TO_RAD, SurfaceId};
use hb_envelope::{Model, ScreenOptics};
use hb_optics::{SolarDirection, compute_screen_at_angle, compute_screen_for_surface};

use crate::error::{AppError, AppResult};

/// Where the sun is, for a screen evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SunPosition {
    /// Azimuth (clockwise from north) and altitude, degrees.
    Sky { azimuth_deg: f64, altitude_deg: f64 },
    /// Relative altitude (`phi`) and azimuth (`theta`) to the window normal,
    /// degrees.
    Relative { phi_deg: f64, theta_deg: f64 },
}

fn screened_surface(model: &Model, name: &str) -> AppResult<SurfaceId> {
    model
        .surface_by_name(name)
        .ok_or_else(|| AppError::not_found("Surface", name))
}

/// Evaluate the screen on window `surface` and store the result on the model.
pub fn evaluate_screen(
    model: &mut Model,
    surface: &str,
    sun: SunPosition,
) -> AppResult<ScreenOptics> {
    let id = screened_surface(model, surface)?;
    let optics = match sun {
        SunPosition::Sky {
            azimuth_deg,
            altitude_deg,
        } => {
            let direction = SolarDirection::from_degrees(azimuth_deg, altitude_deg)?;
            compute_screen_for_surface(model, id, &direction)?
        }
        SunPosition::Relative { phi_deg, theta_deg } => {
            let screen = model
                .surface(id)?
                .screen
                .ok_or_else(|| AppError::not_found("Screen on surface", surface))?;
            compute_screen_at_angle(model, screen, phi_deg * DEG_TO_RAD, theta_deg * DEG_TO_RAD)?
        }
    };
    tracing::debug!(surface, bm_bm = optics.bm_bm_trans, "screen evaluated");
    Ok(optics)
}
