//! Directional transmittance, reflectance and absorptance of screens.

use hb_core::numeric::{DEG_TO_RAD, PI_OVER_2};
use hb_core::{ScreenId, SurfaceId};
use hb_envelope::{BeamReflectanceAccounting, Model, ScreenMaterial, ScreenOptics};
use tracing::trace;

use crate::common::{SMALL, acos_clamped, check_finite};
use crate::error::{OpticsError, OpticsResult};
use crate::solar::{SolarDirection, SunAngles};

/// Unobstructed beam fraction through a woven screen of diameter-to-spacing
/// ratio `gamma`.
pub fn direct_transmittance(gamma: f64, angles: &SunAngles) -> f64 {
    let (azimuth, altitude) = (angles.azimuth, angles.altitude);

    let beta = PI_OVER_2 - azimuth;
    let trans_y = if beta > SMALL && (altitude - PI_OVER_2).abs() > SMALL {
        let alpha = (altitude.tan() / azimuth.cos()).atan();
        let cot_beta = 1.0 / beta.tan();
        let t = 1.0
            - gamma
                * (alpha.cos() + alpha.sin() * altitude.tan() * (1.0 + cot_beta * cot_beta).sqrt());
        t.max(0.0)
    } else {
        0.0
    };

    let cos_mu = (altitude.cos().powi(2) * azimuth.cos().powi(2) + altitude.sin().powi(2)).sqrt();
    let trans_x = if cos_mu > SMALL {
        let epsilon = acos_clamped(altitude.cos() * azimuth.cos() / cos_mu);
        let eta = PI_OVER_2 - epsilon;
        let mu = acos_clamped(cos_mu);
        if epsilon.cos() == 0.0 || eta == 0.0 {
            0.0
        } else {
            let mu_prime = (mu.tan() / epsilon.cos()).atan();
            let cot_eta = 1.0 / eta.tan();
            let t = 1.0
                - gamma
                    * (mu_prime.cos() + mu_prime.sin() * mu.tan() * (1.0 + cot_eta * cot_eta).sqrt());
            t.max(0.0)
        }
    } else {
        1.0 - gamma
    };

    (trans_x * trans_y).max(0.0)
}

/// Beam reflected off the cylinders and transmitted as scattered light, for
/// cylinder reflectance `reflectance`.
pub fn scattered_transmittance(gamma: f64, reflectance: f64, angles: &SunAngles) -> f64 {
    let (azimuth, altitude) = (angles.azimuth, angles.altitude);
    if (azimuth - PI_OVER_2).abs() < SMALL || (altitude - PI_OVER_2).abs() < SMALL {
        return 0.0;
    }
    let plateau = 0.2 * (1.0 - gamma) * reflectance;
    if plateau <= 0.0 {
        return 0.0;
    }

    let delta_max = 89.7 - 10.0 * gamma / 0.16;
    let delta = (azimuth / DEG_TO_RAD).hypot(altitude / DEG_TO_RAD);
    let scatter_max = 0.0229 * gamma + 0.2971 * reflectance - 0.03624 * gamma * gamma
        + 0.04763 * reflectance * reflectance
        - 0.44416 * gamma * reflectance;
    let peak_to_plateau = 1.0 / plateau;
    let base = plateau * scatter_max;
    let off_peak = (delta - delta_max).abs();

    let t = if delta > delta_max {
        let exponent = -off_peak.powf(2.5) / 600.0;
        base * (1.0 + (peak_to_plateau - 1.0) * exponent.exp())
            - base * ((delta - delta_max) / (90.0 - delta_max)).max(0.0)
    } else {
        let exponent = -off_peak.powi(2) / 600.0;
        base * (1.0 + (peak_to_plateau - 1.0) * exponent.exp())
    };
    t.max(0.0)
}

/// Full set of beam properties for a screen at the given sun angles.
///
/// The accounting mode decides where the scattered beam goes: dropped,
/// folded into the beam-beam term, or reported as beam-diffuse. The beam-side
/// outputs land on the front or back fields depending on `angles.front`; the
/// opposite side reads zero.
pub fn screen_properties(material: &ScreenMaterial, angles: &SunAngles) -> ScreenOptics {
    let gamma = material.gamma;
    let rho = material.reflectance;
    let rho_vis = material.reflectance_visible;

    let direct = direct_transmittance(gamma, angles);
    let mut scattered = scattered_transmittance(gamma, rho, angles);
    let mut scattered_vis = scattered_transmittance(gamma, rho_vis, angles);

    let (beam, beam_vis) = match material.accounting {
        BeamReflectanceAccounting::DoNotModel => (direct, direct),
        BeamReflectanceAccounting::ModelAsDirectBeam => (direct + scattered, direct + scattered_vis),
        BeamReflectanceAccounting::ModelAsDiffuse => (direct, direct),
    };
    if material.accounting != BeamReflectanceAccounting::ModelAsDiffuse {
        scattered = 0.0;
        scattered_vis = 0.0;
    }

    let reflect = (rho * (1.0 - direct) - scattered).max(0.0);
    let reflect_vis = (rho_vis * (1.0 - direct) - scattered_vis).max(0.0);
    let absorb = ((1.0 - direct) * (1.0 - rho)).max(0.0);

    if angles.front {
        ScreenOptics {
            bm_bm_trans: beam,
            bm_bm_trans_vis: beam_vis,
            bm_dif_trans: scattered,
            bm_dif_trans_vis: scattered_vis,
            refl_front: reflect,
            refl_vis_front: reflect_vis,
            abs_front: absorb,
            ..ScreenOptics::default()
        }
    } else {
        ScreenOptics {
            bm_bm_trans_back: beam,
            bm_dif_trans_back: scattered,
            refl_back: reflect,
            refl_vis_back: reflect_vis,
            abs_back: absorb,
            ..ScreenOptics::default()
        }
    }
}

/// Evaluate the screen on a window for the current sun direction and store
/// the result on the screen record.
pub fn compute_screen_for_surface(
    model: &mut Model,
    surface: SurfaceId,
    sun: &SolarDirection,
) -> OpticsResult<ScreenOptics> {
    let (screen, angles) = {
        let s = model.surface(surface)?;
        let screen = s.screen.ok_or_else(|| OpticsError::NoScreen {
            surface: s.name.clone(),
        })?;
        let azimuth = check_finite(s.azimuth, "surface azimuth")?;
        let tilt = check_finite(s.tilt, "surface tilt")?;
        (screen, SunAngles::for_surface(sun, azimuth, tilt))
    };
    store(model, screen, &angles)
}

/// Evaluate a screen at sun angles given relative to its normal (radians).
pub fn compute_screen_at_angle(
    model: &mut Model,
    screen: ScreenId,
    phi: f64,
    theta: f64,
) -> OpticsResult<ScreenOptics> {
    let phi = check_finite(phi, "phi")?;
    let theta = check_finite(theta, "theta")?;
    store(model, screen, &SunAngles::from_relative(phi, theta))
}

fn store(model: &mut Model, screen: ScreenId, angles: &SunAngles) -> OpticsResult<ScreenOptics> {
    let material = model.screen(screen)?.data;
    let optics = screen_properties(&material, angles);
    trace!(
        %screen,
        azimuth = angles.azimuth,
        altitude = angles.altitude,
        front = angles.front,
        bm_bm = optics.bm_bm_trans,
        "screen optics"
    );
    *model.screen_optics_mut(screen)? = optics;
    Ok(optics)
}
