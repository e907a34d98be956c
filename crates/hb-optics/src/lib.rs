//! hb-optics: directional optics of insect/solar screens.
//!
//! Screen transmittance varies with the sun position relative to the screen
//! normal. Two entry points cover the two ways callers know that position:
//! - [`compute_screen_for_surface`]: from the global sun direction and the
//!   orientation of the screened window
//! - [`compute_screen_at_angle`]: from relative altitude/azimuth angles, e.g.
//!   when integrating over a hemisphere
//!
//! Both write the result onto the screen record and return it.
//!
//! # Example
//!
//! ```
//! use hb_envelope::{BeamReflectanceAccounting, ScreenMaterial};
//! use hb_optics::{SunAngles, screen_properties};
//!
//! let screen = ScreenMaterial::new(0.2, 0.5, 0.5)
//!     .unwrap()
//!     .with_accounting(BeamReflectanceAccounting::ModelAsDiffuse);
//! let optics = screen_properties(&screen, &SunAngles::from_relative(0.0, 0.0));
//! assert!((optics.bm_bm_trans - 0.64).abs() < 1e-12);
//! ```

pub mod common;
pub mod error;
pub mod screen;
pub mod solar;

// Re-exports
pub use error::{OpticsError, OpticsResult};
pub use screen::{
    compute_screen_at_angle, compute_screen_for_surface, direct_transmittance,
    scattered_transmittance, screen_properties,
};
pub use solar::{SolarDirection, SunAngles};
