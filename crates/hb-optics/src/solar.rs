//! Sun position relative to a screen.

use core::f64::consts::PI;

use hb_core::numeric::{DEG_TO_RAD, PI_OVER_2};

use crate::common::{acos_clamped, check_finite};
use crate::error::OpticsResult;

/// Direction cosines of the sun in the site frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDirection {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl SolarDirection {
    pub fn new(east: f64, north: f64, up: f64) -> OpticsResult<Self> {
        Ok(Self {
            east: check_finite(east, "sun east cosine")?,
            north: check_finite(north, "sun north cosine")?,
            up: check_finite(up, "sun up cosine")?,
        })
    }

    /// Build from azimuth (clockwise from north) and altitude, both in degrees.
    pub fn from_degrees(azimuth: f64, altitude: f64) -> OpticsResult<Self> {
        let az = check_finite(azimuth, "sun azimuth")? * DEG_TO_RAD;
        let alt = check_finite(altitude, "sun altitude")? * DEG_TO_RAD;
        Ok(Self {
            east: alt.cos() * az.sin(),
            north: alt.cos() * az.cos(),
            up: alt.sin(),
        })
    }

    /// Azimuth from north in [0, 2π).
    pub fn azimuth(&self) -> f64 {
        let az = self.east.atan2(self.north);
        if az < 0.0 { az + 2.0 * PI } else { az }
    }

    /// Altitude above the horizon.
    pub fn altitude(&self) -> f64 {
        PI_OVER_2 - acos_clamped(self.up)
    }
}

/// Sun angles measured from the screen normal, folded into the first
/// quadrant, plus which side of the screen the beam strikes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunAngles {
    /// Relative azimuth, radians in [0, π/2].
    pub azimuth: f64,
    /// Relative altitude, radians in [0, π/2].
    pub altitude: f64,
    /// True when the beam arrives on the outward face.
    pub front: bool,
}

impl SunAngles {
    /// Angles given directly relative to the screen normal (radians).
    ///
    /// Folding maps every direction into the front hemisphere.
    pub fn from_relative(phi: f64, theta: f64) -> Self {
        let mut azimuth = theta.abs();
        if azimuth > PI {
            azimuth = 0.0;
        } else if azimuth > PI_OVER_2 {
            azimuth = PI - azimuth;
        }
        let mut altitude = phi.abs();
        if altitude > PI_OVER_2 {
            altitude = PI - altitude;
        }
        Self {
            azimuth,
            altitude,
            front: true,
        }
    }

    /// Angles of the sun relative to a surface whose outward normal has the
    /// given azimuth (clockwise from north) and tilt (from horizontal), in
    /// degrees.
    pub fn for_surface(sun: &SolarDirection, surface_azimuth: f64, surface_tilt: f64) -> Self {
        let sun_azimuth = sun.azimuth();
        let sun_altitude = sun.altitude();
        let surface_azimuth = surface_azimuth * DEG_TO_RAD;
        let surface_tilt = surface_tilt * DEG_TO_RAD;

        let normal_azimuth = sun_azimuth - surface_azimuth;
        let mut azimuth = normal_azimuth.abs() % (2.0 * PI);
        if azimuth > PI {
            azimuth = 2.0 * PI - azimuth;
        }
        if azimuth > PI_OVER_2 {
            azimuth -= PI_OVER_2;
        }

        let normal_altitude = sun_altitude + surface_tilt - PI_OVER_2;
        let mut altitude = normal_altitude.abs();
        if altitude > PI_OVER_2 {
            altitude -= PI_OVER_2;
        }

        Self {
            azimuth,
            altitude,
            front: normal_altitude.cos() * normal_azimuth.cos() >= 0.0,
        }
    }
}
