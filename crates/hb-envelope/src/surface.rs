//! Heat transfer and shading surfaces.

use core::fmt;

use hb_core::{BlindId, ConstructionId, MaterialId, ScreenId, SurfaceId, ZoneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceClass {
    Wall,
    Floor,
    Roof,
    Door,
    Window,
    GlassDoor,
    InternalMass,
    Shading,
}

impl SurfaceClass {
    pub fn is_window(self) -> bool {
        matches!(self, SurfaceClass::Window | SurfaceClass::GlassDoor)
    }

    /// Class of the matching surface on the other side of a partition.
    pub fn mirrored(self) -> SurfaceClass {
        match self {
            SurfaceClass::Floor => SurfaceClass::Roof,
            SurfaceClass::Roof => SurfaceClass::Floor,
            other => other,
        }
    }
}

impl fmt::Display for SurfaceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Outside boundary condition of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    External,
    Ground,
    GroundFCfactor,
    OtherSideCoefficients,
    OtherSideConditionsModel,
    Adiabatic,
    /// Partition whose other side is the given surface.
    Interzone(SurfaceId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub name: String,
    pub class: SurfaceClass,
    pub zone: ZoneId,
    /// Shading surfaces may carry no construction.
    pub construction: Option<ConstructionId>,
    /// Outward normal azimuth, degrees clockwise from north.
    pub azimuth: f64,
    /// Degrees from horizontal facing up (0 = roof, 90 = wall).
    pub tilt: f64,
    pub boundary: BoundaryCondition,
    /// Shading device material deployed by a shading control.
    pub shading_material: Option<MaterialId>,
    pub blind: Option<BlindId>,
    pub screen: Option<ScreenId>,
}

impl Surface {
    pub fn new(
        name: impl Into<String>,
        class: SurfaceClass,
        zone: ZoneId,
        construction: Option<ConstructionId>,
    ) -> Self {
        let tilt = match class {
            SurfaceClass::Roof => 0.0,
            SurfaceClass::Floor => 180.0,
            _ => 90.0,
        };
        Self {
            name: name.into(),
            class,
            zone,
            construction,
            azimuth: 0.0,
            tilt,
            boundary: BoundaryCondition::External,
            shading_material: None,
            blind: None,
            screen: None,
        }
    }

    pub fn with_orientation(mut self, azimuth: f64, tilt: f64) -> Self {
        self.azimuth = azimuth;
        self.tilt = tilt;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn interzone_partner(&self) -> Option<SurfaceId> {
        match self.boundary {
            BoundaryCondition::Interzone(other) => Some(other),
            _ => None,
        }
    }
}
