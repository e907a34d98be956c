//! Homogeneous layer descriptors.

use core::fmt;
use core::str::FromStr;

use hb_core::BlindId;

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::screen::ScreenMaterial;

/// Maximum number of gases in a window gap mixture.
pub const MAX_GASES_IN_MIXTURE: usize = 5;

/// Surface roughness, from roughest to smoothest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Roughness {
    VeryRough,
    Rough,
    MediumRough,
    MediumSmooth,
    Smooth,
    VerySmooth,
}

impl Roughness {
    pub const ALL: [Roughness; 6] = [
        Roughness::VeryRough,
        Roughness::Rough,
        Roughness::MediumRough,
        Roughness::MediumSmooth,
        Roughness::Smooth,
        Roughness::VerySmooth,
    ];

    /// Canonical name as it appears in input and reports.
    pub fn name(self) -> &'static str {
        match self {
            Roughness::VeryRough => "VeryRough",
            Roughness::Rough => "Rough",
            Roughness::MediumRough => "MediumRough",
            Roughness::MediumSmooth => "MediumSmooth",
            Roughness::Smooth => "Smooth",
            Roughness::VerySmooth => "VerySmooth",
        }
    }
}

impl fmt::Display for Roughness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Roughness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Roughness::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown roughness \"{s}\""))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GasType {
    Air,
    Argon,
    Krypton,
    Xenon,
    Custom,
}

/// Gas fill of a window gap: up to five (gas, fraction) pairs.
///
/// Fractions are kept as given. Two fills are equal only if the pairs match
/// in order and value.
#[derive(Debug, Clone, PartialEq)]
pub struct GasMix {
    components: Vec<(GasType, f64)>,
}

impl GasMix {
    /// A single pure gas.
    pub fn pure(gas: GasType) -> Self {
        Self {
            components: vec![(gas, 1.0)],
        }
    }

    pub fn mixture(components: Vec<(GasType, f64)>) -> EnvelopeResult<Self> {
        if components.len() > MAX_GASES_IN_MIXTURE {
            return Err(EnvelopeError::TooManyGases {
                count: components.len(),
                max: MAX_GASES_IN_MIXTURE,
            });
        }
        for &(_, fraction) in &components {
            if !fraction.is_finite() || fraction < 0.0 {
                return Err(EnvelopeError::InvalidValue {
                    what: "gas fraction",
                    value: fraction,
                });
            }
        }
        Ok(Self { components })
    }

    pub fn components(&self) -> &[(GasType, f64)] {
        &self.components
    }
}

/// Layer classification with group-specific data attached.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialKind {
    RegularOpaque,
    AirGap,
    Shade,
    Glass {
        solar_diffusing: bool,
        /// Name of the spectral data set, if the glass is not spectral-average.
        spectral_data: Option<String>,
    },
    Gas(GasMix),
    GasMixture(GasMix),
    Blind(BlindId),
    Screen(ScreenMaterial),
    EcoRoof,
    IrTransparent,
    SimpleGlazing,
    ComplexShade,
    ComplexGap,
    GlassEquivalentLayer,
    ShadeEquivalentLayer,
    DrapeEquivalentLayer,
    BlindEquivalentLayer,
    ScreenEquivalentLayer,
    GapEquivalentLayer,
}

impl MaterialKind {
    pub fn group(&self) -> MaterialGroup {
        match self {
            MaterialKind::RegularOpaque => MaterialGroup::RegularOpaque,
            MaterialKind::AirGap => MaterialGroup::Air,
            MaterialKind::Shade => MaterialGroup::Shade,
            MaterialKind::Glass { .. } => MaterialGroup::Glass,
            MaterialKind::Gas(_) => MaterialGroup::Gas,
            MaterialKind::GasMixture(_) => MaterialGroup::GasMixture,
            MaterialKind::Blind(_) => MaterialGroup::Blind,
            MaterialKind::Screen(_) => MaterialGroup::Screen,
            MaterialKind::EcoRoof => MaterialGroup::EcoRoof,
            MaterialKind::IrTransparent => MaterialGroup::IrTransparent,
            MaterialKind::SimpleGlazing => MaterialGroup::SimpleGlazing,
            MaterialKind::ComplexShade => MaterialGroup::ComplexShade,
            MaterialKind::ComplexGap => MaterialGroup::ComplexGap,
            MaterialKind::GlassEquivalentLayer => MaterialGroup::GlassEquivalentLayer,
            MaterialKind::ShadeEquivalentLayer => MaterialGroup::ShadeEquivalentLayer,
            MaterialKind::DrapeEquivalentLayer => MaterialGroup::DrapeEquivalentLayer,
            MaterialKind::BlindEquivalentLayer => MaterialGroup::BlindEquivalentLayer,
            MaterialKind::ScreenEquivalentLayer => MaterialGroup::ScreenEquivalentLayer,
            MaterialKind::GapEquivalentLayer => MaterialGroup::GapEquivalentLayer,
        }
    }
}

/// Field-less discriminant of [`MaterialKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialGroup {
    RegularOpaque,
    Air,
    Shade,
    Glass,
    Gas,
    GasMixture,
    Blind,
    Screen,
    EcoRoof,
    IrTransparent,
    SimpleGlazing,
    ComplexShade,
    ComplexGap,
    GlassEquivalentLayer,
    ShadeEquivalentLayer,
    DrapeEquivalentLayer,
    BlindEquivalentLayer,
    ScreenEquivalentLayer,
    GapEquivalentLayer,
}

impl MaterialGroup {
    /// Input object type that defines materials of this group.
    pub fn object_type(self) -> &'static str {
        match self {
            MaterialGroup::RegularOpaque => "Material",
            MaterialGroup::Air => "Material:AirGap",
            MaterialGroup::Shade => "WindowMaterial:Shade",
            MaterialGroup::Glass => "WindowMaterial:Glazing",
            MaterialGroup::Gas => "WindowMaterial:Gas",
            MaterialGroup::GasMixture => "WindowMaterial:GasMixture",
            MaterialGroup::Blind => "WindowMaterial:Blind",
            MaterialGroup::Screen => "WindowMaterial:Screen",
            MaterialGroup::EcoRoof => "Material:RoofVegetation",
            MaterialGroup::IrTransparent => "Material:InfraredTransparent",
            MaterialGroup::SimpleGlazing => "WindowMaterial:SimpleGlazingSystem",
            MaterialGroup::ComplexShade => "WindowMaterial:ComplexShade",
            MaterialGroup::ComplexGap => "WindowMaterial:Gap",
            MaterialGroup::GlassEquivalentLayer => "WindowMaterial:Glazing:EquivalentLayer",
            MaterialGroup::ShadeEquivalentLayer => "WindowMaterial:Shade:EquivalentLayer",
            MaterialGroup::DrapeEquivalentLayer => "WindowMaterial:Drape:EquivalentLayer",
            MaterialGroup::BlindEquivalentLayer => "WindowMaterial:Blind:EquivalentLayer",
            MaterialGroup::ScreenEquivalentLayer => "WindowMaterial:Screen:EquivalentLayer",
            MaterialGroup::GapEquivalentLayer => "WindowMaterial:Gap:EquivalentLayer",
        }
    }

    /// Groups that make a construction a window.
    pub fn is_window_class(self) -> bool {
        !matches!(
            self,
            MaterialGroup::RegularOpaque
                | MaterialGroup::Air
                | MaterialGroup::EcoRoof
                | MaterialGroup::IrTransparent
        )
    }

    pub fn is_glass(self) -> bool {
        matches!(self, MaterialGroup::Glass | MaterialGroup::SimpleGlazing)
    }

    /// Shade, blind, screen or complex shade.
    pub fn is_shading(self) -> bool {
        matches!(
            self,
            MaterialGroup::Shade
                | MaterialGroup::Blind
                | MaterialGroup::Screen
                | MaterialGroup::ComplexShade
        )
    }

    pub fn is_gas(self) -> bool {
        matches!(
            self,
            MaterialGroup::Gas | MaterialGroup::GasMixture | MaterialGroup::ComplexGap
        )
    }

    /// Plain gas fill (not a complex gap).
    pub fn is_gas_fill(self) -> bool {
        matches!(self, MaterialGroup::Gas | MaterialGroup::GasMixture)
    }
}

impl fmt::Display for MaterialGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.object_type())
    }
}

/// A homogeneous layer.
///
/// Thermal properties are SI: conductivity W/m-K, density kg/m3,
/// specific heat J/kg-K, thickness m, resistance m2-K/W.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,
    pub roughness: Option<Roughness>,
    pub conductivity: f64,
    pub density: f64,
    pub specific_heat: f64,
    pub thickness: f64,
    /// Explicit resistance for no-mass layers and air gaps.
    pub resistance: Option<f64>,
    pub thermal_absorptance: f64,
    /// Front (outside-facing) infrared absorptance of a window layer.
    pub thermal_absorptance_front: f64,
    /// Back (inside-facing) infrared absorptance of a window layer.
    pub thermal_absorptance_back: f64,
    pub solar_absorptance: f64,
    pub visible_absorptance: f64,
}

impl Material {
    pub fn new(name: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            name: name.into(),
            kind,
            roughness: None,
            conductivity: 0.0,
            density: 0.0,
            specific_heat: 0.0,
            thickness: 0.0,
            resistance: None,
            thermal_absorptance: 0.9,
            thermal_absorptance_front: 0.9,
            thermal_absorptance_back: 0.9,
            solar_absorptance: 0.7,
            visible_absorptance: 0.7,
        }
    }

    pub fn group(&self) -> MaterialGroup {
        self.kind.group()
    }

    /// Nominal thermal resistance of this layer.
    pub fn nominal_resistance(&self) -> f64 {
        match self.resistance {
            Some(r) => r,
            None if self.conductivity > 0.0 => self.thickness / self.conductivity,
            None => 0.0,
        }
    }

    /// Gas fill, for gas and gas-mixture layers.
    pub fn gas_mix(&self) -> Option<&GasMix> {
        match &self.kind {
            MaterialKind::Gas(mix) | MaterialKind::GasMixture(mix) => Some(mix),
            _ => None,
        }
    }

    pub fn is_solar_diffusing(&self) -> bool {
        matches!(
            self.kind,
            MaterialKind::Glass {
                solar_diffusing: true,
                ..
            }
        )
    }

    /// Thermal diffusivity (m2/s), when the layer has mass.
    pub fn thermal_diffusivity(&self) -> Option<f64> {
        let capacity = self.density * self.specific_heat;
        (self.conductivity > 0.0 && capacity > 0.0).then(|| self.conductivity / capacity)
    }

    pub(crate) fn check_values(&self) -> EnvelopeResult<()> {
        let checks: [(&'static str, f64); 9] = [
            ("conductivity", self.conductivity),
            ("density", self.density),
            ("specific heat", self.specific_heat),
            ("thickness", self.thickness),
            ("thermal absorptance", self.thermal_absorptance),
            ("front thermal absorptance", self.thermal_absorptance_front),
            ("back thermal absorptance", self.thermal_absorptance_back),
            ("solar absorptance", self.solar_absorptance),
            ("visible absorptance", self.visible_absorptance),
        ];
        for (what, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(EnvelopeError::InvalidValue { what, value });
            }
        }
        if let Some(r) = self.resistance {
            if !r.is_finite() || r < 0.0 {
                return Err(EnvelopeError::InvalidValue {
                    what: "thermal resistance",
                    value: r,
                });
            }
        }
        Ok(())
    }
}
