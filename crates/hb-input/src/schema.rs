//! Input document schema.
//!
//! Quantities are SI; field names carry the unit where it is not obvious.
//! Names are matched case-insensitively when references are resolved.

use serde::{Deserialize, Serialize};

use crate::settings::HeatBalanceSettings;

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputDocument {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub settings: HeatBalanceSettings,
    #[serde(default)]
    pub materials: Vec<MaterialDef>,
    #[serde(default)]
    pub blinds: Vec<BlindDef>,
    #[serde(default)]
    pub constructions: Vec<ConstructionDef>,
    #[serde(default)]
    pub zones: Vec<ZoneDef>,
    #[serde(default)]
    pub surfaces: Vec<SurfaceDef>,
    #[serde(default)]
    pub gains: Vec<GainDef>,
    #[serde(default)]
    pub schedules: Vec<ScheduleDef>,
    #[serde(default)]
    pub baseboards: Vec<BaseboardDef>,
}

impl InputDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            settings: HeatBalanceSettings::default(),
            materials: Vec::new(),
            blinds: Vec::new(),
            constructions: Vec::new(),
            zones: Vec::new(),
            surfaces: Vec::new(),
            gains: Vec::new(),
            schedules: Vec::new(),
            baseboards: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoughnessDef {
    VeryRough,
    Rough,
    MediumRough,
    MediumSmooth,
    Smooth,
    VerySmooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GasTypeDef {
    Air,
    Argon,
    Krypton,
    Xenon,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BeamAccountingDef {
    DoNotModel,
    ModelAsDirectBeam,
    #[default]
    ModelAsDiffuse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialDef {
    pub name: String,
    pub kind: MaterialKindDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<RoughnessDef>,
    #[serde(default)]
    pub thickness_m: f64,
    #[serde(default)]
    pub conductivity_w_per_mk: f64,
    #[serde(default)]
    pub density_kg_per_m3: f64,
    #[serde(default)]
    pub specific_heat_j_per_kgk: f64,
    /// Thermal resistance in m2-K/W for layers described by R alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance_m2k_per_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_absorptance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solar_absorptance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_absorptance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum MaterialKindDef {
    RegularOpaque,
    AirGap,
    Shade,
    Glass {
        #[serde(default)]
        solar_diffusing: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        spectral_data: Option<String>,
    },
    Gas {
        gas: GasTypeDef,
    },
    GasMixture {
        components: Vec<(GasTypeDef, f64)>,
    },
    Blind {
        blind: String,
    },
    Screen {
        diameter_to_spacing: f64,
        reflectance: f64,
        reflectance_visible: f64,
        #[serde(default)]
        accounting: BeamAccountingDef,
    },
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SlatOrientationDef {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlindDef {
    pub name: String,
    #[serde(default)]
    pub orientation: SlatOrientationDef,
    pub slat_width_m: f64,
    pub slat_separation_m: f64,
    pub slat_thickness_m: f64,
    #[serde(default = "default_slat_angle")]
    pub slat_angle_deg: f64,
    #[serde(default)]
    pub min_slat_angle_deg: f64,
    #[serde(default = "default_max_slat_angle")]
    pub max_slat_angle_deg: f64,
}

fn default_slat_angle() -> f64 {
    45.0
}

fn default_max_slat_angle() -> f64 {
    180.0
}

/// Layer names from outside to inside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstructionDef {
    pub name: String,
    pub layers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneDef {
    pub name: String,
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_area_m2: Option<f64>,
    /// Air node state used by zone equipment.
    #[serde(default)]
    pub air: ZoneAirDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<ZoneSizingDef>,
    /// Equipment served from this zone's equipment list.
    #[serde(default)]
    pub equipment: Vec<EquipmentRefDef>,
}

fn default_multiplier() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ZoneAirDef {
    pub temperature_c: f64,
    pub humidity_ratio: f64,
}

impl Default for ZoneAirDef {
    fn default() -> Self {
        Self {
            temperature_c: 20.0,
            humidity_ratio: 0.008,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ZoneSizingDef {
    pub design_heat_load_w: f64,
    #[serde(default = "default_sizing_factor")]
    pub heat_sizing_factor: f64,
}

fn default_sizing_factor() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquipmentRefDef {
    pub object_type: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceClassDef {
    Wall,
    Floor,
    Roof,
    Door,
    Window,
    GlassDoor,
    InternalMass,
    Shading,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type")]
pub enum BoundaryDef {
    #[default]
    External,
    Ground,
    GroundFCfactor,
    OtherSideCoefficients,
    OtherSideConditionsModel,
    Adiabatic,
    /// Partition to another zone; the other side is generated.
    Zone { zone: String },
    /// Partition paired with an explicitly modelled surface.
    Surface { surface: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurfaceDef {
    pub name: String,
    pub class: SurfaceClassDef,
    pub zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction: Option<String>,
    #[serde(default)]
    pub azimuth_deg: f64,
    /// Defaults by class when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt_deg: Option<f64>,
    #[serde(default)]
    pub boundary: BoundaryDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shading: Option<ShadingDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShadingDef {
    pub material: String,
    /// Control adjusts the slat angle; needs a variable-slat blind.
    #[serde(default)]
    pub movable_slats: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GainKindDef {
    People,
    Lights,
    ElectricEquipment,
    GasEquipment,
    HotWaterEquipment,
    SteamEquipment,
    OtherEquipment,
    ZoneBaseboardOutdoorTemperatureControlled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GainDef {
    pub name: String,
    pub zone: String,
    pub kind: GainKindDef,
    #[serde(default)]
    pub convective_w: f64,
    #[serde(default)]
    pub radiant_w: f64,
    #[serde(default)]
    pub latent_w: f64,
}

/// Schedule holding one value for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleDef {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CapacityDef {
    Watts(f64),
    Keyword(AutosizeKeyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutosizeKeyword {
    #[serde(rename = "autosize", alias = "Autosize", alias = "AUTOSIZE")]
    Autosize,
}

impl CapacityDef {
    pub const AUTOSIZE: CapacityDef = CapacityDef::Keyword(AutosizeKeyword::Autosize);

    pub fn is_autosize(self) -> bool {
        matches!(self, CapacityDef::Keyword(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseboardDef {
    pub name: String,
    /// Blank means always available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_schedule: Option<String>,
    pub nominal_capacity: CapacityDef,
    #[serde(default = "default_efficiency")]
    pub efficiency: f64,
}

fn default_efficiency() -> f64 {
    1.0
}
