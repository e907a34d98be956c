//! Internal heat gain sources.

use core::fmt;

use hb_core::ZoneId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GainDeviceType {
    People,
    Lights,
    ElectricEquipment,
    GasEquipment,
    HotWaterEquipment,
    SteamEquipment,
    OtherEquipment,
    ZoneBaseboardOutdoorTemperatureControlled,
}

impl GainDeviceType {
    pub fn object_type(self) -> &'static str {
        match self {
            GainDeviceType::People => "People",
            GainDeviceType::Lights => "Lights",
            GainDeviceType::ElectricEquipment => "ElectricEquipment",
            GainDeviceType::GasEquipment => "GasEquipment",
            GainDeviceType::HotWaterEquipment => "HotWaterEquipment",
            GainDeviceType::SteamEquipment => "SteamEquipment",
            GainDeviceType::OtherEquipment => "OtherEquipment",
            GainDeviceType::ZoneBaseboardOutdoorTemperatureControlled => {
                "ZoneBaseboard:OutdoorTemperatureControlled"
            }
        }
    }
}

impl fmt::Display for GainDeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.object_type())
    }
}

/// Design heat gain rates of one source (W).
#[derive(Debug, Clone, PartialEq)]
pub struct InternalGain {
    pub name: String,
    pub zone: ZoneId,
    pub device: GainDeviceType,
    pub convective: f64,
    pub radiant: f64,
    pub latent: f64,
}

/// Per-zone sums of internal gains (W).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GainTotals {
    pub convective: f64,
    pub radiant: f64,
    pub latent: f64,
}

impl GainTotals {
    pub fn sensible(&self) -> f64 {
        self.convective + self.radiant
    }

    pub fn total(&self) -> f64 {
        self.sensible() + self.latent
    }

    pub(crate) fn add(&mut self, gain: &InternalGain) {
        self.convective += gain.convective;
        self.radiant += gain.radiant;
        self.latent += gain.latent;
    }
}
