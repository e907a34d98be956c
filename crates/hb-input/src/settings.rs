//! Heat-balance algorithm settings.

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SolarDistribution {
    MinimalShadowing,
    #[default]
    FullExterior,
    FullInteriorExterior,
    FullExteriorWithRefl,
    FullInteriorExteriorWithRefl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvectionSide {
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvectionAlgorithm {
    AshraeSimple,
    AshraeTarp,
    CeilingDiffuser,
    TrombeWall,
    TarpHcOutside,
    MoWiTTHcOutside,
    Doe2HcOutside,
    BlastHcOutside,
    AdaptiveConvectionAlgorithm,
}

impl ConvectionAlgorithm {
    /// Whether the algorithm may be selected for the given surface side.
    pub fn allowed_on(self, side: ConvectionSide) -> bool {
        use ConvectionAlgorithm::*;
        match self {
            AshraeSimple | AshraeTarp | AdaptiveConvectionAlgorithm => true,
            CeilingDiffuser | TrombeWall => side == ConvectionSide::Inside,
            TarpHcOutside | MoWiTTHcOutside | Doe2HcOutside | BlastHcOutside => {
                side == ConvectionSide::Outside
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HeatTransferAlgorithm {
    #[default]
    Ctf,
    Empd,
    CondFd,
    Hamt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ZoneAirSolutionAlgorithm {
    #[default]
    ThirdOrder,
    Analytical,
    Euler,
}

pub const DEFAULT_MIN_WARMUP_DAYS: u32 = 6;
pub const DEFAULT_MAX_WARMUP_DAYS: u32 = 25;
/// W/m2-K
pub const DEFAULT_LOW_CONVECTION_LIMIT: f64 = 0.1;
/// W/m2-K
pub const DEFAULT_HIGH_CONVECTION_LIMIT: f64 = 1000.0;
/// K
pub const DEFAULT_CONDFD_CONVERGENCE: f64 = 0.002;

/// Simulation-wide heat-balance configuration. Every field has a default so
/// documents may omit the block or any part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatBalanceSettings {
    pub solar_distribution: SolarDistribution,
    pub inside_convection: ConvectionAlgorithm,
    pub outside_convection: ConvectionAlgorithm,
    pub heat_transfer: HeatTransferAlgorithm,
    pub zone_air_solution: ZoneAirSolutionAlgorithm,
    pub min_warmup_days: u32,
    pub max_warmup_days: u32,
    pub low_convection_limit: f64,
    pub high_convection_limit: f64,
    pub condfd_convergence: f64,
    pub timesteps_per_hour: u32,
    /// A zone sizing run precedes the simulation.
    pub do_zone_sizing: bool,
    /// The simulation is itself a system sizing calculation.
    pub system_sizing_calc: bool,
    pub display_extra_warnings: bool,
}

impl Default for HeatBalanceSettings {
    fn default() -> Self {
        Self {
            solar_distribution: SolarDistribution::default(),
            inside_convection: ConvectionAlgorithm::AshraeTarp,
            outside_convection: ConvectionAlgorithm::Doe2HcOutside,
            heat_transfer: HeatTransferAlgorithm::default(),
            zone_air_solution: ZoneAirSolutionAlgorithm::default(),
            min_warmup_days: DEFAULT_MIN_WARMUP_DAYS,
            max_warmup_days: DEFAULT_MAX_WARMUP_DAYS,
            low_convection_limit: DEFAULT_LOW_CONVECTION_LIMIT,
            high_convection_limit: DEFAULT_HIGH_CONVECTION_LIMIT,
            condfd_convergence: DEFAULT_CONDFD_CONVERGENCE,
            timesteps_per_hour: 4,
            do_zone_sizing: false,
            system_sizing_calc: false,
            display_extra_warnings: false,
        }
    }
}

impl HeatBalanceSettings {
    /// Length of one zone timestep in hours.
    pub fn timestep_hours(&self) -> f64 {
        1.0 / f64::from(self.timesteps_per_hour.max(1))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (side, algo, field) in [
            (ConvectionSide::Inside, self.inside_convection, "inside_convection"),
            (ConvectionSide::Outside, self.outside_convection, "outside_convection"),
        ] {
            if !algo.allowed_on(side) {
                return Err(ValidationError::InvalidValue {
                    field: format!("settings {field}"),
                    value: format!("{algo:?}"),
                    reason: format!("not available for {} surfaces", side_name(side)),
                });
            }
        }

        if self.min_warmup_days == 0 || self.min_warmup_days > self.max_warmup_days {
            return Err(ValidationError::InvalidValue {
                field: "settings min_warmup_days".to_string(),
                value: self.min_warmup_days.to_string(),
                reason: format!(
                    "must be at least 1 and not above max_warmup_days ({})",
                    self.max_warmup_days
                ),
            });
        }

        for (field, value) in [
            ("low_convection_limit", self.low_convection_limit),
            ("high_convection_limit", self.high_convection_limit),
            ("condfd_convergence", self.condfd_convergence),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("settings {field}"),
                    value: value.to_string(),
                    reason: "must be positive and finite".to_string(),
                });
            }
        }
        if self.low_convection_limit >= self.high_convection_limit {
            return Err(ValidationError::InvalidValue {
                field: "settings low_convection_limit".to_string(),
                value: self.low_convection_limit.to_string(),
                reason: "must be below high_convection_limit".to_string(),
            });
        }

        if self.timesteps_per_hour == 0 || 60 % self.timesteps_per_hour != 0 {
            return Err(ValidationError::InvalidValue {
                field: "settings timesteps_per_hour".to_string(),
                value: self.timesteps_per_hour.to_string(),
                reason: "must divide evenly into 60".to_string(),
            });
        }

        Ok(())
    }
}

fn side_name(side: ConvectionSide) -> &'static str {
    match side {
        ConvectionSide::Inside => "inside",
        ConvectionSide::Outside => "outside",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = HeatBalanceSettings::default();
        assert_eq!(s.min_warmup_days, 6);
        assert_eq!(s.max_warmup_days, 25);
        assert_eq!(s.low_convection_limit, 0.1);
        assert_eq!(s.high_convection_limit, 1000.0);
        assert_eq!(s.condfd_convergence, 0.002);
        assert!(s.validate().is_ok());
        assert_eq!(s.timestep_hours(), 0.25);
    }

    #[test]
    fn side_legality() {
        use ConvectionAlgorithm::*;
        assert!(CeilingDiffuser.allowed_on(ConvectionSide::Inside));
        assert!(!CeilingDiffuser.allowed_on(ConvectionSide::Outside));
        assert!(!Doe2HcOutside.allowed_on(ConvectionSide::Inside));
        assert!(MoWiTTHcOutside.allowed_on(ConvectionSide::Outside));
        assert!(AdaptiveConvectionAlgorithm.allowed_on(ConvectionSide::Outside));
    }

    #[test]
    fn rejects_outside_only_algorithm_inside() {
        let s = HeatBalanceSettings {
            inside_convection: ConvectionAlgorithm::BlastHcOutside,
            ..Default::default()
        };
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("inside_convection"));
    }

    #[test]
    fn rejects_inverted_warmup_range() {
        let s = HeatBalanceSettings {
            min_warmup_days: 30,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_limits() {
        let s = HeatBalanceSettings {
            low_convection_limit: 0.0,
            ..Default::default()
        };
        assert!(s.validate().is_err());
        let s = HeatBalanceSettings {
            condfd_convergence: -1.0,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_uneven_timestep() {
        let s = HeatBalanceSettings {
            timesteps_per_hour: 7,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn partial_block_fills_defaults() {
        let s: HeatBalanceSettings =
            serde_yaml::from_str("solar_distribution: MinimalShadowing\nmax_warmup_days: 30\n")
                .unwrap();
        assert_eq!(s.solar_distribution, SolarDistribution::MinimalShadowing);
        assert_eq!(s.max_warmup_days, 30);
        assert_eq!(s.min_warmup_days, 6);
        assert_eq!(s.heat_transfer, HeatTransferAlgorithm::Ctf);
    }
}
