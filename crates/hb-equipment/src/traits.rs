//! Contracts of the simulation services zone equipment reads from and
//! writes to.
//!
//! Equipment never owns this data. Each service is a narrow trait so tests
//! and the application layer can back it with whatever they have.

use hb_core::units::{Power, Temperature};
use hb_core::{ControlledZoneId, NodeId, ScheduleId, ZoneId};

/// Named schedules evaluated at the current timestep.
pub trait ScheduleTable {
    fn index_of(&self, name: &str) -> Option<ScheduleId>;

    /// Current value; unknown ids read as zero.
    fn value(&self, id: ScheduleId) -> f64;

    /// Schedule that is 1.0 at all times.
    fn always_on(&self) -> ScheduleId;
}

/// Zone equipment lists, as declared in input.
pub trait ZoneEquipmentLists {
    fn contains(&self, equip_type: &str, equip_name: &str) -> bool;

    /// True once every list has been read.
    fn inputs_filled(&self) -> bool;
}

/// Design-day results of a zone sizing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSizing {
    pub design_heat_load: Power,
    pub heat_sizing_factor: f64,
}

pub trait ZoneSizingTable {
    fn design(&self, zone: ZoneId) -> Option<ZoneSizing>;
}

/// State of the air at a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirConditions {
    pub temperature: Temperature,
    /// kg water / kg dry air
    pub humidity_ratio: f64,
}

pub trait NodeTable {
    fn conditions(&self, node: NodeId) -> Option<AirConditions>;
}

/// Maps a controlled zone to its zone air node.
pub trait ControlledZones {
    fn zone_node(&self, zone: ControlledZoneId) -> Option<NodeId>;
}

/// Load still needed to bring a zone to its heating setpoint.
pub trait ZoneDemand {
    fn remaining_to_heating_setpoint(&self, zone: ZoneId) -> Power;
}

/// Handle of a registered report series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(pub usize);

/// How values of a series aggregate over a reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sum,
    Average,
}

pub trait OutputRegistry {
    fn register(&mut self, key: &str, variable: &str, unit: &str, kind: ReportKind) -> SeriesId;

    fn record(&mut self, series: SeriesId, value: f64);

    /// Record a component size, e.g. "Design Size Nominal Capacity [W]".
    fn report_sizing(&mut self, object_type: &str, name: &str, description: &str, value: f64);
}
