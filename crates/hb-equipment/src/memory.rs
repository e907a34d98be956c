//! In-memory implementations of the service traits.

use std::collections::{HashMap, HashSet};

use hb_core::units::Power;
use hb_core::{ControlledZoneId, Id, NodeId, ScheduleId, ZoneId};

use crate::traits::{
    AirConditions, ControlledZones, NodeTable, OutputRegistry, ReportKind, ScheduleTable,
    SeriesId, ZoneDemand, ZoneEquipmentLists, ZoneSizing, ZoneSizingTable,
};

/// Schedules holding a single value each. Slot 0 is the always-on schedule.
#[derive(Debug, Clone)]
pub struct ConstantSchedules {
    names: Vec<String>,
    values: Vec<f64>,
}

impl Default for ConstantSchedules {
    fn default() -> Self {
        Self {
            names: vec!["ALWAYS ON".to_string()],
            values: vec![1.0],
        }
    }
}

impl ConstantSchedules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, value: f64) -> ScheduleId {
        let id = Id::next_for(self.values.len());
        self.names.push(name.into().to_uppercase());
        self.values.push(value);
        id
    }

    pub fn set(&mut self, id: ScheduleId, value: f64) {
        if let Some(v) = self.values.get_mut(id.slot()) {
            *v = value;
        }
    }
}

impl ScheduleTable for ConstantSchedules {
    fn index_of(&self, name: &str) -> Option<ScheduleId> {
        let upper = name.to_uppercase();
        self.names
            .iter()
            .position(|n| *n == upper)
            .map(|i| Id::from_index(i as u32))
    }

    fn value(&self, id: ScheduleId) -> f64 {
        self.values.get(id.slot()).copied().unwrap_or(0.0)
    }

    fn always_on(&self) -> ScheduleId {
        Id::from_index(0)
    }
}

/// (equipment type, equipment name) pairs found on any zone equipment list.
#[derive(Debug, Clone, Default)]
pub struct EquipmentLists {
    entries: HashSet<(String, String)>,
    filled: bool,
}

impl EquipmentLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, equip_type: &str, equip_name: &str) {
        self.entries
            .insert((equip_type.to_uppercase(), equip_name.to_uppercase()));
    }

    pub fn mark_filled(&mut self) {
        self.filled = true;
    }
}

impl ZoneEquipmentLists for EquipmentLists {
    fn contains(&self, equip_type: &str, equip_name: &str) -> bool {
        self.entries
            .contains(&(equip_type.to_uppercase(), equip_name.to_uppercase()))
    }

    fn inputs_filled(&self) -> bool {
        self.filled
    }
}

#[derive(Debug, Clone, Default)]
pub struct ZoneSizingData {
    zones: HashMap<ZoneId, ZoneSizing>,
}

impl ZoneSizingData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, zone: ZoneId, sizing: ZoneSizing) {
        self.zones.insert(zone, sizing);
    }
}

impl ZoneSizingTable for ZoneSizingData {
    fn design(&self, zone: ZoneId) -> Option<ZoneSizing> {
        self.zones.get(&zone).copied()
    }
}

/// Air node states plus the controlled-zone to node map.
#[derive(Debug, Clone, Default)]
pub struct NodeConditions {
    nodes: HashMap<NodeId, AirConditions>,
    zone_nodes: HashMap<ControlledZoneId, NodeId>,
}

impl NodeConditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, node: NodeId, conditions: AirConditions) {
        self.nodes.insert(node, conditions);
    }

    pub fn control_zone(&mut self, zone: ControlledZoneId, node: NodeId) {
        self.zone_nodes.insert(zone, node);
    }
}

impl NodeTable for NodeConditions {
    fn conditions(&self, node: NodeId) -> Option<AirConditions> {
        self.nodes.get(&node).copied()
    }
}

impl ControlledZones for NodeConditions {
    fn zone_node(&self, zone: ControlledZoneId) -> Option<NodeId> {
        self.zone_nodes.get(&zone).copied()
    }
}

/// Remaining heating loads by zone; zones not listed need nothing.
#[derive(Debug, Clone, Default)]
pub struct ZoneLoads {
    heating: HashMap<ZoneId, Power>,
}

impl ZoneLoads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_heating(&mut self, zone: ZoneId, load: Power) {
        self.heating.insert(zone, load);
    }
}

impl ZoneDemand for ZoneLoads {
    fn remaining_to_heating_setpoint(&self, zone: ZoneId) -> Power {
        self.heating
            .get(&zone)
            .copied()
            .unwrap_or_else(|| hb_core::units::w(0.0))
    }
}

/// A registered report variable and the values recorded against it.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub key: String,
    pub variable: String,
    pub unit: String,
    pub kind: ReportKind,
    pub values: Vec<f64>,
}

/// One reported component size.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingEntry {
    pub object_type: String,
    pub name: String,
    pub description: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: Vec<Series>,
    sizing: Vec<SizingEntry>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(id.0)
    }

    /// Find a series by key and variable name (case-insensitive).
    pub fn find(&self, key: &str, variable: &str) -> Option<&Series> {
        self.series
            .iter()
            .find(|s| s.key.eq_ignore_ascii_case(key) && s.variable.eq_ignore_ascii_case(variable))
    }

    pub fn latest(&self, key: &str, variable: &str) -> Option<f64> {
        self.find(key, variable)?.values.last().copied()
    }

    pub fn sizing(&self) -> &[SizingEntry] {
        &self.sizing
    }
}

impl OutputRegistry for SeriesStore {
    fn register(&mut self, key: &str, variable: &str, unit: &str, kind: ReportKind) -> SeriesId {
        let id = SeriesId(self.series.len());
        self.series.push(Series {
            key: key.to_string(),
            variable: variable.to_string(),
            unit: unit.to_string(),
            kind,
            values: Vec::new(),
        });
        id
    }

    fn record(&mut self, series: SeriesId, value: f64) {
        if let Some(s) = self.series.get_mut(series.0) {
            s.values.push(value);
        }
    }

    fn report_sizing(&mut self, object_type: &str, name: &str, description: &str, value: f64) {
        tracing::info!(object_type, name, description, value, "component sizing");
        self.sizing.push(SizingEntry {
            object_type: object_type.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            value,
        });
    }
}
