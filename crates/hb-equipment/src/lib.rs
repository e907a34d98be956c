//! hb-equipment: zone equipment driven by the heat balance.
//!
//! Provides:
//! - Service traits equipment consumes (schedules, nodes, sizing, demand, reporting)
//! - In-memory implementations of those services
//! - Moist-air specific heat
//! - The electric baseboard adapter
//!
//! # Example
//!
//! ```
//! use hb_core::units::{degc, hours, w};
//! use hb_core::{Diagnostics, Id};
//! use hb_equipment::*;
//! use hb_input::{BASEBOARD_OBJECT, InputObject, ObjectTable};
//!
//! let mut input = ObjectTable::new();
//! input.push(
//!     InputObject::new(BASEBOARD_OBJECT)
//!         .with_alpha("Name", "BB")
//!         .with_alpha("Availability Schedule Name", "")
//!         .with_numeric("Nominal Capacity", 1000.0)
//!         .with_numeric("Efficiency", 1.0),
//! );
//! let zone = Id::from_index(0);
//! let node = Id::from_index(0);
//! let mut nodes = NodeConditions::new();
//! nodes.set(node, AirConditions { temperature: degc(20.0), humidity_ratio: 0.0 });
//! nodes.control_zone(zone, node);
//! let mut loads = ZoneLoads::new();
//! loads.set_heating(zone, w(400.0));
//! let mut lists = EquipmentLists::new();
//! lists.add(BASEBOARD_OBJECT, "BB");
//! lists.mark_filled();
//! let mut output = SeriesStore::new();
//! let mut diagnostics = Diagnostics::new();
//! let mut ctx = SimContext {
//!     input: &input,
//!     schedules: &ConstantSchedules::new(),
//!     equipment_lists: &lists,
//!     sizing: &ZoneSizingData::new(),
//!     nodes: &nodes,
//!     controlled_zones: &nodes,
//!     demand: &loads,
//!     output: &mut output,
//!     diagnostics: &mut diagnostics,
//!     run: RunFlags {
//!         system_timestep: hours(0.25),
//!         system_sizing_calc: false,
//!         zone_sizing_run_done: false,
//!         display_extra_warnings: false,
//!     },
//! };
//! let mut baseboards = ElectricBaseboards::new();
//! let out = baseboards.simulate(&mut ctx, "BB", zone, zone, None).unwrap();
//! assert_eq!(out.power_met, w(400.0));
//! ```

pub mod baseboard;
pub mod common;
pub mod error;
pub mod memory;
pub mod psychro;
pub mod traits;

// Re-exports
pub use baseboard::{
    Baseboard, CONVECTIVE_AIR_FLOW, ElectricBaseboards, NominalCapacity, RunFlags, SimContext,
    SimOutcome,
};
pub use error::{EquipError, EquipResult};
pub use memory::{
    ConstantSchedules, EquipmentLists, NodeConditions, Series, SeriesStore, SizingEntry,
    ZoneLoads, ZoneSizingData,
};
pub use psychro::moist_air_cp;
pub use traits::{
    AirConditions, ControlledZones, NodeTable, OutputRegistry, ReportKind, ScheduleTable,
    SeriesId, ZoneDemand, ZoneEquipmentLists, ZoneSizing, ZoneSizingTable,
};
