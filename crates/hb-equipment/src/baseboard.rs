//! Pure-convective electric baseboard.
//!
//! The unit reads its objects from input on first use, sizes itself once,
//! and each timestep delivers the smaller of the zone's remaining heating
//! load and its nominal capacity into a fixed stream of zone air.
//!
//! ```text
//! Q       = min(load, capacity)          if available and load >= SMALL_LOAD
//! P_elec  = Q / efficiency
//! T_out   = T_in + Q / (cp(w) * m_dot)
//! E       = Q * dt_sys[s]
//! ```

use hb_core::units::{Power, Temperature, Time, degc, raw, w};
use hb_core::{
    ControlledZoneId, CompIndex, Diagnostic, Diagnostics, Id, ScheduleId, Severity, Subject,
    ZoneId,
};
use hb_input::{BASEBOARD_OBJECT, InputReader};
use tracing::{debug, error};
use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;

use crate::common::{AUTO_VS_HARD_SIZING_THRESHOLD, SMALL_LOAD, check_finite, round_sig};
use crate::error::{EquipError, EquipResult};
use crate::psychro::moist_air_cp;
use crate::traits::{
    ControlledZones, NodeTable, OutputRegistry, ReportKind, ScheduleTable, SeriesId, ZoneDemand,
    ZoneEquipmentLists, ZoneSizingTable,
};

/// Air mass flow through the unit (kg/s), standing in for natural convection.
pub const CONVECTIVE_AIR_FLOW: f64 = 0.5;

const GET_INPUT: &str = "GetBaseboardInput";
const INIT: &str = "InitBaseboard";
const SIZE: &str = "SizeBaseboard";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NominalCapacity {
    Autosize,
    Watts(f64),
}

#[derive(Debug, Clone, Copy)]
struct ReportSeries {
    energy: SeriesId,
    power: SeriesId,
    elec_energy: SeriesId,
    elec_power: SeriesId,
}

/// One baseboard unit and its latest results. Temperatures in °C, rates in
/// W, energies in J.
#[derive(Debug, Clone)]
pub struct Baseboard {
    pub name: String,
    /// Upper-cased object type, as listed on zone equipment lists.
    pub equip_type: String,
    pub schedule: ScheduleId,
    pub nominal_capacity: NominalCapacity,
    pub efficiency: f64,
    pub air_inlet_temp: f64,
    pub air_inlet_hum_rat: f64,
    pub air_outlet_temp: f64,
    pub power: f64,
    pub elec_use_rate: f64,
    pub energy: f64,
    pub elec_use_load: f64,
    series: ReportSeries,
    size_pending: bool,
    verify_name: bool,
}

impl Baseboard {
    /// Capacity in W; an unsized autosize unit has none.
    pub fn capacity(&self) -> f64 {
        match self.nominal_capacity {
            NominalCapacity::Watts(w) => w,
            NominalCapacity::Autosize => 0.0,
        }
    }

    pub fn air_outlet_temperature(&self) -> Temperature {
        degc(self.air_outlet_temp)
    }

    fn subject(&self, index: usize) -> Subject {
        Subject::new("Baseboard", Id::from_index(index as u32), &self.name)
    }
}

/// Run-level facts the adapter needs each call.
#[derive(Debug, Clone, Copy)]
pub struct RunFlags {
    pub system_timestep: Time,
    /// The current pass is a system sizing calculation.
    pub system_sizing_calc: bool,
    pub zone_sizing_run_done: bool,
    pub display_extra_warnings: bool,
}

/// Services a baseboard reads from and writes to during one call.
pub struct SimContext<'a> {
    pub input: &'a dyn InputReader,
    pub schedules: &'a dyn ScheduleTable,
    pub equipment_lists: &'a dyn ZoneEquipmentLists,
    pub sizing: &'a dyn ZoneSizingTable,
    pub nodes: &'a dyn NodeTable,
    pub controlled_zones: &'a dyn ControlledZones,
    pub demand: &'a dyn ZoneDemand,
    pub output: &'a mut dyn OutputRegistry,
    pub diagnostics: &'a mut Diagnostics,
    pub run: RunFlags,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimOutcome {
    pub power_met: Power,
    /// Pass back on the next call to skip the name lookup.
    pub comp_index: CompIndex,
}

/// All electric baseboards in the model.
#[derive(Debug, Clone, Default)]
pub struct ElectricBaseboards {
    units: Vec<Baseboard>,
    input_read: bool,
    /// Severe input errors found by the one read; nonzero poisons the set.
    input_errors: usize,
    lists_checked: bool,
}

impl ElectricBaseboards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units(&self) -> &[Baseboard] {
        &self.units
    }

    pub fn unit(&self, index: CompIndex) -> Option<&Baseboard> {
        self.units.get(index.slot())
    }

    pub fn is_loaded(&self) -> bool {
        self.input_read && self.input_errors == 0
    }

    /// Read every baseboard object and register its report series.
    ///
    /// Problems with individual objects are collected as severe diagnostics;
    /// if any were found the whole read fails, no units are kept, and every
    /// later call fails the same way. Input is read once.
    pub fn get_input(
        &mut self,
        input: &dyn InputReader,
        schedules: &dyn ScheduleTable,
        output: &mut dyn OutputRegistry,
        diagnostics: &mut Diagnostics,
    ) -> EquipResult<()> {
        if self.input_read {
            return self.input_status();
        }
        self.input_read = true;
        let mut errors = 0;

        for obj in input.objects(BASEBOARD_OBJECT) {
            let name = obj.alpha(0).to_string();
            if obj.is_alpha_blank(0) {
                diagnostics
                    .severe(GET_INPUT, format!("{BASEBOARD_OBJECT} Name, cannot be blank"));
                errors += 1;
                continue;
            }
            if self.units.iter().any(|u| u.name.eq_ignore_ascii_case(&name)) {
                diagnostics.severe(
                    GET_INPUT,
                    format!("{BASEBOARD_OBJECT} Name, duplicate name={name}"),
                );
                errors += 1;
                continue;
            }

            let schedule = if obj.is_alpha_blank(1) {
                schedules.always_on()
            } else {
                match schedules.index_of(obj.alpha(1)) {
                    Some(id) => id,
                    None => {
                        diagnostics.severe(
                            GET_INPUT,
                            format!(
                                "{BASEBOARD_OBJECT}: invalid {} entered ={} for {}={}",
                                obj.alpha_field_name(1),
                                obj.alpha(1),
                                obj.alpha_field_name(0),
                                name
                            ),
                        );
                        errors += 1;
                        schedules.always_on()
                    }
                }
            };

            let nominal_capacity = if obj.is_autosize(0) {
                NominalCapacity::Autosize
            } else {
                NominalCapacity::Watts(obj.numeric(0))
            };
            let efficiency = if obj.is_numeric_blank(1) {
                1.0
            } else {
                obj.numeric(1)
            };
            if !efficiency.is_finite() || efficiency <= 0.0 || efficiency > 1.0 {
                diagnostics.severe(
                    GET_INPUT,
                    format!(
                        "{BASEBOARD_OBJECT}=\"{name}\", invalid {} = {efficiency}, must be > 0 and <= 1",
                        obj.numeric_field_name(1)
                    ),
                );
                errors += 1;
            }

            let series = ReportSeries {
                energy: output.register(&name, "Baseboard Total Heating Energy", "J", ReportKind::Sum),
                power: output.register(
                    &name,
                    "Baseboard Total Heating Rate",
                    "W",
                    ReportKind::Average,
                ),
                elec_energy: output.register(&name, "Baseboard Electric Energy", "J", ReportKind::Sum),
                elec_power: output.register(
                    &name,
                    "Baseboard Electric Power",
                    "W",
                    ReportKind::Average,
                ),
            };

            self.units.push(Baseboard {
                name,
                equip_type: BASEBOARD_OBJECT.to_uppercase(),
                schedule,
                nominal_capacity,
                efficiency,
                air_inlet_temp: 0.0,
                air_inlet_hum_rat: 0.0,
                air_outlet_temp: 0.0,
                power: 0.0,
                elec_use_rate: 0.0,
                energy: 0.0,
                elec_use_load: 0.0,
                series,
                size_pending: true,
                verify_name: true,
            });
        }

        if errors > 0 {
            self.units.clear();
            self.input_errors = errors;
            return self.input_status().inspect_err(|e| error!("{e}"));
        }
        debug!(count = self.units.len(), "baseboard input read");
        Ok(())
    }

    fn input_status(&self) -> EquipResult<()> {
        if self.input_errors > 0 {
            return Err(EquipError::Input {
                routine: GET_INPUT,
                count: self.input_errors,
            });
        }
        Ok(())
    }

    /// Simulate one unit for the current timestep.
    pub fn simulate(
        &mut self,
        ctx: &mut SimContext<'_>,
        equip_name: &str,
        zone: ZoneId,
        controlled_zone: ControlledZoneId,
        comp_index: Option<CompIndex>,
    ) -> EquipResult<SimOutcome> {
        self.get_input(ctx.input, ctx.schedules, &mut *ctx.output, &mut *ctx.diagnostics)?;

        let slot = self.resolve(equip_name, comp_index).inspect_err(|e| error!("{e}"))?;
        self.init(slot, ctx, zone, controlled_zone)?;

        let load = check_finite(
            raw::watts(ctx.demand.remaining_to_heating_setpoint(zone)),
            "zone heating load",
        )?;
        let available = ctx.schedules.value(self.units[slot].schedule) > 0.0;
        self.calc(slot, load, available);
        self.report(slot, ctx);

        Ok(SimOutcome {
            power_met: w(self.units[slot].power),
            comp_index: Id::from_index(slot as u32),
        })
    }

    fn resolve(&mut self, equip_name: &str, comp_index: Option<CompIndex>) -> EquipResult<usize> {
        let Some(index) = comp_index else {
            return self
                .units
                .iter()
                .position(|u| u.name.eq_ignore_ascii_case(equip_name))
                .ok_or_else(|| EquipError::UnitNotFound {
                    name: equip_name.to_string(),
                });
        };

        let slot = index.slot();
        let Some(unit) = self.units.get_mut(slot) else {
            return Err(EquipError::InvalidCompIndex {
                index: slot + 1,
                count: self.units.len(),
                name: equip_name.to_string(),
            });
        };
        if unit.verify_name {
            if !unit.name.eq_ignore_ascii_case(equip_name) {
                return Err(EquipError::CompIndexNameMismatch {
                    index: slot + 1,
                    name: equip_name.to_string(),
                    stored: unit.name.clone(),
                });
            }
            unit.verify_name = false;
        }
        Ok(slot)
    }

    fn init(
        &mut self,
        slot: usize,
        ctx: &mut SimContext<'_>,
        zone: ZoneId,
        controlled_zone: ControlledZoneId,
    ) -> EquipResult<()> {
        if !self.lists_checked && ctx.equipment_lists.inputs_filled() {
            self.lists_checked = true;
            for (i, unit) in self.units.iter().enumerate() {
                if ctx.equipment_lists.contains(&unit.equip_type, &unit.name) {
                    continue;
                }
                ctx.diagnostics.push(
                    Diagnostic::new(
                        Severity::Severe,
                        INIT,
                        format!(
                            "Unit=[{},{}] is not on any ZoneHVAC:EquipmentList.  It will not be simulated.",
                            unit.equip_type, unit.name
                        ),
                    )
                    .with_subject(unit.subject(i)),
                );
            }
        }

        if !ctx.run.system_sizing_calc && self.units[slot].size_pending {
            self.size(slot, ctx, zone)?;
            self.units[slot].size_pending = false;
        }

        let node = ctx
            .controlled_zones
            .zone_node(controlled_zone)
            .ok_or(EquipError::MissingZoneNode {
                zone: controlled_zone.slot(),
            })?;
        let air = ctx.nodes.conditions(node).ok_or(EquipError::MissingZoneNode {
            zone: controlled_zone.slot(),
        })?;

        let unit = &mut self.units[slot];
        unit.energy = 0.0;
        unit.power = 0.0;
        unit.elec_use_load = 0.0;
        unit.elec_use_rate = 0.0;
        unit.air_inlet_temp = check_finite(raw::celsius(air.temperature), "zone air temperature")?;
        unit.air_inlet_hum_rat = check_finite(air.humidity_ratio, "zone air humidity ratio")?;
        Ok(())
    }

    fn size(&mut self, slot: usize, ctx: &mut SimContext<'_>, zone: ZoneId) -> EquipResult<()> {
        let unit = &mut self.units[slot];
        let autosize = unit.nominal_capacity == NominalCapacity::Autosize;

        if !autosize && !ctx.run.zone_sizing_run_done {
            if unit.capacity() > 0.0 {
                ctx.output.report_sizing(
                    BASEBOARD_OBJECT,
                    &unit.name,
                    "User-Specified Nominal Capacity [W]",
                    unit.capacity(),
                );
            }
            return Ok(());
        }

        let design = ctx.sizing.design(zone).ok_or_else(|| EquipError::SizingUnavailable {
            object_type: BASEBOARD_OBJECT.to_string(),
            name: unit.name.clone(),
        })?;
        let des = raw::watts(design.design_heat_load) * design.heat_sizing_factor;

        if autosize {
            unit.nominal_capacity = NominalCapacity::Watts(des);
            ctx.output.report_sizing(
                BASEBOARD_OBJECT,
                &unit.name,
                "Design Size Nominal Capacity [W]",
                des,
            );
            return Ok(());
        }

        let user = unit.capacity();
        if user > 0.0 && des > 0.0 {
            ctx.output.report_sizing(
                BASEBOARD_OBJECT,
                &unit.name,
                "Design Size Nominal Capacity [W]",
                des,
            );
            ctx.output.report_sizing(
                BASEBOARD_OBJECT,
                &unit.name,
                "User-Specified Nominal Capacity [W]",
                user,
            );
            if ctx.run.display_extra_warnings
                && (des - user).abs() / user > AUTO_VS_HARD_SIZING_THRESHOLD
            {
                ctx.diagnostics.push(
                    Diagnostic::new(
                        Severity::Warning,
                        SIZE,
                        format!(
                            "Potential issue with equipment sizing for {BASEBOARD_OBJECT}=\"{}\".",
                            unit.name
                        ),
                    )
                    .with_subject(unit.subject(slot))
                    .with_detail(format!(
                        "User-Specified Nominal Capacity of {} [W]",
                        round_sig(user, 2)
                    ))
                    .with_detail(format!(
                        "differs from Design Size Nominal Capacity of {} [W]",
                        round_sig(des, 2)
                    ))
                    .with_detail("This may, or may not, indicate mismatched component sizes.")
                    .with_detail(
                        "Verify that the value entered is intended and is consistent with other components.",
                    ),
                );
            }
        }
        Ok(())
    }

    fn calc(&mut self, slot: usize, load: f64, available: bool) {
        let unit = &mut self.units[slot];
        let inlet = unit.air_inlet_temp;
        let cp = moist_air_cp(unit.air_inlet_hum_rat, degc(inlet)).get::<joule_per_kilogram_kelvin>();
        let capacitance = cp * CONVECTIVE_AIR_FLOW;

        if available && load >= SMALL_LOAD {
            let q = load.min(unit.capacity());
            unit.air_outlet_temp = inlet + q / capacitance;
            unit.elec_use_rate = q / unit.efficiency;
            unit.power = q;
        } else {
            unit.air_outlet_temp = inlet;
            unit.elec_use_rate = 0.0;
            unit.power = 0.0;
        }
    }

    fn report(&mut self, slot: usize, ctx: &mut SimContext<'_>) {
        let seconds = raw::seconds(ctx.run.system_timestep);
        let unit = &mut self.units[slot];
        unit.energy = unit.power * seconds;
        unit.elec_use_load = unit.elec_use_rate * seconds;

        ctx.output.record(unit.series.energy, unit.energy);
        ctx.output.record(unit.series.power, unit.power);
        ctx.output.record(unit.series.elec_energy, unit.elec_use_load);
        ctx.output.record(unit.series.elec_power, unit.elec_use_rate);
    }
}
