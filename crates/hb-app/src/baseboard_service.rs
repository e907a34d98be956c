//! Single-timestep baseboard runs against a document's zone state.
//!
//! The service wires the in-memory collaborator tables from the document
//! (constant schedules, zone equipment lists, zone sizing results, zone air
//! nodes) and drives the electric baseboard adapter one call at a time.

use std::collections::HashMap;

use hb_core::units::{Power, Temperature, degc, hours, raw, w};
use hb_core::{CompIndex, ControlledZoneId, Diagnostics, Id, ZoneId};
use hb_envelope::Model;
use hb_equipment::{
    AirConditions, Baseboard, ConstantSchedules, ElectricBaseboards, EquipmentLists,
    NodeConditions, RunFlags, SeriesStore, SimContext, ZoneLoads, ZoneSizing, ZoneSizingData,
};
use hb_input::{BASEBOARD_OBJECT, InputDocument, InputReader, ObjectTable};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Results of one baseboard call.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseboardStep {
    pub name: String,
    pub zone: String,
    pub power_met: Power,
    pub electric_power: Power,
    pub outlet_temperature: Temperature,
    /// Nominal capacity after sizing (W).
    pub capacity: f64,
    /// Heat delivered over the system timestep (J).
    pub energy: f64,
    /// Electricity used over the system timestep (J).
    pub electric_energy: f64,
}

#[derive(Debug, Clone, Copy)]
struct Served {
    zone: ZoneId,
    controlled: ControlledZoneId,
}

#[derive(Debug)]
pub struct BaseboardService {
    input: ObjectTable,
    schedules: ConstantSchedules,
    lists: EquipmentLists,
    sizing: ZoneSizingData,
    nodes: NodeConditions,
    loads: ZoneLoads,
    output: SeriesStore,
    diagnostics: Diagnostics,
    baseboards: ElectricBaseboards,
    /// Upper-cased unit name to the zone whose list serves it.
    served: HashMap<String, Served>,
    comp_index: HashMap<String, CompIndex>,
    run: RunFlags,
}

impl BaseboardService {
    /// Wire the collaborator tables for `doc` against its start-up `model`.
    pub fn from_document(doc: &InputDocument, model: &Model) -> AppResult<Self> {
        let mut input = ObjectTable::new();
        for object in doc.objects(BASEBOARD_OBJECT) {
            input.push(object);
        }

        let mut schedules = ConstantSchedules::new();
        for schedule in &doc.schedules {
            schedules.add(schedule.name.clone(), schedule.value);
        }

        let mut lists = EquipmentLists::new();
        let mut sizing = ZoneSizingData::new();
        let mut nodes = NodeConditions::new();
        let mut served = HashMap::new();
        let mut controlled = 0;

        for def in &doc.zones {
            let zone = model
                .zone_by_name(&def.name)
                .ok_or_else(|| AppError::not_found("Zone", &def.name))?;
            let node = model.zone(zone)?.node;
            nodes.set(
                node,
                AirConditions {
                    temperature: degc(def.air.temperature_c),
                    humidity_ratio: def.air.humidity_ratio,
                },
            );
            if let Some(s) = def.sizing {
                sizing.insert(
                    zone,
                    ZoneSizing {
                        design_heat_load: w(s.design_heat_load_w),
                        heat_sizing_factor: s.heat_sizing_factor,
                    },
                );
            }
            if def.equipment.is_empty() {
                continue;
            }

            // Controlled zones are numbered in document order.
            let controlled_zone = Id::next_for(controlled);
            controlled += 1;
            nodes.control_zone(controlled_zone, node);
            for item in &def.equipment {
                lists.add(&item.object_type, &item.name);
                if item.object_type.eq_ignore_ascii_case(BASEBOARD_OBJECT) {
                    served.insert(
                        item.name.to_ascii_uppercase(),
                        Served {
                            zone,
                            controlled: controlled_zone,
                        },
                    );
                }
            }
        }
        lists.mark_filled();

        let settings = &doc.settings;
        let run = RunFlags {
            system_timestep: hours(settings.timestep_hours()),
            system_sizing_calc: settings.system_sizing_calc,
            zone_sizing_run_done: settings.do_zone_sizing,
            display_extra_warnings: settings.display_extra_warnings,
        };
        debug!(
            units = input.count(BASEBOARD_OBJECT),
            controlled_zones = controlled,
            "baseboard service ready"
        );

        Ok(Self {
            input,
            schedules,
            lists,
            sizing,
            nodes,
            loads: ZoneLoads::new(),
            output: SeriesStore::new(),
            diagnostics: Diagnostics::new(),
            baseboards: ElectricBaseboards::new(),
            served,
            comp_index: HashMap::new(),
            run,
        })
    }

    /// Run `unit` once against a remaining heating load on its zone.
    pub fn step(&mut self, model: &Model, unit: &str, heating_load: Power) -> AppResult<BaseboardStep> {
        let key = unit.to_ascii_uppercase();
        let served = *self
            .served
            .get(&key)
            .ok_or_else(|| AppError::not_found("Zone equipment list entry for baseboard", unit))?;
        self.loads.set_heating(served.zone, heating_load);

        let mut ctx = SimContext {
            input: &self.input,
            schedules: &self.schedules,
            equipment_lists: &self.lists,
            sizing: &self.sizing,
            nodes: &self.nodes,
            controlled_zones: &self.nodes,
            demand: &self.loads,
            output: &mut self.output,
            diagnostics: &mut self.diagnostics,
            run: self.run,
        };
        let outcome = self.baseboards.simulate(
            &mut ctx,
            unit,
            served.zone,
            served.controlled,
            self.comp_index.get(&key).copied(),
        )?;
        self.comp_index.insert(key, outcome.comp_index);

        let bb = self
            .baseboards
            .unit(outcome.comp_index)
            .ok_or_else(|| AppError::not_found("Baseboard", unit))?;
        let step = BaseboardStep {
            name: bb.name.clone(),
            zone: model.zone(served.zone)?.name.clone(),
            power_met: outcome.power_met,
            electric_power: w(bb.elec_use_rate),
            outlet_temperature: bb.air_outlet_temperature(),
            capacity: bb.capacity(),
            energy: bb.energy,
            electric_energy: bb.elec_use_load,
        };
        info!(
            unit = %step.name,
            zone = %step.zone,
            load = raw::watts(heating_load),
            met = raw::watts(step.power_met),
            "baseboard step"
        );
        Ok(step)
    }

    pub fn unit(&self, name: &str) -> Option<&Baseboard> {
        self.baseboards
            .units()
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(name))
    }

    pub fn output(&self) -> &SeriesStore {
        &self.output
    }

    /// Warnings and errors raised by the adapter so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hb_input::{BaseboardDef, CapacityDef, EquipmentRefDef, ZoneAirDef, ZoneDef};

    fn one_zone(capacity: CapacityDef) -> (InputDocument, Model) {
        let mut doc = InputDocument::new("One zone");
        doc.zones.push(ZoneDef {
            name: "Office".into(),
            multiplier: 1,
            floor_area_m2: None,
            air: ZoneAirDef {
                temperature_c: 18.0,
                humidity_ratio: 0.0,
            },
            sizing: None,
            equipment: vec![EquipmentRefDef {
                object_type: BASEBOARD_OBJECT.into(),
                name: "BB".into(),
            }],
        });
        doc.baseboards.push(BaseboardDef {
            name: "BB".into(),
            availability_schedule: None,
            nominal_capacity: capacity,
            efficiency: 1.0,
        });
        let model = crate::startup::build_model(&doc).unwrap().model;
        (doc, model)
    }

    #[test]
    fn caps_at_capacity_and_caches_index() {
        let (doc, model) = one_zone(CapacityDef::Watts(1000.0));
        let mut service = BaseboardService::from_document(&doc, &model).unwrap();

        let first = service.step(&model, "bb", w(2500.0)).unwrap();
        assert_eq!(first.power_met, w(1000.0));
        assert_eq!(first.zone, "Office");
        assert_eq!(first.capacity, 1000.0);

        let second = service.step(&model, "BB", w(300.0)).unwrap();
        assert_eq!(second.power_met, w(300.0));
        assert_eq!(service.comp_index.len(), 1);
    }

    #[test]
    fn unlisted_unit_is_not_found() {
        let (doc, model) = one_zone(CapacityDef::Watts(1000.0));
        let mut service = BaseboardService::from_document(&doc, &model).unwrap();
        assert!(matches!(
            service.step(&model, "Other", w(100.0)),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn autosize_without_sizing_run_fails() {
        let (doc, model) = one_zone(CapacityDef::AUTOSIZE);
        let mut service = BaseboardService::from_document(&doc, &model).unwrap();
        assert!(matches!(
            service.step(&model, "BB", w(100.0)),
            Err(AppError::Equipment(_))
        ));
    }
}
