//! Electric baseboard driven through in-memory services.

use hb_core::units::{Power, degc, hours, raw, w};
use hb_core::{Diagnostics, Id, Severity, ZoneId};
use hb_equipment::*;
use hb_input::{AUTOSIZE, BASEBOARD_OBJECT, InputObject, ObjectTable};

struct Fixture {
    input: ObjectTable,
    schedules: ConstantSchedules,
    lists: EquipmentLists,
    sizing: ZoneSizingData,
    nodes: NodeConditions,
    loads: ZoneLoads,
    output: SeriesStore,
    diagnostics: Diagnostics,
    run: RunFlags,
}

const ZONE: u32 = 0;

fn zone() -> ZoneId {
    Id::from_index(ZONE)
}

fn baseboard(name: &str, schedule: &str, capacity: f64, efficiency: f64) -> InputObject {
    InputObject::new(BASEBOARD_OBJECT)
        .with_alpha("Name", name)
        .with_alpha("Availability Schedule Name", schedule)
        .with_numeric("Nominal Capacity", capacity)
        .with_numeric("Efficiency", efficiency)
}

impl Fixture {
    fn new(objects: Vec<InputObject>) -> Self {
        let mut input = ObjectTable::new();
        let mut lists = EquipmentLists::new();
        for obj in objects {
            lists.add(BASEBOARD_OBJECT, obj.alpha(0));
            input.push(obj);
        }
        lists.mark_filled();

        let mut nodes = NodeConditions::new();
        let node = Id::from_index(7);
        nodes.set(
            node,
            AirConditions {
                temperature: degc(20.0),
                humidity_ratio: 0.008,
            },
        );
        nodes.control_zone(zone(), node);

        Self {
            input,
            schedules: ConstantSchedules::new(),
            lists,
            sizing: ZoneSizingData::new(),
            nodes,
            loads: ZoneLoads::new(),
            output: SeriesStore::new(),
            diagnostics: Diagnostics::new(),
            run: RunFlags {
                system_timestep: hours(0.25),
                system_sizing_calc: false,
                zone_sizing_run_done: false,
                display_extra_warnings: false,
            },
        }
    }

    fn simulate(
        &mut self,
        bb: &mut ElectricBaseboards,
        name: &str,
        load: Power,
        index: Option<hb_core::CompIndex>,
    ) -> EquipResult<SimOutcome> {
        self.loads.set_heating(zone(), load);
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
        bb.simulate(&mut ctx, name, zone(), zone(), index)
    }
}

fn cp_at_zone_air() -> f64 {
    1.00484e3 + 0.008 * 1.85895e3
}

#[test]
fn meets_load_below_capacity() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "", 2000.0, 0.95)]);
    let mut bb = ElectricBaseboards::new();

    let out = fx.simulate(&mut bb, "BB-1", w(1500.0), None).unwrap();
    assert!((raw::watts(out.power_met) - 1500.0).abs() < 1e-9);

    let unit = bb.unit(out.comp_index).unwrap();
    assert!((unit.elec_use_rate - 1578.947368).abs() < 1e-5);
    let expected_outlet = 20.0 + 1500.0 / (cp_at_zone_air() * 0.5);
    assert!((unit.air_outlet_temp - expected_outlet).abs() < 1e-9);
    assert!(
        (raw::celsius(unit.air_outlet_temperature()) - expected_outlet).abs() < 1e-9
    );
}

#[test]
fn energy_is_rate_times_timestep_seconds() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "", 2000.0, 0.95)]);
    let mut bb = ElectricBaseboards::new();
    fx.simulate(&mut bb, "BB-1", w(1500.0), None).unwrap();

    let unit = &bb.units()[0];
    assert_eq!(unit.energy, unit.power * 900.0);
    assert_eq!(unit.elec_use_load, unit.elec_use_rate * 900.0);

    assert_eq!(
        fx.output.latest("BB-1", "Baseboard Total Heating Energy"),
        Some(1500.0 * 900.0)
    );
    assert_eq!(fx.output.latest("BB-1", "Baseboard Total Heating Rate"), Some(1500.0));
    assert_eq!(
        fx.output.find("BB-1", "Baseboard Electric Energy").unwrap().kind,
        ReportKind::Sum
    );
    assert_eq!(
        fx.output.find("BB-1", "Baseboard Electric Power").unwrap().kind,
        ReportKind::Average
    );
}

#[test]
fn load_above_capacity_is_capped() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "", 1000.0, 1.0)]);
    let mut bb = ElectricBaseboards::new();
    let out = fx.simulate(&mut bb, "BB-1", w(2500.0), None).unwrap();
    assert_eq!(raw::watts(out.power_met), 1000.0);
}

#[test]
fn small_load_or_schedule_off_gives_nothing() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "Avail", 2000.0, 1.0)]);
    let avail = fx.schedules.add("Avail", 1.0);
    let mut bb = ElectricBaseboards::new();

    let out = fx.simulate(&mut bb, "BB-1", w(0.5), None).unwrap();
    assert_eq!(raw::watts(out.power_met), 0.0);
    assert_eq!(bb.units()[0].air_outlet_temp, 20.0);

    fx.schedules.set(avail, 0.0);
    let out = fx.simulate(&mut bb, "BB-1", w(800.0), Some(out.comp_index)).unwrap();
    assert_eq!(raw::watts(out.power_met), 0.0);
    assert_eq!(bb.units()[0].elec_use_rate, 0.0);
}

#[test]
fn unknown_unit_is_fatal() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "", 2000.0, 1.0)]);
    let mut bb = ElectricBaseboards::new();
    let err = fx.simulate(&mut bb, "BB-9", w(100.0), None).unwrap_err();
    assert_eq!(err.to_string(), "SimElectricBaseboard: Unit not found=BB-9");
}

#[test]
fn comp_index_is_checked() {
    let mut fx = Fixture::new(vec![
        baseboard("BB-1", "", 2000.0, 1.0),
        baseboard("BB-2", "", 2000.0, 1.0),
    ]);
    let mut bb = ElectricBaseboards::new();

    let out = fx.simulate(&mut bb, "BB-2", w(100.0), None).unwrap();
    assert_eq!(out.comp_index, Id::from_index(1));

    let err = fx
        .simulate(&mut bb, "BB-2", w(100.0), Some(Id::from_index(5)))
        .unwrap_err();
    assert!(matches!(
        err,
        EquipError::InvalidCompIndex {
            index: 6,
            count: 2,
            ..
        }
    ));

    let err = fx
        .simulate(&mut bb, "BB-2", w(100.0), Some(Id::from_index(0)))
        .unwrap_err();
    assert!(matches!(err, EquipError::CompIndexNameMismatch { .. }));

    // Once verified, the index is trusted.
    fx.simulate(&mut bb, "BB-2", w(100.0), Some(out.comp_index))
        .unwrap();
}

#[test]
fn unknown_schedule_aborts_input() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "Nope", 2000.0, 1.0)]);
    let mut bb = ElectricBaseboards::new();
    let err = fx.simulate(&mut bb, "BB-1", w(100.0), None).unwrap_err();
    assert!(matches!(err, EquipError::Input { count: 1, .. }));
    assert_eq!(fx.diagnostics.error_count(), 1);
    let msg = &fx.diagnostics.iter().next().unwrap().message;
    assert!(msg.contains("invalid Availability Schedule Name entered =Nope"));
}

#[test]
fn failed_input_stays_failed() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "Nope", 2000.0, 1.0)]);
    let mut bb = ElectricBaseboards::new();
    assert!(fx.simulate(&mut bb, "BB-1", w(100.0), None).is_err());

    let err = fx.simulate(&mut bb, "BB-1", w(100.0), None).unwrap_err();
    assert!(matches!(err, EquipError::Input { count: 1, .. }));
    assert!(bb.units().is_empty());
    assert!(!bb.is_loaded());
    // Read once; the second call adds no diagnostics.
    assert_eq!(fx.diagnostics.error_count(), 1);
}

#[test]
fn efficiency_out_of_range_aborts_input() {
    for efficiency in [0.0, -0.5, 1.5, f64::NAN] {
        let mut fx = Fixture::new(vec![baseboard("BB-Z", "", 2000.0, efficiency)]);
        let mut bb = ElectricBaseboards::new();
        let err = fx.simulate(&mut bb, "BB-Z", w(1500.0), None).unwrap_err();
        assert!(matches!(err, EquipError::Input { count: 1, .. }), "{efficiency}");
        let msg = &fx.diagnostics.iter().next().unwrap().message;
        assert!(msg.contains("invalid Efficiency"), "{msg}");
    }
}

#[test]
fn duplicate_names_abort_input() {
    let mut fx = Fixture::new(vec![
        baseboard("BB-1", "", 2000.0, 1.0),
        baseboard("bb-1", "", 1000.0, 1.0),
    ]);
    let mut bb = ElectricBaseboards::new();
    assert!(fx.simulate(&mut bb, "BB-1", w(100.0), None).is_err());
    assert_eq!(fx.diagnostics.error_count(), 1);
}

#[test]
fn unit_missing_from_equipment_lists_is_reported() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "", 2000.0, 1.0)]);
    fx.input.push(baseboard("Orphan", "", 500.0, 1.0));
    let mut bb = ElectricBaseboards::new();
    fx.simulate(&mut bb, "BB-1", w(100.0), None).unwrap();

    let severe: Vec<_> = fx
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Severe)
        .collect();
    assert_eq!(severe.len(), 1);
    assert!(severe[0].message.contains("Orphan"));

    // Checked once only.
    fx.simulate(&mut bb, "BB-1", w(100.0), None).unwrap();
    assert_eq!(fx.diagnostics.error_count(), 1);
}

#[test]
fn autosize_uses_zone_design_load() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "", AUTOSIZE, 1.0)]);
    fx.sizing.insert(
        zone(),
        ZoneSizing {
            design_heat_load: w(2000.0),
            heat_sizing_factor: 1.25,
        },
    );
    let mut bb = ElectricBaseboards::new();
    let out = fx.simulate(&mut bb, "BB-1", w(3000.0), None).unwrap();

    assert_eq!(bb.units()[0].nominal_capacity, NominalCapacity::Watts(2500.0));
    assert_eq!(raw::watts(out.power_met), 2500.0);
    let entry = &fx.output.sizing()[0];
    assert_eq!(entry.description, "Design Size Nominal Capacity [W]");
    assert_eq!(entry.value, 2500.0);
}

#[test]
fn autosize_without_sizing_data_fails() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "", AUTOSIZE, 1.0)]);
    let mut bb = ElectricBaseboards::new();
    let err = fx.simulate(&mut bb, "BB-1", w(100.0), None).unwrap_err();
    assert!(matches!(err, EquipError::SizingUnavailable { .. }));
}

#[test]
fn hard_sized_without_sizing_run_reports_user_value() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "", 1800.0, 1.0)]);
    let mut bb = ElectricBaseboards::new();
    fx.simulate(&mut bb, "BB-1", w(100.0), None).unwrap();
    let sizing = fx.output.sizing();
    assert_eq!(sizing.len(), 1);
    assert_eq!(sizing[0].description, "User-Specified Nominal Capacity [W]");
    assert_eq!(sizing[0].value, 1800.0);
}

#[test]
fn hard_sized_mismatch_warns_with_extra_warnings() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "", 1000.0, 1.0)]);
    fx.run.zone_sizing_run_done = true;
    fx.run.display_extra_warnings = true;
    fx.sizing.insert(
        zone(),
        ZoneSizing {
            design_heat_load: w(2000.0),
            heat_sizing_factor: 1.0,
        },
    );
    let mut bb = ElectricBaseboards::new();
    fx.simulate(&mut bb, "BB-1", w(100.0), None).unwrap();

    assert_eq!(fx.output.sizing().len(), 2);
    assert_eq!(fx.diagnostics.warning_count(), 1);
    let warning = fx.diagnostics.iter().next().unwrap();
    assert!(warning.message.contains("Potential issue with equipment sizing"));
    assert_eq!(
        warning.details[0],
        "User-Specified Nominal Capacity of 1000.00 [W]"
    );
    // Capacity stays as entered.
    assert_eq!(bb.units()[0].capacity(), 1000.0);
}

#[test]
fn sizing_skipped_during_system_sizing_calc() {
    let mut fx = Fixture::new(vec![baseboard("BB-1", "", AUTOSIZE, 1.0)]);
    fx.run.system_sizing_calc = true;
    let mut bb = ElectricBaseboards::new();
    let out = fx.simulate(&mut bb, "BB-1", w(100.0), None).unwrap();
    assert_eq!(raw::watts(out.power_met), 0.0);
    assert!(fx.output.sizing().is_empty());
}

#[test]
fn blank_efficiency_defaults_to_one() {
    let obj = InputObject::new(BASEBOARD_OBJECT)
        .with_alpha("Name", "BB-1")
        .with_alpha("Availability Schedule Name", "")
        .with_numeric("Nominal Capacity", 500.0)
        .with_blank_numeric("Efficiency");
    let mut fx = Fixture::new(vec![obj]);
    let mut bb = ElectricBaseboards::new();
    fx.simulate(&mut bb, "BB-1", w(400.0), None).unwrap();
    assert_eq!(bb.units()[0].elec_use_rate, 400.0);
}
