//! Baseboard runs against the demo document's zone state.

use std::path::PathBuf;

use hb_app::{AppError, BaseboardService, build_model, load_document};
use hb_core::units::{degc, raw, w};
use hb_equipment::moist_air_cp;
use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;

fn demo_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop();
    path.pop();
    path.join("demos").join("inputs").join("two_zone_office.yaml")
}

#[test]
fn autosized_unit_meets_load() {
    let doc = load_document(&demo_path()).unwrap();
    let model = build_model(&doc).unwrap().model;
    let mut service = BaseboardService::from_document(&doc, &model).unwrap();

    let step = service
        .step(&model, "Perimeter Baseboard", w(1500.0))
        .unwrap();
    assert_eq!(step.zone, "Perimeter");
    // 2000 W design load times a 1.25 sizing factor.
    assert!((step.capacity - 2500.0).abs() < 1e-9);
    assert!((raw::watts(step.power_met) - 1500.0).abs() < 1e-9);
    assert!((raw::watts(step.electric_power) - 1578.947368).abs() < 1e-5);

    let cp = moist_air_cp(0.008, degc(20.0)).get::<joule_per_kilogram_kelvin>();
    let outlet = 20.0 + 1500.0 / (cp * 0.5);
    assert!((raw::celsius(step.outlet_temperature) - outlet).abs() < 1e-9);

    // Six timesteps per hour.
    assert!((step.energy - 1500.0 * 600.0).abs() < 1e-6);
    assert!((step.electric_energy - 1500.0 / 0.95 * 600.0).abs() < 1e-6);

    let sized = service
        .output()
        .sizing()
        .iter()
        .find(|e| e.name == "Perimeter Baseboard")
        .unwrap();
    assert!((sized.value - 2500.0).abs() < 1e-9);
    let recorded = service
        .output()
        .latest("Perimeter Baseboard", "Baseboard Electric Power")
        .unwrap();
    assert!((recorded - raw::watts(step.electric_power)).abs() < 1e-9);
}

#[test]
fn load_above_capacity_is_capped() {
    let doc = load_document(&demo_path()).unwrap();
    let model = build_model(&doc).unwrap().model;
    let mut service = BaseboardService::from_document(&doc, &model).unwrap();

    let step = service
        .step(&model, "Perimeter Baseboard", w(4000.0))
        .unwrap();
    assert!((raw::watts(step.power_met) - 2500.0).abs() < 1e-9);
    assert!(service.unit("perimeter baseboard").is_some());
}

#[test]
fn schedule_off_delivers_nothing() {
    let mut doc = load_document(&demo_path()).unwrap();
    doc.schedules[0].value = 0.0;
    let model = build_model(&doc).unwrap().model;
    let mut service = BaseboardService::from_document(&doc, &model).unwrap();

    let step = service
        .step(&model, "Perimeter Baseboard", w(1500.0))
        .unwrap();
    assert_eq!(raw::watts(step.power_met), 0.0);
    assert_eq!(raw::celsius(step.outlet_temperature), 20.0);
}

#[test]
fn unknown_unit() {
    let doc = load_document(&demo_path()).unwrap();
    let model = build_model(&doc).unwrap().model;
    let mut service = BaseboardService::from_document(&doc, &model).unwrap();
    assert!(matches!(
        service.step(&model, "Core Baseboard", w(100.0)),
        Err(AppError::NotFound { .. })
    ));
}
