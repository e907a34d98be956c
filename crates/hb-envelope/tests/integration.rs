//! Integration tests for hb-envelope.

use hb_envelope::{
    Blind, Construction, GasMix, GasType, Material, MaterialKind, Model, Roughness,
    roughness_name,
};

fn glass() -> Material {
    Material {
        thickness: 0.003,
        conductivity: 0.9,
        thermal_absorptance_front: 0.84,
        thermal_absorptance_back: 0.84,
        ..Material::new(
            "Clear 3mm",
            MaterialKind::Glass {
                solar_diffusing: false,
                spectral_data: None,
            },
        )
    }
}

fn argon(name: &str, thickness: f64) -> Material {
    Material {
        thickness,
        ..Material::new(name, MaterialKind::Gas(GasMix::pure(GasType::Argon)))
    }
}

#[test]
fn opaque_wall_nominal_values() {
    let mut model = Model::new();
    let brick = model
        .add_material(Material {
            roughness: Some(Roughness::Rough),
            thickness: 0.1,
            resistance: Some(0.11),
            ..Material::new("Brick", MaterialKind::RegularOpaque)
        })
        .unwrap();
    let insulation = model
        .add_material(Material {
            roughness: Some(Roughness::MediumRough),
            thickness: 0.05,
            resistance: Some(1.25),
            ..Material::new("Insulation", MaterialKind::RegularOpaque)
        })
        .unwrap();
    let gypsum = model
        .add_material(Material {
            roughness: Some(Roughness::Smooth),
            thickness: 0.012,
            resistance: Some(0.08),
            ..Material::new("Gypsum", MaterialKind::RegularOpaque)
        })
        .unwrap();
    let wall = model
        .add_construction(Construction::new("Ext Wall", vec![brick, insulation, gypsum]))
        .unwrap();

    let diags = model.check_and_set_properties(wall).unwrap();
    assert!(diags.is_empty(), "{diags:?}");

    let c = model.construction(wall).unwrap();
    assert!(!c.is_window);
    assert!(c.valid);
    assert!((c.nominal_r - 1.44).abs() < 1e-12);
    assert!((c.nominal_u.unwrap() - 0.694).abs() < 1e-3);
    assert_eq!(c.outside_roughness, Some(Roughness::Rough));
    assert_eq!(roughness_name(c.outside_roughness), "Rough");
}

fn blind_window(model: &mut Model, inner_gap: f64) -> (hb_core::ConstructionId, hb_core::Diagnostics) {
    let g = model.add_material(glass()).unwrap();
    let outer = model.add_material(argon("Argon 12mm", 0.012)).unwrap();
    let inner = if (inner_gap - 0.012).abs() < 1e-12 {
        outer
    } else {
        model.add_material(argon("Argon inner", inner_gap)).unwrap()
    };
    let blind = model.add_blind(Blind::new("BG Blind", 0.020, 0.018, 0.001)).unwrap();
    let blind_mat = model
        .add_material(Material::new("BG Blind", MaterialKind::Blind(blind)))
        .unwrap();
    let id = model
        .add_construction(Construction::new(
            "Dbl BG Blind",
            vec![g, outer, blind_mat, inner, g],
        ))
        .unwrap();
    let diags = model.check_and_set_properties(id).unwrap();
    (id, diags)
}

#[test]
fn between_glass_blind_accepted() {
    let mut model = Model::new();
    let (id, diags) = blind_window(&mut model, 0.012);
    assert!(diags.is_empty(), "{diags:?}");
    let c = model.construction(id).unwrap();
    assert!(c.is_window);
    assert!(c.valid);
    assert_eq!(c.tot_glass_layers, 2);
    assert_eq!(c.tot_solid_layers, 3);
}

#[test]
fn between_glass_blind_gap_mismatch_rejected() {
    let mut model = Model::new();
    let (id, diags) = blind_window(&mut model, 0.013);
    assert_eq!(diags.error_count(), 1);
    let d = diags.iter().next().unwrap();
    assert!(
        d.details
            .iter()
            .any(|l| l.contains("between-glass gas layers must match in thickness")),
        "{:?}",
        d.details
    );
    assert!(!model.construction(id).unwrap().valid);
}

#[test]
fn reverse_of_single_layer_simple_glazing_is_itself() {
    let mut model = Model::new();
    let sg = model
        .add_material(Material::new("SimpleGlz", MaterialKind::SimpleGlazing))
        .unwrap();
    let win = model
        .add_construction(Construction::new("Simple Window", vec![sg]))
        .unwrap();
    let outcome = model.reverse_of(win).unwrap();
    assert_eq!(outcome.id, win);
    assert!(!outcome.created);
    assert_eq!(model.constructions().len(), 1);
    assert!(model.construction(win).unwrap().in_use);
}

#[test]
fn variable_slat_promotion_clamps_min_angle() {
    let mut model = Model::new();
    let mut blind = Blind::new("Slats", 0.025, 0.020, 0.001);
    blind.min_slat_angle = 0.0;
    let fixed = model.add_blind(blind).unwrap();

    let outcome = model.ensure_variable(fixed).unwrap();
    let twin = model.blind(outcome.id).unwrap();
    let expected = (1.0_f64 / 21.0).asin().to_degrees();
    assert!((twin.min_slat_angle - expected).abs() < 1e-12);
    assert!((twin.min_slat_angle - 2.73).abs() < 0.01);
    assert!(outcome.diagnostics.warning_count() >= 1);
    assert!(!outcome.diagnostics.has_errors());
    // the fixed source is untouched
    assert_eq!(model.blind(fixed).unwrap().min_slat_angle, 0.0);
}

#[test]
fn validating_all_constructions_collects_every_error() {
    let mut model = Model::new();
    let air = model
        .add_material(Material {
            resistance: Some(0.18),
            ..Material::new("Air Space", MaterialKind::AirGap)
        })
        .unwrap();
    let brick = model
        .add_material(Material::new("Brick", MaterialKind::RegularOpaque))
        .unwrap();
    model
        .add_construction(Construction::new("A", vec![air, brick]))
        .unwrap();
    model
        .add_construction(Construction::new("B", vec![brick, air]))
        .unwrap();
    model
        .add_construction(Construction::new("C", vec![brick]))
        .unwrap();
    let diags = model.check_all_constructions().unwrap();
    assert_eq!(diags.error_count(), 2);
    let names: Vec<_> = diags
        .iter()
        .filter_map(|d| d.subject.as_ref().map(|s| s.name.clone()))
        .collect();
    assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
}
