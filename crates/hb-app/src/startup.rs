//! Ordered start-up: build a frozen envelope model from an input document.
//!
//! Phases run in a fixed order: blinds, materials, constructions, the
//! construction checks, zones, surfaces (partition mirrors and shading
//! deployment), internal gains, then zone equipment checks. Severe problems
//! are collected rather than returned so every one of them surfaces in a
//! single run; start-up fails at the end if any were found.

use hb_core::{Diagnostic, Diagnostics, Id, Severity, Subject, SurfaceId, ZoneId};
use hb_envelope::{
    BeamReflectanceAccounting, Blind, BoundaryCondition, Construction, GainDeviceType, GasMix,
    GasType, InternalGain, Material, MaterialKind, Model, Roughness, ScreenMaterial,
    SlatOrientation, Surface, SurfaceClass, Zone,
};
use hb_input::{
    BASEBOARD_OBJECT, BeamAccountingDef, BlindDef, BoundaryDef, GainDef, GainKindDef, GasTypeDef,
    InputDocument, MaterialDef, MaterialKindDef, RoughnessDef, SlatOrientationDef,
    SurfaceClassDef, SurfaceDef, validate_document,
};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Regular layers thinner than this (m) draw a warning.
pub const THIN_MATERIAL_LAYER_THRESHOLD: f64 = 0.003;

/// Thermal diffusivity (m2/s) above which a regular layer draws a warning.
pub const HIGH_DIFFUSIVITY_THRESHOLD: f64 = 1.0e-5;

const CONTEXT: &str = "Start-up";

/// A model that passed start-up, with the warnings it produced.
#[derive(Debug, Clone)]
pub struct Startup {
    pub model: Model,
    pub diagnostics: Diagnostics,
}

/// Build the model for `doc`.
///
/// Fails fast on a structurally invalid document. Otherwise every phase
/// runs and all Severe diagnostics are returned together in
/// [`AppError::Startup`].
pub fn build_model(doc: &InputDocument) -> AppResult<Startup> {
    validate_document(doc)?;
    info!(name = %doc.name, "start-up");

    let mut model = Model::new();
    let mut diags = Diagnostics::new();

    add_blinds(&mut model, doc, &mut diags);
    add_materials(&mut model, doc, &mut diags);
    add_constructions(&mut model, doc, &mut diags);

    debug!(count = model.constructions().len(), "checking constructions");
    diags.extend(model.check_all_constructions()?);

    add_zones(&mut model, doc, &mut diags);
    add_surfaces(&mut model, doc, &mut diags)?;
    add_gains(&mut model, doc, &mut diags);
    check_equipment(doc, &mut diags);

    info!(
        severe = diags.error_count(),
        warnings = diags.warning_count(),
        surfaces = model.surfaces().len(),
        constructions = model.constructions().len(),
        "start-up finished"
    );
    if diags.has_errors() {
        return Err(AppError::Startup { diagnostics: diags });
    }
    Ok(Startup {
        model,
        diagnostics: diags,
    })
}

fn note(
    diags: &mut Diagnostics,
    severity: Severity,
    kind: &'static str,
    name: &str,
    message: impl Into<String>,
) {
    diags.push(Diagnostic::new(severity, CONTEXT, message).with_subject(Subject::named(kind, name)));
}

fn severe(diags: &mut Diagnostics, kind: &'static str, name: &str, message: impl Into<String>) {
    note(diags, Severity::Severe, kind, name, message);
}

fn warning(diags: &mut Diagnostics, kind: &'static str, name: &str, message: impl Into<String>) {
    note(diags, Severity::Warning, kind, name, message);
}

// ---- blinds --------------------------------------------------------------

fn add_blinds(model: &mut Model, doc: &InputDocument, diags: &mut Diagnostics) {
    debug!(count = doc.blinds.len(), "blinds");
    for def in &doc.blinds {
        if let Err(e) = model.add_blind(blind_from_def(def)) {
            severe(diags, "Blind", &def.name, e.to_string());
        }
    }
}

fn blind_from_def(def: &BlindDef) -> Blind {
    let mut blind = Blind::new(
        def.name.clone(),
        def.slat_width_m,
        def.slat_separation_m,
        def.slat_thickness_m,
    );
    blind.orientation = match def.orientation {
        SlatOrientationDef::Horizontal => SlatOrientation::Horizontal,
        SlatOrientationDef::Vertical => SlatOrientation::Vertical,
    };
    blind.slat_angle = def.slat_angle_deg;
    blind.min_slat_angle = def.min_slat_angle_deg;
    blind.max_slat_angle = def.max_slat_angle_deg;
    blind
}

// ---- materials -----------------------------------------------------------

fn add_materials(model: &mut Model, doc: &InputDocument, diags: &mut Diagnostics) {
    debug!(count = doc.materials.len(), "materials");
    for def in &doc.materials {
        let material = match material_from_def(def, model) {
            Ok(material) => material,
            Err(message) => {
                severe(diags, "Material", &def.name, message);
                continue;
            }
        };
        sanity_check(&material, diags);
        if let Err(e) = model.add_material(material) {
            severe(diags, "Material", &def.name, e.to_string());
        }
    }
}

/// Warnings for layers that are legal but likely mistyped.
pub fn sanity_check(material: &Material, diags: &mut Diagnostics) {
    if material.kind != MaterialKind::RegularOpaque {
        return;
    }
    if material.resistance.is_none() && material.thickness < THIN_MATERIAL_LAYER_THRESHOLD {
        warning(
            diags,
            "Material",
            &material.name,
            format!(
                "{} \"{}\" is thinner than {THIN_MATERIAL_LAYER_THRESHOLD} m ({} m).",
                material.group(),
                material.name,
                material.thickness
            ),
        );
    }
    if let Some(alpha) = material.thermal_diffusivity()
        && alpha > HIGH_DIFFUSIVITY_THRESHOLD
    {
        warning(
            diags,
            "Material",
            &material.name,
            format!(
                "{} \"{}\" has a thermal diffusivity of {alpha:.3e} m2/s, above {HIGH_DIFFUSIVITY_THRESHOLD:e} m2/s.",
                material.group(),
                material.name
            ),
        );
    }
}

fn material_from_def(def: &MaterialDef, model: &Model) -> Result<Material, String> {
    let kind = match &def.kind {
        MaterialKindDef::RegularOpaque => MaterialKind::RegularOpaque,
        MaterialKindDef::AirGap => MaterialKind::AirGap,
        MaterialKindDef::Shade => MaterialKind::Shade,
        MaterialKindDef::Glass {
            solar_diffusing,
            spectral_data,
        } => MaterialKind::Glass {
            solar_diffusing: *solar_diffusing,
            spectral_data: spectral_data.clone(),
        },
        MaterialKindDef::Gas { gas } => MaterialKind::Gas(GasMix::pure(gas_type(*gas))),
        MaterialKindDef::GasMixture { components } => {
            let mix = GasMix::mixture(
                components
                    .iter()
                    .map(|&(gas, fraction)| (gas_type(gas), fraction))
                    .collect(),
            )
            .map_err(|e| e.to_string())?;
            MaterialKind::GasMixture(mix)
        }
        MaterialKindDef::Blind { blind } => {
            let id = model
                .blind_by_name(blind)
                .ok_or_else(|| format!("Blind \"{blind}\" was not created."))?;
            MaterialKind::Blind(id)
        }
        MaterialKindDef::Screen {
            diameter_to_spacing,
            reflectance,
            reflectance_visible,
            accounting,
        } => {
            let screen =
                ScreenMaterial::new(*diameter_to_spacing, *reflectance, *reflectance_visible)
                    .map_err(|e| e.to_string())?;
            MaterialKind::Screen(screen.with_accounting(beam_accounting(*accounting)))
        }
        MaterialKindDef::EcoRoof => MaterialKind::EcoRoof,
        MaterialKindDef::IrTransparent => MaterialKind::IrTransparent,
        MaterialKindDef::SimpleGlazing => MaterialKind::SimpleGlazing,
        MaterialKindDef::ComplexShade => MaterialKind::ComplexShade,
        MaterialKindDef::ComplexGap => MaterialKind::ComplexGap,
        MaterialKindDef::GlassEquivalentLayer => MaterialKind::GlassEquivalentLayer,
        MaterialKindDef::ShadeEquivalentLayer => MaterialKind::ShadeEquivalentLayer,
        MaterialKindDef::DrapeEquivalentLayer => MaterialKind::DrapeEquivalentLayer,
        MaterialKindDef::BlindEquivalentLayer => MaterialKind::BlindEquivalentLayer,
        MaterialKindDef::ScreenEquivalentLayer => MaterialKind::ScreenEquivalentLayer,
        MaterialKindDef::GapEquivalentLayer => MaterialKind::GapEquivalentLayer,
    };

    let mut material = Material::new(def.name.clone(), kind);
    material.roughness = def.roughness.map(roughness);
    material.thickness = def.thickness_m;
    material.conductivity = def.conductivity_w_per_mk;
    material.density = def.density_kg_per_m3;
    material.specific_heat = def.specific_heat_j_per_kgk;
    material.resistance = def.resistance_m2k_per_w;
    if let Some(thermal) = def.thermal_absorptance {
        material.thermal_absorptance = thermal;
        material.thermal_absorptance_front = thermal;
        material.thermal_absorptance_back = thermal;
    }
    if let Some(solar) = def.solar_absorptance {
        material.solar_absorptance = solar;
    }
    if let Some(visible) = def.visible_absorptance {
        material.visible_absorptance = visible;
    }
    Ok(material)
}

fn gas_type(gas: GasTypeDef) -> GasType {
    match gas {
        GasTypeDef::Air => GasType::Air,
        GasTypeDef::Argon => GasType::Argon,
        GasTypeDef::Krypton => GasType::Krypton,
        GasTypeDef::Xenon => GasType::Xenon,
        GasTypeDef::Custom => GasType::Custom,
    }
}

fn roughness(r: RoughnessDef) -> Roughness {
    match r {
        RoughnessDef::VeryRough => Roughness::VeryRough,
        RoughnessDef::Rough => Roughness::Rough,
        RoughnessDef::MediumRough => Roughness::MediumRough,
        RoughnessDef::MediumSmooth => Roughness::MediumSmooth,
        RoughnessDef::Smooth => Roughness::Smooth,
        RoughnessDef::VerySmooth => Roughness::VerySmooth,
    }
}

fn beam_accounting(a: BeamAccountingDef) -> BeamReflectanceAccounting {
    match a {
        BeamAccountingDef::DoNotModel => BeamReflectanceAccounting::DoNotModel,
        BeamAccountingDef::ModelAsDirectBeam => BeamReflectanceAccounting::ModelAsDirectBeam,
        BeamAccountingDef::ModelAsDiffuse => BeamReflectanceAccounting::ModelAsDiffuse,
    }
}

// ---- constructions -------------------------------------------------------

fn add_constructions(model: &mut Model, doc: &InputDocument, diags: &mut Diagnostics) {
    debug!(count = doc.constructions.len(), "constructions");
    for def in &doc.constructions {
        let mut layers = Vec::with_capacity(def.layers.len());
        let mut missing = false;
        for layer in &def.layers {
            match model.material_by_name(layer) {
                Some(id) => layers.push(id),
                None => {
                    severe(
                        diags,
                        "Construction",
                        &def.name,
                        format!("Layer \"{layer}\" is not a material that was created."),
                    );
                    missing = true;
                }
            }
        }
        if missing {
            continue;
        }
        if let Err(e) = model.add_construction(Construction::new(def.name.clone(), layers)) {
            severe(diags, "Construction", &def.name, e.to_string());
        }
    }
}

// ---- zones ---------------------------------------------------------------

fn add_zones(model: &mut Model, doc: &InputDocument, diags: &mut Diagnostics) {
    debug!(count = doc.zones.len(), "zones");
    for (index, def) in doc.zones.iter().enumerate() {
        // Zone air node i belongs to zone i.
        let mut zone = Zone::new(def.name.clone(), Id::next_for(index));
        zone.multiplier = def.multiplier;
        zone.floor_area = def.floor_area_m2;
        if let Err(e) = model.add_zone(zone) {
            severe(diags, "Zone", &def.name, e.to_string());
        }
    }
}

fn zone_id(model: &Model, name: &str, diags: &mut Diagnostics, owner: &str) -> Option<ZoneId> {
    let id = model.zone_by_name(name);
    if id.is_none() {
        severe(
            diags,
            "Surface",
            owner,
            format!("Zone \"{name}\" was not created."),
        );
    }
    id
}

// ---- surfaces ------------------------------------------------------------

fn surface_class(class: SurfaceClassDef) -> SurfaceClass {
    match class {
        SurfaceClassDef::Wall => SurfaceClass::Wall,
        SurfaceClassDef::Floor => SurfaceClass::Floor,
        SurfaceClassDef::Roof => SurfaceClass::Roof,
        SurfaceClassDef::Door => SurfaceClass::Door,
        SurfaceClassDef::Window => SurfaceClass::Window,
        SurfaceClassDef::GlassDoor => SurfaceClass::GlassDoor,
        SurfaceClassDef::InternalMass => SurfaceClass::InternalMass,
        SurfaceClassDef::Shading => SurfaceClass::Shading,
    }
}

/// Boundaries that need the other surface or zone are set after every
/// surface exists.
fn simple_boundary(boundary: &BoundaryDef) -> BoundaryCondition {
    match boundary {
        BoundaryDef::Ground => BoundaryCondition::Ground,
        BoundaryDef::GroundFCfactor => BoundaryCondition::GroundFCfactor,
        BoundaryDef::OtherSideCoefficients => BoundaryCondition::OtherSideCoefficients,
        BoundaryDef::OtherSideConditionsModel => BoundaryCondition::OtherSideConditionsModel,
        BoundaryDef::Adiabatic => BoundaryCondition::Adiabatic,
        BoundaryDef::External | BoundaryDef::Zone { .. } | BoundaryDef::Surface { .. } => {
            BoundaryCondition::External
        }
    }
}

fn add_surfaces(model: &mut Model, doc: &InputDocument, diags: &mut Diagnostics) -> AppResult<()> {
    debug!(count = doc.surfaces.len(), "surfaces");
    let mut added = Vec::with_capacity(doc.surfaces.len());
    for def in &doc.surfaces {
        if let Some(id) = add_surface(model, def, diags) {
            added.push((id, def));
        }
    }

    for &(id, def) in &added {
        match &def.boundary {
            BoundaryDef::Surface { surface } => match model.surface_by_name(surface) {
                Some(other) => model.set_boundary(id, BoundaryCondition::Interzone(other))?,
                None => severe(
                    diags,
                    "Surface",
                    &def.name,
                    format!("Outside boundary surface \"{surface}\" was not created."),
                ),
            },
            BoundaryDef::Zone { zone } => {
                let Some(zone) = zone_id(model, zone, diags, &def.name) else {
                    continue;
                };
                match model.mirror_surface(id, zone) {
                    Ok(outcome) => {
                        debug!(surface = %def.name, mirror = %outcome.surface, "partition mirror");
                        diags.extend(outcome.diagnostics);
                    }
                    Err(e) => severe(diags, "Surface", &def.name, e.to_string()),
                }
            }
            _ => {}
        }
    }

    for &(id, def) in &added {
        let Some(shading) = &def.shading else {
            continue;
        };
        let Some(material) = model.material_by_name(&shading.material) else {
            severe(
                diags,
                "Surface",
                &def.name,
                format!("Shading material \"{}\" was not created.", shading.material),
            );
            continue;
        };
        match model.deploy_shading(id, material, shading.movable_slats) {
            Ok(outcome) => diags.extend(outcome),
            Err(e) => severe(diags, "Surface", &def.name, e.to_string()),
        }
    }
    Ok(())
}

fn add_surface(model: &mut Model, def: &SurfaceDef, diags: &mut Diagnostics) -> Option<SurfaceId> {
    let zone = zone_id(model, &def.zone, diags, &def.name)?;
    let construction = match &def.construction {
        Some(name) => match model.construction_by_name(name) {
            Some(id) => Some(id),
            None => {
                severe(
                    diags,
                    "Surface",
                    &def.name,
                    format!("Construction \"{name}\" was not created."),
                );
                return None;
            }
        },
        None => None,
    };
    let surface = Surface::new(def.name.clone(), surface_class(def.class), zone, construction);
    let tilt = def.tilt_deg.unwrap_or(surface.tilt);
    let surface = surface
        .with_orientation(def.azimuth_deg, tilt)
        .with_boundary(simple_boundary(&def.boundary));
    match model.add_surface(surface) {
        Ok(id) => Some(id),
        Err(e) => {
            severe(diags, "Surface", &def.name, e.to_string());
            None
        }
    }
}

// ---- internal gains ------------------------------------------------------

fn gain_device(kind: GainKindDef) -> GainDeviceType {
    match kind {
        GainKindDef::People => GainDeviceType::People,
        GainKindDef::Lights => GainDeviceType::Lights,
        GainKindDef::ElectricEquipment => GainDeviceType::ElectricEquipment,
        GainKindDef::GasEquipment => GainDeviceType::GasEquipment,
        GainKindDef::HotWaterEquipment => GainDeviceType::HotWaterEquipment,
        GainKindDef::SteamEquipment => GainDeviceType::SteamEquipment,
        GainKindDef::OtherEquipment => GainDeviceType::OtherEquipment,
        GainKindDef::ZoneBaseboardOutdoorTemperatureControlled => {
            GainDeviceType::ZoneBaseboardOutdoorTemperatureControlled
        }
    }
}

fn add_gains(model: &mut Model, doc: &InputDocument, diags: &mut Diagnostics) {
    debug!(count = doc.gains.len(), "internal gains");
    for def in &doc.gains {
        let Some(zone) = model.zone_by_name(&def.zone) else {
            severe(
                diags,
                gain_device(def.kind).object_type(),
                &def.name,
                format!("Zone \"{}\" was not created.", def.zone),
            );
            continue;
        };
        if let Err(e) = model.add_gain(gain_from_def(def, zone)) {
            severe(diags, gain_device(def.kind).object_type(), &def.name, e.to_string());
        }
    }
}

fn gain_from_def(def: &GainDef, zone: ZoneId) -> InternalGain {
    InternalGain {
        name: def.name.clone(),
        zone,
        device: gain_device(def.kind),
        convective: def.convective_w,
        radiant: def.radiant_w,
        latent: def.latent_w,
    }
}

// ---- zone equipment ------------------------------------------------------

/// Every baseboard must be served by exactly one zone equipment list.
fn check_equipment(doc: &InputDocument, diags: &mut Diagnostics) {
    for zone in &doc.zones {
        for item in &zone.equipment {
            if !item.object_type.eq_ignore_ascii_case(BASEBOARD_OBJECT) {
                warning(
                    diags,
                    "ZoneHVAC:EquipmentList",
                    &zone.name,
                    format!(
                        "Equipment type \"{}\" is not supported and will not be simulated.",
                        item.object_type
                    ),
                );
            }
        }
    }

    for baseboard in &doc.baseboards {
        let serving: Vec<&str> = doc
            .zones
            .iter()
            .filter(|zone| {
                zone.equipment.iter().any(|item| {
                    item.object_type.eq_ignore_ascii_case(BASEBOARD_OBJECT)
                        && item.name.eq_ignore_ascii_case(&baseboard.name)
                })
            })
            .map(|zone| zone.name.as_str())
            .collect();
        match serving.as_slice() {
            [] => warning(
                diags,
                BASEBOARD_OBJECT,
                &baseboard.name,
                "Unit is not on any ZoneHVAC:EquipmentList and will not be simulated.",
            ),
            [_] => {}
            zones => severe(
                diags,
                BASEBOARD_OBJECT,
                &baseboard.name,
                format!(
                    "Unit is on more than one ZoneHVAC:EquipmentList ({}).",
                    zones.join(", ")
                ),
            ),
        }
    }
}
