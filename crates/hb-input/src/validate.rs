//! Document validation: unique names, resolvable references, value ranges.
//!
//! Runs before start-up so the model builder can assume every name it looks
//! up exists. Checks stop at the first problem.

use std::collections::HashSet;

use crate::reader::BASEBOARD_OBJECT;
use crate::schema::{
    BaseboardDef, BlindDef, BoundaryDef, CapacityDef, InputDocument, LATEST_VERSION, MaterialDef,
    MaterialKindDef, SurfaceClassDef, SurfaceDef, ZoneDef,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Missing reference: {name} in {context}")]
    MissingReference { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Case-insensitive set of the names declared in one section.
struct Names(HashSet<String>);

impl Names {
    fn collect<'a>(
        names: impl IntoIterator<Item = &'a str>,
        context: &str,
    ) -> Result<Self, ValidationError> {
        let mut set = HashSet::new();
        for name in names {
            if !set.insert(name.to_uppercase()) {
                return Err(ValidationError::DuplicateName {
                    name: name.to_string(),
                    context: context.to_string(),
                });
            }
        }
        Ok(Self(set))
    }

    fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_uppercase())
    }

    fn require(&self, name: &str, context: impl FnOnce() -> String) -> Result<(), ValidationError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(ValidationError::MissingReference {
                name: name.to_string(),
                context: context(),
            })
        }
    }
}

pub fn validate_document(doc: &InputDocument) -> Result<(), ValidationError> {
    if doc.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: doc.version,
        });
    }
    doc.settings.validate()?;

    let blinds = Names::collect(doc.blinds.iter().map(|b| b.name.as_str()), "blinds")?;
    let materials = Names::collect(doc.materials.iter().map(|m| m.name.as_str()), "materials")?;
    let constructions = Names::collect(
        doc.constructions.iter().map(|c| c.name.as_str()),
        "constructions",
    )?;
    let zones = Names::collect(doc.zones.iter().map(|z| z.name.as_str()), "zones")?;
    let surfaces = Names::collect(doc.surfaces.iter().map(|s| s.name.as_str()), "surfaces")?;
    Names::collect(doc.gains.iter().map(|g| g.name.as_str()), "gains")?;
    let schedules = Names::collect(doc.schedules.iter().map(|s| s.name.as_str()), "schedules")?;
    let baseboards = Names::collect(doc.baseboards.iter().map(|b| b.name.as_str()), "baseboards")?;

    for blind in &doc.blinds {
        validate_blind(blind)?;
    }
    for material in &doc.materials {
        validate_material(material, &blinds)?;
    }
    for construction in &doc.constructions {
        if construction.layers.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("construction '{}' layers", construction.name),
                value: "[]".to_string(),
                reason: "at least one layer is required".to_string(),
            });
        }
        for layer in &construction.layers {
            materials.require(layer, || format!("construction '{}' layers", construction.name))?;
        }
    }
    for zone in &doc.zones {
        validate_zone(zone, &baseboards)?;
    }
    for surface in &doc.surfaces {
        validate_surface(surface, &zones, &constructions, &surfaces, &materials)?;
    }
    for gain in &doc.gains {
        zones.require(&gain.zone, || format!("gain '{}' zone", gain.name))?;
        for (field, value) in [
            ("convective_w", gain.convective_w),
            ("radiant_w", gain.radiant_w),
            ("latent_w", gain.latent_w),
        ] {
            non_negative_finite(value, || format!("gain '{}' {field}", gain.name))?;
        }
    }
    for schedule in &doc.schedules {
        if !schedule.value.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("schedule '{}' value", schedule.name),
                value: schedule.value.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }
    for baseboard in &doc.baseboards {
        validate_baseboard(baseboard, &schedules)?;
    }

    Ok(())
}

fn validate_blind(blind: &BlindDef) -> Result<(), ValidationError> {
    for (field, value) in [
        ("slat_width_m", blind.slat_width_m),
        ("slat_separation_m", blind.slat_separation_m),
        ("slat_thickness_m", blind.slat_thickness_m),
    ] {
        positive_finite(value, || format!("blind '{}' {field}", blind.name))?;
    }
    for (field, value) in [
        ("slat_angle_deg", blind.slat_angle_deg),
        ("min_slat_angle_deg", blind.min_slat_angle_deg),
        ("max_slat_angle_deg", blind.max_slat_angle_deg),
    ] {
        in_range(value, 0.0, 180.0, || format!("blind '{}' {field}", blind.name))?;
    }
    Ok(())
}

fn validate_material(material: &MaterialDef, blinds: &Names) -> Result<(), ValidationError> {
    let name = &material.name;
    for (field, value) in [
        ("thickness_m", material.thickness_m),
        ("conductivity_w_per_mk", material.conductivity_w_per_mk),
        ("density_kg_per_m3", material.density_kg_per_m3),
        ("specific_heat_j_per_kgk", material.specific_heat_j_per_kgk),
    ] {
        non_negative_finite(value, || format!("material '{name}' {field}"))?;
    }
    if let Some(r) = material.resistance_m2k_per_w {
        positive_finite(r, || format!("material '{name}' resistance_m2k_per_w"))?;
    }
    for (field, value) in [
        ("thermal_absorptance", material.thermal_absorptance),
        ("solar_absorptance", material.solar_absorptance),
        ("visible_absorptance", material.visible_absorptance),
    ] {
        if let Some(v) = value {
            in_range(v, 0.0, 1.0, || format!("material '{name}' {field}"))?;
        }
    }

    match &material.kind {
        MaterialKindDef::Blind { blind } => {
            blinds.require(blind, || format!("material '{name}' blind"))?;
        }
        MaterialKindDef::Screen {
            diameter_to_spacing,
            reflectance,
            reflectance_visible,
            ..
        } => {
            let gamma = *diameter_to_spacing;
            if !gamma.is_finite() || gamma <= 0.0 || gamma >= 1.0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("material '{name}' diameter_to_spacing"),
                    value: gamma.to_string(),
                    reason: "must be in (0, 1)".to_string(),
                });
            }
            for (field, value) in [
                ("reflectance", *reflectance),
                ("reflectance_visible", *reflectance_visible),
            ] {
                if !value.is_finite() || !(0.0..1.0).contains(&value) {
                    return Err(ValidationError::InvalidValue {
                        field: format!("material '{name}' {field}"),
                        value: value.to_string(),
                        reason: "must be in [0, 1)".to_string(),
                    });
                }
            }
        }
        MaterialKindDef::GasMixture { components } => {
            if components.is_empty() || components.len() > 5 {
                return Err(ValidationError::InvalidValue {
                    field: format!("material '{name}' components"),
                    value: components.len().to_string(),
                    reason: "between 1 and 5 gases are allowed".to_string(),
                });
            }
            for (_, fraction) in components {
                in_range(*fraction, 0.0, 1.0, || format!("material '{name}' gas fraction"))?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_zone(zone: &ZoneDef, baseboards: &Names) -> Result<(), ValidationError> {
    if zone.multiplier == 0 {
        return Err(ValidationError::InvalidValue {
            field: format!("zone '{}' multiplier", zone.name),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if let Some(area) = zone.floor_area_m2 {
        positive_finite(area, || format!("zone '{}' floor_area_m2", zone.name))?;
    }
    if !zone.air.temperature_c.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("zone '{}' air temperature_c", zone.name),
            value: zone.air.temperature_c.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    non_negative_finite(zone.air.humidity_ratio, || {
        format!("zone '{}' air humidity_ratio", zone.name)
    })?;
    if let Some(sizing) = &zone.sizing {
        non_negative_finite(sizing.design_heat_load_w, || {
            format!("zone '{}' sizing design_heat_load_w", zone.name)
        })?;
        positive_finite(sizing.heat_sizing_factor, || {
            format!("zone '{}' sizing heat_sizing_factor", zone.name)
        })?;
    }
    for equipment in &zone.equipment {
        if equipment.object_type.eq_ignore_ascii_case(BASEBOARD_OBJECT) {
            baseboards.require(&equipment.name, || format!("zone '{}' equipment", zone.name))?;
        }
    }
    Ok(())
}

fn validate_surface(
    surface: &SurfaceDef,
    zones: &Names,
    constructions: &Names,
    surfaces: &Names,
    materials: &Names,
) -> Result<(), ValidationError> {
    let name = &surface.name;
    zones.require(&surface.zone, || format!("surface '{name}' zone"))?;
    match &surface.construction {
        Some(c) => constructions.require(c, || format!("surface '{name}' construction"))?,
        None if surface.class != SurfaceClassDef::Shading => {
            return Err(ValidationError::InvalidValue {
                field: format!("surface '{name}' construction"),
                value: "(none)".to_string(),
                reason: "required for heat transfer surfaces".to_string(),
            });
        }
        None => {}
    }
    if !surface.azimuth_deg.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("surface '{name}' azimuth_deg"),
            value: surface.azimuth_deg.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    if let Some(tilt) = surface.tilt_deg {
        in_range(tilt, 0.0, 180.0, || format!("surface '{name}' tilt_deg"))?;
    }
    match &surface.boundary {
        BoundaryDef::Zone { zone } => {
            zones.require(zone, || format!("surface '{name}' boundary zone"))?;
            if zone.eq_ignore_ascii_case(&surface.zone) {
                return Err(ValidationError::InvalidValue {
                    field: format!("surface '{name}' boundary zone"),
                    value: zone.clone(),
                    reason: "must differ from the surface's own zone".to_string(),
                });
            }
        }
        BoundaryDef::Surface { surface: other } => {
            surfaces.require(other, || format!("surface '{name}' boundary surface"))?;
            if other.eq_ignore_ascii_case(name) {
                return Err(ValidationError::InvalidValue {
                    field: format!("surface '{name}' boundary surface"),
                    value: other.clone(),
                    reason: "a surface cannot be its own other side".to_string(),
                });
            }
        }
        _ => {}
    }
    if let Some(shading) = &surface.shading {
        materials.require(&shading.material, || format!("surface '{name}' shading material"))?;
    }
    Ok(())
}

fn validate_baseboard(baseboard: &BaseboardDef, schedules: &Names) -> Result<(), ValidationError> {
    let name = &baseboard.name;
    if let Some(schedule) = &baseboard.availability_schedule
        && !schedule.trim().is_empty()
    {
        schedules.require(schedule, || format!("baseboard '{name}' availability_schedule"))?;
    }
    if let CapacityDef::Watts(w) = baseboard.nominal_capacity {
        positive_finite(w, || format!("baseboard '{name}' nominal_capacity"))?;
    }
    let eff = baseboard.efficiency;
    if !eff.is_finite() || eff <= 0.0 || eff > 1.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("baseboard '{name}' efficiency"),
            value: eff.to_string(),
            reason: "must be in (0, 1]".to_string(),
        });
    }
    Ok(())
}

fn positive_finite(value: f64, field: impl FnOnce() -> String) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field(),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn non_negative_finite(value: f64, field: impl FnOnce() -> String) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field(),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}

fn in_range(
    value: f64,
    lo: f64,
    hi: f64,
    field: impl FnOnce() -> String,
) -> Result<(), ValidationError> {
    if !value.is_finite() || value < lo || value > hi {
        return Err(ValidationError::InvalidValue {
            field: field(),
            value: value.to_string(),
            reason: format!("must be in [{lo}, {hi}]"),
        });
    }
    Ok(())
}
