//! Construction and surface summaries for display.

use hb_core::{ConstructionId, Id};
use hb_envelope::{BoundaryCondition, Model, roughness_name};

use crate::error::{AppError, AppResult};

/// Nominal thermal summary of one construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionReport {
    pub name: String,
    pub layers: Vec<String>,
    pub is_window: bool,
    pub valid: bool,
    pub in_use: bool,
    /// m2-K/W
    pub nominal_r: f64,
    /// W/m2-K; `None` when the nominal R is not positive.
    pub nominal_u: Option<f64>,
    pub outside_roughness: &'static str,
}

/// Nominal U of a surface's construction with still-air films.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceReport {
    pub name: String,
    pub zone: String,
    pub construction: Option<String>,
    pub boundary: String,
    pub u_with_films: f64,
    pub films_valid: bool,
}

pub fn construction_report(model: &Model, id: ConstructionId) -> AppResult<ConstructionReport> {
    let c = model.construction(id)?;
    let layers = c
        .layers
        .iter()
        .map(|&layer| model.material(layer).map(|m| m.name.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ConstructionReport {
        name: c.name.clone(),
        layers,
        is_window: c.is_window,
        valid: c.valid,
        in_use: c.in_use,
        nominal_r: c.nominal_r,
        nominal_u: c.nominal_u,
        outside_roughness: roughness_name(c.outside_roughness),
    })
}

/// Reports for every construction, including synthesised reverses.
pub fn construction_reports(model: &Model) -> AppResult<Vec<ConstructionReport>> {
    (0..model.constructions().len())
        .map(|index| construction_report(model, Id::next_for(index)))
        .collect()
}

pub fn construction_report_by_name(model: &Model, name: &str) -> AppResult<ConstructionReport> {
    let id = model
        .construction_by_name(name)
        .ok_or_else(|| AppError::not_found("Construction", name))?;
    construction_report(model, id)
}

fn boundary_label(model: &Model, boundary: BoundaryCondition) -> AppResult<String> {
    Ok(match boundary {
        BoundaryCondition::Interzone(other) => {
            format!("Surface {}", model.surface(other)?.name)
        }
        other => format!("{other:?}"),
    })
}

pub fn surface_reports(model: &Model) -> AppResult<Vec<SurfaceReport>> {
    let mut reports = Vec::with_capacity(model.surfaces().len());
    for index in 0..model.surfaces().len() {
        let id = Id::next_for(index);
        let s = model.surface(id)?;
        let construction = match s.construction {
            Some(c) => Some(model.construction(c)?.name.clone()),
            None => None,
        };
        let filmed = model.nominal_u_with_films(id)?;
        reports.push(SurfaceReport {
            name: s.name.clone(),
            zone: model.zone(s.zone)?.name.clone(),
            construction,
            boundary: boundary_label(model, s.boundary)?,
            u_with_films: filmed.value,
            films_valid: filmed.valid,
        });
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hb_envelope::{Construction, Material, MaterialKind, Roughness, Surface, SurfaceClass, Zone};

    fn wall_model() -> Model {
        let mut model = Model::new();
        let mut brick = Material::new("Brick", MaterialKind::RegularOpaque);
        brick.roughness = Some(Roughness::Rough);
        brick.thickness = 0.1;
        brick.conductivity = 0.5;
        let brick = model.add_material(brick).unwrap();
        let mut gyp = Material::new("Gyp", MaterialKind::RegularOpaque);
        gyp.thickness = 0.0125;
        gyp.conductivity = 0.25;
        let gyp = model.add_material(gyp).unwrap();
        let wall = model
            .add_construction(Construction::new("Wall", vec![brick, gyp]))
            .unwrap();
        model.check_all_constructions().unwrap();
        let zone = model.add_zone(Zone::new("Z", Id::from_index(0))).unwrap();
        model
            .add_surface(Surface::new("S", SurfaceClass::Wall, zone, Some(wall)))
            .unwrap();
        model
    }

    #[test]
    fn reports_nominal_values() {
        let model = wall_model();
        let report = construction_report_by_name(&model, "wall").unwrap();
        assert_eq!(report.layers, ["Brick", "Gyp"]);
        assert!((report.nominal_r - 0.25).abs() < 1e-12);
        assert!((report.nominal_u.unwrap() - 4.0).abs() < 1e-12);
        assert_eq!(report.outside_roughness, "Rough");
        assert!(report.valid);
        assert!(!report.is_window);
    }

    #[test]
    fn unknown_construction() {
        let model = wall_model();
        assert!(matches!(
            construction_report_by_name(&model, "Roof"),
            Err(AppError::NotFound { what: "Construction", .. })
        ));
    }

    #[test]
    fn surface_u_includes_films() {
        let model = wall_model();
        let reports = surface_reports(&model).unwrap();
        assert_eq!(reports.len(), 1);
        let r = &reports[0];
        assert_eq!(r.zone, "Z");
        assert_eq!(r.boundary, "External");
        assert!(r.films_valid);
        let expected = 1.0 / (0.1197548 + 0.25 + 0.0299387);
        assert!((r.u_with_films - expected).abs() < 1e-9);
    }
}
