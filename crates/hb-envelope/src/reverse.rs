//! Reverse constructions for interzone partitions.

use hb_core::{ConstructionId, Diagnostics, SurfaceId, ZoneId};

use crate::construction::{nominal_conductance, nominal_resistance};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::model::Model;
use crate::surface::{BoundaryCondition, Surface};

/// Prefix of synthesised reverse constructions and mirror surfaces.
pub const INTERZONE_PREFIX: &str = "iz-";

#[derive(Debug, Clone, PartialEq)]
pub struct ReverseOutcome {
    pub id: ConstructionId,
    /// `false` when an existing construction already had the reversed layers.
    pub created: bool,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MirrorOutcome {
    pub surface: SurfaceId,
    pub construction: Option<ConstructionId>,
    pub diagnostics: Diagnostics,
}

impl Model {
    /// Construction whose layers are those of `id` in reverse order.
    ///
    /// Reuses the first construction with exactly the reversed layer list (a
    /// single-layer construction is its own reverse). Otherwise appends a
    /// copy named `iz-<name>`, recomputes its nominal R and U and validates
    /// it. Source and result are both marked in use.
    pub fn reverse_of(&mut self, id: ConstructionId) -> EnvelopeResult<ReverseOutcome> {
        let source = self.construction(id)?;
        let reversed: Vec<_> = source.layers.iter().rev().copied().collect();
        self.constructions[id.slot()].in_use = true;

        if let Some(found) = self.constructions.iter().position(|c| c.layers == reversed) {
            self.constructions[found].in_use = true;
            return Ok(ReverseOutcome {
                id: ConstructionId::next_for(found),
                created: false,
                diagnostics: Diagnostics::new(),
            });
        }

        let mut copy = self.constructions[id.slot()].clone();
        copy.name = format!("{INTERZONE_PREFIX}{}", copy.name);
        copy.nominal_r = nominal_resistance(&reversed, &self.materials);
        copy.nominal_u = nominal_conductance(copy.nominal_r);
        copy.layers = reversed;
        copy.in_use = true;
        tracing::debug!(source = %self.constructions[id.slot()].name, name = %copy.name, "reverse construction");

        let new_id = self.push_construction(copy);
        let diagnostics = self.check_and_set_properties(new_id)?;
        Ok(ReverseOutcome {
            id: new_id,
            created: true,
            diagnostics,
        })
    }

    /// Create the other side of a partition whose outside faces `zone`.
    ///
    /// The mirror is named `iz-<name>`, faces the opposite way, uses the
    /// reverse construction, and both surfaces are linked as interzone
    /// partners.
    pub fn mirror_surface(
        &mut self,
        surface: SurfaceId,
        zone: ZoneId,
    ) -> EnvelopeResult<MirrorOutcome> {
        self.zone(zone)?;
        let original = self.surface(surface)?.clone();
        if original.zone == zone {
            return Err(EnvelopeError::InvalidValue {
                what: "interzone partition adjacent to its own zone",
                value: zone.index() as f64,
            });
        }

        let mut diagnostics = Diagnostics::new();
        let construction = match original.construction {
            Some(c) => {
                let outcome = self.reverse_of(c)?;
                diagnostics.extend(outcome.diagnostics);
                Some(outcome.id)
            }
            None => None,
        };

        let mirror = Surface {
            name: format!("{INTERZONE_PREFIX}{}", original.name),
            class: original.class.mirrored(),
            zone,
            construction,
            azimuth: (original.azimuth + 180.0).rem_euclid(360.0),
            tilt: 180.0 - original.tilt,
            boundary: BoundaryCondition::Interzone(surface),
            shading_material: None,
            blind: None,
            screen: None,
        };
        let mirror_id = self.add_surface(mirror)?;
        self.set_boundary(surface, BoundaryCondition::Interzone(mirror_id))?;
        Ok(MirrorOutcome {
            surface: mirror_id,
            construction,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::Construction;
    use crate::material::{Material, MaterialKind};
    use crate::surface::SurfaceClass;
    use crate::zone::Zone;
    use hb_core::{Id, MaterialId};

    fn layer(model: &mut Model, name: &str, r: f64) -> MaterialId {
        model
            .add_material(Material {
                resistance: Some(r),
                ..Material::new(name, MaterialKind::RegularOpaque)
            })
            .unwrap()
    }

    #[test]
    fn creates_reverse_once() {
        let mut model = Model::new();
        let a = layer(&mut model, "A", 0.11);
        let b = layer(&mut model, "B", 1.25);
        let c = layer(&mut model, "C", 0.08);
        let wall = model
            .add_construction(Construction::new("Wall", vec![a, b, c]))
            .unwrap();

        let first = model.reverse_of(wall).unwrap();
        assert!(first.created);
        let rev = model.construction(first.id).unwrap();
        assert_eq!(rev.name, "iz-Wall");
        assert_eq!(rev.layers, vec![c, b, a]);
        assert!(rev.in_use);
        assert!(model.construction(wall).unwrap().in_use);
        assert_eq!(
            rev.nominal_r.to_bits(),
            model.construction(wall).unwrap().nominal_r.to_bits()
        );

        let second = model.reverse_of(wall).unwrap();
        assert!(!second.created);
        assert_eq!(second.id, first.id);
        assert_eq!(model.constructions().len(), 2);

        // reverse of the reverse is the original
        let back = model.reverse_of(first.id).unwrap();
        assert_eq!(back.id, wall);
    }

    #[test]
    fn symmetric_stack_is_its_own_reverse() {
        let mut model = Model::new();
        let a = layer(&mut model, "A", 0.1);
        let b = layer(&mut model, "B", 1.0);
        let sym = model
            .add_construction(Construction::new("Sym", vec![a, b, a]))
            .unwrap();
        let outcome = model.reverse_of(sym).unwrap();
        assert_eq!(outcome.id, sym);
        assert!(!outcome.created);
    }

    #[test]
    fn unknown_construction_is_an_error() {
        let mut model = Model::new();
        assert!(model.reverse_of(Id::from_index(0)).is_err());
    }

    #[test]
    fn mirror_surface_links_partners() {
        let mut model = Model::new();
        let a = layer(&mut model, "A", 0.1);
        let b = layer(&mut model, "B", 1.0);
        let floor_c = model
            .add_construction(Construction::new("Floor", vec![a, b]))
            .unwrap();
        let upstairs = model.add_zone(Zone::new("Up", Id::from_index(0))).unwrap();
        let downstairs = model.add_zone(Zone::new("Down", Id::from_index(1))).unwrap();
        let floor = model
            .add_surface(Surface::new("UpFloor", SurfaceClass::Floor, upstairs, Some(floor_c)))
            .unwrap();

        let outcome = model.mirror_surface(floor, downstairs).unwrap();
        let mirror = model.surface(outcome.surface).unwrap();
        assert_eq!(mirror.name, "iz-UpFloor");
        assert_eq!(mirror.class, SurfaceClass::Roof);
        assert_eq!(mirror.zone, downstairs);
        assert_eq!(mirror.tilt, 0.0);
        assert_eq!(mirror.boundary, BoundaryCondition::Interzone(floor));
        assert_eq!(
            model.surface(floor).unwrap().interzone_partner(),
            Some(outcome.surface)
        );
        let rev = model.construction(outcome.construction.unwrap()).unwrap();
        assert_eq!(rev.layers, vec![b, a]);
    }

    #[test]
    fn mirror_into_own_zone_rejected() {
        let mut model = Model::new();
        let zone = model.add_zone(Zone::new("Z", Id::from_index(0))).unwrap();
        let wall = model
            .add_surface(Surface::new("W", SurfaceClass::Wall, zone, None))
            .unwrap();
        assert!(model.mirror_surface(wall, zone).is_err());
    }
}
