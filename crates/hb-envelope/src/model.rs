//! The envelope arena.

use std::collections::HashMap;

use hb_core::{
    BlindId, ConstructionId, Diagnostics, GainId, Id, MaterialId, ScreenId, SurfaceId, ZoneId,
};

use crate::blind::Blind;
use crate::construction::{Construction, MAX_LAYERS_IN_CONSTRUCT};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::gains::{GainTotals, InternalGain};
use crate::material::{Material, MaterialKind};
use crate::screen::{Screen, ScreenOptics};
use crate::surface::{BoundaryCondition, Surface};
use crate::zone::Zone;

/// Owner of every envelope registry.
///
/// Handles are only minted here, so a handle taken from a model always
/// refers to a live entry of that model. Names are unique per registry and
/// matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(crate) materials: Vec<Material>,
    pub(crate) blinds: Vec<Blind>,
    pub(crate) screens: Vec<Screen>,
    pub(crate) constructions: Vec<Construction>,
    pub(crate) zones: Vec<Zone>,
    pub(crate) surfaces: Vec<Surface>,
    pub(crate) gains: Vec<InternalGain>,
    names: HashMap<(&'static str, String), Id>,
}

pub(crate) fn lookup<'a, T>(items: &'a [T], id: Id, what: &'static str) -> EnvelopeResult<&'a T> {
    items
        .get(id.slot())
        .ok_or(EnvelopeError::UnknownId { what, id })
}

pub(crate) fn lookup_mut<'a, T>(items: &'a mut [T], id: Id, what: &'static str) -> EnvelopeResult<&'a mut T> {
    items
        .get_mut(id.slot())
        .ok_or(EnvelopeError::UnknownId { what, id })
}

fn name_key(what: &'static str, name: &str) -> (&'static str, String) {
    (what, name.trim().to_ascii_uppercase())
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    fn claim_name(&mut self, what: &'static str, name: &str, id: Id) -> EnvelopeResult<()> {
        let key = name_key(what, name);
        if self.names.contains_key(&key) {
            return Err(EnvelopeError::DuplicateName {
                what,
                name: name.to_string(),
            });
        }
        self.names.insert(key, id);
        Ok(())
    }

    fn find_name(&self, what: &'static str, name: &str) -> Option<Id> {
        self.names.get(&name_key(what, name)).copied()
    }

    // ---- materials -------------------------------------------------------

    /// Add a material. Blind materials must reference an existing blind.
    pub fn add_material(&mut self, material: Material) -> EnvelopeResult<MaterialId> {
        material.check_values()?;
        if let MaterialKind::Blind(blind) = material.kind {
            lookup(&self.blinds, blind, "Blind")?;
        }
        let id = Id::next_for(self.materials.len());
        self.claim_name("Material", &material.name, id)?;
        self.materials.push(material);
        Ok(id)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material(&self, id: MaterialId) -> EnvelopeResult<&Material> {
        lookup(&self.materials, id, "Material")
    }

    pub fn material_by_name(&self, name: &str) -> Option<MaterialId> {
        self.find_name("Material", name)
    }

    // ---- blinds ----------------------------------------------------------

    pub fn add_blind(&mut self, blind: Blind) -> EnvelopeResult<BlindId> {
        blind.check_values()?;
        let id = Id::next_for(self.blinds.len());
        self.claim_name("Blind", &blind.name, id)?;
        self.blinds.push(blind);
        Ok(id)
    }

    pub fn blinds(&self) -> &[Blind] {
        &self.blinds
    }

    pub fn blind(&self, id: BlindId) -> EnvelopeResult<&Blind> {
        lookup(&self.blinds, id, "Blind")
    }

    /// Fixed-slat blind registered under `name`; variable twins share the
    /// source name and are reached through [`Blind::variable_twin`].
    pub fn blind_by_name(&self, name: &str) -> Option<BlindId> {
        self.find_name("Blind", name)
    }

    // ---- screens ---------------------------------------------------------

    /// Create a screen record for a screen material, optionally attached to a
    /// surface.
    pub fn add_screen(
        &mut self,
        material: MaterialId,
        surface: Option<SurfaceId>,
    ) -> EnvelopeResult<ScreenId> {
        let mat = self.material(material)?;
        let MaterialKind::Screen(data) = mat.kind else {
            return Err(EnvelopeError::WrongMaterialKind {
                name: mat.name.clone(),
                expected: "screen",
            });
        };
        if let Some(surface) = surface {
            lookup(&self.surfaces, surface, "Surface")?;
        }
        let id = Id::next_for(self.screens.len());
        self.screens.push(Screen {
            material,
            data,
            surface,
            optics: ScreenOptics::default(),
        });
        if let Some(surface) = surface {
            self.surfaces[surface.slot()].screen = Some(id);
        }
        Ok(id)
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn screen(&self, id: ScreenId) -> EnvelopeResult<&Screen> {
        lookup(&self.screens, id, "Screen")
    }

    /// Write access to the per-call optics outputs.
    pub fn screen_optics_mut(&mut self, id: ScreenId) -> EnvelopeResult<&mut ScreenOptics> {
        Ok(&mut lookup_mut(&mut self.screens, id, "Screen")?.optics)
    }

    // ---- constructions ---------------------------------------------------

    /// Add a construction and compute its nominal R and U.
    ///
    /// Layering rules are not checked here; see
    /// [`Model::check_and_set_properties`].
    pub fn add_construction(&mut self, construction: Construction) -> EnvelopeResult<ConstructionId> {
        if construction.layers.len() > MAX_LAYERS_IN_CONSTRUCT {
            return Err(EnvelopeError::TooManyLayers {
                name: construction.name,
                count: construction.layers.len(),
                max: MAX_LAYERS_IN_CONSTRUCT,
            });
        }
        for &layer in &construction.layers {
            self.material(layer)?;
        }
        let id = Id::next_for(self.constructions.len());
        self.claim_name("Construction", &construction.name, id)?;
        Ok(self.push_construction(construction))
    }

    /// Append without a name check; derived constructions may repeat a name.
    pub(crate) fn push_construction(&mut self, mut construction: Construction) -> ConstructionId {
        let id = Id::next_for(self.constructions.len());
        construction.set_nominal(&self.materials);
        self.names
            .entry(name_key("Construction", &construction.name))
            .or_insert(id);
        self.constructions.push(construction);
        id
    }

    pub fn constructions(&self) -> &[Construction] {
        &self.constructions
    }

    pub fn construction(&self, id: ConstructionId) -> EnvelopeResult<&Construction> {
        lookup(&self.constructions, id, "Construction")
    }

    pub fn construction_by_name(&self, name: &str) -> Option<ConstructionId> {
        self.find_name("Construction", name)
    }

    /// Validate every construction, in order.
    pub fn check_all_constructions(&mut self) -> EnvelopeResult<Diagnostics> {
        let mut diags = Diagnostics::new();
        for index in 0..self.constructions.len() {
            diags.extend(self.check_and_set_properties(Id::next_for(index))?);
        }
        Ok(diags)
    }

    // ---- zones -----------------------------------------------------------

    pub fn add_zone(&mut self, zone: Zone) -> EnvelopeResult<ZoneId> {
        let id = Id::next_for(self.zones.len());
        self.claim_name("Zone", &zone.name, id)?;
        self.zones.push(zone);
        Ok(id)
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, id: ZoneId) -> EnvelopeResult<&Zone> {
        lookup(&self.zones, id, "Zone")
    }

    pub fn zone_by_name(&self, name: &str) -> Option<ZoneId> {
        self.find_name("Zone", name)
    }

    // ---- surfaces --------------------------------------------------------

    pub fn add_surface(&mut self, surface: Surface) -> EnvelopeResult<SurfaceId> {
        self.zone(surface.zone)?;
        if let Some(construction) = surface.construction {
            self.construction(construction)?;
        }
        if let BoundaryCondition::Interzone(other) = surface.boundary {
            self.surface(other)?;
        }
        let id = Id::next_for(self.surfaces.len());
        self.claim_name("Surface", &surface.name, id)?;
        self.surfaces.push(surface);
        Ok(id)
    }

    /// Change the outside boundary, e.g. to link partitions added in any order.
    pub fn set_boundary(
        &mut self,
        surface: SurfaceId,
        boundary: BoundaryCondition,
    ) -> EnvelopeResult<()> {
        if let BoundaryCondition::Interzone(other) = boundary {
            self.surface(other)?;
        }
        lookup_mut(&mut self.surfaces, surface, "Surface")?.boundary = boundary;
        Ok(())
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn surface(&self, id: SurfaceId) -> EnvelopeResult<&Surface> {
        lookup(&self.surfaces, id, "Surface")
    }

    pub fn surface_by_name(&self, name: &str) -> Option<SurfaceId> {
        self.find_name("Surface", name)
    }

    /// Deploy a shading device on a window.
    ///
    /// Blinds used with movable slats are swapped for their variable-slat
    /// twin; screens get a per-surface screen record.
    pub fn deploy_shading(
        &mut self,
        surface: SurfaceId,
        material: MaterialId,
        movable_slats: bool,
    ) -> EnvelopeResult<Diagnostics> {
        self.surface(surface)?;
        let mut diags = Diagnostics::new();
        let kind = self.material(material)?.kind.clone();
        match kind {
            MaterialKind::Blind(blind) => {
                let blind = if movable_slats {
                    let outcome = self.ensure_variable(blind)?;
                    diags.extend(outcome.diagnostics);
                    outcome.id
                } else {
                    blind
                };
                self.surfaces[surface.slot()].blind = Some(blind);
            }
            MaterialKind::Screen(_) => {
                self.add_screen(material, Some(surface))?;
            }
            MaterialKind::Shade | MaterialKind::ComplexShade => {}
            _ => {
                return Err(EnvelopeError::WrongMaterialKind {
                    name: self.materials[material.slot()].name.clone(),
                    expected: "shade, blind or screen",
                });
            }
        }
        self.surfaces[surface.slot()].shading_material = Some(material);
        Ok(diags)
    }

    // ---- internal gains --------------------------------------------------

    pub fn add_gain(&mut self, gain: InternalGain) -> EnvelopeResult<GainId> {
        self.zone(gain.zone)?;
        for (what, value) in [
            ("convective gain", gain.convective),
            ("radiant gain", gain.radiant),
            ("latent gain", gain.latent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EnvelopeError::InvalidValue { what, value });
            }
        }
        let id = Id::next_for(self.gains.len());
        self.claim_name(gain.device.object_type(), &gain.name, id)?;
        self.gains.push(gain);
        Ok(id)
    }

    pub fn gains(&self) -> &[InternalGain] {
        &self.gains
    }

    pub fn gain(&self, id: GainId) -> EnvelopeResult<&InternalGain> {
        lookup(&self.gains, id, "InternalGain")
    }

    /// Sum of the design gains of every source in a zone.
    pub fn zone_gains(&self, zone: ZoneId) -> EnvelopeResult<GainTotals> {
        self.zone(zone)?;
        let mut totals = GainTotals::default();
        for gain in self.gains.iter().filter(|g| g.zone == zone) {
            totals.add(gain);
        }
        Ok(totals)
    }
}
