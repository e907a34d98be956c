//! Layered constructions.

use hb_core::{MaterialId, sum_order_independent};

use crate::material::{Material, Roughness};

/// Hard ceiling on layers in any construction.
pub const MAX_LAYERS_IN_CONSTRUCT: usize = 11;
/// Ceiling for windows that are neither BSDF nor equivalent-layer
/// (4 glass + 3 gap + 1 shading device).
pub const MAX_WINDOW_LAYERS: usize = 8;

/// Outside-to-inside stack of material layers.
///
/// Fields below `window_equivalent_layer` are derived; the validator fills
/// them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Construction {
    pub name: String,
    pub layers: Vec<MaterialId>,
    pub window_bsdf: bool,
    pub window_equivalent_layer: bool,

    pub is_window: bool,
    pub is_eco_roof: bool,
    pub is_ir_transparent: bool,
    pub tot_solid_layers: usize,
    pub tot_glass_layers: usize,
    pub inside_absorp_thermal: f64,
    pub outside_absorp_thermal: f64,
    pub inside_absorp_solar: f64,
    pub outside_absorp_solar: f64,
    pub inside_absorp_vis: f64,
    pub outside_absorp_vis: f64,
    pub reflect_vis_diff_back: f64,
    pub outside_roughness: Option<Roughness>,
    pub nominal_r: f64,
    /// `Some(1/R)` iff `nominal_r > 0`.
    pub nominal_u: Option<f64>,
    pub num_ctf_terms: usize,
    pub num_histories: usize,
    pub in_use: bool,
    /// Cleared when the validator reports a severe violation.
    pub valid: bool,
}

impl Construction {
    pub fn new(name: impl Into<String>, layers: Vec<MaterialId>) -> Self {
        Self {
            name: name.into(),
            layers,
            window_bsdf: false,
            window_equivalent_layer: false,
            is_window: false,
            is_eco_roof: false,
            is_ir_transparent: false,
            tot_solid_layers: 0,
            tot_glass_layers: 0,
            inside_absorp_thermal: 0.0,
            outside_absorp_thermal: 0.0,
            inside_absorp_solar: 0.0,
            outside_absorp_solar: 0.0,
            inside_absorp_vis: 0.0,
            outside_absorp_vis: 0.0,
            reflect_vis_diff_back: 0.0,
            outside_roughness: None,
            nominal_r: 0.0,
            nominal_u: None,
            num_ctf_terms: 0,
            num_histories: 0,
            in_use: false,
            valid: true,
        }
    }

    pub fn bsdf(mut self) -> Self {
        self.window_bsdf = true;
        self
    }

    pub fn equivalent_layer(mut self) -> Self {
        self.window_equivalent_layer = true;
        self
    }

    pub fn tot_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn outside_layer(&self) -> Option<MaterialId> {
        self.layers.first().copied()
    }

    pub fn inside_layer(&self) -> Option<MaterialId> {
        self.layers.last().copied()
    }

    /// Recompute nominal R and U from the layers.
    pub(crate) fn set_nominal(&mut self, materials: &[Material]) {
        self.nominal_r = nominal_resistance(&self.layers, materials);
        self.nominal_u = nominal_conductance(self.nominal_r);
    }
}

/// Sum of per-layer resistances.
///
/// The sum is order independent, so a stack and its reverse give the same
/// bits. Unknown ids contribute nothing.
pub fn nominal_resistance(layers: &[MaterialId], materials: &[Material]) -> f64 {
    sum_order_independent(
        layers
            .iter()
            .filter_map(|id| materials.get(id.slot()))
            .map(Material::nominal_resistance),
    )
}

pub fn nominal_conductance(r: f64) -> Option<f64> {
    (r > 0.0).then(|| 1.0 / r)
}
