//! Construction validation.
//!
//! Checks the layering rules of a construction, classifies it (opaque,
//! window, BSDF, equivalent-layer, ecoroof, IR-transparent) and fills in its
//! derived properties. Rule violations never abort: each one becomes a
//! Severe diagnostic tagged with the construction, and the construction is
//! marked invalid.

use hb_core::{ConstructionId, Diagnostic, Diagnostics, Severity, Subject};

use crate::blind::Blind;
use crate::construction::{Construction, MAX_WINDOW_LAYERS};
use crate::error::EnvelopeResult;
use crate::material::{Material, MaterialGroup, MaterialKind};
use crate::model::{Model, lookup, lookup_mut};

const CONTEXT: &str = "CheckAndSetConstructionProperties";

/// Flanking gas layers of a between-glass shade may differ by this much (m).
pub const GAP_THICKNESS_TOLERANCE: f64 = 0.0005;

/// Rules printed with every general layering violation.
pub const WINDOW_LAYERING_RULES: [&str; 16] = [
    "  For multi-layer window constructions the following rules apply:",
    "    --The first and last layer must be a solid layer (glass or shade/screen/blind),",
    "    --Adjacent glass layers must be separated by one and only one gas layer,",
    "    --Adjacent layers must not be of the same type,",
    "    --Only one shade/screen/blind layer is allowed,",
    "    --An exterior shade/screen/blind must be the first layer,",
    "    --An interior shade/blind must be the last layer,",
    "    --An interior screen is not allowed,",
    "    --For an exterior shade/screen/blind or interior shade/blind, there should not be a gas layer",
    "    ----between the shade/screen/blind and adjacent glass,",
    "    --A between-glass screen is not allowed,",
    "    --A between-glass shade/blind is allowed only for double and triple glazing,",
    "    --A between-glass shade/blind must have adjacent gas layers of the same type and width,",
    "    --For triple glazing the between-glass shade/blind must be between the two inner glass layers,",
    "    --The slat width of a between-glass blind must be less than the sum of the widths",
    "    ----of the gas layers adjacent to the blind.",
];

impl Model {
    /// Check a construction's layering and set its derived properties.
    ///
    /// Returns the diagnostics raised for this construction; the
    /// construction's `valid` flag is cleared if any of them is Severe.
    pub fn check_and_set_properties(&mut self, id: ConstructionId) -> EnvelopeResult<Diagnostics> {
        let Model {
            materials,
            blinds,
            constructions,
            ..
        } = self;
        let construction = lookup_mut(constructions, id, "Construction")?;
        let layers = construction
            .layers
            .iter()
            .map(|&layer| lookup(materials, layer, "Material"))
            .collect::<EnvelopeResult<Vec<&Material>>>()?;

        let mut check = Check {
            subject: Subject::new("Construction", id, construction.name.clone()),
            diags: Diagnostics::new(),
        };
        check.run(construction, &layers, blinds);
        construction.valid = !check.diags.has_errors();
        Ok(check.diags)
    }
}

struct Check {
    subject: Subject,
    diags: Diagnostics,
}

impl Check {
    fn severe(&mut self, message: String, details: &[String]) {
        let mut diagnostic =
            Diagnostic::new(Severity::Severe, CONTEXT, message).with_subject(self.subject.clone());
        diagnostic.details.extend(details.iter().cloned());
        self.diags.push(diagnostic);
    }

    fn run(&mut self, c: &mut Construction, layers: &[&Material], blinds: &[Blind]) {
        let n = layers.len();
        if n == 0 {
            return;
        }
        let groups: Vec<MaterialGroup> = layers.iter().map(|m| m.group()).collect();
        let outside = layers[0];
        let inside = layers[n - 1];

        c.inside_absorp_vis = inside.visible_absorptance;
        c.inside_absorp_solar = inside.solar_absorptance;
        // Opaque value; windows leave it alone downstream.
        c.reflect_vis_diff_back = 1.0 - inside.visible_absorptance;
        c.outside_absorp_vis = outside.visible_absorptance;
        c.outside_absorp_solar = outside.solar_absorptance;
        c.tot_solid_layers = 0;
        c.tot_glass_layers = 0;
        c.is_eco_roof = false;
        c.is_ir_transparent = false;
        c.is_window = groups.iter().any(|g| g.is_window_class());

        // Layer whose back face is the inside of the construction.
        let mut inside_index = Some(n - 1);

        if c.is_window {
            if !self.check_window(c, layers, &groups, blinds, &mut inside_index) {
                return;
            }
        } else {
            c.inside_absorp_thermal = inside.thermal_absorptance;
            c.outside_absorp_thermal = outside.thermal_absorptance;
        }

        c.outside_roughness = outside.roughness;
        self.check_extremes(c, layers, &groups, inside_index);
    }

    /// Window rules. Returns `false` for BSDF and equivalent-layer windows,
    /// whose inner structure is checked by their own models.
    fn check_window(
        &mut self,
        c: &mut Construction,
        layers: &[&Material],
        groups: &[MaterialGroup],
        blinds: &[Blind],
        inside_index: &mut Option<usize>,
    ) -> bool {
        use MaterialGroup as G;

        let n = layers.len();
        let name = c.name.clone();
        c.num_ctf_terms = 0;
        c.num_histories = 0;

        let mut wrong_layering = false;
        let mut reasons: Vec<String> = Vec::new();

        if groups.iter().any(|g| !g.is_window_class()) {
            self.severe(
                format!(
                    "Error: Window construction={name} has materials other than glass, gas, shade, \
                     screen, blind, complex shading, complex gap, or simple system."
                ),
                &[],
            );
        } else if n > MAX_WINDOW_LAYERS && !c.window_bsdf && !c.window_equivalent_layer {
            self.severe(
                format!(
                    "{CONTEXT}: Window construction={name} has too many layers \
                     (max of 8 allowed -- 4 glass + 3 gap + 1 shading device)."
                ),
                &[],
            );
        } else if n == 1
            && matches!(
                groups[0],
                G::Shade | G::Gas | G::GasMixture | G::Blind | G::Screen | G::ComplexShade | G::ComplexGap
            )
        {
            self.severe(
                format!(
                    "{CONTEXT}: The single-layer window construction={name} has a gas, complex gap, \
                     shade, complex shade, screen or blind material; it should be glass of simple \
                     glazing system."
                ),
                &[],
            );
        }

        let glass = groups.iter().filter(|g| g.is_glass()).count();
        let shading = groups.iter().filter(|g| g.is_shading()).count();
        if groups.windows(2).any(|pair| pair[0] == pair[1]) {
            wrong_layering = true;
            reasons.push("adjacent layers are of the same type".to_string());
        }

        if c.window_bsdf {
            c.tot_glass_layers = glass;
            c.tot_solid_layers = glass + shading;
        }
        if c.window_bsdf || c.window_equivalent_layer {
            c.inside_absorp_thermal = layers[n - 1].thermal_absorptance_back;
            c.outside_absorp_thermal = layers[0].thermal_absorptance_front;
            return false;
        }

        if groups[0].is_gas_fill() || groups[n - 1].is_gas_fill() {
            wrong_layering = true;
            reasons.push("a gas layer is the first or last layer".to_string());
        }
        if shading > 1 {
            wrong_layering = true;
            reasons.push(format!("{shading} shade/screen/blind layers"));
        }

        if shading > 0 {
            if let Some(diffusing) = layers.iter().find(|m| m.is_solar_diffusing()) {
                self.severe(
                    format!("{CONTEXT}: Window construction={name}"),
                    &[format!(
                        "has diffusing glass={} and a shade, screen or blind layer.",
                        diffusing.name
                    )],
                );
            }
        }

        if glass > 1 {
            let mut glass_seen = 0;
            for (layer, group) in layers.iter().zip(groups) {
                if *group != G::Glass {
                    continue;
                }
                glass_seen += 1;
                if glass_seen < glass && layer.is_solar_diffusing() {
                    self.severe(
                        format!("{CONTEXT}: Window construction={name}"),
                        &[format!(
                            "has diffusing glass={} that is not the innermost glass layer.",
                            layer.name
                        )],
                    );
                }
            }
        }

        if shading == 1 && groups[n - 1] == G::Screen && n != 1 {
            wrong_layering = true;
            reasons.push("the screen is the innermost layer".to_string());
        }

        let between_glass = shading == 1
            && !matches!(groups[0], G::Shade | G::Blind | G::Screen)
            && !matches!(groups[n - 1], G::Shade | G::Blind | G::ComplexShade)
            && !wrong_layering;
        if between_glass {
            self.check_between_glass(
                &name,
                layers,
                groups,
                blinds,
                glass,
                &mut wrong_layering,
                &mut reasons,
            );
        }

        if groups[0] == G::SimpleGlazing && n > 1 {
            for group in &groups[1..] {
                match group {
                    G::Glass => self.severe(
                        format!("{CONTEXT}: Error in window construction {name}--"),
                        &["For simple window constructions, no other glazing layers are allowed."
                            .to_string()],
                    ),
                    G::Gas | G::GasMixture => self.severe(
                        format!("{CONTEXT}: Error in window construction {name}--"),
                        &["For simple window constructions, no other gas layers are allowed."
                            .to_string()],
                    ),
                    _ => {}
                }
            }
        }

        if wrong_layering {
            let mut details = reasons;
            details.extend(WINDOW_LAYERING_RULES.iter().map(|s| s.to_string()));
            self.severe(
                format!("{CONTEXT}: Error in window construction {name}--"),
                &details,
            );
        }

        c.tot_glass_layers = glass;
        c.tot_solid_layers = glass + shading;

        // An inner shade or blind is handled by the shading model; the inside
        // face for thermal purposes is the glass behind it.
        if matches!(groups[n - 1], G::Shade | G::Blind) {
            *inside_index = n.checked_sub(2);
        }
        if let Some(i) = *inside_index {
            c.inside_absorp_thermal = layers[i].thermal_absorptance_back;
            c.inside_absorp_vis = layers[i].visible_absorptance;
            c.inside_absorp_solar = layers[i].solar_absorptance;
        }
        c.outside_absorp_thermal = if groups[0].is_glass() {
            layers[0].thermal_absorptance_front
        } else {
            layers[0].thermal_absorptance
        };
        true
    }

    #[allow(clippy::too_many_arguments)]
    fn check_between_glass(
        &mut self,
        name: &str,
        layers: &[&Material],
        groups: &[MaterialGroup],
        blinds: &[Blind],
        glass: usize,
        wrong_layering: &mut bool,
        reasons: &mut Vec<String>,
    ) {
        use MaterialGroup as G;

        let n = layers.len();
        match glass {
            4 => {
                *wrong_layering = true;
                reasons.push("a between-glass shade/blind is not allowed in quadruple glazing".to_string());
                return;
            }
            2 | 3 => {}
            _ => return,
        }

        let is_gas = |i: usize| groups[i].is_gas_fill();
        let is_shade_or_blind = |i: usize| matches!(groups[i], G::Shade | G::Blind);
        let pattern_ok = match (glass, n) {
            (2, 5) => {
                groups[0] == G::Glass
                    && is_gas(1)
                    && is_shade_or_blind(2)
                    && is_gas(3)
                    && groups[4] == G::Glass
            }
            (3, 7) => {
                groups[0] == G::Glass
                    && is_gas(1)
                    && groups[2] == G::Glass
                    && is_gas(3)
                    && is_shade_or_blind(4)
                    && is_gas(5)
                    && groups[6] == G::Glass
            }
            _ => false,
        };
        if !pattern_ok {
            *wrong_layering = true;
            reasons.push(
                "the between-glass shade/blind layering is not glass-gas-shade-gas-glass \
                 between the two innermost panes"
                    .to_string(),
            );
            return;
        }

        let shade = 2 * glass - 2;
        let gap_left = layers[shade - 1];
        let gap_right = layers[shade + 1];
        if gap_left.gas_mix() != gap_right.gas_mix() {
            *wrong_layering = true;
            reasons.push(format!(
                "between-glass gas layers {} and {} must match in gas type and fraction",
                gap_left.name, gap_right.name
            ));
        }
        if (gap_left.thickness - gap_right.thickness).abs() > GAP_THICKNESS_TOLERANCE {
            *wrong_layering = true;
            reasons.push(format!(
                "between-glass gas layers must match in thickness ({:.1} mm vs {:.1} mm)",
                gap_left.thickness * 1000.0,
                gap_right.thickness * 1000.0
            ));
        }
        if *wrong_layering {
            return;
        }

        if let MaterialKind::Blind(blind) = layers[shade].kind {
            if let Some(blind) = blinds.get(blind.slot()) {
                if gap_left.thickness + gap_right.thickness < blind.slat_width {
                    self.severe(
                        format!("{CONTEXT}: For window construction {name}"),
                        &[
                            "the slat width of the between-glass blind is greater than".to_string(),
                            "the sum of the widths of the gas layers adjacent to the blind."
                                .to_string(),
                        ],
                    );
                }
            }
        }
    }

    /// Checks on the outermost and innermost layers that apply to every
    /// construction.
    fn check_extremes(
        &mut self,
        c: &mut Construction,
        layers: &[&Material],
        groups: &[MaterialGroup],
        inside_index: Option<usize>,
    ) {
        use MaterialGroup as G;

        let name = c.name.clone();
        if groups[0] == G::Air {
            self.severe(
                format!("{CONTEXT}: Outside Layer is Air for construction {name}"),
                &[format!("  Error in material {}", layers[0].name)],
            );
        }
        if let Some(i) = inside_index {
            if groups[i] == G::Air {
                self.severe(
                    format!("{CONTEXT}: Inside Layer is Air for construction {name}"),
                    &[format!("  Error in material {}", layers[i].name)],
                );
            }
        }

        c.is_eco_roof = groups[0] == G::EcoRoof;
        for (layer, group) in layers.iter().zip(groups).skip(1) {
            if *group == G::EcoRoof {
                self.severe(
                    format!("{CONTEXT}: Interior Layer is EcoRoof for construction {name}"),
                    &[format!("  Error in material {}", layer.name)],
                );
            }
        }

        c.is_ir_transparent = groups[0] == G::IrTransparent;
        if groups.contains(&G::IrTransparent) && layers.len() != 1 {
            self.severe(
                format!(
                    "{CONTEXT}: Infrared Transparent (IRT) Construction is limited to 1 layer {name}"
                ),
                &["  Too many layers in referenced construction.".to_string()],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{GasMix, GasType, Roughness};
    use hb_core::MaterialId;

    fn glass(model: &mut Model, name: &str) -> MaterialId {
        model
            .add_material(Material {
                thickness: 0.003,
                conductivity: 0.9,
                thermal_absorptance_front: 0.84,
                thermal_absorptance_back: 0.84,
                ..Material::new(
                    name,
                    MaterialKind::Glass {
                        solar_diffusing: false,
                        spectral_data: None,
                    },
                )
            })
            .unwrap()
    }

    fn diffusing_glass(model: &mut Model, name: &str) -> MaterialId {
        model
            .add_material(Material::new(
                name,
                MaterialKind::Glass {
                    solar_diffusing: true,
                    spectral_data: None,
                },
            ))
            .unwrap()
    }

    fn gas(model: &mut Model, name: &str, gas: GasType, thickness: f64) -> MaterialId {
        model
            .add_material(Material {
                thickness,
                ..Material::new(name, MaterialKind::Gas(GasMix::pure(gas)))
            })
            .unwrap()
    }

    fn simple(model: &mut Model, name: &str, kind: MaterialKind) -> MaterialId {
        model.add_material(Material::new(name, kind)).unwrap()
    }

    fn check(model: &mut Model, name: &str, layers: Vec<MaterialId>) -> (ConstructionId, Diagnostics) {
        let id = model
            .add_construction(Construction::new(name, layers))
            .unwrap();
        let diags = model.check_and_set_properties(id).unwrap();
        (id, diags)
    }

    fn has_message(diags: &Diagnostics, needle: &str) -> bool {
        diags
            .iter()
            .any(|d| d.message.contains(needle) || d.details.iter().any(|l| l.contains(needle)))
    }

    #[test]
    fn empty_construction_is_silent() {
        let mut model = Model::new();
        let (id, diags) = check(&mut model, "Empty", vec![]);
        assert!(diags.is_empty());
        assert!(model.construction(id).unwrap().valid);
    }

    #[test]
    fn opaque_wall_takes_extreme_layer_properties() {
        let mut model = Model::new();
        let outer = model
            .add_material(Material {
                roughness: Some(Roughness::Rough),
                thermal_absorptance: 0.8,
                solar_absorptance: 0.6,
                ..Material::new("Outer", MaterialKind::RegularOpaque)
            })
            .unwrap();
        let inner = model
            .add_material(Material {
                thermal_absorptance: 0.7,
                visible_absorptance: 0.4,
                ..Material::new("Inner", MaterialKind::RegularOpaque)
            })
            .unwrap();
        let (id, diags) = check(&mut model, "Wall", vec![outer, inner]);
        assert!(diags.is_empty());
        let c = model.construction(id).unwrap();
        assert!(!c.is_window);
        assert_eq!(c.outside_absorp_thermal, 0.8);
        assert_eq!(c.inside_absorp_thermal, 0.7);
        assert_eq!(c.outside_absorp_solar, 0.6);
        assert!((c.reflect_vis_diff_back - 0.6).abs() < 1e-12);
        assert_eq!(c.outside_roughness, Some(Roughness::Rough));
    }

    #[test]
    fn air_gap_cannot_be_an_extreme_layer() {
        let mut model = Model::new();
        let air = simple(&mut model, "Air", MaterialKind::AirGap);
        let brick = simple(&mut model, "Brick", MaterialKind::RegularOpaque);
        let (id, diags) = check(&mut model, "Bad", vec![air, brick, air]);
        assert_eq!(diags.error_count(), 2);
        assert!(has_message(&diags, "Outside Layer is Air"));
        assert!(has_message(&diags, "Inside Layer is Air"));
        assert!(!model.construction(id).unwrap().valid);
    }

    #[test]
    fn eco_roof_only_outermost() {
        let mut model = Model::new();
        let eco = simple(&mut model, "Soil", MaterialKind::EcoRoof);
        let deck = simple(&mut model, "Deck", MaterialKind::RegularOpaque);
        let (ok, diags) = check(&mut model, "Green", vec![eco, deck]);
        assert!(diags.is_empty());
        assert!(model.construction(ok).unwrap().is_eco_roof);

        let (_, diags) = check(&mut model, "Buried", vec![deck, eco]);
        assert!(has_message(&diags, "Interior Layer is EcoRoof"));
    }

    #[test]
    fn ir_transparent_single_layer() {
        let mut model = Model::new();
        let irt = simple(&mut model, "IRT", MaterialKind::IrTransparent);
        let deck = simple(&mut model, "Deck", MaterialKind::RegularOpaque);
        let (ok, diags) = check(&mut model, "Irt", vec![irt]);
        assert!(diags.is_empty());
        assert!(model.construction(ok).unwrap().is_ir_transparent);
        let (_, diags) = check(&mut model, "IrtStack", vec![irt, deck]);
        assert!(has_message(&diags, "limited to 1 layer"));
    }

    #[test]
    fn double_glazing_is_accepted() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let air = gas(&mut model, "Air13", GasType::Air, 0.013);
        let (id, diags) = check(&mut model, "Dbl", vec![g, air, g]);
        assert!(diags.is_empty(), "{diags:?}");
        let c = model.construction(id).unwrap();
        assert!(c.is_window);
        assert_eq!(c.tot_glass_layers, 2);
        assert_eq!(c.tot_solid_layers, 2);
        assert_eq!(c.inside_absorp_thermal, 0.84);
        assert_eq!(c.outside_absorp_thermal, 0.84);
    }

    #[test]
    fn window_with_opaque_layer_is_rejected() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let brick = simple(&mut model, "Brick", MaterialKind::RegularOpaque);
        let (_, diags) = check(&mut model, "Mixed", vec![g, brick]);
        assert!(has_message(&diags, "has materials other than glass"));
    }

    #[test]
    fn too_many_window_layers() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let a = gas(&mut model, "Air", GasType::Air, 0.01);
        let layers = vec![g, a, g, a, g, a, g, a, g];
        let (_, diags) = check(&mut model, "Nine", layers.clone());
        assert!(has_message(&diags, "has too many layers"));

        let bsdf = model
            .add_construction(Construction::new("NineBsdf", layers).bsdf())
            .unwrap();
        let diags = model.check_and_set_properties(bsdf).unwrap();
        assert!(!has_message(&diags, "has too many layers"));
    }

    #[test]
    fn single_layer_window_must_be_glazing() {
        let mut model = Model::new();
        let shade = simple(&mut model, "Shade", MaterialKind::Shade);
        let (_, diags) = check(&mut model, "JustShade", vec![shade]);
        assert!(has_message(&diags, "single-layer window construction"));
    }

    #[test]
    fn gas_at_extreme_and_adjacent_groups() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let a = gas(&mut model, "Air", GasType::Air, 0.01);
        let (_, diags) = check(&mut model, "GasOut", vec![a, g]);
        assert!(has_message(&diags, "first or last layer"));
        let (_, diags) = check(&mut model, "GlassGlass", vec![g, g]);
        assert!(has_message(&diags, "same type"));
        // reported once, with the rule list
        assert_eq!(diags.error_count(), 1);
        assert!(has_message(&diags, "--Adjacent layers must not be of the same type,"));
    }

    #[test]
    fn two_shading_layers_rejected() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let shade = simple(&mut model, "Shade", MaterialKind::Shade);
        let other = simple(&mut model, "Shade2", MaterialKind::ComplexShade);
        let (_, diags) = check(&mut model, "TwoShades", vec![shade, g, other]);
        assert!(has_message(&diags, "2 shade/screen/blind layers"));
    }

    #[test]
    fn interior_screen_rejected() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let data = crate::screen::ScreenMaterial::new(0.2, 0.5, 0.5).unwrap();
        let screen = simple(&mut model, "Scr", MaterialKind::Screen(data));
        let (_, diags) = check(&mut model, "ExtScreen", vec![screen, g]);
        assert!(diags.is_empty(), "{diags:?}");
        let (_, diags) = check(&mut model, "IntScreen", vec![g, screen]);
        assert!(has_message(&diags, "screen is the innermost layer"));
    }

    #[test]
    fn between_glass_screen_rejected() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let a = gas(&mut model, "Air", GasType::Air, 0.012);
        let data = crate::screen::ScreenMaterial::new(0.2, 0.5, 0.5).unwrap();
        let screen = simple(&mut model, "Scr", MaterialKind::Screen(data));
        let (_, diags) = check(&mut model, "BgScreen", vec![g, a, screen, a, g]);
        assert!(diags.has_errors());
    }

    #[test]
    fn diffusing_glass_rules() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let d = diffusing_glass(&mut model, "Frosted");
        let a = gas(&mut model, "Air", GasType::Air, 0.012);
        let shade = simple(&mut model, "Shade", MaterialKind::Shade);

        let (_, diags) = check(&mut model, "InnerDiffusing", vec![g, a, d]);
        assert!(diags.is_empty(), "{diags:?}");

        let (_, diags) = check(&mut model, "OuterDiffusing", vec![d, a, g]);
        assert!(has_message(&diags, "not the innermost glass layer"));

        let (_, diags) = check(&mut model, "ShadedDiffusing", vec![g, a, d, shade]);
        assert!(has_message(&diags, "and a shade, screen or blind layer"));
    }

    #[test]
    fn quadruple_between_glass_shade_rejected() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let a = gas(&mut model, "Air", GasType::Air, 0.012);
        let shade = simple(&mut model, "Shade", MaterialKind::Shade);
        let (_, diags) = check(&mut model, "Quad", vec![g, a, g, a, shade, a, g, g]);
        assert!(diags.has_errors());
    }

    #[test]
    fn triple_glazing_shade_must_be_between_inner_panes() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let a = gas(&mut model, "Air", GasType::Air, 0.012);
        let shade = simple(&mut model, "Shade", MaterialKind::Shade);
        let (_, diags) = check(&mut model, "InnerPair", vec![g, a, g, a, shade, a, g]);
        assert!(diags.is_empty(), "{diags:?}");
        let (_, diags) = check(&mut model, "OuterPair", vec![g, a, shade, a, g, a, g]);
        assert!(has_message(&diags, "between the two innermost panes"));
    }

    #[test]
    fn between_glass_gas_type_must_match() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let argon = gas(&mut model, "Argon", GasType::Argon, 0.012);
        let air = gas(&mut model, "Air", GasType::Air, 0.012);
        let shade = simple(&mut model, "Shade", MaterialKind::Shade);
        let (_, diags) = check(&mut model, "MixedGas", vec![g, argon, shade, air, g]);
        assert!(has_message(&diags, "must match in gas type"));
    }

    #[test]
    fn between_glass_blind_slat_width() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let a = gas(&mut model, "Air", GasType::Air, 0.008);
        let blind = model.add_blind(Blind::new("Wide", 0.025, 0.02, 0.001)).unwrap();
        let blind_mat = simple(&mut model, "Wide", MaterialKind::Blind(blind));
        let (_, diags) = check(&mut model, "WideBlind", vec![g, a, blind_mat, a, g]);
        assert!(has_message(&diags, "slat width of the between-glass blind"));
    }

    #[test]
    fn simple_glazing_stands_alone() {
        let mut model = Model::new();
        let sg = simple(&mut model, "SG", MaterialKind::SimpleGlazing);
        let g = glass(&mut model, "Clear");
        let shade = simple(&mut model, "Shade", MaterialKind::Shade);
        let (_, diags) = check(&mut model, "SgAlone", vec![sg]);
        assert!(diags.is_empty());
        let (_, diags) = check(&mut model, "SgShade", vec![sg, shade]);
        assert!(diags.is_empty(), "{diags:?}");
        let (_, diags) = check(&mut model, "SgGlass", vec![sg, g]);
        assert!(has_message(&diags, "no other glazing layers"));
    }

    #[test]
    fn interior_blind_uses_glass_for_inside_absorptance() {
        let mut model = Model::new();
        let g = model
            .add_material(Material {
                thermal_absorptance_back: 0.3,
                ..Material::new(
                    "LowE",
                    MaterialKind::Glass {
                        solar_diffusing: false,
                        spectral_data: None,
                    },
                )
            })
            .unwrap();
        let shade = model
            .add_material(Material {
                thermal_absorptance: 0.9,
                thermal_absorptance_back: 0.9,
                ..Material::new("Shade", MaterialKind::Shade)
            })
            .unwrap();
        let (id, diags) = check(&mut model, "IntShade", vec![g, shade]);
        assert!(diags.is_empty(), "{diags:?}");
        let c = model.construction(id).unwrap();
        assert_eq!(c.inside_absorp_thermal, 0.3);
        assert_eq!(c.tot_solid_layers, 2);
    }

    #[test]
    fn exterior_shade_uses_shade_thermal_absorptance() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let shade = model
            .add_material(Material {
                thermal_absorptance: 0.55,
                ..Material::new("Shade", MaterialKind::Shade)
            })
            .unwrap();
        let (id, _) = check(&mut model, "ExtShade", vec![shade, g]);
        assert_eq!(model.construction(id).unwrap().outside_absorp_thermal, 0.55);
    }

    #[test]
    fn window_resets_ctf_counters() {
        let mut model = Model::new();
        let g = glass(&mut model, "Clear");
        let mut c = Construction::new("W", vec![g]);
        c.num_ctf_terms = 7;
        c.num_histories = 3;
        let id = model.add_construction(c).unwrap();
        model.check_and_set_properties(id).unwrap();
        let c = model.construction(id).unwrap();
        assert_eq!((c.num_ctf_terms, c.num_histories), (0, 0));
    }
}
