//! hb-envelope: building envelope model for heatbal.
//!
//! Provides:
//! - Material, blind, screen, construction, zone, surface and internal-gain registries
//!   owned by a single [`Model`] arena
//! - The construction validator (layering rules, derived properties)
//! - Reverse constructions for interzone partitions
//! - Variable-slat twins of fixed-slat blinds
//! - Derived quantities (roughness names, nominal U with film coefficients)
//!
//! # Example
//!
//! ```
//! use hb_envelope::{Construction, Material, MaterialKind, Model};
//!
//! let mut model = Model::new();
//! let brick = model
//!     .add_material(Material {
//!         thickness: 0.1,
//!         resistance: Some(0.11),
//!         ..Material::new("Brick", MaterialKind::RegularOpaque)
//!     })
//!     .unwrap();
//! let wall = model
//!     .add_construction(Construction::new("Wall", vec![brick]))
//!     .unwrap();
//! let diags = model.check_and_set_properties(wall).unwrap();
//!
//! assert!(!diags.has_errors());
//! assert!(!model.construction(wall).unwrap().is_window);
//! ```

pub mod blind;
pub mod construction;
pub mod derived;
pub mod error;
pub mod gains;
pub mod material;
pub mod model;
pub mod reverse;
pub mod screen;
pub mod slats;
pub mod surface;
pub mod validate;
pub mod zone;

// Re-exports for ergonomics
pub use blind::{Blind, SlatAngleMode, SlatOrientation};
pub use construction::{Construction, MAX_LAYERS_IN_CONSTRUCT, MAX_WINDOW_LAYERS};
pub use derived::{FilmedU, roughness_name};
pub use error::{EnvelopeError, EnvelopeResult};
pub use gains::{GainDeviceType, GainTotals, InternalGain};
pub use material::{GasMix, GasType, Material, MaterialGroup, MaterialKind, Roughness};
pub use model::Model;
pub use reverse::{MirrorOutcome, ReverseOutcome};
pub use screen::{BeamReflectanceAccounting, Screen, ScreenMaterial, ScreenOptics};
pub use slats::SlatOutcome;
pub use surface::{BoundaryCondition, Surface, SurfaceClass};
pub use zone::Zone;
