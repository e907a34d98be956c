//! Object-oriented view of input for components that read their own
//! objects, addressed by object type with positional alpha/numeric fields.

use std::collections::HashMap;

use crate::schema::{CapacityDef, InputDocument};

pub const BASEBOARD_OBJECT: &str = "ZoneHVAC:Baseboard:Convective:Electric";

/// Numeric field value standing for "size automatically".
pub const AUTOSIZE: f64 = -99999.0;

#[derive(Debug, Clone, PartialEq)]
struct Field<T> {
    name: String,
    value: T,
    blank: bool,
}

/// One input object: ordered alpha and numeric fields, each with a field
/// name and a blank flag. Missing fields read as blank.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputObject {
    pub object_type: String,
    alphas: Vec<Field<String>>,
    numerics: Vec<Field<f64>>,
}

impl InputObject {
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            ..Default::default()
        }
    }

    pub fn with_alpha(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let blank = value.trim().is_empty();
        self.alphas.push(Field {
            name: name.into(),
            value,
            blank,
        });
        self
    }

    pub fn with_numeric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.numerics.push(Field {
            name: name.into(),
            value,
            blank: false,
        });
        self
    }

    pub fn with_blank_numeric(mut self, name: impl Into<String>) -> Self {
        self.numerics.push(Field {
            name: name.into(),
            value: 0.0,
            blank: true,
        });
        self
    }

    pub fn alpha(&self, index: usize) -> &str {
        self.alphas.get(index).map_or("", |f| f.value.as_str())
    }

    pub fn numeric(&self, index: usize) -> f64 {
        self.numerics.get(index).map_or(0.0, |f| f.value)
    }

    pub fn is_alpha_blank(&self, index: usize) -> bool {
        self.alphas.get(index).is_none_or(|f| f.blank)
    }

    pub fn is_numeric_blank(&self, index: usize) -> bool {
        self.numerics.get(index).is_none_or(|f| f.blank)
    }

    pub fn is_autosize(&self, index: usize) -> bool {
        !self.is_numeric_blank(index) && self.numeric(index) == AUTOSIZE
    }

    pub fn alpha_field_name(&self, index: usize) -> &str {
        self.alphas.get(index).map_or("", |f| f.name.as_str())
    }

    pub fn numeric_field_name(&self, index: usize) -> &str {
        self.numerics.get(index).map_or("", |f| f.name.as_str())
    }

    pub fn alpha_named(&self, name: &str) -> Option<&str> {
        self.alphas
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    pub fn numeric_named(&self, name: &str) -> Option<f64> {
        self.numerics
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name) && !f.blank)
            .map(|f| f.value)
    }

    pub fn alpha_count(&self) -> usize {
        self.alphas.len()
    }

    pub fn numeric_count(&self) -> usize {
        self.numerics.len()
    }
}

/// Source of input objects by type.
pub trait InputReader {
    fn objects(&self, object_type: &str) -> Vec<InputObject>;

    fn count(&self, object_type: &str) -> usize {
        self.objects(object_type).len()
    }
}

/// Objects held in memory, keyed by upper-cased object type.
#[derive(Debug, Clone, Default)]
pub struct ObjectTable {
    objects: HashMap<String, Vec<InputObject>>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: InputObject) {
        self.objects
            .entry(object.object_type.to_uppercase())
            .or_default()
            .push(object);
    }
}

impl InputReader for ObjectTable {
    fn objects(&self, object_type: &str) -> Vec<InputObject> {
        self.objects
            .get(&object_type.to_uppercase())
            .cloned()
            .unwrap_or_default()
    }
}

impl InputReader for InputDocument {
    fn objects(&self, object_type: &str) -> Vec<InputObject> {
        if !object_type.eq_ignore_ascii_case(BASEBOARD_OBJECT) {
            return Vec::new();
        }
        self.baseboards
            .iter()
            .map(|bb| {
                let capacity = match bb.nominal_capacity {
                    CapacityDef::Watts(w) => w,
                    CapacityDef::Keyword(_) => AUTOSIZE,
                };
                InputObject::new(BASEBOARD_OBJECT)
                    .with_alpha("Name", bb.name.as_str())
                    .with_alpha(
                        "Availability Schedule Name",
                        bb.availability_schedule.as_deref().unwrap_or(""),
                    )
                    .with_numeric("Nominal Capacity", capacity)
                    .with_numeric("Efficiency", bb.efficiency)
            })
            .collect()
    }
}
