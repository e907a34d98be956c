//! Thermal zones.

use hb_core::NodeId;

/// A thermal zone. Air state lives in the node table under `node`.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub name: String,
    pub node: NodeId,
    pub multiplier: u32,
    /// Floor area in m2, if known.
    pub floor_area: Option<f64>,
}

impl Zone {
    pub fn new(name: impl Into<String>, node: NodeId) -> Self {
        Self {
            name: name.into(),
            node,
            multiplier: 1,
            floor_area: None,
        }
    }
}
