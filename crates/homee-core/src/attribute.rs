//! Hub attribute: one observable or controllable value on a node

use serde::{Deserialize, Serialize};

use crate::{AttributeType, NodeId};

/// Attribute identifier, unique within its owning node
pub type AttributeId = u64;

/// Unit sentinel the hub uses for unit-less values
pub const UNIT_NONE: &str = "n/a";

/// A single attribute of a hub node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Identifier within the owning node
    pub id: AttributeId,
    /// Owning node (lookup only)
    pub node_id: NodeId,
    /// Raw hub type code, resolved through [`AttributeType::from_code`]
    #[serde(rename = "type")]
    pub type_code: u32,
    /// Current value
    pub value: f64,
    /// Display unit, `"n/a"` when the value has none
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    UNIT_NONE.to_string()
}

impl Attribute {
    /// Create an attribute without a unit
    pub fn new(id: AttributeId, node_id: NodeId, attribute_type: AttributeType, value: f64) -> Self {
        Self {
            id,
            node_id,
            type_code: attribute_type.code(),
            value,
            unit: default_unit(),
        }
    }

    /// Set the display unit
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Symbolic type of this attribute
    pub fn attribute_type(&self) -> AttributeType {
        AttributeType::from_code(self.type_code)
    }

    /// Display unit, or `None` for the `"n/a"` sentinel
    pub fn unit(&self) -> Option<&str> {
        if self.unit == UNIT_NONE {
            None
        } else {
            Some(&self.unit)
        }
    }
}
