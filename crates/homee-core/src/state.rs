//! Rendered entity state handed to the host platform

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::EntityId;

pub const STATE_ON: &str = "on";
pub const STATE_OFF: &str = "off";
pub const STATE_OPEN: &str = "open";
pub const STATE_CLOSED: &str = "closed";
pub const STATE_UNAVAILABLE: &str = "unavailable";
pub const STATE_UNKNOWN: &str = "unknown";

/// Observable state of one entity at a point in time
///
/// Produced by the integration every time a bound entity is created or
/// refreshed; the host renders it without further knowledge of the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// Host entity id (e.g. "light.kitchen_12")
    pub entity_id: EntityId,
    /// Stable identifier derived from the node (and attribute)
    pub unique_id: String,
    /// Display name
    pub name: String,
    /// State value (e.g. "on", "21.5", "unavailable")
    pub state: String,
    /// Additional attributes
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
    /// Whether the backing node is available
    pub available: bool,
}

impl EntityState {
    pub fn domain(&self) -> &str {
        self.entity_id.domain()
    }

    /// Get an attribute value by key
    pub fn attribute<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.attributes
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn is_unavailable(&self) -> bool {
        self.state == STATE_UNAVAILABLE
    }
}
