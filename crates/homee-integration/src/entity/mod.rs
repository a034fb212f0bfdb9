//! Device representations
//!
//! A [`HomeeEntity`] is the long-lived, bound view of one node (or one
//! attribute of a node) that the host renders. Identity, the bound node and
//! the cached attribute snapshot live here; category behaviour (rendering and
//! command translation) lives in one module per [`EntityKind`].

mod binary_sensor;
mod climate;
mod cover;
mod cube;
mod light;
mod sensor;
mod switch;

use std::collections::HashMap;

use homee_core::{
    slugify, Attribute, AttributeId, AttributeType, Category, DeviceDescriptor, DiscoveryRules,
    EntityId, EntityState, Node, NodeId, STATE_OFF, STATE_ON, STATE_UNAVAILABLE,
};
use serde_json::{json, Value};
use tracing::warn;

use crate::classifier::NON_SENSOR_TYPES;
use crate::command::{EntityCommand, HubCommand};
use crate::error::CommandError;

pub use climate::{hvac_mode, HvacMode};
pub use cover::cover_position;

/// Synthesized attribute derived from BatteryLowAlarm
pub const ATTR_BATTERY_LEVEL: &str = "battery_level";
const ATTR_FRIENDLY_NAME: &str = "friendly_name";

/// Which attributes of its node an entity is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// Exactly one attribute
    Id(AttributeId),
    /// Every attribute of one of these types
    Types(&'static [AttributeType]),
    /// `primary`, plus every attribute of a type that never surfaces as a
    /// standalone sensor, unless the type is listed in `except`
    WithLeftovers {
        primary: Box<AttributeSelector>,
        except: &'static [AttributeType],
    },
}

impl AttributeSelector {
    /// Also bind the node's non-sensor attributes not claimed elsewhere
    pub fn with_leftovers(self, except: &'static [AttributeType]) -> Self {
        AttributeSelector::WithLeftovers {
            primary: Box::new(self),
            except,
        }
    }

    /// The part of the selector the entity's behaviour depends on
    pub fn primary(&self) -> &AttributeSelector {
        match self {
            AttributeSelector::WithLeftovers { primary, .. } => primary.primary(),
            selector => selector,
        }
    }

    pub fn matches(&self, attribute: &Attribute) -> bool {
        match self {
            AttributeSelector::Id(id) => attribute.id == *id,
            AttributeSelector::Types(types) => types.contains(&attribute.attribute_type()),
            AttributeSelector::WithLeftovers { primary, except } => {
                let attribute_type = attribute.attribute_type();
                primary.matches(attribute)
                    || (NON_SENSOR_TYPES.contains(&attribute_type)
                        && !except.contains(&attribute_type))
            }
        }
    }
}

/// Category behaviour of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Light,
    Switch,
    Cover,
    Climate,
    BinarySensor,
    Sensor,
    /// The hub itself (mode attribute)
    Cube,
}

impl EntityKind {
    /// Host category, `None` for the cube entity
    pub fn category(self) -> Option<Category> {
        match self {
            EntityKind::Light => Some(Category::Light),
            EntityKind::Switch => Some(Category::Switch),
            EntityKind::Cover => Some(Category::Cover),
            EntityKind::Climate => Some(Category::Climate),
            EntityKind::BinarySensor => Some(Category::BinarySensor),
            EntityKind::Sensor => Some(Category::Sensor),
            EntityKind::Cube => None,
        }
    }

    pub fn domain(self) -> &'static str {
        self.category()
            .map(Category::domain)
            .unwrap_or(homee_core::DOMAIN)
    }

    /// Whether the rendered state carries the bound attributes and the
    /// synthesized battery level
    fn has_base_attributes(self) -> bool {
        self != EntityKind::Sensor
    }
}

/// A bound device representation
#[derive(Debug, Clone)]
pub struct HomeeEntity {
    kind: EntityKind,
    entity_id: EntityId,
    unique_id: String,
    name: String,
    node_id: NodeId,
    available: bool,
    selector: AttributeSelector,
    /// Snapshot of the bound attributes, in hub order
    attributes: Vec<Attribute>,
}

impl HomeeEntity {
    fn new(
        kind: EntityKind,
        node: &Node,
        unique_id: String,
        name: String,
        selector: AttributeSelector,
    ) -> Self {
        let entity_id = EntityId::new(kind.domain(), unique_id.clone());
        Self::with_entity_id(kind, node, entity_id, unique_id, name, selector)
    }

    fn with_entity_id(
        kind: EntityKind,
        node: &Node,
        entity_id: EntityId,
        unique_id: String,
        name: String,
        selector: AttributeSelector,
    ) -> Self {
        let attributes = node
            .attributes
            .iter()
            .filter(|a| selector.matches(a))
            .cloned()
            .collect();

        Self {
            kind,
            entity_id,
            unique_id,
            name,
            node_id: node.id,
            available: node.is_available(),
            selector,
            attributes,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn selector(&self) -> &AttributeSelector {
        &self.selector
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Cached snapshot of the first bound attribute of a type
    pub fn get(&self, attribute_type: AttributeType) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.attribute_type() == attribute_type)
    }

    pub fn value(&self, attribute_type: AttributeType) -> Option<f64> {
        self.get(attribute_type).map(|a| a.value)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Whether a change of this attribute concerns the entity
    pub fn accepts(&self, attribute: &Attribute) -> bool {
        attribute.node_id == self.node_id && self.selector.matches(attribute)
    }

    /// First bound attribute picked by the primary selector
    pub fn primary_attribute(&self) -> Option<&Attribute> {
        let primary = self.selector.primary();
        self.attributes.iter().find(|a| primary.matches(a))
    }

    /// Whether the primary selector has bound at least one attribute
    pub fn is_bound(&self) -> bool {
        self.primary_attribute().is_some()
    }

    /// Replace the cached snapshot of an accepted attribute
    pub(crate) fn refresh(&mut self, attribute: &Attribute) {
        match self.attributes.iter_mut().find(|a| a.id == attribute.id) {
            Some(existing) => *existing = attribute.clone(),
            None => self.attributes.push(attribute.clone()),
        }
    }

    /// Pick up the node's availability. The display name stays as built.
    pub(crate) fn refresh_node(&mut self, node: &Node) {
        self.available = node.is_available();
    }

    /// Render the observable state for the host
    pub fn state(&self) -> EntityState {
        let mut attributes = HashMap::new();

        if self.kind.has_base_attributes() {
            for attribute in &self.attributes {
                attributes.insert(
                    attribute.attribute_type().name().to_string(),
                    json!(attribute.value),
                );
            }
            if let Some(alarm) = self.value(AttributeType::BatteryLowAlarm) {
                attributes.insert(ATTR_BATTERY_LEVEL.to_string(), json!(battery_level(alarm)));
            }
        }
        attributes.insert(ATTR_FRIENDLY_NAME.to_string(), Value::String(self.name.clone()));

        let state = match self.kind {
            EntityKind::Light => light::render(self, &mut attributes),
            EntityKind::Switch => switch::render(self),
            EntityKind::Cover => cover::render(self, &mut attributes),
            EntityKind::Climate => climate::render(self, &mut attributes),
            EntityKind::BinarySensor => binary_sensor::render(self, &mut attributes),
            EntityKind::Sensor => sensor::render(self, &mut attributes),
            EntityKind::Cube => cube::render(self),
        };

        EntityState {
            entity_id: self.entity_id.clone(),
            unique_id: self.unique_id.clone(),
            name: self.name.clone(),
            state: if self.available {
                state
            } else {
                STATE_UNAVAILABLE.to_string()
            },
            attributes,
            available: self.available,
        }
    }

    /// Translate a command into the attribute write it implies
    pub fn translate(&self, command: &EntityCommand) -> Result<HubCommand, CommandError> {
        match self.kind {
            EntityKind::Light => light::translate(self, command),
            EntityKind::Switch => switch::translate(self, command),
            EntityKind::Cover => cover::translate(self, command),
            EntityKind::Climate => climate::translate(self, command),
            EntityKind::Cube => cube::translate(self, command),
            EntityKind::BinarySensor | EntityKind::Sensor => Err(self.unsupported(command)),
        }
    }

    /// Write `value` to the first bound attribute of a type
    pub(crate) fn write(
        &self,
        attribute_type: AttributeType,
        value: f64,
    ) -> Result<HubCommand, CommandError> {
        let attribute = self
            .get(attribute_type)
            .ok_or_else(|| CommandError::MissingAttribute {
                entity_id: self.entity_id.clone(),
                attribute_type,
            })?;
        Ok(HubCommand::new(self.node_id, attribute.id, value))
    }

    pub(crate) fn unsupported(&self, command: &EntityCommand) -> CommandError {
        CommandError::unsupported(&self.entity_id, self.kind.category(), command.name())
    }
}

/// `100` while the BatteryLowAlarm is clear, `0` once it is raised
fn battery_level(alarm: f64) -> u8 {
    if alarm == 0.0 {
        100
    } else {
        0
    }
}

/// `on` for any non-zero value, `off` for zero or a missing attribute
fn on_off(value: Option<f64>) -> String {
    let state = match value {
        Some(v) if v != 0.0 => STATE_ON,
        _ => STATE_OFF,
    };
    state.to_string()
}

/// Base identifier of a node: `slug(name)_id`
fn homee_id(node: &Node) -> String {
    format!("{}_{}", slugify(&node.name), node.id)
}

/// Build the entities one discovery descriptor stands for
pub fn build_entities(descriptor: &DeviceDescriptor, rules: &DiscoveryRules) -> Vec<HomeeEntity> {
    let node = &descriptor.node;

    match descriptor.category {
        Category::Sensor if node.is_cube() => vec![cube::build(node)],
        Category::Sensor => match &descriptor.attribute {
            Some(attribute) => vec![sensor::build(node, attribute)],
            None => {
                warn!(node_id = node.id, "Sensor descriptor without attribute");
                Vec::new()
            }
        },
        Category::Switch if rules.double_switch_profiles.contains(&node.profile) => {
            switch::build_fan_out(node)
        }
        Category::Switch => vec![switch::build(node)],
        Category::Light => vec![light::build(node)],
        Category::Climate => vec![climate::build(node)],
        Category::BinarySensor => vec![binary_sensor::build(node)],
        Category::Cover => match node.attribute_of_type(rules.cover_position_type) {
            Some(attribute) => vec![cover::build(node, attribute)],
            None => {
                warn!(
                    node_id = node.id,
                    attribute_type = %rules.cover_position_type,
                    "Cover node has no position attribute"
                );
                Vec::new()
            }
        },
    }
}
