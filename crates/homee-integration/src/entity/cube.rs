//! The cube itself, exposing the hub's operating mode

use homee_core::{AttributeType, EntityId, HomeeMode, Node, CUBE_UNIQUE_ID, DOMAIN, STATE_UNKNOWN};

use super::{AttributeSelector, EntityKind, HomeeEntity};
use crate::command::{EntityCommand, HubCommand};
use crate::error::CommandError;

const OBJECT_ID: &str = "cube";

const TYPES: &[AttributeType] = &[AttributeType::HomeeMode];

pub(super) fn build(node: &Node) -> HomeeEntity {
    HomeeEntity::with_entity_id(
        EntityKind::Cube,
        node,
        EntityId::new(DOMAIN, OBJECT_ID),
        CUBE_UNIQUE_ID.to_string(),
        node.name.clone(),
        AttributeSelector::Types(TYPES).with_leftovers(&[]),
    )
}

/// Mode name, the raw value for modes this crate does not know, or
/// `unknown` when the cube reports no mode at all
pub(super) fn render(entity: &HomeeEntity) -> String {
    let Some(value) = entity.value(AttributeType::HomeeMode) else {
        return STATE_UNKNOWN.to_string();
    };
    match HomeeMode::from_value(value) {
        Some(mode) => mode.name().to_string(),
        None => value.to_string(),
    }
}

pub(super) fn translate(
    entity: &HomeeEntity,
    command: &EntityCommand,
) -> Result<HubCommand, CommandError> {
    match *command {
        EntityCommand::SetMode(mode) => entity.write(AttributeType::HomeeMode, mode.value()),
        _ => Err(entity.unsupported(command)),
    }
}
