//! Position-controlled covers (shutters, blinds)
//!
//! The hub reports 0 for fully open and 100 for fully closed; the host
//! expects the opposite. Readings within 5 of either end snap to it.

use std::collections::HashMap;

use homee_core::{Attribute, AttributeType, Node, STATE_CLOSED, STATE_OPEN};
use serde_json::{json, Value};

use super::{homee_id, AttributeSelector, EntityKind, HomeeEntity};
use crate::command::{position_to_hub, EntityCommand, HubCommand};
use crate::error::CommandError;

const RAW_OPEN: f64 = 0.0;
const RAW_CLOSED: f64 = 100.0;

/// Host position (100 open, 0 closed) for a raw hub position
pub fn cover_position(raw: f64) -> u8 {
    if raw <= 5.0 {
        100
    } else if raw >= 95.0 {
        0
    } else {
        (100.0 - raw).round() as u8
    }
}

pub(super) fn build(node: &Node, position: &Attribute) -> HomeeEntity {
    HomeeEntity::new(
        EntityKind::Cover,
        node,
        homee_id(node),
        node.name.clone(),
        AttributeSelector::Id(position.id).with_leftovers(&[]),
    )
}

fn raw_position(entity: &HomeeEntity) -> Option<&Attribute> {
    entity.primary_attribute()
}

pub(super) fn render(entity: &HomeeEntity, attributes: &mut HashMap<String, Value>) -> String {
    let Some(raw) = raw_position(entity) else {
        return STATE_OPEN.to_string();
    };

    let position = cover_position(raw.value);
    let closed = position == 0;
    attributes.insert("current_position".to_string(), json!(position));
    attributes.insert("is_closed".to_string(), json!(closed));

    let state = if closed { STATE_CLOSED } else { STATE_OPEN };
    state.to_string()
}

pub(super) fn translate(
    entity: &HomeeEntity,
    command: &EntityCommand,
) -> Result<HubCommand, CommandError> {
    let value = match *command {
        EntityCommand::OpenCover => RAW_OPEN,
        EntityCommand::CloseCover => RAW_CLOSED,
        EntityCommand::SetCoverPosition(position) => position_to_hub(position),
        _ => return Err(entity.unsupported(command)),
    };

    let attribute = raw_position(entity).ok_or_else(|| CommandError::MissingAttribute {
        entity_id: entity.entity_id().clone(),
        attribute_type: AttributeType::Position,
    })?;
    Ok(HubCommand::new(entity.node_id(), attribute.id, value))
}
