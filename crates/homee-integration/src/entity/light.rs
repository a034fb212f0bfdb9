//! Dimmable (and optionally colored) lights

use std::collections::HashMap;

use homee_core::{AttributeType, Node};
use serde_json::{json, Value};

use super::{homee_id, on_off, AttributeSelector, EntityKind, HomeeEntity};
use crate::command::{brightness_to_hub, hub_to_brightness, EntityCommand, HubCommand};
use crate::error::CommandError;

const SUPPORT_BRIGHTNESS: u32 = 1;
const SUPPORT_COLOR: u32 = 16;

const TYPES: &[AttributeType] = &[
    AttributeType::OnOff,
    AttributeType::DimmingLevel,
    AttributeType::Color,
];

pub(super) fn build(node: &Node) -> HomeeEntity {
    HomeeEntity::new(
        EntityKind::Light,
        node,
        homee_id(node),
        node.name.clone(),
        AttributeSelector::Types(TYPES).with_leftovers(&[]),
    )
}

pub(super) fn render(entity: &HomeeEntity, attributes: &mut HashMap<String, Value>) -> String {
    if let Some(level) = entity.value(AttributeType::DimmingLevel) {
        attributes.insert("brightness".to_string(), json!(hub_to_brightness(level)));
    }

    let mut features = SUPPORT_BRIGHTNESS;
    if let Some(color) = entity.value(AttributeType::Color) {
        attributes.insert("rgb_color".to_string(), json!(color));
        features |= SUPPORT_COLOR;
    }
    attributes.insert("supported_features".to_string(), json!(features));

    on_off(entity.value(AttributeType::OnOff))
}

pub(super) fn translate(
    entity: &HomeeEntity,
    command: &EntityCommand,
) -> Result<HubCommand, CommandError> {
    match *command {
        EntityCommand::TurnOn {
            brightness: Some(brightness),
        } if entity.get(AttributeType::DimmingLevel).is_some() => {
            entity.write(AttributeType::DimmingLevel, brightness_to_hub(brightness))
        }
        EntityCommand::TurnOn { .. } => entity.write(AttributeType::OnOff, 1.0),
        EntityCommand::TurnOff => entity.write(AttributeType::OnOff, 0.0),
        _ => Err(entity.unsupported(command)),
    }
}
