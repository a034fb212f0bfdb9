//! Opening sensors (door/window contacts, window handles)

use std::collections::HashMap;

use homee_core::{AttributeType, Node};
use serde_json::Value;

use super::{homee_id, on_off, AttributeSelector, EntityKind, HomeeEntity};

const DEVICE_CLASS: &str = "opening";

const TYPES: &[AttributeType] = &[AttributeType::OpenClose];

pub(super) fn build(node: &Node) -> HomeeEntity {
    HomeeEntity::new(
        EntityKind::BinarySensor,
        node,
        homee_id(node),
        node.name.clone(),
        AttributeSelector::Types(TYPES).with_leftovers(&[]),
    )
}

pub(super) fn render(entity: &HomeeEntity, attributes: &mut HashMap<String, Value>) -> String {
    attributes.insert(
        "device_class".to_string(),
        Value::String(DEVICE_CLASS.to_string()),
    );
    on_off(entity.value(AttributeType::OpenClose))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::EntityCommand;
    use crate::entity::tests::attr;
    use crate::error::CommandError;
    use homee_core::Profile;

    #[test]
    fn test_render() {
        let node = Node::new(2, "Front Door", Profile::OPEN_CLOSE_SENSOR)
            .with_attribute(attr(1, 2, AttributeType::OpenClose, 1.0));
        let state = build(&node).state();
        assert_eq!(state.entity_id.to_string(), "binary_sensor.front_door_2");
        assert_eq!(state.state, "on");
        assert_eq!(state.attribute::<String>("device_class").as_deref(), Some("opening"));
    }

    #[test]
    fn test_read_only() {
        let node = Node::new(2, "Front Door", Profile::OPEN_CLOSE_SENSOR);
        assert!(matches!(
            build(&node).translate(&EntityCommand::TurnOff),
            Err(CommandError::Unsupported { .. })
        ));
    }
}
