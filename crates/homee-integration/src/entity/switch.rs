//! On/off switches, including double switches that expose one entity per
//! OnOff attribute

use homee_core::{slugify, AttributeType, Node};

use super::{homee_id, on_off, AttributeSelector, EntityKind, HomeeEntity};
use crate::command::{EntityCommand, HubCommand};
use crate::error::CommandError;

const TYPES: &[AttributeType] = &[AttributeType::OnOff];

pub(super) fn build(node: &Node) -> HomeeEntity {
    HomeeEntity::new(
        EntityKind::Switch,
        node,
        homee_id(node),
        node.name.clone(),
        AttributeSelector::Types(TYPES).with_leftovers(&[]),
    )
}

/// One switch per OnOff attribute. Identity follows the attribute id and the
/// name suffix is the id's rank, so hub reordering does not shift entities.
pub(super) fn build_fan_out(node: &Node) -> Vec<HomeeEntity> {
    let mut ids: Vec<_> = node
        .attributes_of_type(AttributeType::OnOff)
        .map(|a| a.id)
        .collect();
    ids.sort_unstable();
    ids.dedup();

    ids.into_iter()
        .enumerate()
        .map(|(rank, attribute_id)| {
            HomeeEntity::new(
                EntityKind::Switch,
                node,
                format!("{}_{}_{}", slugify(&node.name), node.id, attribute_id),
                format!("{} {}", node.name, rank + 1),
                // The other halves' OnOff attributes belong to them
                AttributeSelector::Id(attribute_id).with_leftovers(TYPES),
            )
        })
        .collect()
}

pub(super) fn render(entity: &HomeeEntity) -> String {
    on_off(entity.value(AttributeType::OnOff))
}

pub(super) fn translate(
    entity: &HomeeEntity,
    command: &EntityCommand,
) -> Result<HubCommand, CommandError> {
    match command {
        EntityCommand::TurnOn { .. } => entity.write(AttributeType::OnOff, 1.0),
        EntityCommand::TurnOff => entity.write(AttributeType::OnOff, 0.0),
        _ => Err(entity.unsupported(command)),
    }
}
