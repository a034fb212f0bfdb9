//! Binding table and update routing

use std::collections::HashMap;

use homee_core::{Attribute, EntityId, EntityState, Node};
use tracing::{trace, warn};

use crate::entity::{EntityKind, HomeeEntity};

/// Every bound entity, in binding order
#[derive(Debug, Default)]
pub struct UpdateRouter {
    entities: Vec<HomeeEntity>,
    index: HashMap<EntityId, usize>,
}

impl UpdateRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to the binding table.
    ///
    /// Returns `false` if an entity with the same id is already bound. An
    /// entity whose selector matched nothing is still bound, but logged as a
    /// dead binding.
    pub fn bind(&mut self, entity: HomeeEntity) -> bool {
        if self.index.contains_key(entity.entity_id()) {
            warn!(entity_id = %entity.entity_id(), "Entity already bound");
            return false;
        }
        if !entity.is_bound() {
            warn!(
                entity_id = %entity.entity_id(),
                node_id = entity.node_id(),
                selector = ?entity.selector(),
                "Dead binding: selector matches no attribute"
            );
        }

        self.index
            .insert(entity.entity_id().clone(), self.entities.len());
        self.entities.push(entity);
        true
    }

    /// Refresh every entity that accepts the changed attribute and return
    /// their new states, in binding order.
    pub fn route(&mut self, attribute: &Attribute) -> Vec<EntityState> {
        let states: Vec<_> = self
            .entities
            .iter_mut()
            .filter(|entity| entity.accepts(attribute))
            .map(|entity| {
                entity.refresh(attribute);
                entity.state()
            })
            .collect();

        trace!(
            node_id = attribute.node_id,
            attribute_id = attribute.id,
            matched = states.len(),
            "Routed attribute change"
        );
        states
    }

    /// Refresh availability of every entity bound to the node
    pub fn refresh_node(&mut self, node: &Node) -> Vec<EntityState> {
        self.entities
            .iter_mut()
            .filter(|entity| entity.node_id() == node.id)
            .map(|entity| {
                entity.refresh_node(node);
                entity.state()
            })
            .collect()
    }

    pub fn get(&self, entity_id: &EntityId) -> Option<&HomeeEntity> {
        self.index.get(entity_id).map(|&i| &self.entities[i])
    }

    /// First bound entity of a kind
    pub fn find_kind(&self, kind: EntityKind) -> Option<&HomeeEntity> {
        self.entities.iter().find(|entity| entity.kind() == kind)
    }

    pub fn entities(&self) -> &[HomeeEntity] {
        &self.entities
    }

    pub fn states(&self) -> Vec<EntityState> {
        self.entities.iter().map(HomeeEntity::state).collect()
    }

    /// Entities whose selector has never matched an attribute
    pub fn dead_bindings(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|entity| !entity.is_bound())
            .map(|entity| entity.entity_id().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
