//! Registry of known hub nodes and their attributes

use std::collections::HashMap;

use homee_core::{Attribute, Node, NodeId};
use tracing::trace;

/// Every node seen in this session, keyed by id
///
/// The store itself is not synchronized; the integration keeps it behind its
/// registry lock together with the binding table.
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: HashMap<NodeId, Node>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly seen node with all of its attributes.
    ///
    /// Returns `false` and leaves the store untouched if the id is already
    /// known.
    pub fn register(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            trace!(node_id = node.id, "Node already registered");
            return false;
        }
        self.nodes.insert(node.id, node);
        true
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    pub fn get(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Store a new attribute value and return the updated node.
    ///
    /// An attribute id the node did not report at discovery is appended.
    /// Returns `None` for an unknown node.
    pub fn update_attribute(&mut self, attribute: &Attribute) -> Option<&Node> {
        let node = self.nodes.get_mut(&attribute.node_id)?;
        match node.attribute_mut(attribute.id) {
            Some(existing) => *existing = attribute.clone(),
            None => node.attributes.push(attribute.clone()),
        }
        Some(node)
    }

    /// Refresh a known node's name and availability, keeping its attributes.
    ///
    /// Returns `None` for an unknown node.
    pub fn update_node(&mut self, changed: &Node) -> Option<&Node> {
        let node = self.nodes.get_mut(&changed.id)?;
        node.name.clone_from(&changed.name);
        node.state = changed.state;
        Some(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }
}
