//! Hub node: one physical or virtual device known to the cube

use serde::{Deserialize, Serialize};

use crate::{Attribute, AttributeId, AttributeType, Profile};

/// Node identifier, unique within a hub session
pub type NodeId = i64;

/// Id of the synthetic node representing the cube itself
pub const CUBE_NODE_ID: NodeId = -1;

/// Availability of a node as reported by the hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum NodeState {
    #[default]
    Available,
    Unavailable,
    UpdateInProgress,
    WaitingForAttributes,
    Initializing,
    Other(u32),
}

impl From<u32> for NodeState {
    fn from(code: u32) -> Self {
        match code {
            1 => NodeState::Available,
            2 => NodeState::Unavailable,
            3 => NodeState::UpdateInProgress,
            4 => NodeState::WaitingForAttributes,
            5 => NodeState::Initializing,
            other => NodeState::Other(other),
        }
    }
}

impl From<NodeState> for u32 {
    fn from(state: NodeState) -> u32 {
        match state {
            NodeState::Available => 1,
            NodeState::Unavailable => 2,
            NodeState::UpdateInProgress => 3,
            NodeState::WaitingForAttributes => 4,
            NodeState::Initializing => 5,
            NodeState::Other(code) => code,
        }
    }
}

/// A hub node together with the attributes it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub profile: Profile,
    #[serde(default)]
    pub state: NodeState,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Node {
    /// Create an available node without attributes
    pub fn new(id: NodeId, name: impl Into<String>, profile: Profile) -> Self {
        Self {
            id,
            name: name.into(),
            profile,
            state: NodeState::Available,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute, taking ownership of it
    pub fn with_attribute(mut self, mut attribute: Attribute) -> Self {
        attribute.node_id = self.id;
        self.attributes.push(attribute);
        self
    }

    /// Set the availability state
    pub fn with_state(mut self, state: NodeState) -> Self {
        self.state = state;
        self
    }

    /// Whether this is the synthetic cube node
    pub fn is_cube(&self) -> bool {
        self.id == CUBE_NODE_ID
    }

    pub fn is_available(&self) -> bool {
        self.state == NodeState::Available
    }

    /// Look up an attribute by id
    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    pub fn attribute_mut(&mut self, id: AttributeId) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|a| a.id == id)
    }

    /// First attribute of the given type
    pub fn attribute_of_type(&self, attribute_type: AttributeType) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.attribute_type() == attribute_type)
    }

    /// All attributes of the given type, in hub order
    pub fn attributes_of_type(
        &self,
        attribute_type: AttributeType,
    ) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(move |a| a.attribute_type() == attribute_type)
    }

    pub fn has_attribute_type(&self, attribute_type: AttributeType) -> bool {
        self.attribute_of_type(attribute_type).is_some()
    }
}
