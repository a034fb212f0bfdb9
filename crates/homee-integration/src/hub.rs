//! The hub connection seam
//!
//! The engine never talks to the cube directly. A [`HubConnection`] owns the
//! session, authentication and the wire protocol; the engine only fetches
//! nodes, writes attributes and consumes pushed [`HubEvent`]s.

use async_trait::async_trait;
use homee_core::{Attribute, AttributeId, Node, NodeId};
use tokio::sync::mpsc;

use crate::error::HubError;

/// Notification pushed by the hub connection
#[derive(Debug, Clone, PartialEq)]
pub enum HubEvent {
    /// A node was seen (possibly again)
    NodeDiscovered(Node),
    /// A node's name or availability changed
    NodeChanged(Node),
    /// One attribute changed its value
    AttributeChanged(Attribute),
}

impl HubEvent {
    pub fn node_id(&self) -> NodeId {
        match self {
            HubEvent::NodeDiscovered(node) | HubEvent::NodeChanged(node) => node.id,
            HubEvent::AttributeChanged(attribute) => attribute.node_id,
        }
    }
}

#[async_trait]
pub trait HubConnection: Send + Sync {
    /// Bulk load of every node the hub currently knows
    async fn fetch_nodes(&self) -> Result<Vec<Node>, HubError>;

    /// Write an attribute value. Returns once the request is dispatched, not
    /// when the hub confirms the change.
    async fn send_command(
        &self,
        node_id: NodeId,
        attribute_id: AttributeId,
        value: f64,
    ) -> Result<(), HubError>;

    /// Run a homeegram (hub-side scene)
    async fn play_homeegram(&self, id: u64) -> Result<(), HubError>;

    /// Channel of pushed events. Closing the sender ends the event loop.
    fn subscribe(&self) -> mpsc::Receiver<HubEvent>;
}
