//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use homee_core::{Attribute, AttributeId, AttributeType, DiscoveryRules, Node, NodeId, Profile};
use homee_integration::{HomeeIntegration, HubConnection, HubError, HubEvent};
use homee_states::StateStore;
use tokio::sync::mpsc;

/// Hub double recording every write
#[derive(Default)]
pub struct MockHub {
    pub nodes: Vec<Node>,
    pub fail_fetch: bool,
    pub fail_commands: bool,
    pub sent: Mutex<Vec<(NodeId, AttributeId, f64)>>,
    pub homeegrams: Mutex<Vec<u64>>,
    pub receiver: Mutex<Option<mpsc::Receiver<HubEvent>>>,
}

impl MockHub {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            ..Default::default()
        }
    }

    /// Attach an event channel, returning its sender
    pub fn with_events(self) -> (Self, mpsc::Sender<HubEvent>) {
        let (tx, rx) = mpsc::channel(16);
        *self.receiver.lock().unwrap() = Some(rx);
        (self, tx)
    }

    pub fn sent(&self) -> Vec<(NodeId, AttributeId, f64)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl HubConnection for MockHub {
    async fn fetch_nodes(&self) -> Result<Vec<Node>, HubError> {
        if self.fail_fetch {
            return Err(HubError::Transport("connection refused".to_string()));
        }
        Ok(self.nodes.clone())
    }

    async fn send_command(
        &self,
        node_id: NodeId,
        attribute_id: AttributeId,
        value: f64,
    ) -> Result<(), HubError> {
        if self.fail_commands {
            return Err(HubError::Transport("socket closed".to_string()));
        }
        self.sent.lock().unwrap().push((node_id, attribute_id, value));
        Ok(())
    }

    async fn play_homeegram(&self, id: u64) -> Result<(), HubError> {
        self.homeegrams.lock().unwrap().push(id);
        Ok(())
    }

    fn subscribe(&self) -> mpsc::Receiver<HubEvent> {
        self.receiver.lock().unwrap().take().unwrap_or_else(|| {
            let (_tx, rx) = mpsc::channel(1);
            rx
        })
    }
}

pub type TestIntegration = HomeeIntegration<MockHub, StateStore>;

pub fn integration(hub: MockHub) -> (Arc<TestIntegration>, Arc<MockHub>, Arc<StateStore>) {
    let hub = Arc::new(hub);
    let store = Arc::new(StateStore::new());
    let integration = Arc::new(HomeeIntegration::new(
        hub.clone(),
        store.clone(),
        DiscoveryRules::default(),
    ));
    (integration, hub, store)
}

pub fn attr(id: AttributeId, node_id: NodeId, t: AttributeType, value: f64) -> Attribute {
    Attribute::new(id, node_id, t, value)
}

pub fn dimmer() -> Node {
    Node::new(12, "Kitchen Lamp", Profile::DIMMABLE_LIGHT)
        .with_attribute(attr(1, 12, AttributeType::OnOff, 0.0))
        .with_attribute(attr(2, 12, AttributeType::DimmingLevel, 0.0))
        .with_attribute(attr(3, 12, AttributeType::CurrentEnergyUse, 0.0).with_unit("W"))
}

pub fn plug() -> Node {
    Node::new(5, "Bath Plug", Profile::ON_OFF_PLUG)
        .with_attribute(attr(1, 5, AttributeType::OnOff, 0.0))
        .with_attribute(attr(2, 5, AttributeType::RelativeHumidity, 55.0).with_unit("%"))
}

pub fn double_plug() -> Node {
    Node::new(7, "Double Plug", Profile::DOUBLE_ON_OFF_PLUG)
        .with_attribute(attr(20, 7, AttributeType::OnOff, 0.0))
        .with_attribute(attr(10, 7, AttributeType::OnOff, 1.0))
}

pub fn shutter() -> Node {
    Node::new(21, "Shutter", Profile::SHUTTER_POSITION_SWITCH)
        .with_attribute(attr(3, 21, AttributeType::Position, 97.0))
}

pub fn cube() -> Node {
    Node::new(homee_core::CUBE_NODE_ID, "homee", Profile::HOMEE).with_attribute(attr(
        1,
        homee_core::CUBE_NODE_ID,
        AttributeType::HomeeMode,
        0.0,
    ))
}
