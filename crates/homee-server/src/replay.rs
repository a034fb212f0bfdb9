//! Snapshot replay hub
//!
//! Serves a node snapshot from a JSON file in place of a live cube session.
//! Every accepted command is applied to the snapshot and echoed back as an
//! attribute change, the way the cube confirms writes.

use std::path::Path;
use std::sync::Mutex as StdMutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use homee_core::{AttributeId, Node, NodeId};
use homee_integration::{HubConnection, HubError, HubEvent};
use serde::Deserialize;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Either a bare node list or `{"nodes": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Nodes(Vec<Node>),
    Wrapped { nodes: Vec<Node> },
}

impl Snapshot {
    fn into_nodes(self) -> Vec<Node> {
        match self {
            Snapshot::Nodes(nodes) | Snapshot::Wrapped { nodes } => nodes,
        }
    }
}

pub struct ReplayHub {
    nodes: Mutex<Vec<Node>>,
    events: mpsc::Sender<HubEvent>,
    receiver: StdMutex<Option<mpsc::Receiver<HubEvent>>>,
}

impl ReplayHub {
    pub fn new(nodes: Vec<Node>) -> Self {
        let (events, receiver) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            nodes: Mutex::new(nodes),
            events,
            receiver: StdMutex::new(Some(receiver)),
        }
    }

    /// Load a snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .with_context(|| format!("parsing snapshot {}", path.display()))?;

        let nodes = snapshot.into_nodes();
        info!(path = %path.display(), nodes = nodes.len(), "Loaded node snapshot");
        Ok(Self::new(nodes))
    }
}

#[async_trait]
impl HubConnection for ReplayHub {
    async fn fetch_nodes(&self) -> Result<Vec<Node>, HubError> {
        Ok(self.nodes.lock().await.clone())
    }

    async fn send_command(
        &self,
        node_id: NodeId,
        attribute_id: AttributeId,
        value: f64,
    ) -> Result<(), HubError> {
        let changed = {
            let mut nodes = self.nodes.lock().await;
            let attribute = nodes
                .iter_mut()
                .find(|n| n.id == node_id)
                .and_then(|n| n.attribute_mut(attribute_id))
                .ok_or_else(|| {
                    HubError::Rejected(format!(
                        "node {} has no attribute {}",
                        node_id, attribute_id
                    ))
                })?;
            attribute.value = value;
            attribute.clone()
        };

        debug!(node_id, attribute_id, value, "Echoing command");
        self.events
            .send(HubEvent::AttributeChanged(changed))
            .await
            .map_err(|_| HubError::Closed)
    }

    async fn play_homeegram(&self, id: u64) -> Result<(), HubError> {
        info!(homeegram_id = id, "Playing homeegram (replay: no effect)");
        Ok(())
    }

    fn subscribe(&self) -> mpsc::Receiver<HubEvent> {
        let taken = self
            .receiver
            .lock()
            .ok()
            .and_then(|mut receiver| receiver.take());

        taken.unwrap_or_else(|| {
            warn!("Event channel already taken, returning a closed channel");
            let (_, receiver) = mpsc::channel(1);
            receiver
        })
    }
}
