//! The integration: node store and binding table behind one lock, fed by
//! hub events and driven by host commands

use std::future::Future;
use std::sync::Arc;

use homee_core::{
    Attribute, DiscoveryRules, EntityId, EntityPlatform, EntityState, HomeeMode, Node, NodeId,
    DOMAIN,
};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, instrument, trace, warn};

use crate::command::EntityCommand;
use crate::discovery::discover;
use crate::entity::{build_entities, EntityKind};
use crate::error::{CommandError, HubError, ServiceError, SetupError};
use crate::hub::{HubConnection, HubEvent};
use crate::router::UpdateRouter;
use crate::service::HomeeService;
use crate::store::NodeStore;

/// Shared mutable state. Every mutation happens under one lock so a
/// discovery or an attribute change is applied completely or not at all.
#[derive(Default)]
struct Registry {
    store: NodeStore,
    router: UpdateRouter,
}

impl Registry {
    /// Register, classify, publish and bind a newly seen node.
    ///
    /// Entities are built from the registered snapshot and bound before the
    /// lock is released, so no change can reach a half-built entity.
    fn discover_node(
        &mut self,
        node: Node,
        rules: &DiscoveryRules,
        platform: &dyn EntityPlatform,
    ) -> bool {
        if self.store.contains(node.id) {
            trace!(node_id = node.id, "Ignoring duplicate discovery");
            return false;
        }

        info!(node_id = node.id, name = %node.name, "Discovered new node");
        let batches = discover(&node, rules);
        self.store.register(node);

        for batch in batches {
            platform.discover(batch.category, &batch.descriptors);

            let mut states = Vec::new();
            for descriptor in &batch.descriptors {
                for entity in build_entities(descriptor, rules) {
                    let state = entity.state();
                    if self.router.bind(entity) {
                        states.push(state);
                    }
                }
            }
            for state in states {
                platform.notify_state_changed(state);
            }
        }
        true
    }
}

/// A running homee integration
pub struct HomeeIntegration<H, P> {
    hub: Arc<H>,
    platform: Arc<P>,
    rules: DiscoveryRules,
    registry: Mutex<Registry>,
}

impl<H, P> HomeeIntegration<H, P>
where
    H: HubConnection,
    P: EntityPlatform,
{
    pub fn new(hub: Arc<H>, platform: Arc<P>, rules: DiscoveryRules) -> Self {
        Self {
            hub,
            platform,
            rules,
            registry: Mutex::new(Registry::default()),
        }
    }

    pub fn hub(&self) -> &Arc<H> {
        &self.hub
    }

    pub fn rules(&self) -> &DiscoveryRules {
        &self.rules
    }

    /// Initial bulk load. A failed fetch registers nothing.
    ///
    /// Returns the number of newly discovered nodes.
    #[instrument(skip(self))]
    pub async fn setup(&self) -> Result<usize, SetupError> {
        let nodes = self.hub.fetch_nodes().await?;
        info!(count = nodes.len(), "Fetched nodes from cube");

        let mut registry = self.registry.lock().await;
        let mut discovered = 0;
        for node in nodes {
            if registry.discover_node(node, &self.rules, self.platform.as_ref()) {
                discovered += 1;
            }
        }
        Ok(discovered)
    }

    /// Handle a (possibly repeated) discovery callback.
    ///
    /// Returns `false` if the node was already known.
    #[instrument(skip(self, node), fields(node_id = node.id))]
    pub async fn on_node_discovered(&self, node: Node) -> bool {
        let mut registry = self.registry.lock().await;
        registry.discover_node(node, &self.rules, self.platform.as_ref())
    }

    /// Store a changed attribute and re-render every entity bound to it.
    ///
    /// Returns the number of entities notified.
    #[instrument(
        skip(self, attribute),
        fields(node_id = attribute.node_id, attribute_id = attribute.id)
    )]
    pub async fn on_attribute_changed(&self, attribute: Attribute) -> usize {
        let mut registry = self.registry.lock().await;

        if registry.store.update_attribute(&attribute).is_none() {
            debug!("Attribute change for unknown node");
            return 0;
        }

        let states = registry.router.route(&attribute);
        let notified = states.len();
        for state in states {
            self.platform.notify_state_changed(state);
        }
        notified
    }

    /// Refresh a known node's name and availability; an unknown node is
    /// treated as a discovery.
    #[instrument(skip(self, node), fields(node_id = node.id))]
    pub async fn on_node_changed(&self, node: Node) {
        let mut registry = self.registry.lock().await;

        if registry.store.update_node(&node).is_none() {
            registry.discover_node(node, &self.rules, self.platform.as_ref());
            return;
        }

        debug!(available = node.is_available(), "Node changed");
        for state in registry.router.refresh_node(&node) {
            self.platform.notify_state_changed(state);
        }
    }

    /// Dispatch one hub event to its handler
    #[instrument(skip(self, event), fields(node_id = event.node_id()))]
    pub async fn handle_event(&self, event: HubEvent) {
        match event {
            HubEvent::NodeDiscovered(node) => {
                self.on_node_discovered(node).await;
            }
            HubEvent::NodeChanged(node) => self.on_node_changed(node).await,
            HubEvent::AttributeChanged(attribute) => {
                self.on_attribute_changed(attribute).await;
            }
        }
    }

    /// Consume hub events until the channel closes or `shutdown` resolves.
    ///
    /// Each event is handled to completion; shutdown is only observed
    /// between events.
    pub async fn run<F>(&self, mut events: mpsc::Receiver<HubEvent>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutting down homee event loop");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        info!("Hub event channel closed");
                        break;
                    }
                },
            }
        }
    }

    /// Translate a command for an entity and send it to the hub.
    ///
    /// The hub call is made after the registry lock is released.
    #[instrument(skip(self, entity_id), fields(entity_id = %entity_id))]
    pub async fn command(
        &self,
        entity_id: &EntityId,
        command: EntityCommand,
    ) -> Result<(), CommandError> {
        let hub_command = {
            let registry = self.registry.lock().await;
            let entity = registry
                .router
                .get(entity_id)
                .ok_or_else(|| CommandError::UnknownEntity(entity_id.clone()))?;
            entity.translate(&command)?
        };

        debug!(
            node_id = hub_command.node_id,
            attribute_id = hub_command.attribute_id,
            value = hub_command.value,
            command = command.name(),
            "Sending command"
        );

        self.hub
            .send_command(hub_command.node_id, hub_command.attribute_id, hub_command.value)
            .await
            .map_err(|e| {
                warn!(error = %e, "Command failed");
                CommandError::from(e)
            })
    }

    /// Run a homeegram on the hub
    #[instrument(skip(self))]
    pub async fn play_homeegram(&self, id: u64) -> Result<(), HubError> {
        info!("Playing homeegram");
        self.hub.play_homeegram(id).await
    }

    /// Switch the hub's operating mode through the cube entity
    #[instrument(skip(self))]
    pub async fn set_mode(&self, mode: HomeeMode) -> Result<(), CommandError> {
        let entity_id = {
            let registry = self.registry.lock().await;
            registry
                .router
                .find_kind(EntityKind::Cube)
                .map(|entity| entity.entity_id().clone())
        }
        .unwrap_or_else(|| EntityId::new(DOMAIN, "cube"));

        info!(mode = %mode, "Setting hub mode");
        self.command(&entity_id, EntityCommand::SetMode(mode)).await
    }

    /// Call a `homee.<service>` service with JSON call data
    #[instrument(skip(self, data))]
    pub async fn call_service(
        &self,
        service: &str,
        data: &serde_json::Value,
    ) -> Result<(), ServiceError> {
        let call = HomeeService::parse(service, data).map_err(|e| {
            warn!(error = %e, "Rejected service call");
            e
        })?;

        match call {
            HomeeService::PlayHomeegram { homeegram_id } => self
                .play_homeegram(homeegram_id)
                .await
                .map_err(|e| ServiceError::Command(e.into())),
            HomeeService::SetMode(mode) => Ok(self.set_mode(mode).await?),
        }
    }

    /// Current rendered state of every bound entity
    pub async fn states(&self) -> Vec<EntityState> {
        self.registry.lock().await.router.states()
    }

    /// Entities whose selector matches no attribute of their node
    pub async fn dead_bindings(&self) -> Vec<EntityId> {
        self.registry.lock().await.router.dead_bindings()
    }

    pub async fn node(&self, node_id: NodeId) -> Option<Node> {
        self.registry.lock().await.store.get(node_id).cloned()
    }

    pub async fn node_count(&self) -> usize {
        self.registry.lock().await.store.len()
    }
}
