//! homee bridge
//!
//! Main entry point: loads the `homee:` configuration, connects the
//! integration to a hub and keeps entity states in a [`StateStore`].

mod replay;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use homee_config::HomeeConfig;
use homee_integration::{HomeeIntegration, HubConnection};
use homee_states::StateStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::replay::ReplayHub;

/// Directory holding `configuration.yaml` and `secrets.yaml`
const CONFIG_DIR_ENV: &str = "HOMEE_CONFIG_DIR";
/// JSON node snapshot served in place of a live cube
const SNAPSHOT_ENV: &str = "HOMEE_SNAPSHOT";

type Integration = HomeeIntegration<ReplayHub, StateStore>;

/// The running bridge
pub struct Bridge {
    pub integration: Arc<Integration>,
    pub states: Arc<StateStore>,
}

impl Bridge {
    pub fn new(config: HomeeConfig, hub: ReplayHub) -> Self {
        let states = Arc::new(StateStore::new());
        let integration = Arc::new(HomeeIntegration::new(
            Arc::new(hub),
            states.clone(),
            config.discovery,
        ));
        Self {
            integration,
            states,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting homee bridge");

    let config_dir = PathBuf::from(env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| ".".to_string()));
    let config = HomeeConfig::load(&config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir.display()))?;
    info!(cube = %config.cube, username = %config.username, "Loaded configuration");

    let snapshot = env::var(SNAPSHOT_ENV)
        .with_context(|| format!("{} must name a node snapshot file", SNAPSHOT_ENV))?;
    let hub = ReplayHub::load(&snapshot)?;
    let events = hub.subscribe();

    let bridge = Bridge::new(config, hub);
    spawn_state_logger(&bridge.states);

    let discovered = bridge
        .integration
        .setup()
        .await
        .context("homee setup failed")?;
    info!(
        nodes = discovered,
        entities = bridge.states.entity_count(),
        "homee integration initialized"
    );
    for entity_id in bridge.integration.dead_bindings().await {
        warn!(entity_id = %entity_id, "Entity has no attributes to track");
    }

    tokio::spawn(read_service_calls(bridge.integration.clone()));

    info!("homee bridge is running");

    bridge
        .integration
        .run(events, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for ctrl-c");
            }
        })
        .await;

    info!("Shutting down...");

    Ok(())
}

fn spawn_state_logger(states: &StateStore) {
    let mut changes = states.subscribe();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(event) => info!(
                    entity_id = %event.entity_id,
                    state = %event.new_state.state.state,
                    "State changed"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "State logger lagging behind")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// Read `<service> [json]` lines from stdin and call `homee.<service>`
async fn read_service_calls(integration: Arc<Integration>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read service call");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (service, data) = line.split_once(char::is_whitespace).unwrap_or((line, "{}"));
        let data = match serde_json::from_str(data.trim()) {
            Ok(data) => data,
            Err(e) => {
                warn!(service, error = %e, "Service data is not valid JSON");
                continue;
            }
        };

        match integration.call_service(service, &data).await {
            Ok(()) => info!(service, "Service call completed"),
            Err(e) => warn!(service, error = %e, "Service call failed"),
        }
    }
}
