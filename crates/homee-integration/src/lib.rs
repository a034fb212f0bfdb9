//! homee integration engine
//!
//! Bridges a homee cube to a host platform's entity model:
//!
//! - [`classify`] maps a node to a device category
//! - [`NodeStore`] is the registry of known nodes and attributes
//! - [`discover`] turns a newly seen node into per-category discovery batches
//! - [`HomeeEntity`] is the bound device representation, one [`EntityKind`]
//!   per category
//! - [`UpdateRouter`] routes attribute changes to every bound entity
//! - [`EntityCommand`] is translated into hub attribute writes
//! - [`HomeeService`] covers the `homee.play_homeegram` and `homee.set_mode`
//!   services
//!
//! [`HomeeIntegration`] ties these together behind a single lock and consumes
//! [`HubEvent`]s from a [`HubConnection`].

mod classifier;
mod command;
mod discovery;
mod entity;
mod error;
mod hub;
mod integration;
mod router;
mod service;
mod store;

pub use classifier::{classify, is_sensor_candidate, NON_SENSOR_TYPES};
pub use command::{
    brightness_to_hub, hub_to_brightness, position_to_hub, EntityCommand, HubCommand,
};
pub use discovery::{discover, DiscoveryBatch};
pub use entity::{
    build_entities, cover_position, hvac_mode, AttributeSelector, EntityKind, HomeeEntity,
    HvacMode, ATTR_BATTERY_LEVEL,
};
pub use error::{CommandError, HubError, ServiceError, SetupError};
pub use hub::{HubConnection, HubEvent};
pub use integration::HomeeIntegration;
pub use router::UpdateRouter;
pub use service::{HomeeService, SERVICE_PLAY_HOMEEGRAM, SERVICE_SET_MODE};
pub use store::NodeStore;
