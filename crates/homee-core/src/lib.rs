//! Core types for the homee integration
//!
//! This crate provides the data model shared by the integration engine, the
//! configuration loader and host platforms: hub nodes and attributes, the
//! attribute type registry, node profiles, device categories, entity ids and
//! the rendered entity state.

mod attribute;
mod attribute_type;
mod category;
mod entity_id;
mod error;
mod mode;
mod node;
mod platform;
mod profile;
mod rules;
mod state;

pub use attribute::{Attribute, AttributeId, UNIT_NONE};
pub use attribute_type::AttributeType;
pub use category::Category;
pub use entity_id::{slugify, EntityId};
pub use error::ParseError;
pub use mode::HomeeMode;
pub use node::{Node, NodeId, NodeState, CUBE_NODE_ID};
pub use platform::{DeviceDescriptor, EntityPlatform};
pub use profile::Profile;
pub use rules::DiscoveryRules;
pub use state::{
    EntityState, STATE_CLOSED, STATE_OFF, STATE_ON, STATE_OPEN, STATE_UNAVAILABLE,
    STATE_UNKNOWN,
};

/// Domain of the integration itself (services, cube entity)
pub const DOMAIN: &str = "homee";

/// Unique id of the entity representing the hub
pub const CUBE_UNIQUE_ID: &str = "homee";
