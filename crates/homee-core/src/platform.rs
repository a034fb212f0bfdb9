//! The host platform seam
//!
//! The integration never renders UI itself. It publishes discovery batches
//! and rendered entity states through [`EntityPlatform`], which the host
//! implements.

use crate::{Attribute, Category, EntityState, Node};

/// A node (and optionally one of its attributes) paired with the category it
/// was discovered as. Consumed once to build an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceDescriptor {
    pub category: Category,
    pub node: Node,
    pub attribute: Option<Attribute>,
}

impl DeviceDescriptor {
    pub fn for_node(category: Category, node: Node) -> Self {
        Self {
            category,
            node,
            attribute: None,
        }
    }

    pub fn for_attribute(category: Category, node: Node, attribute: Attribute) -> Self {
        Self {
            category,
            node,
            attribute: Some(attribute),
        }
    }
}

/// Host side of the integration
///
/// Both calls are made while the integration holds its registry lock, so
/// implementations must not call back into the integration.
pub trait EntityPlatform: Send + Sync {
    /// One batch per non-empty category per discovery cycle, published before
    /// the batch's entities report their first state.
    fn discover(&self, category: Category, descriptors: &[DeviceDescriptor]);

    /// A bound entity's observable state must be re-rendered.
    fn notify_state_changed(&self, state: EntityState);
}
