//! Error types for the integration engine

use homee_core::{AttributeType, Category, EntityId, ParseError};
use thiserror::Error;

/// Failure reported by the hub connection
#[derive(Debug, Error)]
pub enum HubError {
    /// Network or session failure
    #[error("hub transport error: {0}")]
    Transport(String),

    /// The hub answered but refused the request
    #[error("hub rejected request: {0}")]
    Rejected(String),

    /// The connection is gone
    #[error("hub connection closed")]
    Closed,
}

/// Errors that can occur when executing an entity command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// The entity's category cannot execute the command
    #[error("{command} is not supported by {category} entity {entity_id}")]
    Unsupported {
        entity_id: EntityId,
        category: &'static str,
        command: &'static str,
    },

    /// The node lacks the attribute the command writes
    #[error("entity {entity_id} has no {attribute_type} attribute")]
    MissingAttribute {
        entity_id: EntityId,
        attribute_type: AttributeType,
    },

    #[error(transparent)]
    Hub(#[from] HubError),
}

/// Errors that can occur when calling a `homee` service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service not found: homee.{service}")]
    NotFound { service: String },

    #[error("invalid service data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Errors that abort integration setup
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("initial node fetch failed: {0}")]
    Fetch(#[from] HubError),
}

impl CommandError {
    pub(crate) fn unsupported(entity_id: &EntityId, category: Option<Category>, command: &'static str) -> Self {
        CommandError::Unsupported {
            entity_id: entity_id.clone(),
            category: category.map(Category::domain).unwrap_or(homee_core::DOMAIN),
            command,
        }
    }
}
