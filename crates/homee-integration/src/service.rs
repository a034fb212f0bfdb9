//! Hub services exposed under the `homee` domain

use homee_core::HomeeMode;
use serde_json::Value;

use crate::error::ServiceError;

/// Run a homeegram: `{"homeegram_id": 3}`
pub const SERVICE_PLAY_HOMEEGRAM: &str = "play_homeegram";
/// Switch the hub mode: `{"mode": "away"}`
pub const SERVICE_SET_MODE: &str = "set_mode";

/// A parsed service call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HomeeService {
    PlayHomeegram { homeegram_id: u64 },
    SetMode(HomeeMode),
}

impl HomeeService {
    /// Parse a service name and its call data
    pub fn parse(service: &str, data: &Value) -> Result<Self, ServiceError> {
        match service {
            SERVICE_PLAY_HOMEEGRAM => {
                let homeegram_id = data
                    .get("homeegram_id")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| {
                        ServiceError::InvalidData("homeegram_id must be a number".to_string())
                    })?;
                Ok(HomeeService::PlayHomeegram { homeegram_id })
            }
            SERVICE_SET_MODE => {
                let mode = data
                    .get("mode")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ServiceError::InvalidData("mode must be a string".to_string()))?;
                Ok(HomeeService::SetMode(mode.parse()?))
            }
            other => Err(ServiceError::NotFound {
                service: other.to_string(),
            }),
        }
    }
}
