//! Command translation
//!
//! Entity-level intents and the value transforms between the host's ranges
//! and the hub's.

use homee_core::{AttributeId, HomeeMode, NodeId};

/// A device-level intent issued by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityCommand {
    /// Light or switch on; lights accept an optional 0-255 brightness
    TurnOn { brightness: Option<u8> },
    TurnOff,
    OpenCover,
    CloseCover,
    /// Cover position, 0 closed to 100 open
    SetCoverPosition(u8),
    /// Climate target temperature in °C
    SetTemperature(f64),
    /// Hub operating mode (cube entity)
    SetMode(HomeeMode),
}

impl EntityCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EntityCommand::TurnOn { .. } => "turn_on",
            EntityCommand::TurnOff => "turn_off",
            EntityCommand::OpenCover => "open_cover",
            EntityCommand::CloseCover => "close_cover",
            EntityCommand::SetCoverPosition(_) => "set_cover_position",
            EntityCommand::SetTemperature(_) => "set_temperature",
            EntityCommand::SetMode(_) => "set_mode",
        }
    }
}

/// A single attribute write for the hub connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HubCommand {
    pub node_id: NodeId,
    pub attribute_id: AttributeId,
    pub value: f64,
}

impl HubCommand {
    pub fn new(node_id: NodeId, attribute_id: AttributeId, value: f64) -> Self {
        Self {
            node_id,
            attribute_id,
            value,
        }
    }
}

/// 0-255 display brightness to the hub's 0-100 dimming level
pub fn brightness_to_hub(brightness: u8) -> f64 {
    f64::from(brightness) / 255.0 * 100.0
}

/// Hub dimming level to 0-255 display brightness
pub fn hub_to_brightness(level: f64) -> u8 {
    (level / 100.0 * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Host cover position (0 closed, 100 open) to the hub's raw position
/// (0 open, 100 closed)
pub fn position_to_hub(position: u8) -> f64 {
    100.0 - f64::from(position.min(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_scaling() {
        assert_eq!(brightness_to_hub(255), 100.0);
        assert_eq!(brightness_to_hub(0), 0.0);
        assert_eq!(hub_to_brightness(100.0), 255);
        assert_eq!(hub_to_brightness(0.0), 0);
        assert_eq!(hub_to_brightness(50.0), 128);
    }

    #[test]
    fn test_brightness_roundtrip_is_stable() {
        for brightness in [0u8, 1, 64, 127, 200, 255] {
            assert_eq!(hub_to_brightness(brightness_to_hub(brightness)), brightness);
        }
    }

    #[test]
    fn test_position_to_hub() {
        assert_eq!(position_to_hub(100), 0.0);
        assert_eq!(position_to_hub(0), 100.0);
        assert_eq!(position_to_hub(30), 70.0);
        assert_eq!(position_to_hub(250), 0.0);
    }
}
