//! Thermostats and radiator valves

use std::collections::HashMap;

use homee_core::{AttributeType, Node};
use serde_json::{json, Value};

use super::{homee_id, AttributeSelector, EntityKind, HomeeEntity};
use crate::command::{EntityCommand, HubCommand};
use crate::error::CommandError;

const MIN_TEMP: f64 = 4.5;
const MAX_TEMP: f64 = 30.5;
const TEMPERATURE_UNIT: &str = "°C";

const TYPES: &[AttributeType] = &[
    AttributeType::Temperature,
    AttributeType::TargetTemperature,
    AttributeType::RelativeHumidity,
    AttributeType::CurrentValvePosition,
];

/// HVAC mode derived from the valve position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HvacMode {
    Off,
    Cool,
    Heat,
}

impl HvacMode {
    pub const ALL: [HvacMode; 3] = [HvacMode::Off, HvacMode::Cool, HvacMode::Heat];

    pub fn as_str(self) -> &'static str {
        match self {
            HvacMode::Off => "off",
            HvacMode::Cool => "cool",
            HvacMode::Heat => "heat",
        }
    }
}

/// An open valve means heating, a closed one cooling, no valve at all off
pub fn hvac_mode(valve_position: Option<f64>) -> HvacMode {
    match valve_position {
        None => HvacMode::Off,
        Some(position) if position > 0.0 => HvacMode::Heat,
        Some(_) => HvacMode::Cool,
    }
}

pub(super) fn build(node: &Node) -> HomeeEntity {
    HomeeEntity::new(
        EntityKind::Climate,
        node,
        homee_id(node),
        node.name.clone(),
        AttributeSelector::Types(TYPES).with_leftovers(&[]),
    )
}

pub(super) fn render(entity: &HomeeEntity, attributes: &mut HashMap<String, Value>) -> String {
    attributes.insert(
        "current_temperature".to_string(),
        json!(entity.value(AttributeType::Temperature).unwrap_or(0.0)),
    );
    attributes.insert(
        "temperature".to_string(),
        json!(entity.value(AttributeType::TargetTemperature).unwrap_or(0.0)),
    );
    if let Some(humidity) = entity.value(AttributeType::RelativeHumidity) {
        attributes.insert("current_humidity".to_string(), json!(humidity));
    }
    attributes.insert("min_temp".to_string(), json!(MIN_TEMP));
    attributes.insert("max_temp".to_string(), json!(MAX_TEMP));
    attributes.insert(
        "hvac_modes".to_string(),
        json!(HvacMode::ALL.map(HvacMode::as_str)),
    );
    attributes.insert("temperature_unit".to_string(), json!(TEMPERATURE_UNIT));

    hvac_mode(entity.value(AttributeType::CurrentValvePosition))
        .as_str()
        .to_string()
}

pub(super) fn translate(
    entity: &HomeeEntity,
    command: &EntityCommand,
) -> Result<HubCommand, CommandError> {
    match *command {
        EntityCommand::SetTemperature(temperature) => {
            entity.write(AttributeType::TargetTemperature, temperature)
        }
        _ => Err(entity.unsupported(command)),
    }
}
