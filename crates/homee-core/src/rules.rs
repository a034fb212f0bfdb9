//! Classification rules
//!
//! The profile sets and the cover-position type the classifier consults.
//! These are configuration data; the defaults cover the hub's published
//! profile families.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{AttributeType, Profile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryRules {
    /// Profiles surfaced as lights
    pub light_profiles: BTreeSet<Profile>,
    /// Profiles surfaced as climate devices
    pub climate_profiles: BTreeSet<Profile>,
    /// Profiles surfaced as binary (opening) sensors
    pub binary_sensor_profiles: BTreeSet<Profile>,
    /// Profiles surfaced as switches
    pub switch_profiles: BTreeSet<Profile>,
    /// Switch profiles exposing one switch per OnOff attribute
    pub double_switch_profiles: BTreeSet<Profile>,
    /// Attribute type that marks an otherwise unclassified node as a cover
    pub cover_position_type: AttributeType,
}

impl Default for DiscoveryRules {
    fn default() -> Self {
        Self {
            light_profiles: BTreeSet::from([
                Profile::DIMMABLE_METERING_SWITCH,
                Profile::DIMMABLE_PLUG,
                Profile::DIMMABLE_SWITCH,
                Profile::DIMMABLE_METERING_PLUG,
                Profile::DIMMABLE_COLOR_LIGHT,
                Profile::DIMMABLE_EXTENDED_COLOR_LIGHT,
                Profile::DIMMABLE_COLOR_TEMPERATURE_LIGHT,
                Profile::DIMMABLE_LIGHT,
                Profile::DIMMABLE_LIGHT_WITH_BRIGHTNESS_SENSOR,
            ]),
            climate_profiles: BTreeSet::from([
                Profile::ROOM_THERMOSTAT,
                Profile::RADIATOR_THERMOSTAT,
                Profile::ROOM_THERMOSTAT_WITH_HUMIDITY_SENSOR,
                Profile::HEATING_CONTROL,
            ]),
            binary_sensor_profiles: BTreeSet::from([
                Profile::OPEN_CLOSE_SENSOR,
                Profile::WINDOW_HANDLE,
                Profile::OPEN_CLOSE_AND_TEMPERATURE_SENSOR,
            ]),
            switch_profiles: BTreeSet::from([
                Profile::ON_OFF_PLUG,
                Profile::METERING_SWITCH,
                Profile::METERING_PLUG,
                Profile::ON_OFF_SWITCH,
                Profile::DOUBLE_ON_OFF_SWITCH,
                Profile::DOUBLE_ON_OFF_PLUG,
                Profile::ON_OFF_SWITCH_WITH_BINARY_INPUT,
            ]),
            double_switch_profiles: BTreeSet::from([
                Profile::DOUBLE_ON_OFF_SWITCH,
                Profile::DOUBLE_ON_OFF_PLUG,
            ]),
            cover_position_type: AttributeType::Position,
        }
    }
}
