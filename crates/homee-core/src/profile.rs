//! Node profiles
//!
//! A profile is the hub's integer classification of a node's device family.
//! Only the families the integration classifies are named here; any other
//! code is still a valid `Profile`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Device family code of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(pub u32);

impl Profile {
    pub const NONE: Profile = Profile(0);
    pub const HOMEE: Profile = Profile(1);

    // Switches and plugs
    pub const ON_OFF_PLUG: Profile = Profile(10);
    pub const DIMMABLE_METERING_SWITCH: Profile = Profile(11);
    pub const METERING_SWITCH: Profile = Profile(12);
    pub const METERING_PLUG: Profile = Profile(13);
    pub const DIMMABLE_PLUG: Profile = Profile(14);
    pub const DIMMABLE_SWITCH: Profile = Profile(15);
    pub const ON_OFF_SWITCH: Profile = Profile(16);
    pub const DOUBLE_ON_OFF_SWITCH: Profile = Profile(18);
    pub const DIMMABLE_METERING_PLUG: Profile = Profile(19);
    pub const DOUBLE_ON_OFF_PLUG: Profile = Profile(28);
    pub const ON_OFF_SWITCH_WITH_BINARY_INPUT: Profile = Profile(29);

    // Lights
    pub const DIMMABLE_COLOR_LIGHT: Profile = Profile(22);
    pub const DIMMABLE_EXTENDED_COLOR_LIGHT: Profile = Profile(33);
    pub const DIMMABLE_COLOR_TEMPERATURE_LIGHT: Profile = Profile(34);
    pub const DIMMABLE_LIGHT: Profile = Profile(37);
    pub const DIMMABLE_LIGHT_WITH_BRIGHTNESS_SENSOR: Profile = Profile(38);

    // Contact sensors
    pub const OPEN_CLOSE_SENSOR: Profile = Profile(2000);
    pub const WINDOW_HANDLE: Profile = Profile(2001);
    pub const OPEN_CLOSE_AND_TEMPERATURE_SENSOR: Profile = Profile(2005);

    // Shutters
    pub const SHUTTER_POSITION_SWITCH: Profile = Profile(2002);
    pub const ELECTRIC_MOTOR_METERING_SWITCH: Profile = Profile(2003);

    // Heating
    pub const TEMPERATURE_AND_HUMIDITY_SENSOR: Profile = Profile(3001);
    pub const ROOM_THERMOSTAT: Profile = Profile(3003);
    pub const RADIATOR_THERMOSTAT: Profile = Profile(3006);
    pub const ROOM_THERMOSTAT_WITH_HUMIDITY_SENSOR: Profile = Profile(3009);
    pub const HEATING_CONTROL: Profile = Profile(3011);
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
