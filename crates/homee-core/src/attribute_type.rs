//! Attribute type registry
//!
//! Maps the hub's numeric attribute type codes to canonical symbolic names.
//! Lookups are total: codes missing from the table resolve to the fallback
//! entry at index 0.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Symbolic attribute type of a hub attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AttributeType {
    Unknown,
    OnOff,
    DimmingLevel,
    CurrentEnergyUse,
    AccumulatedEnergyUse,
    Temperature,
    TargetTemperature,
    RelativeHumidity,
    BatteryLevel,
    StatusLed,
    WindowPosition,
    Brightness,
    FloodAlarm,
    Siren,
    OpenClose,
    Position,
    SmokeAlarm,
    BlackoutAlarm,
    CurrentValvePosition,
    BinaryInput,
    TamperAlarm,
    LocalProtection,
    RemoteProtection,
    Color,
    SoftwareRevision,
    IdentificationMode,
    BatteryLowAlarm,
    LinkQuality,
    HomeeMode,
    Co2Level,
    MotionAlarm,
}

/// Canonical (code, type, name) table. Entry 0 is the fallback.
const ATTRIBUTE_TYPES: &[(u32, AttributeType, &str)] = &[
    (0, AttributeType::Unknown, "Unknown"),
    (1, AttributeType::OnOff, "OnOff"),
    (2, AttributeType::DimmingLevel, "DimmingLevel"),
    (3, AttributeType::CurrentEnergyUse, "CurrentEnergyUse"),
    (4, AttributeType::AccumulatedEnergyUse, "AccumulatedEnergyUse"),
    (5, AttributeType::Temperature, "Temperature"),
    (6, AttributeType::TargetTemperature, "TargetTemperature"),
    (7, AttributeType::RelativeHumidity, "RelativeHumidity"),
    (8, AttributeType::BatteryLevel, "BatteryLevel"),
    (9, AttributeType::StatusLed, "StatusLED"),
    (10, AttributeType::WindowPosition, "WindowPosition"),
    (11, AttributeType::Brightness, "Brightness"),
    (12, AttributeType::FloodAlarm, "FloodAlarm"),
    (13, AttributeType::Siren, "Siren"),
    (14, AttributeType::OpenClose, "OpenClose"),
    (15, AttributeType::Position, "Position"),
    (16, AttributeType::SmokeAlarm, "SmokeAlarm"),
    (17, AttributeType::BlackoutAlarm, "BlackoutAlarm"),
    (18, AttributeType::CurrentValvePosition, "CurrentValvePosition"),
    (19, AttributeType::BinaryInput, "BinaryInput"),
    (20, AttributeType::TamperAlarm, "TamperAlarm"),
    (21, AttributeType::LocalProtection, "LocalProtection"),
    (22, AttributeType::RemoteProtection, "RemoteProtection"),
    (23, AttributeType::Color, "Color"),
    (24, AttributeType::SoftwareRevision, "SoftwareRevision"),
    (25, AttributeType::IdentificationMode, "IdentificationMode"),
    (26, AttributeType::BatteryLowAlarm, "BatteryLowAlarm"),
    (27, AttributeType::LinkQuality, "LinkQuality"),
    (28, AttributeType::HomeeMode, "HomeeMode"),
    (29, AttributeType::Co2Level, "CO2Level"),
    (30, AttributeType::MotionAlarm, "MotionAlarm"),
];

impl AttributeType {
    /// Resolve a hub type code. Never fails.
    pub fn from_code(code: u32) -> Self {
        ATTRIBUTE_TYPES
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, t, _)| *t)
            .unwrap_or(AttributeType::Unknown)
    }

    fn entry(self) -> &'static (u32, AttributeType, &'static str) {
        ATTRIBUTE_TYPES
            .iter()
            .find(|(_, t, _)| *t == self)
            .unwrap_or(&ATTRIBUTE_TYPES[0])
    }

    /// The hub's numeric code for this type
    pub fn code(self) -> u32 {
        self.entry().0
    }

    /// The canonical symbolic name (e.g. "DimmingLevel")
    pub fn name(self) -> &'static str {
        self.entry().2
    }

    /// All known types in table order
    pub fn all() -> impl Iterator<Item = AttributeType> {
        ATTRIBUTE_TYPES.iter().map(|(_, t, _)| *t)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ATTRIBUTE_TYPES
            .iter()
            .find(|(_, _, name)| *name == s)
            .map(|(_, t, _)| *t)
            .ok_or_else(|| ParseError::UnknownAttributeType(s.to_string()))
    }
}

impl TryFrom<String> for AttributeType {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AttributeType> for String {
    fn from(t: AttributeType) -> String {
        t.name().to_string()
    }
}
