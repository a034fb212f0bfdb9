//! Node classification
//!
//! Maps a node to at most one primary device category. Rules are evaluated
//! in a fixed order and the first match wins:
//!
//! 1. the cube node is a sensor
//! 2. light profiles
//! 3. climate profiles
//! 4. binary sensor profiles
//! 5. switch profiles
//! 6. any attribute of the cover-position type makes a cover
//!
//! Everything else yields no primary category.

use homee_core::{Attribute, AttributeType, Category, DiscoveryRules, Node};

/// Attribute types that feed a primary device and never surface as
/// standalone sensors.
pub const NON_SENSOR_TYPES: [AttributeType; 10] = [
    AttributeType::OnOff,
    AttributeType::DimmingLevel,
    AttributeType::Color,
    AttributeType::OpenClose,
    AttributeType::Temperature,
    AttributeType::TargetTemperature,
    AttributeType::BatteryLowAlarm,
    AttributeType::LinkQuality,
    AttributeType::IdentificationMode,
    AttributeType::SoftwareRevision,
];

/// Primary category of a node, if any
pub fn classify(node: &Node, rules: &DiscoveryRules) -> Option<Category> {
    if node.is_cube() {
        return Some(Category::Sensor);
    }

    let profile_rules = [
        (&rules.light_profiles, Category::Light),
        (&rules.climate_profiles, Category::Climate),
        (&rules.binary_sensor_profiles, Category::BinarySensor),
        (&rules.switch_profiles, Category::Switch),
    ];
    for (profiles, category) in profile_rules {
        if profiles.contains(&node.profile) {
            return Some(category);
        }
    }

    if node.has_attribute_type(rules.cover_position_type) {
        return Some(Category::Cover);
    }

    None
}

/// Whether an attribute surfaces as its own sensor next to the primary device
pub fn is_sensor_candidate(node: &Node, attribute: &Attribute) -> bool {
    !node.is_cube() && !NON_SENSOR_TYPES.contains(&attribute.attribute_type())
}
