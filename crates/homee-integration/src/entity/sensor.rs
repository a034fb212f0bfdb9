//! Plain sensors, one per informational attribute

use std::collections::HashMap;
use std::sync::OnceLock;

use homee_core::{slugify, Attribute, Node};
use regex::Regex;
use serde_json::Value;

use super::{homee_id, AttributeSelector, EntityKind, HomeeEntity};

static CAMEL_BOUNDARY: OnceLock<Option<Regex>> = OnceLock::new();

/// "RelativeHumidity" -> "Relative Humidity"
fn type_words(name: &str) -> String {
    match CAMEL_BOUNDARY.get_or_init(|| Regex::new("([a-z])([A-Z])").ok()) {
        Some(re) => re.replace_all(name, "$1 $2").into_owned(),
        None => name.to_string(),
    }
}

pub(super) fn build(node: &Node, attribute: &Attribute) -> HomeeEntity {
    let type_name = attribute.attribute_type().name();
    HomeeEntity::new(
        EntityKind::Sensor,
        node,
        format!("{}_{}_{}", homee_id(node), slugify(type_name), attribute.id),
        format!("{} {}", node.name, type_words(type_name)),
        AttributeSelector::Id(attribute.id),
    )
}

pub(super) fn render(entity: &HomeeEntity, attributes: &mut HashMap<String, Value>) -> String {
    let Some(attribute) = entity.attributes().first() else {
        return String::new();
    };

    if let Some(unit) = attribute.unit() {
        attributes.insert(
            "unit_of_measurement".to_string(),
            Value::String(unit.to_string()),
        );
    }
    attribute.value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::tests::attr;
    use homee_core::{AttributeType, Profile};

    #[test]
    fn test_type_words() {
        assert_eq!(type_words("RelativeHumidity"), "Relative Humidity");
        assert_eq!(type_words("CurrentEnergyUse"), "Current Energy Use");
        assert_eq!(type_words("Brightness"), "Brightness");
    }

    #[test]
    fn test_identity() {
        let node = Node::new(4, "Hall Sensor", Profile::TEMPERATURE_AND_HUMIDITY_SENSOR)
            .with_attribute(attr(12, 4, AttributeType::RelativeHumidity, 48.0).with_unit("%"));
        let entity = build(&node, &node.attributes[0]);

        assert_eq!(
            entity.entity_id().to_string(),
            "sensor.hall_sensor_4_relativehumidity_12"
        );
        assert_eq!(entity.unique_id(), "hall_sensor_4_relativehumidity_12");
        assert_eq!(entity.name(), "Hall Sensor Relative Humidity");
    }

    #[test]
    fn test_render_and_unit() {
        let node = Node::new(4, "Hall Sensor", Profile::TEMPERATURE_AND_HUMIDITY_SENSOR)
            .with_attribute(attr(12, 4, AttributeType::RelativeHumidity, 48.5).with_unit("%"))
            .with_attribute(attr(13, 4, AttributeType::Siren, 0.0));

        let humidity = build(&node, &node.attributes[0]).state();
        assert_eq!(humidity.state, "48.5");
        assert_eq!(
            humidity.attribute::<String>("unit_of_measurement").as_deref(),
            Some("%")
        );
        assert!(humidity.attributes.get("RelativeHumidity").is_none());

        let siren = build(&node, &node.attributes[1]).state();
        assert_eq!(siren.state, "0");
        assert!(siren.attributes.get("unit_of_measurement").is_none());
    }
}
