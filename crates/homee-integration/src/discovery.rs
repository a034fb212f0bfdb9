//! Discovery dispatch
//!
//! Turns one newly registered node into device descriptors and groups them
//! into per-category batches.

use homee_core::{Category, DeviceDescriptor, DiscoveryRules, Node};
use tracing::debug;

use crate::classifier::{classify, is_sensor_candidate};

/// All descriptors of one category produced by one discovery cycle
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryBatch {
    pub category: Category,
    pub descriptors: Vec<DeviceDescriptor>,
}

/// Classify a node and fan its informational attributes out as sensors.
///
/// Batches come back in [`Category::ALL`] order and are never empty.
pub fn discover(node: &Node, rules: &DiscoveryRules) -> Vec<DiscoveryBatch> {
    let mut descriptors = Vec::new();

    match classify(node, rules) {
        Some(category) => descriptors.push(DeviceDescriptor::for_node(category, node.clone())),
        None => debug!(node_id = node.id, profile = %node.profile, "Node has no primary category"),
    }

    descriptors.extend(
        node.attributes
            .iter()
            .filter(|attribute| is_sensor_candidate(node, attribute))
            .map(|attribute| {
                DeviceDescriptor::for_attribute(Category::Sensor, node.clone(), attribute.clone())
            }),
    );

    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let batch: Vec<_> = descriptors
                .iter()
                .filter(|d| d.category == category)
                .cloned()
                .collect();
            (!batch.is_empty()).then_some(DiscoveryBatch {
                category,
                descriptors: batch,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use homee_core::{Attribute, AttributeType, Profile, CUBE_NODE_ID};

    #[test]
    fn test_switch_with_humidity() {
        let node = Node::new(8, "Bath Plug", Profile::ON_OFF_PLUG)
            .with_attribute(Attribute::new(1, 8, AttributeType::OnOff, 0.0))
            .with_attribute(Attribute::new(2, 8, AttributeType::RelativeHumidity, 55.0));

        let batches = discover(&node, &DiscoveryRules::default());

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].category, Category::Sensor);
        assert_eq!(batches[0].descriptors.len(), 1);
        assert_eq!(
            batches[0].descriptors[0].attribute.as_ref().map(|a| a.id),
            Some(2)
        );
        assert_eq!(batches[1].category, Category::Switch);
        assert_eq!(batches[1].descriptors.len(), 1);
        assert!(batches[1].descriptors[0].attribute.is_none());
    }

    #[test]
    fn test_batches_in_fixed_order() {
        let node = Node::new(9, "Thermostat", Profile::RADIATOR_THERMOSTAT)
            .with_attribute(Attribute::new(1, 9, AttributeType::Temperature, 20.0))
            .with_attribute(Attribute::new(2, 9, AttributeType::CurrentValvePosition, 30.0))
            .with_attribute(Attribute::new(3, 9, AttributeType::BatteryLevel, 80.0));

        let batches = discover(&node, &DiscoveryRules::default());
        let order: Vec<_> = batches.iter().map(|b| b.category).collect();
        assert_eq!(order, vec![Category::Sensor, Category::Climate]);
        assert_eq!(batches[0].descriptors.len(), 2);
    }

    #[test]
    fn test_unclassified_node_still_yields_sensors() {
        let node = Node::new(4, "Weather", Profile::TEMPERATURE_AND_HUMIDITY_SENSOR)
            .with_attribute(Attribute::new(1, 4, AttributeType::Temperature, 20.0))
            .with_attribute(Attribute::new(2, 4, AttributeType::RelativeHumidity, 40.0));

        let batches = discover(&node, &DiscoveryRules::default());
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].category, Category::Sensor);
        assert_eq!(batches[0].descriptors.len(), 1);
    }

    #[test]
    fn test_cube_yields_single_node_descriptor() {
        let cube = Node::new(CUBE_NODE_ID, "homee", Profile::HOMEE)
            .with_attribute(Attribute::new(1, CUBE_NODE_ID, AttributeType::HomeeMode, 0.0))
            .with_attribute(Attribute::new(2, CUBE_NODE_ID, AttributeType::RelativeHumidity, 0.0));

        let batches = discover(&cube, &DiscoveryRules::default());
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].category, Category::Sensor);
        assert_eq!(batches[0].descriptors.len(), 1);
        assert!(batches[0].descriptors[0].attribute.is_none());
    }

    #[test]
    fn test_nothing_to_publish() {
        let node = Node::new(4, "Remote", Profile(8000))
            .with_attribute(Attribute::new(1, 4, AttributeType::LinkQuality, 3.0));
        assert!(discover(&node, &DiscoveryRules::default()).is_empty());
    }
}
