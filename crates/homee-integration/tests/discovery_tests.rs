//! Discovery, binding and update routing through a state store host

mod common;

use std::collections::HashSet;

use common::*;
use homee_core::{AttributeType, Category, Node, NodeState, Profile};
use homee_integration::{HubConnection, HubEvent, SetupError};
use tokio::task::JoinSet;

#[tokio::test]
async fn test_setup_publishes_batches_and_states() {
    let (integration, _hub, store) = integration(MockHub::new(vec![dimmer(), plug()]));

    assert_eq!(integration.setup().await.unwrap(), 2);

    assert_eq!(store.batch_count(Category::Light), 1);
    assert_eq!(store.batch_count(Category::Switch), 1);
    assert_eq!(store.batch_count(Category::Sensor), 2);

    assert!(store.is_state("light.kitchen_lamp_12", "off"));
    assert!(store.is_state("switch.bath_plug_5", "off"));
    assert!(store.is_state("sensor.bath_plug_5_relativehumidity_2", "55"));
    assert!(store.is_state("sensor.kitchen_lamp_12_currentenergyuse_3", "0"));
    assert_eq!(store.entity_count(), 4);
}

#[tokio::test]
async fn test_setup_failure_registers_nothing() {
    let hub = MockHub {
        fail_fetch: true,
        ..MockHub::new(vec![dimmer()])
    };
    let (integration, _hub, store) = integration(hub);

    let result = integration.setup().await;
    assert!(matches!(result, Err(SetupError::Fetch(_))));
    assert_eq!(integration.node_count().await, 0);
    assert_eq!(store.entity_count(), 0);
}

#[tokio::test]
async fn test_duplicate_discovery_is_ignored() {
    let (integration, _hub, store) = integration(MockHub::default());

    assert!(integration.on_node_discovered(plug()).await);
    let mut renamed = plug();
    renamed.name = "Renamed".to_string();
    assert!(!integration.on_node_discovered(renamed).await);

    assert_eq!(integration.node_count().await, 1);
    assert_eq!(store.batch_count(Category::Switch), 1);
    assert_eq!(store.discovered(Category::Sensor).len(), 1);
    assert_eq!(integration.states().await.len(), 2);
}

#[tokio::test]
async fn test_attribute_change_reaches_bound_entities_only() {
    let (integration, _hub, store) = integration(MockHub::default());
    integration.on_node_discovered(dimmer()).await;

    let notified = integration
        .on_attribute_changed(attr(2, 12, AttributeType::DimmingLevel, 100.0))
        .await;
    assert_eq!(notified, 1);
    let lamp = store.get("light.kitchen_lamp_12").unwrap();
    assert_eq!(lamp.state.attribute::<u8>("brightness"), Some(255));

    let notified = integration
        .on_attribute_changed(attr(3, 12, AttributeType::CurrentEnergyUse, 42.0))
        .await;
    assert_eq!(notified, 1);
    assert!(store.is_state("sensor.kitchen_lamp_12_currentenergyuse_3", "42"));

    // Unknown node: store untouched, nothing notified
    assert_eq!(
        integration
            .on_attribute_changed(attr(1, 99, AttributeType::OnOff, 1.0))
            .await,
        0
    );
}

#[tokio::test]
async fn test_store_is_updated_even_without_binding() {
    let (integration, _hub, _store) = integration(MockHub::default());
    integration.on_node_discovered(dimmer()).await;

    let notified = integration
        .on_attribute_changed(attr(9, 12, AttributeType::RelativeHumidity, 3.0))
        .await;
    assert_eq!(notified, 0);

    let node = integration.node(12).await.unwrap();
    assert_eq!(node.attribute(9).map(|a| a.value), Some(3.0));
}

#[tokio::test]
async fn test_non_sensor_attributes_reach_primary_entity() {
    let (integration, _hub, store) = integration(MockHub::default());
    let shutter = shutter().with_attribute(attr(4, 21, AttributeType::BatteryLowAlarm, 0.0));
    let window = Node::new(40, "Window", Profile::OPEN_CLOSE_AND_TEMPERATURE_SENSOR)
        .with_attribute(attr(1, 40, AttributeType::OpenClose, 0.0))
        .with_attribute(attr(2, 40, AttributeType::Temperature, 21.5));
    integration.on_node_discovered(shutter).await;
    integration.on_node_discovered(window).await;

    let cover = store.get("cover.shutter_21").unwrap();
    assert_eq!(cover.state.attribute::<u8>("battery_level"), Some(100));
    let contact = store.get("binary_sensor.window_40").unwrap();
    assert_eq!(contact.state.attribute::<f64>("Temperature"), Some(21.5));

    let notified = integration
        .on_attribute_changed(attr(4, 21, AttributeType::BatteryLowAlarm, 1.0))
        .await;
    assert_eq!(notified, 1);
    let cover = store.get("cover.shutter_21").unwrap();
    assert_eq!(cover.state.attribute::<u8>("battery_level"), Some(0));
    assert_eq!(cover.state.attribute::<u8>("current_position"), Some(0));

    let notified = integration
        .on_attribute_changed(attr(2, 40, AttributeType::Temperature, 23.0))
        .await;
    assert_eq!(notified, 1);
    let contact = store.get("binary_sensor.window_40").unwrap();
    assert_eq!(contact.state.attribute::<f64>("Temperature"), Some(23.0));
}

#[tokio::test]
async fn test_umlaut_names_get_ascii_ids() {
    let (integration, _hub, store) = integration(MockHub::default());
    let lamp = Node::new(12, "Küche", Profile::DIMMABLE_LIGHT)
        .with_attribute(attr(1, 12, AttributeType::OnOff, 1.0));
    integration.on_node_discovered(lamp).await;

    assert!(store.is_state("light.kuche_12", "on"));
    assert_eq!(store.get("light.kuche_12").unwrap().state.name, "Küche");
}

#[tokio::test]
async fn test_double_switch_fan_out() {
    let (integration, _hub, store) = integration(MockHub::default());
    integration.on_node_discovered(double_plug()).await;

    let ids = store.entity_ids("switch");
    assert_eq!(
        ids,
        vec![
            "switch.double_plug_7_10".to_string(),
            "switch.double_plug_7_20".to_string()
        ]
    );
    assert!(store.is_state("switch.double_plug_7_10", "on"));
    assert!(store.is_state("switch.double_plug_7_20", "off"));
    assert_eq!(
        store.get("switch.double_plug_7_20").unwrap().state.name,
        "Double Plug 2"
    );

    integration
        .on_attribute_changed(attr(20, 7, AttributeType::OnOff, 1.0))
        .await;
    assert!(store.is_state("switch.double_plug_7_20", "on"));
    assert!(store.is_state("switch.double_plug_7_10", "on"));
}

#[tokio::test]
async fn test_double_switch_halves_show_battery() {
    let (integration, _hub, store) = integration(MockHub::default());
    let node = double_plug().with_attribute(attr(30, 7, AttributeType::BatteryLowAlarm, 1.0));
    integration.on_node_discovered(node).await;

    for entity_id in ["switch.double_plug_7_10", "switch.double_plug_7_20"] {
        let half = store.get(entity_id).unwrap();
        assert_eq!(half.state.attribute::<u8>("battery_level"), Some(0));
    }
    // Each half still follows only its own OnOff attribute
    assert!(store.is_state("switch.double_plug_7_10", "on"));
    assert!(store.is_state("switch.double_plug_7_20", "off"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_discovery_is_consistent() {
    let (integration, _hub, store) = integration(MockHub::default());

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        for node in [plug(), dimmer(), double_plug()] {
            let integration = integration.clone();
            tasks.spawn(async move { integration.on_node_discovered(node).await });
        }
    }
    let mut registered = 0;
    while let Some(result) = tasks.join_next().await {
        if result.unwrap() {
            registered += 1;
        }
    }

    assert_eq!(registered, 3);
    assert_eq!(integration.node_count().await, 3);
    assert_eq!(store.batch_count(Category::Light), 1);
    assert_eq!(store.batch_count(Category::Switch), 2);
    assert_eq!(store.batch_count(Category::Sensor), 2);
    assert_eq!(store.discovered(Category::Switch).len(), 2);
    assert_eq!(store.discovered(Category::Sensor).len(), 2);

    let states = integration.states().await;
    let unique: HashSet<_> = states.iter().map(|s| s.entity_id.to_string()).collect();
    assert_eq!(states.len(), 6);
    assert_eq!(unique.len(), states.len());
    assert_eq!(store.entity_count(), 6);
}

#[tokio::test]
async fn test_node_changed_updates_availability() {
    let (integration, _hub, store) = integration(MockHub::default());
    integration.on_node_discovered(shutter()).await;
    assert!(store.is_state("cover.shutter_21", "closed"));

    let offline = Node::new(21, "Shutter", Profile::SHUTTER_POSITION_SWITCH)
        .with_state(NodeState::Unavailable);
    integration.on_node_changed(offline).await;

    let stored = store.get("cover.shutter_21").unwrap();
    assert!(!stored.state.available);
    assert_eq!(stored.state.state, "unavailable");
    // Attributes survive a node change
    let node = integration.node(21).await.unwrap();
    assert_eq!(node.attributes.len(), 1);
}

#[tokio::test]
async fn test_node_changed_for_unknown_node_discovers() {
    let (integration, _hub, store) = integration(MockHub::default());
    integration.on_node_changed(plug()).await;

    assert_eq!(integration.node_count().await, 1);
    assert!(store.is_state("switch.bath_plug_5", "off"));
}

#[tokio::test]
async fn test_cube_entity() {
    let (integration, _hub, store) = integration(MockHub::default());
    integration.on_node_discovered(cube()).await;

    assert_eq!(store.batch_count(Category::Sensor), 1);
    assert!(store.is_state("homee.cube", "home"));
    assert_eq!(store.entity_count(), 1);
}

#[tokio::test]
async fn test_dead_bindings_reported() {
    let bare = Node::new(8, "Bare Plug", Profile::ON_OFF_PLUG)
        .with_attribute(attr(1, 8, AttributeType::LinkQuality, 0.0));
    let (integration, _hub, _store) = integration(MockHub::default());
    integration.on_node_discovered(bare).await;

    let dead = integration.dead_bindings().await;
    assert_eq!(dead.len(), 1);
    assert_eq!(dead[0].to_string(), "switch.bare_plug_8");
}

#[tokio::test]
async fn test_run_consumes_events_until_closed() {
    let (hub, tx) = MockHub::default().with_events();
    let (integration, hub, store) = integration(hub);
    let events = hub.subscribe();

    tx.send(HubEvent::NodeDiscovered(plug())).await.unwrap();
    tx.send(HubEvent::AttributeChanged(attr(1, 5, AttributeType::OnOff, 1.0)))
        .await
        .unwrap();
    drop(tx);

    integration.run(events, std::future::pending()).await;

    assert!(store.is_state("switch.bath_plug_5", "on"));
}

#[tokio::test]
async fn test_run_stops_on_shutdown() {
    let (hub, tx) = MockHub::default().with_events();
    let (integration, hub, _store) = integration(hub);
    let events = hub.subscribe();

    integration.run(events, async {}).await;

    // The loop is gone; the event stays unconsumed
    tx.send(HubEvent::NodeDiscovered(plug())).await.ok();
    assert_eq!(integration.node_count().await, 0);
}
