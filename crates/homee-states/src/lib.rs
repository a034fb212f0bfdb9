//! Host-side state table for homee entities
//!
//! [`StateStore`] implements [`EntityPlatform`]: it records every discovery
//! batch the integration publishes, keeps the newest rendered state per
//! entity (grouped by domain in first-seen order) and fans each update out
//! as a [`StateChangedEvent`].

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use homee_core::{Category, DeviceDescriptor, EntityPlatform, EntityState};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, instrument, trace};

const EVENT_CAPACITY: usize = 1024;

/// A rendered state plus bookkeeping timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(flatten)]
    pub state: EntityState,
    /// Last time the state string changed
    pub last_changed: DateTime<Utc>,
    /// Last time anything was reported
    pub last_updated: DateTime<Utc>,
}

impl StoredState {
    fn first(state: EntityState, at: DateTime<Utc>) -> Self {
        Self {
            state,
            last_changed: at,
            last_updated: at,
        }
    }

    fn next(&self, state: EntityState, at: DateTime<Utc>) -> Self {
        let last_changed = if self.state.state == state.state {
            self.last_changed
        } else {
            at
        };
        Self {
            state,
            last_changed,
            last_updated: at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChangedEvent {
    pub entity_id: String,
    pub old_state: Option<StoredState>,
    pub new_state: StoredState,
}

pub struct StateStore {
    /// entity_id -> latest state
    states: DashMap<String, StoredState>,
    /// domain -> entity_ids in first-seen order
    by_domain: DashMap<String, Vec<String>>,
    discovered: DashMap<Category, Vec<DeviceDescriptor>>,
    batches: DashMap<Category, usize>,
    events: broadcast::Sender<StateChangedEvent>,
}

impl StateStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            states: DashMap::new(),
            by_domain: DashMap::new(),
            discovered: DashMap::new(),
            batches: DashMap::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateChangedEvent> {
        self.events.subscribe()
    }

    /// Record a state reported by the integration
    #[instrument(skip(self, state), fields(entity_id = %state.entity_id))]
    pub fn set(&self, state: EntityState) -> StoredState {
        let key = state.entity_id.to_string();
        let domain = state.domain().to_string();
        let now = Utc::now();

        let old_state = self.states.get(&key).map(|entry| entry.value().clone());
        let new_state = match &old_state {
            Some(old) => old.next(state, now),
            None => StoredState::first(state, now),
        };

        let changed = old_state
            .as_ref()
            .map_or(true, |old| old.state.state != new_state.state.state);
        debug!(state = %new_state.state.state, changed, "Storing entity state");

        if self.states.insert(key.clone(), new_state.clone()).is_none() {
            self.by_domain.entry(domain).or_default().push(key.clone());
        }

        // Nobody listening is fine
        let _ = self.events.send(StateChangedEvent {
            entity_id: key,
            old_state,
            new_state: new_state.clone(),
        });
        new_state
    }

    pub fn get(&self, entity_id: &str) -> Option<StoredState> {
        self.states.get(entity_id).map(|entry| entry.value().clone())
    }

    pub fn is_state(&self, entity_id: &str, state: &str) -> bool {
        self.states
            .get(entity_id)
            .is_some_and(|entry| entry.state.state == state)
    }

    /// Entity ids of a domain, first-seen first
    pub fn entity_ids(&self, domain: &str) -> Vec<String> {
        self.by_domain
            .get(domain)
            .map(|ids| ids.value().clone())
            .unwrap_or_default()
    }

    pub fn entity_count(&self) -> usize {
        self.states.len()
    }

    /// Every descriptor published for a category, in arrival order
    pub fn discovered(&self, category: Category) -> Vec<DeviceDescriptor> {
        self.discovered
            .get(&category)
            .map(|descriptors| descriptors.value().clone())
            .unwrap_or_default()
    }

    pub fn batch_count(&self, category: Category) -> usize {
        self.batches.get(&category).map_or(0, |count| *count)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityPlatform for StateStore {
    fn discover(&self, category: Category, descriptors: &[DeviceDescriptor]) {
        trace!(category = %category, count = descriptors.len(), "Discovery batch");
        *self.batches.entry(category).or_insert(0) += 1;
        self.discovered
            .entry(category)
            .or_default()
            .extend_from_slice(descriptors);
    }

    fn notify_state_changed(&self, state: EntityState) {
        self.set(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homee_core::{EntityId, Node, Profile};
    use std::collections::HashMap;

    fn rendered(entity_id: &str, value: &str) -> EntityState {
        let entity_id: EntityId = entity_id.parse().unwrap();
        EntityState {
            unique_id: entity_id.object_id().to_string(),
            name: "Plug".to_string(),
            entity_id,
            state: value.to_string(),
            attributes: HashMap::new(),
            available: true,
        }
    }

    #[test]
    fn test_set_and_query() {
        let store = StateStore::new();
        store.set(rendered("switch.plug_3", "off"));

        assert!(store.is_state("switch.plug_3", "off"));
        assert!(!store.is_state("switch.plug_3", "on"));
        assert_eq!(store.entity_ids("switch"), vec!["switch.plug_3".to_string()]);
        assert!(store.get("light.nothing_1").is_none());
        assert!(store.entity_ids("light").is_empty());
    }

    #[test]
    fn test_last_changed_follows_state_string() {
        let store = StateStore::new();
        let first = store.set(rendered("switch.plug_3", "off"));

        let mut same = rendered("switch.plug_3", "off");
        same.attributes
            .insert("OnOff".to_string(), serde_json::json!(0.0));
        let second = store.set(same);
        assert_eq!(second.last_changed, first.last_changed);
        assert!(second.last_updated >= first.last_updated);

        let third = store.set(rendered("switch.plug_3", "on"));
        assert!(third.last_changed >= first.last_changed);
        assert_eq!(store.entity_ids("switch").len(), 1);
    }

    #[tokio::test]
    async fn test_every_report_is_broadcast() {
        let store = StateStore::new();
        let mut rx = store.subscribe();

        store.notify_state_changed(rendered("light.lamp_1", "on"));
        store.notify_state_changed(rendered("light.lamp_1", "on"));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.entity_id, "light.lamp_1");
        assert!(first.old_state.is_none());
        assert_eq!(first.new_state.state.state, "on");

        let second = rx.recv().await.unwrap();
        assert!(second.old_state.is_some());
    }

    #[test]
    fn test_discovery_batches_are_counted() {
        let store = StateStore::new();
        let node = Node::new(1, "Lamp", Profile::DIMMABLE_LIGHT);
        store.discover(
            Category::Light,
            &[DeviceDescriptor::for_node(Category::Light, node)],
        );

        assert_eq!(store.batch_count(Category::Light), 1);
        assert_eq!(store.discovered(Category::Light).len(), 1);
        assert_eq!(store.batch_count(Category::Switch), 0);
    }
}
