use std::collections::BTreeMap;

use contracts::{AdventureEvent, AdventureEventType, GameError, SCHEMA_VERSION_V1};

/// Append-only store of adventure outcomes. Events are keyed by a global
/// id and indexed per adventure in creation order; nothing here mutates or
/// deletes, which keeps the history auditable.
#[derive(Debug, Default)]
pub struct EventLedger {
    events: BTreeMap<u64, AdventureEvent>,
    next_event_id: u64,
    event_ids_by_adventure: BTreeMap<u64, Vec<u64>>,
}

impl EventLedger {
    pub fn append(
        &mut self,
        adventure_id: u64,
        event_type: AdventureEventType,
        reward_cor: u128,
        reward_exp: u64,
        timestamp: u64,
    ) -> u64 {
        let event_id = self.next_event_id;
        self.next_event_id += 1;

        self.events.insert(
            event_id,
            AdventureEvent {
                schema_version: SCHEMA_VERSION_V1.to_string(),
                event_id,
                adventure_id,
                event_type,
                reward_cor,
                reward_exp,
                timestamp,
            },
        );
        self.event_ids_by_adventure
            .entry(adventure_id)
            .or_default()
            .push(event_id);
        event_id
    }

    pub fn get(&self, event_id: u64) -> Result<&AdventureEvent, GameError> {
        self.events.get(&event_id).ok_or(GameError::NotFound)
    }

    /// Event ids of one adventure in creation order. Empty for an
    /// adventure that was allocated but produced no events yet.
    pub fn adventure_events(&self, adventure_id: u64) -> Vec<u64> {
        self.event_ids_by_adventure
            .get(&adventure_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
