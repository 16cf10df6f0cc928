//! In-Memory Relay Cache Adapter
//!
//! Implements `RelayCacheStore` with write-once semantics.

use crate::domain::{ProofKey, RelayEntry};
use crate::ports::outbound::RelayCacheStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Relay cache held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRelayCache {
    entries: RwLock<HashMap<ProofKey, RelayEntry>>,
}

impl InMemoryRelayCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RelayCacheStore for InMemoryRelayCache {
    fn get(&self, key: &ProofKey) -> Option<RelayEntry> {
        self.entries.read().get(key).cloned()
    }

    fn insert_if_absent(&self, key: ProofKey, entry: RelayEntry) -> (RelayEntry, bool) {
        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(&key) {
            return (existing.clone(), false);
        }
        entries.insert(key, entry.clone());
        (entry, true)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
