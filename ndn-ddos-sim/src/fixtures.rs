//! In-memory PIT/FIB/face-table implementations of the strategy's collaborator traits.
//!
//! Used by the demo binary and reused as the integration-test fixtures for
//! `ndn-ddos-strategy`'s scenario tests — the strategy itself never implements these, they are
//! consumed interfaces (§4.7).

use ndn_ddos_strategy::{FaceId, Faces, Fib, Name, Pit, PitEntry};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default, Clone)]
pub struct InMemoryPit {
    entries: BTreeMap<Name, PitEntry>,
}

impl InMemoryPit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs (or overwrites) a PIT entry, simulating an Interest pending with the given
    /// in-records. Faces may repeat to model multiple in-records from the same face.
    pub fn insert(&mut self, name: Name, in_records: Vec<FaceId>) {
        self.entries.insert(name.clone(), PitEntry { name, in_records });
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Pit for InMemoryPit {
    fn find(&self, name: &Name) -> Option<PitEntry> {
        self.entries.get(name).cloned()
    }

    fn entries_under(&self, prefix: &Name) -> Vec<PitEntry> {
        self.entries
            .values()
            .filter(|entry| prefix.is_prefix_of(&entry.name) && !entry.in_records.is_empty())
            .cloned()
            .collect()
    }

    fn ddos_remove(&mut self, name: &Name) {
        self.entries.remove(name);
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryFib {
    registrations: BTreeSet<Name>,
}

impl InMemoryFib {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.registrations.contains(name)
    }
}

impl Fib for InMemoryFib {
    fn erase(&mut self, prefix: &Name) {
        self.registrations.remove(prefix);
    }

    fn insert(&mut self, name: &Name) -> bool {
        self.registrations.insert(name.clone())
    }
}

#[derive(Debug, Default, Clone)]
pub struct FaceRegistry {
    consumer_faces: BTreeSet<FaceId>,
}

impl FaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_consumer_face(&mut self, face: FaceId) -> &mut Self {
        self.consumer_faces.insert(face);
        self
    }
}

impl Faces for FaceRegistry {
    fn is_consumer_face(&self, face: FaceId) -> bool {
        self.consumer_faces.contains(&face)
    }
}
