use crate::name::Name;
use crate::record::PrefixRecord;
use std::collections::BTreeMap;

/// Mapping from name prefix to mitigation record (§3, §4.2).
#[derive(Debug, Default)]
pub struct RecordStore {
    records: BTreeMap<Name, PrefixRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, prefix: &Name) -> Option<&PrefixRecord> {
        self.records.get(prefix)
    }

    pub fn get_mut(&mut self, prefix: &Name) -> Option<&mut PrefixRecord> {
        self.records.get_mut(prefix)
    }

    /// Returns the record for `prefix`, creating one (with both flavours inactive and default
    /// revert counters) if absent (§4.2 step 2).
    pub fn get_or_insert(&mut self, prefix: &Name, default_revert_ticks: f64) -> &mut PrefixRecord {
        self.records
            .entry(prefix.clone())
            .or_insert_with(|| PrefixRecord::new(prefix.clone(), default_revert_ticks))
    }

    /// The record whose prefix is a prefix of `name`, preferring the longest match when more than
    /// one applies (§4.5 step 2: "the record store should enforce non-overlap ... if ambiguous,
    /// pick the longest match").
    pub fn find_matching(&self, name: &Name) -> Option<&PrefixRecord> {
        self.records
            .values()
            .filter(|record| record.prefix.is_prefix_of(name))
            .max_by_key(|record| record.prefix.len())
    }

    pub fn remove(&mut self, prefix: &Name) -> Option<PrefixRecord> {
        self.records.remove(prefix)
    }

    /// Removes every idle record (I3) and returns how many were erased.
    pub fn erase_idle(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|_, record| !record.is_idle());
        before - self.records.len()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Name, &mut PrefixRecord)> {
        self.records.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        Name::from_components(s.split('/').filter(|c| !c.is_empty()))
    }

    #[test]
    fn get_or_insert_creates_inactive_record() {
        let mut store = RecordStore::new();

        let record = store.get_or_insert(&name("/a"), 3.0);

        assert!(!record.fake.active);
        assert!(!record.valid.active);
        assert_eq!(record.fake.revert_counter, 3.0);
    }

    #[test]
    fn find_matching_prefers_longest_prefix() {
        let mut store = RecordStore::new();
        store.get_or_insert(&name("/a"), 3.0);
        store.get_or_insert(&name("/a/b"), 3.0);

        let found = store.find_matching(&name("/a/b/c")).unwrap();

        assert_eq!(found.prefix, name("/a/b"));
    }

    #[test]
    fn find_matching_returns_none_when_no_prefix_matches() {
        let mut store = RecordStore::new();
        store.get_or_insert(&name("/a"), 3.0);

        assert!(store.find_matching(&name("/x/y")).is_none());
    }

    #[test]
    fn erase_idle_removes_only_idle_records() {
        let mut store = RecordStore::new();
        store.get_or_insert(&name("/a"), 3.0).fake.active = true;
        store.get_or_insert(&name("/b"), 3.0);

        let erased = store.erase_idle();

        assert_eq!(erased, 1);
        assert!(store.get(&name("/a")).is_some());
        assert!(store.get(&name("/b")).is_none());
    }
}
