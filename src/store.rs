use crate::record::CampaignRecord;
use indexmap::{IndexMap, IndexSet};

/// A title-keyed collection of campaigns, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: IndexMap<String, CampaignRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records in order; a later duplicate title replaces the earlier one.
    pub fn from_records(records: impl IntoIterator<Item = CampaignRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.put(record);
        }
        store
    }

    /// Insert or replace the entry at the record's title. A replaced entry keeps its position.
    /// Returns `false` (and stores nothing) if the record has no string title.
    pub fn put(&mut self, record: CampaignRecord) -> bool {
        let Some(title) = record.title().map(str::to_string) else {
            return false;
        };
        self.records.insert(title, record);
        true
    }

    /// Insert or replace under an explicit key, regardless of the record's own title.
    pub(crate) fn put_keyed(&mut self, title: String, record: CampaignRecord) {
        self.records.insert(title, record);
    }

    pub fn get(&self, title: &str) -> Option<&CampaignRecord> {
        self.records.get(title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut CampaignRecord> {
        self.records.get_mut(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.records.contains_key(title)
    }

    /// Remove an entry, keeping the order of the rest. Returns whether anything was removed.
    pub fn delete(&mut self, title: &str) -> bool {
        self.records.shift_remove(title).is_some()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &CampaignRecord> {
        self.records.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CampaignRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Titles of file campaigns that were edited this session. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtySet {
    titles: IndexSet<String>,
}

impl DirtySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, title: &str) {
        self.titles.insert(title.to_string());
    }

    pub fn unmark(&mut self, title: &str) {
        self.titles.shift_remove(title);
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.titles.clear();
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{DirtySet, RecordStore};
    use crate::record::CampaignRecord;
    use serde_json::json;

    fn record(value: serde_json::Value) -> CampaignRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn put_then_get_returns_the_record() {
        let mut store = RecordStore::new();
        let r = record(json!({ "titulo": "A", "corpo": "x" }));
        assert!(store.put(r.clone()));
        assert_eq!(store.get("A"), Some(&r));
    }

    #[test]
    fn duplicate_title_collapses_to_last_put_in_place() {
        let mut store = RecordStore::new();
        store.put(record(json!({ "titulo": "A", "corpo": "first" })));
        store.put(record(json!({ "titulo": "B" })));
        let b = record(json!({ "titulo": "A", "npcs": "second" }));
        store.put(b.clone());

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("A"), Some(&b));
        assert_eq!(store.titles().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn untitled_record_is_not_stored() {
        let mut store = RecordStore::new();
        assert!(!store.put(record(json!({ "corpo": "x" }))));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_keeps_remaining_order() {
        let mut store = RecordStore::from_records(
            ["A", "B", "C"].map(|t| record(json!({ "titulo": t }))),
        );
        assert!(store.delete("B"));
        assert!(!store.delete("B"));
        assert_eq!(store.titles().collect::<Vec<_>>(), vec!["A", "C"]);
        // Restartable: each call yields the current order.
        assert_eq!(store.titles().count(), 2);
    }

    #[test]
    fn dirty_set_marks_and_unmarks() {
        let mut dirty = DirtySet::new();
        dirty.mark("Q1");
        dirty.mark("Q1");
        assert_eq!(dirty.len(), 1);
        dirty.unmark("Q1");
        assert!(!dirty.contains("Q1"));
    }
}
