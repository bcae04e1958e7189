//! Session-scoped POI accumulation

use std::collections::HashSet;

use tracing::debug;

use super::types::Poi;

/// Deduplicated, insertion-ordered accumulation of POIs.
///
/// The store grows monotonically within a session: each reload cycle
/// merges the freshly fetched batch, keeping only records whose id has
/// not been seen before. The first-seen record wins - later fetches never
/// overwrite fields of an existing entry.
#[derive(Debug, Default)]
pub struct PoiStore {
    /// All POIs in first-seen order.
    entries: Vec<Poi>,

    /// Ids present in `entries`, for O(1) dedup.
    ids: HashSet<String>,
}

impl PoiStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fetched batch into the store.
    ///
    /// POIs whose id is already present are skipped. Returns the number
    /// of newly added entries.
    pub fn merge(&mut self, batch: impl IntoIterator<Item = Poi>) -> usize {
        let before = self.entries.len();

        for poi in batch {
            if self.ids.contains(&poi.id) {
                continue;
            }
            self.ids.insert(poi.id.clone());
            self.entries.push(poi);
        }

        let added = self.entries.len() - before;
        debug!(added, total = self.entries.len(), "Merged POI batch");
        added
    }

    /// Snapshot of all loaded POIs in first-seen order.
    pub fn all_loaded(&self) -> &[Poi] {
        &self.entries
    }

    /// Number of distinct POIs loaded this session.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if a POI with this id has been loaded.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Look up a loaded POI by id.
    pub fn get(&self, id: &str) -> Option<&Poi> {
        if !self.ids.contains(id) {
            return None;
        }
        self.entries.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn make_poi(id: &str, name: &str) -> Poi {
        Poi::new(id, name, Coordinate::new(53.55, 9.99))
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = PoiStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.all_loaded().is_empty());
    }

    #[test]
    fn test_merge_adds_new_pois() {
        let mut store = PoiStore::new();

        let added = store.merge(vec![make_poi("a", "A"), make_poi("b", "B")]);

        assert_eq!(added, 2);
        assert_eq!(store.len(), 2);
        assert!(store.contains("a"));
        assert!(store.contains("b"));
    }

    #[test]
    fn test_merge_skips_duplicate_ids() {
        let mut store = PoiStore::new();
        store.merge(vec![make_poi("a", "A")]);

        let added = store.merge(vec![make_poi("a", "A again"), make_poi("b", "B")]);

        assert_eq!(added, 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_merge_preserves_first_seen_fields() {
        let mut store = PoiStore::new();
        store.merge(vec![make_poi("a", "Original").with_rating(4.0)]);

        // A later fetch returns the same business with different fields
        store.merge(vec![make_poi("a", "Renamed").with_rating(1.0)]);

        let poi = store.get("a").unwrap();
        assert_eq!(poi.name, "Original");
        assert_eq!(poi.rating, Some(4.0));
    }

    #[test]
    fn test_merge_dedups_within_one_batch() {
        let mut store = PoiStore::new();

        let added = store.merge(vec![make_poi("a", "First"), make_poi("a", "Second")]);

        assert_eq!(added, 1);
        assert_eq!(store.get("a").unwrap().name, "First");
    }

    #[test]
    fn test_all_loaded_keeps_insertion_order() {
        let mut store = PoiStore::new();
        store.merge(vec![make_poi("c", "C"), make_poi("a", "A")]);
        store.merge(vec![make_poi("b", "B")]);

        let ids: Vec<&str> = store.all_loaded().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_get_missing_id() {
        let store = PoiStore::new();
        assert!(store.get("nope").is_none());
    }
}
