//! In-process query cache keyed by hierarchical paths.
//!
//! Keys are segment paths such as `["favorites", "check", <id>]`, so a whole
//! family of entries can be dropped by invalidating a shared prefix.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// A longer key under this one.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Key builders for everything cached about favorites.
pub mod favorites_keys {
    use super::QueryKey;
    use crate::models::FavoriteFilters;
    use uuid::Uuid;

    pub fn all() -> QueryKey {
        QueryKey::new(["favorites"])
    }

    pub fn lists() -> QueryKey {
        all().child("list")
    }

    pub fn list(filters: &FavoriteFilters) -> QueryKey {
        // Filters serialize to a stable JSON object; absent fields are skipped.
        let filters = serde_json::to_string(filters).unwrap_or_default();
        lists().child(filters)
    }

    pub fn check(actividad_id: Uuid) -> QueryKey {
        all().child("check").child(actividad_id.to_string())
    }

    pub fn count() -> QueryKey {
        all().child("count")
    }

    pub fn recommendations() -> QueryKey {
        QueryKey::new(["recommendations"])
    }
}

/// Thread-safe map from [`QueryKey`] to JSON values.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    pub fn set(&self, key: QueryKey, value: Value) {
        trace!(key = %key, "cache set");
        self.entries.write().insert(key, value);
    }

    pub fn remove(&self, key: &QueryKey) -> Option<Value> {
        self.entries.write().remove(key)
    }

    /// Copy of the current entry, to roll back to later.
    pub fn snapshot(&self, key: &QueryKey) -> Option<Value> {
        self.get(key)
    }

    /// Put back a snapshot; an empty snapshot removes the entry.
    pub fn restore(&self, key: QueryKey, snapshot: Option<Value>) {
        match snapshot {
            Some(value) => self.set(key, value),
            None => {
                self.remove(&key);
            }
        }
    }

    /// Drop every entry at or under `prefix`. Returns how many were dropped.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let dropped = before - entries.len();
        trace!(prefix = %prefix, dropped, "cache invalidated");
        dropped
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FavoriteFilters;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_invalidate_drops_prefix_only() {
        let cache = QueryCache::new();
        let id = Uuid::new_v4();
        cache.set(favorites_keys::check(id), json!({"is_favorite": true}));
        cache.set(favorites_keys::count(), json!(3));
        cache.set(
            favorites_keys::list(&FavoriteFilters::default()),
            json!({"items": []}),
        );
        cache.set(favorites_keys::recommendations(), json!({"items": []}));

        assert_eq!(cache.invalidate(&favorites_keys::lists()), 1);
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.invalidate(&favorites_keys::all()), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&favorites_keys::recommendations()).is_some());
    }

    #[test]
    fn test_prefix_matches_whole_segments() {
        let key = QueryKey::new(["favorites", "count"]);
        assert!(key.starts_with(&QueryKey::new(["favorites"])));
        assert!(!key.starts_with(&QueryKey::new(["fav"])));
        assert!(!QueryKey::new(["favorites"]).starts_with(&key));
    }

    #[test]
    fn test_list_keys_differ_by_filters() {
        let first = favorites_keys::list(&FavoriteFilters::default());
        let second = favorites_keys::list(&FavoriteFilters {
            page: Some(2),
            ..Default::default()
        });
        assert_ne!(first, second);
        assert!(second.starts_with(&favorites_keys::lists()));
    }

    #[test]
    fn test_restore_snapshot() {
        let cache = QueryCache::new();
        let key = favorites_keys::count();

        let empty = cache.snapshot(&key);
        cache.set(key.clone(), json!(1));
        cache.restore(key.clone(), empty);
        assert!(cache.get(&key).is_none());

        cache.set(key.clone(), json!(1));
        let snapshot = cache.snapshot(&key);
        cache.set(key.clone(), json!(2));
        cache.restore(key.clone(), snapshot);
        assert_eq!(cache.get(&key), Some(json!(1)));
    }
}
