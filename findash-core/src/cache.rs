//! Process-lifetime fetch cache.
//!
//! Keys are the exact input tuple of a fetch (selected symbols, date range).
//! Entries are never evicted. Concurrent misses for the same key are not
//! coalesced: each one fetches and the last insert wins.

use crate::error::Result;
use crate::table::Table;
use log::info;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::rc::Rc;

/// Cheaply cloneable (via `Rc`) key -> table map for the single-threaded UI
/// runtime. Clones share the same entries.
pub struct FetchCache<K> {
    entries: Rc<RefCell<HashMap<K, Table>>>,
}

impl<K> Clone for FetchCache<K> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<K> Default for FetchCache<K> {
    fn default() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl<K: Eq + Hash + Clone + Debug> FetchCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<Table> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: K, table: Table) {
        self.entries.borrow_mut().insert(key, table);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Return the cached table for `key`, or run `fetch` and cache its result.
    /// Failures are returned and not cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<Table>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Table>>,
    {
        if let Some(hit) = self.get(&key) {
            info!("Cache hit for {:?}", key);
            return Ok(hit);
        }
        // no borrow is held across the await
        let table = fetch().await?;
        self.insert(key, table.clone());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;
    use crate::table::Column;
    use std::cell::Cell;

    fn table() -> Table {
        Table::empty(vec![Column::Date("Date".into()), Column::Value("Close".into())])
    }

    #[tokio::test]
    async fn test_fetch_runs_once_per_key() {
        let cache: FetchCache<Vec<String>> = FetchCache::new();
        let calls = Cell::new(0);
        let key = vec!["AAPL".to_string()];

        for _ in 0..3 {
            let result = cache
                .get_or_fetch(key.clone(), || async {
                    calls.set(calls.get() + 1);
                    Ok(table())
                })
                .await;
            assert!(result.is_ok());
        }
        assert_eq!(calls.get(), 1);

        cache
            .get_or_fetch(vec!["MSFT".to_string()], || async { Ok(table()) })
            .await
            .unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache: FetchCache<(i32, i32)> = FetchCache::new();
        let err = cache
            .get_or_fetch((2000, 2001), || async { Err(DashError::unavailable("offline")) })
            .await;
        assert!(err.is_err());
        assert!(!cache.contains(&(2000, 2001)));
    }

    #[test]
    fn test_clones_share_entries() {
        let cache: FetchCache<String> = FetchCache::new();
        let clone = cache.clone();
        clone.insert("k".into(), table());
        assert!(cache.get(&"k".to_string()).is_some());
    }
}
