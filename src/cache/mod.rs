pub(crate) mod catalogs;

pub(crate) use catalogs::CatalogService;

use crate::api::{Champion, Item, RunePath};
use std::collections::HashMap;
use std::sync::Arc;

/// Catalogs go stale after an hour.
pub(crate) const CATALOG_TTL_MS: i64 = 60 * 60 * 1000;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum CatalogKey {
    LatestVersion,
    Champions(String),
    Items(String),
    Runes(String),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Catalog {
    Version(String),
    Champions(Arc<Vec<Champion>>),
    Items(Arc<Vec<Item>>),
    Runes(Arc<Vec<RunePath>>),
}

#[derive(Clone, Debug)]
struct Entry {
    value: Catalog,
    fetched_at_ms: i64,
}

/// Version-keyed time-bounded cache for Data Dragon catalogs.
///
/// Time is passed in by the caller so expiry is deterministic in tests.
#[derive(Clone, Debug)]
pub(crate) struct CatalogCache {
    ttl_ms: i64,
    entries: HashMap<CatalogKey, Entry>,
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(CATALOG_TTL_MS)
    }
}

impl CatalogCache {
    pub fn new(ttl_ms: i64) -> Self {
        Self {
            ttl_ms,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &CatalogKey, now_ms: i64) -> Option<&Catalog> {
        let entry = self.entries.get(key)?;
        if now_ms.saturating_sub(entry.fetched_at_ms) >= self.ttl_ms {
            return None;
        }
        Some(&entry.value)
    }

    pub fn insert(&mut self, key: CatalogKey, value: Catalog, now_ms: i64) {
        self.entries.insert(
            key,
            Entry {
                value,
                fetched_at_ms: now_ms,
            },
        );
    }

    /// Drop stale entries. Returns how many were removed.
    pub fn evict_expired(&mut self, now_ms: i64) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl_ms;
        self.entries
            .retain(|_, e| now_ms.saturating_sub(e.fetched_at_ms) < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn version(&self, now_ms: i64) -> Option<String> {
        match self.get(&CatalogKey::LatestVersion, now_ms)? {
            Catalog::Version(v) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn champions(&self, version: &str, now_ms: i64) -> Option<Arc<Vec<Champion>>> {
        match self.get(&CatalogKey::Champions(version.to_string()), now_ms)? {
            Catalog::Champions(list) => Some(list.clone()),
            _ => None,
        }
    }

    pub fn items(&self, version: &str, now_ms: i64) -> Option<Arc<Vec<Item>>> {
        match self.get(&CatalogKey::Items(version.to_string()), now_ms)? {
            Catalog::Items(list) => Some(list.clone()),
            _ => None,
        }
    }

    pub fn runes(&self, version: &str, now_ms: i64) -> Option<Arc<Vec<RunePath>>> {
        match self.get(&CatalogKey::Runes(version.to_string()), now_ms)? {
            Catalog::Runes(list) => Some(list.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ImageRef;

    fn champ(name: &str) -> Champion {
        Champion {
            id: name.to_string(),
            key: "1".to_string(),
            name: name.to_string(),
            title: String::new(),
            image: ImageRef::default(),
            tags: vec![],
            info: Default::default(),
        }
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let mut cache = CatalogCache::new(1_000);
        cache.insert(
            CatalogKey::LatestVersion,
            Catalog::Version("14.7.1".to_string()),
            10_000,
        );

        assert_eq!(cache.version(10_999), Some("14.7.1".to_string()));
        assert_eq!(cache.version(11_000), None);
    }

    #[test]
    fn test_catalogs_are_keyed_by_version() {
        let mut cache = CatalogCache::default();
        cache.insert(
            CatalogKey::Champions("14.7.1".to_string()),
            Catalog::Champions(Arc::new(vec![champ("Ahri")])),
            0,
        );

        assert_eq!(cache.champions("14.7.1", 5).map(|l| l.len()), Some(1));
        assert!(cache.champions("15.1.1", 5).is_none());
        assert!(cache.items("14.7.1", 5).is_none());
    }

    #[test]
    fn test_evict_expired() {
        let mut cache = CatalogCache::new(100);
        cache.insert(CatalogKey::LatestVersion, Catalog::Version("a".into()), 0);
        cache.insert(
            CatalogKey::Items("a".into()),
            Catalog::Items(Arc::new(vec![])),
            90,
        );

        assert_eq!(cache.evict_expired(150), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.items("a", 150).is_some());
    }

    #[test]
    fn test_default_ttl_is_one_hour() {
        let mut cache = CatalogCache::default();
        cache.insert(CatalogKey::LatestVersion, Catalog::Version("v".into()), 0);
        assert!(cache.version(CATALOG_TTL_MS - 1).is_some());
        assert!(cache.version(CATALOG_TTL_MS).is_none());
    }
}
