use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Decides which cached entries are dropped.
///
/// Injected into [`Cache`] so callers (and tests) control expiry.
pub trait EvictionPolicy: Send + Sync {
    /// Entries for which this returns true are treated as misses and removed.
    fn is_stale(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool;

    /// Maximum number of entries kept, `None` for unbounded.
    fn capacity(&self) -> Option<usize> {
        None
    }
}

/// Keep every entry for the lifetime of the process
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverEvict;

impl EvictionPolicy for NeverEvict {
    fn is_stale(&self, _fetched_at: DateTime<Utc>, _now: DateTime<Utc>) -> bool {
        false
    }
}

/// Expire entries older than the given age
#[derive(Debug, Clone, Copy)]
pub struct MaxAge(pub Duration);

impl EvictionPolicy for MaxAge {
    fn is_stale(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - fetched_at >= self.0
    }
}

/// Keep at most N entries, dropping the oldest-fetched one first
#[derive(Debug, Clone, Copy)]
pub struct Capacity(pub usize);

impl EvictionPolicy for Capacity {
    fn is_stale(&self, _fetched_at: DateTime<Utc>, _now: DateTime<Utc>) -> bool {
        false
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.0)
    }
}

struct Entry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
}

/// In-process key -> value cache with a pluggable eviction policy
#[derive(Clone)]
pub struct Cache<K, V> {
    entries: Arc<RwLock<HashMap<K, Entry<V>>>>,
    policy: Arc<dyn EvictionPolicy>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(policy: impl EvictionPolicy + 'static) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            policy: Arc::new(policy),
        }
    }

    /// Cache that never evicts
    pub fn unbounded() -> Self {
        Self::new(NeverEvict)
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Utc::now()).await
    }

    pub async fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Utc::now()).await
    }

    /// Looks up `key` as of `now`, removing the entry if the policy says it is stale.
    pub async fn get_at(&self, key: &K, now: DateTime<Utc>) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !self.policy.is_stale(entry.fetched_at, now) => {
                    return Some(entry.value.clone())
                }
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if self.policy.is_stale(entry.fetched_at, now) {
                entries.remove(key);
            }
        }
        None
    }

    pub async fn insert_at(&self, key: K, value: V, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;

        if let Some(capacity) = self.policy.capacity() {
            if capacity == 0 {
                return;
            }
            while !entries.contains_key(&key) && entries.len() >= capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.fetched_at)
                    .map(|(k, _)| k.clone());
                match oldest {
                    Some(oldest) => {
                        entries.remove(&oldest);
                    }
                    None => break,
                }
            }
        }

        entries.insert(
            key,
            Entry {
                value,
                fetched_at: now,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
