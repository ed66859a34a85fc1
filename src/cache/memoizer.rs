//! Call memoizer.

use super::key::CallKey;
use crate::client::Dispatch;
use crate::interpreter::Args;
use crate::model::ApiModel;
use crate::Result;
use async_trait::async_trait;
use lru::LruCache;
use serde_json::Value;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// One memoized call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub operation: String,
    /// Canonical argument encoding the record is keyed by.
    pub arguments: String,
    pub result: Value,
}

#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

enum Store {
    Unbounded(HashMap<String, CallRecord>, Vec<String>),
    Bounded(LruCache<String, CallRecord>),
}

impl Store {
    fn get(&mut self, key: &str) -> Option<Value> {
        match self {
            Store::Unbounded(map, _) => map.get(key).map(|r| r.result.clone()),
            Store::Bounded(lru) => lru.get(key).map(|r| r.result.clone()),
        }
    }

    fn insert(&mut self, key: String, record: CallRecord) {
        match self {
            Store::Unbounded(map, order) => {
                if map.insert(key.clone(), record).is_none() {
                    order.push(key);
                }
            }
            Store::Bounded(lru) => {
                lru.put(key, record);
            }
        }
    }

    fn records(&self) -> Vec<CallRecord> {
        match self {
            Store::Unbounded(map, order) => order.iter().filter_map(|k| map.get(k)).cloned().collect(),
            // LruCache iterates most recent first.
            Store::Bounded(lru) => {
                let mut records: Vec<_> = lru.iter().map(|(_, r)| r.clone()).collect();
                records.reverse();
                records
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Store::Unbounded(map, _) => map.len(),
            Store::Bounded(lru) => lru.len(),
        }
    }
}

/// Memoizing decorator over any [`Dispatch`].
///
/// A hit returns the stored result without validating again or touching the
/// transport. Only successful results are stored. Entries are never
/// invalidated (a bounded memoizer evicts least recently used entries), so
/// wrap only idempotent, read-like operations. Drop the client to reset.
pub struct CachedClient<D: Dispatch> {
    inner: D,
    store: Mutex<Store>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<D: Dispatch> CachedClient<D> {
    /// Unbounded memoizer.
    pub fn new(inner: D) -> Self {
        Self::with_store(inner, Store::Unbounded(HashMap::new(), Vec::new()))
    }

    /// Memoizer keeping at most `max_entries` results.
    pub fn bounded(inner: D, max_entries: NonZeroUsize) -> Self {
        Self::with_store(inner, Store::Bounded(LruCache::new(max_entries)))
    }

    fn with_store(inner: D, store: Store) -> Self {
        Self {
            inner,
            store: Mutex::new(store),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Recorded calls, oldest first.
    pub fn history(&self) -> Vec<CallRecord> {
        self.store().records()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

#[async_trait]
impl<D: Dispatch> Dispatch for CachedClient<D> {
    async fn call(&self, operation: &str, args: Args) -> Result<Value> {
        let key = CallKey::new(operation, &args);

        // The guard is a temporary here; it must not live across the await below.
        let cached = self.store().get(&key.hash);
        if let Some(result) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(operation, key = %key, "result served from call history");
            return Ok(result);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = self.inner.call(operation, args).await?;
        debug!(operation, key = %key, "result fetched from server");

        let CallKey {
            hash,
            operation,
            encoded,
        } = key;
        self.store().insert(
            hash,
            CallRecord {
                operation,
                arguments: encoded,
                result: result.clone(),
            },
        );
        Ok(result)
    }

    fn model(&self) -> &ApiModel {
        self.inner.model()
    }
}
