use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{domain::ActivityRecord, ports::TableStore, Result};

const PRUNE_THRESHOLD: usize = 1024;

/// One async mutex per key, created on first use.
///
/// Once the map grows past `prune_at` entries, idle locks (held by nobody and
/// awaited by nobody) are dropped.
pub struct KeyLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    prune_at: usize,
}

impl Default for KeyLocks {
    fn default() -> Self {
        Self::with_prune_threshold(PRUNE_THRESHOLD)
    }
}

impl KeyLocks {
    pub fn with_prune_threshold(prune_at: usize) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            prune_at,
        }
    }

    pub async fn lock_key(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            if map.len() >= self.prune_at {
                // Guards and waiters hold clones, so a count of 1 means idle.
                map.retain(|_, l| Arc::strong_count(l) > 1);
            }
            map.entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

/// Read/increment/list access to the per-user message counters.
///
/// The store only offers plain reads and writes, so `increment` is a
/// read-then-write. It is serialized per user inside this process; two
/// processes sharing one table can still lose updates.
pub struct ActivityTracker {
    store: Arc<dyn TableStore>,
    locks: KeyLocks,
}

impl ActivityTracker {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            locks: KeyLocks::default(),
        }
    }

    /// Current count for `user_id`; 0 for users never seen.
    pub async fn get_count(&self, user_id: &str) -> Result<u64> {
        Ok(self
            .store
            .fetch(user_id)
            .await?
            .map(|r| r.count)
            .unwrap_or(0))
    }

    /// Add one message to `user_id`'s counter and return the new count.
    pub async fn increment(&self, user_id: &str) -> Result<u64> {
        let _guard = self.locks.lock_key(user_id).await;

        match self.store.fetch(user_id).await? {
            Some(rec) => {
                let next = rec.count.saturating_add(1);
                self.store.update_count(user_id, next).await?;
                Ok(next)
            }
            None => {
                self.store.insert(&ActivityRecord::new(user_id, 1)).await?;
                Ok(1)
            }
        }
    }

    pub async fn list_all(&self) -> Result<Vec<ActivityRecord>> {
        self.store.fetch_all().await
    }
}
