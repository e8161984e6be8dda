//! In-process `TableStore` test double.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{
    domain::ActivityRecord,
    errors::Error,
    ports::TableStore,
    Result,
};

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<String, u64>>,
    /// Yield to the scheduler inside every call so concurrent callers interleave.
    yield_between_ops: bool,
    fail_with: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose calls suspend once, exposing read-then-write interleavings.
    pub fn interleaving() -> Self {
        Self {
            yield_between_ops: true,
            ..Self::default()
        }
    }

    pub fn with_rows(rows: impl IntoIterator<Item = ActivityRecord>) -> Self {
        let store = Self::default();
        {
            let mut map = store.lock_rows();
            for r in rows {
                map.insert(r.user_id, r.count);
            }
        }
        store
    }

    /// Make every subsequent call fail with a store error carrying `reason`.
    pub fn fail_all(&self, reason: impl Into<String>) {
        *self.fail_with.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason.into());
    }

    pub fn count_of(&self, user_id: &str) -> Option<u64> {
        self.lock_rows().get(user_id).copied()
    }

    fn lock_rows(&self) -> std::sync::MutexGuard<'_, HashMap<String, u64>> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn enter(&self, op: &'static str) -> Result<()> {
        if self.yield_between_ops {
            tokio::task::yield_now().await;
        }
        let failure = self
            .fail_with
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match failure {
            Some(reason) => Err(Error::store(op, reason)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn fetch(&self, user_id: &str) -> Result<Option<ActivityRecord>> {
        self.enter("fetch").await?;
        Ok(self
            .lock_rows()
            .get(user_id)
            .map(|c| ActivityRecord::new(user_id, *c)))
    }

    async fn fetch_all(&self) -> Result<Vec<ActivityRecord>> {
        self.enter("fetch_all").await?;
        Ok(self
            .lock_rows()
            .iter()
            .map(|(k, v)| ActivityRecord::new(k.clone(), *v))
            .collect())
    }

    async fn insert(&self, record: &ActivityRecord) -> Result<()> {
        self.enter("insert").await?;
        let mut rows = self.lock_rows();
        if rows.contains_key(&record.user_id) {
            return Err(Error::store(
                "insert",
                format!("duplicate key user_id={}", record.user_id),
            ));
        }
        rows.insert(record.user_id.clone(), record.count);
        Ok(())
    }

    async fn update_count(&self, user_id: &str, count: u64) -> Result<()> {
        self.enter("update").await?;
        if let Some(c) = self.lock_rows().get_mut(user_id) {
            *c = count;
        }
        Ok(())
    }
}
