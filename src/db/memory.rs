//! In-memory store for tests: records calls and fails on demand.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::store::{stamp_new, Store};
use crate::errors::AppError;
use crate::models::Entity;

/// Counts of backend calls made against a [`MemoryStore`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub creates: usize,
    pub reads: usize,
    pub updates: usize,
    pub deletes: usize,
    pub lists: usize,
    pub set_actives: usize,
}

#[derive(Default)]
struct Counters {
    creates: AtomicUsize,
    reads: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
    lists: AtomicUsize,
    set_actives: AtomicUsize,
}

pub struct MemoryStore<E> {
    records: Mutex<Vec<E>>,
    failing_ids: Mutex<HashSet<String>>,
    fail_list: Mutex<bool>,
    calls: Counters,
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failing_ids: Mutex::new(HashSet::new()),
            fail_list: Mutex::new(false),
            calls: Counters::default(),
        }
    }
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed records without counting calls.
    pub fn with_records(records: Vec<E>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.records.lock().unwrap();
            for mut record in records {
                stamp_new(&mut record);
                guard.push(record);
            }
        }
        store
    }

    /// Make every write touching `id` fail.
    pub fn fail_on(&self, id: &str) {
        self.failing_ids.lock().unwrap().insert(id.to_string());
    }

    /// Make `list` fail.
    pub fn fail_list(&self) {
        *self.fail_list.lock().unwrap() = true;
    }

    pub fn calls(&self) -> CallCounts {
        CallCounts {
            creates: self.calls.creates.load(Ordering::SeqCst),
            reads: self.calls.reads.load(Ordering::SeqCst),
            updates: self.calls.updates.load(Ordering::SeqCst),
            deletes: self.calls.deletes.load(Ordering::SeqCst),
            lists: self.calls.lists.load(Ordering::SeqCst),
            set_actives: self.calls.set_actives.load(Ordering::SeqCst),
        }
    }

    /// Snapshot of stored records without counting a call.
    pub fn records(&self) -> Vec<E> {
        self.records.lock().unwrap().clone()
    }

    fn check(&self, id: &str) -> Result<(), AppError> {
        if self.failing_ids.lock().unwrap().contains(id) {
            return Err(AppError::Backend(format!("injected failure for {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> Store<E> for MemoryStore<E> {
    async fn create(&self, mut record: E) -> Result<E, AppError> {
        self.calls.creates.fetch_add(1, Ordering::SeqCst);
        stamp_new(&mut record);
        self.check(record.id())?;
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn read(&self, id: &str) -> Result<Option<E>, AppError> {
        self.calls.reads.fetch_add(1, Ordering::SeqCst);
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn update(&self, mut record: E) -> Result<E, AppError> {
        self.calls.updates.fetch_add(1, Ordering::SeqCst);
        self.check(record.id())?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| AppError::NotFound(format!("{} not found", E::LABEL)))?;
        if record.date_created().is_empty() {
            record.set_date_created(slot.date_created().to_string());
        }
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.calls.deletes.fetch_add(1, Ordering::SeqCst);
        self.check(id)?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(AppError::NotFound(format!("{} not found", E::LABEL)));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<E>, AppError> {
        self.calls.lists.fetch_add(1, Ordering::SeqCst);
        if *self.fail_list.lock().unwrap() {
            return Err(AppError::Backend("injected list failure".to_string()));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<(), AppError> {
        self.calls.set_actives.fetch_add(1, Ordering::SeqCst);
        self.check(id)?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("{} not found", E::LABEL)))?;
        record.set_active(active);
        Ok(())
    }
}
