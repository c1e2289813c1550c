//! Whole-collection JSON persistence for one record kind under one key.
//!
//! # Invariants
//! - A missing key reads as an empty collection.
//! - Every record read back passes its model invariant check.
//! - Record ids are unique within a collection.

use super::kv_store::{read_json, write_json, KeyValueStore};
use super::{RepoError, RepoResult};
use crate::model::project::Project;
use crate::model::task::{RecordInvariantError, Task};
use crate::model::user::{StoredCredential, User};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Record stored inside a [`JsonCollection`].
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Kind name used in errors and logs.
    const KIND: &'static str;

    fn record_id(&self) -> &str;

    fn check(&self) -> Result<(), RecordInvariantError>;
}

impl Record for Task {
    const KIND: &'static str = "Task";

    fn record_id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> Result<(), RecordInvariantError> {
        self.check_invariants()
    }
}

impl Record for Project {
    const KIND: &'static str = "Project";

    fn record_id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> Result<(), RecordInvariantError> {
        self.check_invariants()
    }
}

impl Record for User {
    const KIND: &'static str = "User";

    fn record_id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> Result<(), RecordInvariantError> {
        if self.id.trim().is_empty() {
            return Err(RecordInvariantError::EmptyId);
        }
        Ok(())
    }
}

impl Record for StoredCredential {
    const KIND: &'static str = "Credential";

    fn record_id(&self) -> &str {
        &self.user_id
    }

    fn check(&self) -> Result<(), RecordInvariantError> {
        if self.user_id.trim().is_empty() {
            return Err(RecordInvariantError::EmptyId);
        }
        Ok(())
    }
}

/// Ordered list of records serialized as one JSON array.
pub struct JsonCollection<S, T> {
    store: S,
    key: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<S: Clone, T> Clone for JsonCollection<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key,
            _record: PhantomData,
        }
    }
}

impl<S: KeyValueStore, T: Record> JsonCollection<S, T> {
    pub fn new(store: S, key: &'static str) -> Self {
        Self {
            store,
            key,
            _record: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Loads every record in persisted order.
    pub fn load_all(&self) -> RepoResult<Vec<T>> {
        let records: Vec<T> = read_json(&self.store, self.key)?.unwrap_or_default();
        for record in &records {
            record.check().map_err(|err| RepoError::InvalidData {
                key: self.key.to_string(),
                message: format!("{} {}: {err}", T::KIND, record.record_id()),
            })?;
        }
        Ok(records)
    }

    /// Replaces the whole collection.
    pub fn save_all(&self, records: &[T]) -> RepoResult<()> {
        write_json(&self.store, self.key, records)?;
        debug!(
            "event=collection_save module=repo status=ok key={} count={}",
            self.key,
            records.len()
        );
        Ok(())
    }

    pub fn get(&self, id: &str) -> RepoResult<Option<T>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|record| record.record_id() == id))
    }

    /// Appends a record. Fails when the id is already present.
    pub fn insert(&self, record: &T) -> RepoResult<()> {
        let mut records = self.load_all()?;
        if records.iter().any(|r| r.record_id() == record.record_id()) {
            return Err(RepoError::AlreadyExists {
                kind: T::KIND,
                id: record.record_id().to_string(),
            });
        }
        records.push(record.clone());
        self.save_all(&records)
    }

    /// Replaces the record with the same id in place.
    pub fn replace(&self, record: &T) -> RepoResult<()> {
        let mut records = self.load_all()?;
        let slot = records
            .iter_mut()
            .find(|r| r.record_id() == record.record_id())
            .ok_or_else(|| RepoError::NotFound {
                kind: T::KIND,
                id: record.record_id().to_string(),
            })?;
        *slot = record.clone();
        self.save_all(&records)
    }

    /// Removes and returns the record with `id`.
    pub fn remove(&self, id: &str) -> RepoResult<T> {
        let mut records = self.load_all()?;
        let index = records
            .iter()
            .position(|r| r.record_id() == id)
            .ok_or_else(|| RepoError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;
        let removed = records.remove(index);
        self.save_all(&records)?;
        Ok(removed)
    }

    /// Drops the persisted key entirely.
    pub fn clear(&self) -> RepoResult<()> {
        self.store.remove(self.key)?;
        Ok(())
    }
}
