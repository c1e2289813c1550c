//! Repository layer over the key-value byte store.
//!
//! # Responsibility
//! - Persist each entity collection as one JSON document per key.
//! - Isolate SQLite and serialization details from services.
//!
//! # Invariants
//! - Every mutation rewrites the whole collection under its key.
//! - Read paths reject persisted records that break model invariants.
//! - Repository APIs return semantic errors (`NotFound`, `AlreadyExists`)
//!   in addition to transport errors.

pub mod collection;
pub mod kv_store;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

use crate::db::DbError;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and lookup operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("failed to serialize `{key}`: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },
    #[error("invalid persisted data under `{key}`: {message}")]
    InvalidData { key: String, message: String },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
