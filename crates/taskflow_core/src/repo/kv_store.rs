//! Key-value byte store contract and SQLite implementation.
//!
//! # Invariants
//! - Values are opaque bytes; callers own the encoding.
//! - `put` replaces any previous value for the key atomically.

use super::{RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Minimal byte-oriented storage used by every repository.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> RepoResult<Option<Vec<u8>>>;
    fn put(&self, key: &str, value: &[u8]) -> RepoResult<()>;
    /// Returns whether a value was present.
    fn remove(&self, key: &str) -> RepoResult<bool>;
    /// Returns all keys in lexical order.
    fn keys(&self) -> RepoResult<Vec<String>>;
}

/// SQLite-backed key-value store on the `kv_entries` table.
#[derive(Clone, Copy)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// Fails with `InvalidData` when the connection has not been opened
    /// through [`crate::db::open_db`] / [`crate::db::open_db_in_memory`].
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let ready: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )?;
        if ready != 1 {
            return Err(RepoError::InvalidData {
                key: "kv_entries".to_string(),
                message: "connection is missing migrations".to_string(),
            });
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &[u8]) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!("event=kv_put module=repo status=ok key={key} bytes={}", value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        debug!("event=kv_remove module=repo status=ok key={key} removed={}", changed > 0);
        Ok(changed > 0)
    }

    fn keys(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

/// Reads and decodes a JSON document stored under `key`.
pub fn read_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> RepoResult<Option<T>> {
    let Some(bytes) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| RepoError::Serialization {
            key: key.to_string(),
            source,
        })
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> RepoResult<()> {
    let bytes = serde_json::to_vec(value).map_err(|source| RepoError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.put(key, &bytes)
}
