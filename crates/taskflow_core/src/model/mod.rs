//! Domain model for tasks, projects and users.
//!
//! # Responsibility
//! - Define the records persisted by the entity store.
//! - Keep the JSON field names stable (`camelCase`, lowercase enum values).
//!
//! # Invariants
//! - Identifiers are opaque strings and never reused.
//! - `updated_at >= created_at` for every record carrying both.

pub mod project;
pub mod task;
pub mod user;

use chrono::{DateTime, Duration, Utc};

/// Generates a new opaque record identifier.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Returns a modification timestamp strictly later than `previous`.
///
/// Clock reads can repeat within the timestamp resolution, so the result is
/// bumped by one microsecond when `now` does not advance past `previous`.
pub fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
