//! # Ports
//!
//! Any adapter must implement these traits to be used by the services.
//! All ports are synchronous: every operation completes inside the
//! triggering user action.

use chrono::{DateTime, Utc};

use crate::errors::StorageError;
use crate::models::ReviewId;

/// Durable key-value byte store. One key holds the whole review collection.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait KeyValueStorage: Send + Sync {
    /// Returns `None` when the key has never been written.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the value stored under `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Keys a backend must accept: non-empty, not `.`/`..`, and made only of
/// ASCII letters, digits, `_`, `-` and `.` (file backends use them as names).
pub fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Source of fresh review identifiers.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait IdProvider: Send + Sync {
    fn next_id(&self) -> ReviewId;
}

/// Wall-clock used to stamp `created_at`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
