//! # storage-adapters
//!
//! Implementations of the `KeyValueStorage` port.
//! `memory` is the test and demo backend; `local-file` is the durable one.

#[cfg(feature = "local-file")]
pub mod local_file;
#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "local-file")]
pub use local_file::LocalFileStorage;
#[cfg(feature = "memory")]
pub use memory::InMemoryStorage;

use domains::{is_valid_storage_key, StorageError};

/// Keys become file names, so only a conservative character set is allowed.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if is_valid_storage_key(key) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Shared quota check used by both backends.
pub(crate) fn check_quota(key: &str, size: usize, quota: Option<usize>) -> Result<(), StorageError> {
    match quota {
        Some(quota) if size > quota => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            size,
            quota,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_keys() {
        assert!(validate_key("reviews_v1").is_ok());
        assert!(validate_key("reviews.backup-2").is_ok());
    }

    #[test]
    fn rejects_path_like_keys() {
        for bad in ["", ".", "..", "../etc", "a/b", "a b", "ключ"] {
            assert!(
                matches!(validate_key(bad), Err(StorageError::InvalidKey(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn quota_only_applies_when_set() {
        assert!(check_quota("k", 10, None).is_ok());
        assert!(check_quota("k", 10, Some(10)).is_ok());
        assert!(matches!(
            check_quota("k", 11, Some(10)),
            Err(StorageError::QuotaExceeded { size: 11, quota: 10, .. })
        ));
    }
}
