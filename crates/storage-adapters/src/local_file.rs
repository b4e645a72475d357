//! # Local file storage
//! review-board/crates/storage-adapters/src/local_file.rs
//! Local filesystem implementation of `KeyValueStorage`.
//! Each key is one file, `<root>/<key>.json`, replaced atomically on write.

use std::fs;
use std::io;
use std::path::PathBuf;

use domains::{KeyValueStorage, StorageError};

pub struct LocalFileStorage {
    /// Directory holding one file per key (e.g., "./data")
    root_path: PathBuf,
    quota: Option<usize>,
}

impl LocalFileStorage {
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root.into(),
            quota: None,
        }
    }

    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        crate::validate_key(key)?;
        Ok(self.root_path.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for LocalFileStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Writes to `<key>.json.tmp` then renames over the target, so a crash
    /// mid-write never leaves a truncated collection behind.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        crate::check_quota(key, bytes.len(), self.quota)?;

        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.root_path).map_err(write_err)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes).map_err(write_err)?;
        fs::rename(&tmp_path, &path).map_err(write_err)?;

        tracing::debug!(key, path = %path.display(), size = bytes.len(), "wrote storage file");
        Ok(())
    }
}
