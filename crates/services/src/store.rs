//! # Review Store
//!
//! Owns the authoritative, newest-first review collection and mirrors it to
//! a single key of a `KeyValueStorage`.
//!
//! Every mutation builds the next collection, persists it, and only then
//! swaps it in. A failed write leaves memory exactly as it was.

use domains::{KeyValueStorage, Review, ReviewId, StorageError};
use tracing::{debug, info, warn};

pub struct ReviewStore {
    storage: Box<dyn KeyValueStorage>,
    key: String,
    reviews: Vec<Review>,
}

impl ReviewStore {
    /// Reads the collection stored under `key`.
    ///
    /// Absent, unreadable and unparseable values all yield an empty store.
    pub fn load(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let reviews = read_collection(storage.as_ref(), &key);
        info!(key = %key, count = reviews.len(), "loaded reviews");
        Self {
            storage,
            key,
            reviews,
        }
    }

    /// Storage order: most recently appended first.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn get(&self, id: &ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|r| &r.id == id)
    }

    /// Prepends `review`. No validation happens here.
    pub fn append(&mut self, review: Review) -> Result<(), StorageError> {
        let id = review.id.clone();
        let mut next = Vec::with_capacity(self.reviews.len() + 1);
        next.push(review);
        next.extend(self.reviews.iter().cloned());
        self.commit(next)?;
        info!(id = %id, count = self.reviews.len(), "review appended");
        Ok(())
    }

    /// Removes the review with `id`. Returns whether one was removed; an
    /// unknown id is not an error and still rewrites the stored value.
    pub fn remove_by_id(&mut self, id: &ReviewId) -> Result<bool, StorageError> {
        let next: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| &r.id != id)
            .cloned()
            .collect();
        let removed = next.len() != self.reviews.len();
        self.commit(next)?;
        if removed {
            info!(id = %id, count = self.reviews.len(), "review removed");
        } else {
            debug!(id = %id, "remove requested for unknown review");
        }
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        let dropped = self.reviews.len();
        self.commit(Vec::new())?;
        info!(dropped, "reviews cleared");
        Ok(())
    }

    /// Serializes the current collection and overwrites the stored value.
    pub fn persist(&self) -> Result<(), StorageError> {
        write_collection(self.storage.as_ref(), &self.key, &self.reviews)
    }

    fn commit(&mut self, next: Vec<Review>) -> Result<(), StorageError> {
        write_collection(self.storage.as_ref(), &self.key, &next)?;
        self.reviews = next;
        Ok(())
    }
}

fn read_collection(storage: &dyn KeyValueStorage, key: &str) -> Vec<Review> {
    let bytes = match storage.read(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "could not read stored reviews, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<Review>>(&bytes) {
        Ok(reviews) => reviews,
        Err(e) => {
            warn!(key, error = %e, "stored reviews are corrupt, starting empty");
            Vec::new()
        }
    }
}

fn write_collection(
    storage: &dyn KeyValueStorage,
    key: &str,
    reviews: &[Review],
) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec(reviews)?;
    storage.write(key, &bytes)?;
    debug!(key, count = reviews.len(), size = bytes.len(), "persisted reviews");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domains::{MockKeyValueStorage, Rating};
    use storage_adapters::InMemoryStorage;

    const KEY: &str = "reviews_v1";

    fn review(id: &str, rating: u8, millis: i64) -> Review {
        Review {
            id: ReviewId::new(id),
            name: format!("name-{id}"),
            title: format!("title-{id}"),
            message: format!("message-{id}"),
            rating: Rating::try_from(rating).unwrap(),
            created_at: Utc.timestamp_millis_opt(millis).unwrap(),
        }
    }

    fn ids(store: &ReviewStore) -> Vec<&str> {
        store.reviews().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn load_absent_key_is_empty() {
        let store = ReviewStore::load(Box::new(InMemoryStorage::new()), KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn load_garbage_is_empty() {
        let storage = InMemoryStorage::new();
        storage.insert_raw(KEY, "{not json");
        let store = ReviewStore::load(Box::new(storage), KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn load_wrong_shape_is_empty() {
        let storage = InMemoryStorage::new();
        storage.insert_raw(KEY, r#"{"id":"a"}"#);
        assert!(ReviewStore::load(Box::new(storage), KEY).is_empty());
    }

    #[test]
    fn load_read_failure_is_empty() {
        let mut storage = MockKeyValueStorage::new();
        storage.expect_read().returning(|key| {
            Err(StorageError::Read {
                key: key.to_string(),
                source: std::io::Error::other("disk gone"),
            })
        });
        assert!(ReviewStore::load(Box::new(storage), KEY).is_empty());
    }

    #[test]
    fn append_prepends_and_persists() {
        let storage = InMemoryStorage::new();
        let mut store = ReviewStore::load(Box::new(storage.clone()), KEY);
        store.append(review("r1", 3, 100)).unwrap();
        store.append(review("r2", 4, 200)).unwrap();
        assert_eq!(ids(&store), vec!["r2", "r1"]);

        let reloaded = ReviewStore::load(Box::new(storage), KEY);
        assert_eq!(reloaded.reviews(), store.reviews());
    }

    #[test]
    fn remove_by_id_reports_presence() {
        let storage = InMemoryStorage::new();
        let mut store = ReviewStore::load(Box::new(storage.clone()), KEY);
        store.append(review("r1", 3, 100)).unwrap();
        store.append(review("r2", 4, 200)).unwrap();

        assert!(store.remove_by_id(&ReviewId::new("r1")).unwrap());
        assert!(!store.remove_by_id(&ReviewId::new("nope")).unwrap());
        assert_eq!(ids(&store), vec!["r2"]);
        assert_eq!(ReviewStore::load(Box::new(storage), KEY).len(), 1);
    }

    #[test]
    fn clear_persists_empty_array() {
        let storage = InMemoryStorage::new();
        let mut store = ReviewStore::load(Box::new(storage.clone()), KEY);
        store.append(review("r1", 3, 100)).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(storage.read(KEY).unwrap().unwrap(), b"[]".to_vec());
    }

    #[test]
    fn failed_write_leaves_memory_untouched() {
        let mut storage = MockKeyValueStorage::new();
        storage.expect_read().returning(|_| Ok(None));
        storage.expect_write().returning(|key, bytes| {
            Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                size: bytes.len(),
                quota: 0,
            })
        });

        let mut store = ReviewStore::load(Box::new(storage), KEY);
        let err = store.append(review("r1", 5, 100)).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn failed_clear_keeps_reviews() {
        let storage = InMemoryStorage::new();
        let mut seeded = ReviewStore::load(Box::new(storage.clone()), KEY);
        seeded.append(review("r1", 5, 100)).unwrap();

        let mut failing = MockKeyValueStorage::new();
        let raw = storage.read(KEY).unwrap();
        failing.expect_read().return_once(move |_| Ok(raw));
        failing.expect_write().returning(|key, _| {
            Err(StorageError::Write {
                key: key.to_string(),
                source: std::io::Error::other("read-only"),
            })
        });

        let mut store = ReviewStore::load(Box::new(failing), KEY);
        assert!(store.clear().is_err());
        assert_eq!(ids(&store), vec!["r1"]);
    }

    #[test]
    fn persist_writes_under_the_configured_key() {
        let mut storage = MockKeyValueStorage::new();
        storage.expect_read().returning(|_| Ok(None));
        storage
            .expect_write()
            .withf(|key, bytes| key.to_string() == "custom" && bytes.to_vec() == b"[]".to_vec())
            .times(1)
            .returning(|_, _| Ok(()));

        let store = ReviewStore::load(Box::new(storage), "custom");
        store.persist().unwrap();
    }

    #[test]
    fn loads_collection_written_by_the_browser_widget() {
        let storage = InMemoryStorage::new();
        storage.insert_raw(
            KEY,
            r#"[{"id":"0b7c","name":"Ann","title":"Great","message":"Loved it","rating":3,"createdAt":1700000000000}]"#,
        );
        let store = ReviewStore::load(Box::new(storage), KEY);
        assert_eq!(store.len(), 1);
        let r = store.get(&ReviewId::new("0b7c")).unwrap();
        assert_eq!(r.rating.value(), 3);
        assert_eq!(r.created_at.timestamp_millis(), 1_700_000_000_000);
    }
}
