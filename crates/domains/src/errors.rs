//! # Errors
//!
//! Centralized error handling for the review board.
//! Validation failures are recoverable and shown to the user; storage
//! failures are fatal to the caller.

use thiserror::Error;

/// Rejection of a submission before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No rating was selected.
    #[error("a rating is required")]
    MissingRating,

    /// Rating outside `1..=5`.
    #[error("rating {0} is outside 1..=5")]
    RatingOutOfRange(i64),
}

impl ValidationError {
    /// The text shown next to the rating picker.
    pub fn user_message(&self) -> &'static str {
        "Please select a rating (1–5)"
    }
}

/// Failure reported by a `KeyValueStorage` backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read key {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write key {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value larger than the backend allows (the `localStorage` quota case).
    #[error("quota exceeded writing {key}: {size} bytes > {quota} bytes")]
    QuotaExceeded { key: String, size: usize, quota: usize },

    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("failed to encode review collection: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The primary error type for controller operations.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// A specialized Result type for review board logic.
pub type Result<T> = std::result::Result<T, DomainError>;
