//! # Domain Models
//!
//! These structs represent the core entities of the review board.
//! The serialized layout (camelCase keys, `createdAt` as epoch milliseconds)
//! is the on-disk format of the whole collection.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating. Also the width of every star indicator.
pub const MAX_RATING: u8 = 5;

pub const FILLED_STAR: char = '★';
pub const EMPTY_STAR: char = '☆';

/// Opaque identifier assigned to a review when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(String);

impl ReviewId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReviewId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ReviewId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A star rating in `1..=5`.
///
/// The only constructors are the `TryFrom` impls, and deserialization goes
/// through them too, so a stored collection containing an out-of-range rating
/// fails to parse as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn value(self) -> u8 {
        self.0
    }

    /// Renders this rating as a five-symbol filled/empty indicator.
    pub fn stars(self) -> String {
        star_string(self.0)
    }
}

impl TryFrom<i64> for Rating {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::RatingOutOfRange(value))
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `filled` stars followed by empty ones, always `MAX_RATING` symbols wide.
pub fn star_string(filled: u8) -> String {
    let filled = filled.min(MAX_RATING);
    std::iter::repeat(FILLED_STAR)
        .take(filled as usize)
        .chain(std::iter::repeat(EMPTY_STAR).take((MAX_RATING - filled) as usize))
        .collect()
}

/// One user-submitted review. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub name: String,
    pub title: String,
    pub message: String,
    pub rating: Rating,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// True when the lower-cased name, title or message contains `needle`.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.name, &self.title, &self.message]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
