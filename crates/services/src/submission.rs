//! Submission boundary: raw form fields in, a ready-to-store `Review` out.

use domains::{Clock, IdProvider, Rating, Review, ValidationError};

/// Field values as handed over by the form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub name: String,
    pub title: String,
    pub message: String,
    /// `None` when no star was picked.
    pub rating: Option<i64>,
}

/// A draft that passed validation: text trimmed, rating in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    pub name: String,
    pub title: String,
    pub message: String,
    pub rating: Rating,
}

/// Only the rating is checked. Text fields may be empty.
pub fn validate(draft: &ReviewDraft) -> Result<ValidatedDraft, ValidationError> {
    let rating = match draft.rating {
        None | Some(0) => return Err(ValidationError::MissingRating),
        Some(n) => Rating::try_from(n)?,
    };

    Ok(ValidatedDraft {
        name: draft.name.trim().to_string(),
        title: draft.title.trim().to_string(),
        message: draft.message.trim().to_string(),
        rating,
    })
}

impl ValidatedDraft {
    /// Stamps a fresh id and creation time.
    pub fn into_review(self, ids: &dyn IdProvider, clock: &dyn Clock) -> Review {
        Review {
            id: ids.next_id(),
            name: self.name,
            title: self.title,
            message: self.message,
            rating: self.rating,
            created_at: clock.now(),
        }
    }
}
