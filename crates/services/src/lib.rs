//! # services
//!
//! Review store, submission validation, view projection and the controller
//! that owns them.

pub mod controller;
pub mod form;
pub mod projector;
pub mod providers;
pub mod store;
pub mod submission;

pub use controller::{ClearOutcome, ReviewController, CLEAR_ALL_PROMPT};
pub use form::{FormState, RatingHint};
pub use projector::project;
pub use providers::{FixedClock, SequentialIds, SystemClock, UuidIds};
pub use store::ReviewStore;
pub use submission::{validate, ReviewDraft, ValidatedDraft};
