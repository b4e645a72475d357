//! # ReviewController
//!
//! Single owner of all widget state: the store, the view parameters and the
//! form. Adapters translate user actions into the methods below and render
//! whatever `view()` returns.

use domains::{
    Clock, DomainError, IdProvider, Projection, Rating, RatingFilter, Review, ReviewId, SortMode,
    StorageError, ViewParams,
};
use tracing::{debug, info};

use crate::form::FormState;
use crate::projector;
use crate::store::ReviewStore;
use crate::submission;

pub const CLEAR_ALL_PROMPT: &str = "Clear all reviews? This cannot be undone.";

/// Result of a clear-all request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Nothing stored, so no confirmation was asked for.
    AlreadyEmpty,
    Declined,
    Cleared(usize),
}

pub struct ReviewController {
    store: ReviewStore,
    ids: Box<dyn IdProvider>,
    clock: Box<dyn Clock>,
    params: ViewParams,
    form: FormState,
}

impl ReviewController {
    pub fn new(store: ReviewStore, ids: Box<dyn IdProvider>, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            ids,
            clock,
            params: ViewParams::default(),
            form: FormState::default(),
        }
    }

    pub fn reviews(&self) -> &[Review] {
        self.store.reviews()
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Text fields are edited in place; the rating goes through
    /// `select_rating` so the hint stays in sync.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn select_rating(&mut self, rating: Option<Rating>) {
        self.form.select_rating(rating);
    }

    /// Validates the form and appends the review.
    ///
    /// On a validation failure the form keeps its contents and the hint turns
    /// into a warning. On success the form is reset.
    pub fn submit(&mut self) -> Result<Review, DomainError> {
        let validated = match submission::validate(&self.form.draft()) {
            Ok(v) => v,
            Err(e) => {
                debug!(error = %e, "submission rejected");
                self.form.reject(e.clone());
                return Err(e.into());
            }
        };

        let review = validated.into_review(self.ids.as_ref(), self.clock.as_ref());
        self.store.append(review.clone())?;
        self.form.reset();
        Ok(review)
    }

    /// Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        self.store.remove_by_id(&ReviewId::from(id))
    }

    /// Asks `confirm` before wiping everything. An empty store is left alone
    /// without asking.
    pub fn clear_all(
        &mut self,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<ClearOutcome, StorageError> {
        if self.store.is_empty() {
            return Ok(ClearOutcome::AlreadyEmpty);
        }
        if !confirm(CLEAR_ALL_PROMPT) {
            info!("clear all declined");
            return Ok(ClearOutcome::Declined);
        }
        let count = self.store.len();
        self.store.clear()?;
        Ok(ClearOutcome::Cleared(count))
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.params.search_text = text.into();
    }

    pub fn set_filter(&mut self, filter: RatingFilter) {
        self.params.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.params.sort = sort;
    }

    pub fn view(&self) -> Projection {
        projector::project(self.store.reviews(), &self.params)
    }
}
