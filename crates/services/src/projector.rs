//! # View Projector
//!
//! Pure derivation of the visible reviews and the summary.
//! Order of the pipeline: rating filter, search, sort.

use std::cmp::Ordering;

use domains::{Projection, Review, SortMode, Summary, ViewParams};

pub fn project(reviews: &[Review], params: &ViewParams) -> Projection {
    Projection {
        visible: visible_reviews(reviews, params),
        summary: summarize(reviews),
    }
}

pub fn visible_reviews(reviews: &[Review], params: &ViewParams) -> Vec<Review> {
    let needle = params.search_text.trim().to_lowercase();

    let mut visible: Vec<Review> = reviews
        .iter()
        .filter(|r| params.filter.admits(r.rating))
        .filter(|r| needle.is_empty() || r.matches(&needle))
        .cloned()
        .collect();

    // `sort_by` is stable; ties beyond the explicit keys keep storage order.
    visible.sort_by(|a, b| compare(params.sort, a, b));
    visible
}

fn compare(mode: SortMode, a: &Review, b: &Review) -> Ordering {
    let newest_first = b.created_at.cmp(&a.created_at);
    match mode {
        SortMode::Newest => newest_first,
        SortMode::Oldest => a.created_at.cmp(&b.created_at),
        SortMode::Highest => b.rating.cmp(&a.rating).then(newest_first),
        SortMode::Lowest => a.rating.cmp(&b.rating).then(newest_first),
    }
}

/// Always over the full collection, whatever the view parameters.
pub fn summarize(reviews: &[Review]) -> Summary {
    let count = reviews.len();
    if count == 0 {
        return Summary::default();
    }
    let total: u64 = reviews.iter().map(|r| u64::from(r.rating.value())).sum();
    Summary {
        count,
        average: total as f64 / count as f64,
    }
}
