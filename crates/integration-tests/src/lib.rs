//! Shared fixtures for the integration tests.

use chrono::{DateTime, TimeZone, Utc};
use domains::{Rating, Review, ReviewId};
use services::{FixedClock, ReviewController, ReviewStore, SequentialIds};
use storage_adapters::InMemoryStorage;

pub const KEY: &str = "reviews_v1";

pub fn at(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).unwrap()
}

pub fn rating(n: u8) -> Rating {
    Rating::try_from(n).unwrap()
}

pub fn review(id: &str, name: &str, stars: u8, millis: i64) -> Review {
    Review {
        id: ReviewId::new(id),
        name: name.to_string(),
        title: format!("{name}'s title"),
        message: format!("{name}'s message"),
        rating: rating(stars),
        created_at: at(millis),
    }
}

/// Controller over `storage` with sequential ids and a clock that advances
/// one second per review.
pub fn controller(storage: &InMemoryStorage) -> ReviewController {
    let store = ReviewStore::load(Box::new(storage.clone()), KEY);
    ReviewController::new(
        store,
        Box::new(SequentialIds::new("rev")),
        Box::new(FixedClock::stepping(
            1_700_000_000_000,
            chrono::Duration::seconds(1),
        )),
    )
}

/// Fills the form and submits it.
pub fn submit(
    c: &mut ReviewController,
    name: &str,
    title: &str,
    message: &str,
    stars: Option<u8>,
) -> domains::Result<Review> {
    let form = c.form_mut();
    form.name = name.to_string();
    form.title = title.to_string();
    form.message = message.to_string();
    c.select_rating(stars.map(rating));
    c.submit()
}

pub fn ids(reviews: &[Review]) -> Vec<&str> {
    reviews.iter().map(|r| r.id.as_str()).collect()
}
