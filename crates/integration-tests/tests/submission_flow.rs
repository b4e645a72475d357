use configs::{AppConfig, StorageBackend};
use domains::{DomainError, ValidationError};
use integration_tests::{controller, ids, submit};
use services::{ClearOutcome, ReviewStore};
use storage_adapters::InMemoryStorage;

#[test]
fn missing_rating_leaves_collection_unchanged() {
    let storage = InMemoryStorage::new();
    let mut c = controller(&storage);

    let err = submit(&mut c, "Ann", "Great", "Loved it", None).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::MissingRating)
    ));
    assert_eq!(
        c.form().hint().text(),
        "⚠️ Please select a rating (1–5)"
    );
    assert_eq!(c.view().summary.count, 0);
    assert!(storage.is_empty(), "nothing should be written");

    // The form survives so the user can fix it and resubmit.
    assert_eq!(c.form().title, "Great");
    c.select_rating(Some(integration_tests::rating(4)));
    c.submit().unwrap();
    assert_eq!(c.view().summary.count, 1);
}

#[test]
fn first_review_sets_count_and_average() {
    let storage = InMemoryStorage::new();
    let mut c = controller(&storage);

    let saved = submit(&mut c, "Ann", "Great", "Loved it", Some(3)).unwrap();
    let view = c.view();
    assert_eq!(view.summary.count, 1);
    assert_eq!(view.summary.average_display(), "3.0");
    assert_eq!(view.summary.average_stars(), "★★★☆☆");
    assert_eq!(view.visible[0], saved);
    assert_eq!(c.form().rating(), None);
}

#[test]
fn submissions_survive_a_restart() {
    let storage = InMemoryStorage::new();
    {
        let mut c = controller(&storage);
        submit(&mut c, "Ann", "A", "first", Some(3)).unwrap();
        submit(&mut c, "Bob", "B", "second", Some(5)).unwrap();
        c.delete("rev-1").unwrap();
    }

    let reloaded = ReviewStore::load(Box::new(storage), integration_tests::KEY);
    assert_eq!(ids(reloaded.reviews()), vec!["rev-2"]);
    assert_eq!(reloaded.reviews()[0].name, "Bob");
}

#[test]
fn clear_all_is_guarded_by_confirmation() {
    let storage = InMemoryStorage::new();
    let mut c = controller(&storage);
    submit(&mut c, "Ann", "", "", Some(1)).unwrap();
    submit(&mut c, "Bob", "", "", Some(2)).unwrap();

    assert_eq!(c.clear_all(|_| false).unwrap(), ClearOutcome::Declined);
    assert_eq!(c.reviews().len(), 2);

    assert_eq!(c.clear_all(|_| true).unwrap(), ClearOutcome::Cleared(2));
    assert_eq!(c.view().summary.average_display(), "0.0");
    assert_eq!(c.view().summary.average_stars(), "☆☆☆☆☆");
}

#[test]
fn memory_backend_from_config() {
    let cfg = AppConfig::from_toml("[storage]\nbackend = \"memory\"\nquota_bytes = 64").unwrap();
    assert_eq!(cfg.storage.backend, StorageBackend::Memory);

    let storage = InMemoryStorage::with_quota(cfg.storage.quota_bytes.unwrap());
    let mut c = controller(&storage);
    let err = submit(&mut c, "A long enough name", "title", "message", Some(2)).unwrap_err();
    assert!(matches!(err, DomainError::Storage(_)));
    assert!(c.reviews().is_empty());
    // A storage failure is not a validation failure: the form was not flagged.
    assert!(!c.form().hint().is_warning());
}
