//! Implementations of the `IdProvider` and `Clock` ports.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use domains::{Clock, IdProvider, ReviewId};
use uuid::Uuid;

/// Random v4 UUIDs. Collisions are not checked for.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdProvider for UuidIds {
    fn next_id(&self) -> ReviewId {
        ReviewId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic ids: `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdProvider for SequentialIds {
    fn next_id(&self) -> ReviewId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        ReviewId::new(format!("{}-{}", self.prefix, n))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to, optionally by a fixed step on
/// every reading.
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
    step_millis: i64,
}

impl FixedClock {
    pub fn at_millis(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
            step_millis: 0,
        }
    }

    /// Each `now()` returns the current instant, then advances by `step`.
    pub fn stepping(start_millis: i64, step: Duration) -> Self {
        Self {
            millis: AtomicI64::new(start_millis),
            step_millis: step.num_milliseconds(),
        }
    }

    pub fn set_millis(&self, millis: i64) {
        self.millis.store(millis, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.fetch_add(self.step_millis, Ordering::Relaxed);
        Utc.timestamp_millis_opt(millis)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}
