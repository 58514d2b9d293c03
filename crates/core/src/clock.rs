//! Clock abstraction.
//!
//! The domain layer never reads system time directly: behaviors that depend on
//! "now" (registration expiry, document-expiry checks, true-duration
//! calculation) take the timestamp as an explicit parameter, and the
//! application layer obtains it from a [`Clock`]. This keeps every domain
//! decision deterministic under test.

use chrono::{DateTime, Utc};

/// Source of the current timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
