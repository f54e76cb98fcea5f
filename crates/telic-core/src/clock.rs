//! Clock capability
//!
//! Transition records carry a timestamp. The time source is injected into
//! the container instead of read from a global, so tests can pin it.

use chrono::{DateTime, Utc};

/// Source of timestamps for transition records
pub trait Clock {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system wall clock
///
/// # Example
/// ```
/// use telic_core::clock::{Clock, SystemClock};
///
/// let before = chrono::Utc::now();
/// assert!(SystemClock.now() >= before);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always reports the same instant
///
/// # Example
/// ```
/// use telic_core::clock::{Clock, FixedClock};
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
/// let clock = FixedClock::new(instant);
/// assert_eq!(clock.now(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
