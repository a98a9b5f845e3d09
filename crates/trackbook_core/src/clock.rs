//! Time source injected into services.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;

/// Supplies the current instant for ids, timestamps and activity entries.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic tests and imports.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at: Cell::new(at) }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.at.set(at);
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.at.set(self.at.get() + step);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn fixed_clock_advances_by_step() {
        let start = Utc.with_ymd_and_hms(2025, 1, 5, 14, 30, 0).unwrap();
        let clock = FixedClock::new(start);
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), start + Duration::minutes(5));
    }
}
