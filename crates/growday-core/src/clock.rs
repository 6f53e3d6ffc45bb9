//! Source of "now" and "today".
//!
//! Daily reconciliation and completion dates depend on the calendar day, so
//! the clock is injected rather than read from the system everywhere.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    /// Calendar day the user is living in.
    fn today(&self) -> NaiveDate;
}

pub type SharedClock = Rc<dyn Clock>;

/// Wall clock; "today" follows the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests. "Today" is the UTC date of `now`.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Clock pinned to noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self::new(noon.and_utc())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance_days(&self, days: i64) {
        self.now.set(self.now.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.now.get().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_by_days() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let clock = FixedClock::on(date);
        assert_eq!(clock.today(), date);
        clock.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    }

    #[test]
    fn fixed_clock_today_rolls_over_at_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let clock = FixedClock::on(date);
        clock.set(date.and_hms_opt(23, 59, 59).unwrap().and_utc());
        assert_eq!(clock.today(), date);
        clock.set(clock.now() + Duration::seconds(1));
        assert_eq!(clock.today(), date.succ_opt().unwrap());
    }
}
