//! Month window derivation and the two month-membership policies.
//!
//! Reports use two different notions of "logged this month", and both are
//! kept on purpose:
//!
//! * [`MonthWindow::matches_local_month`] -- the stored timestamp,
//!   rendered in the configured timezone, has the same local year and
//!   month as now.  Dashboard counters use this.
//! * [`MonthWindow::contains_utc`] -- the raw naive-UTC timestamp falls in
//!   the half-open window `[start_utc, end_utc)` spanning the current
//!   local month.  Leaderboard queries use this; it is also the predicate
//!   the store-level range query implements.
//!
//! The visible difference is the treatment of leads without a timestamp:
//! the local test substitutes "now" (so they count), the window test
//! rejects them.  Do not fold one policy into the other.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use leadbook_shared::Clock;

/// The aggregation window for the current local month.
#[derive(Debug, Clone)]
pub struct MonthWindow {
    /// Start of the current local month, converted to naive UTC.
    /// Inclusive.
    pub start_utc: NaiveDateTime,
    /// Start of the next local month, converted to naive UTC.  Exclusive.
    pub end_utc: NaiveDateTime,
    /// "Now" in the configured timezone.
    pub now_local: DateTime<Tz>,
    /// The configured timezone.
    pub tz: Tz,
}

impl MonthWindow {
    /// Build the window for the month containing the clock's "now" in
    /// `tz`.
    pub fn current(clock: &dyn Clock, tz: Tz) -> Self {
        let now_local = clock.now_utc().with_timezone(&tz);

        let year = now_local.year();
        let month = now_local.month();
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        let start_utc = local_month_start(tz, year, month);
        let end_utc = local_month_start(tz, next_year, next_month);

        Self {
            start_utc,
            end_utc,
            now_local,
            tz,
        }
    }

    /// Local-calendar-month test used by dashboard counters.
    ///
    /// The stored timestamp is taken as naive UTC, converted to the
    /// window's timezone, and its local year and month compared with
    /// now's.  A lead without a timestamp counts as logged now.
    pub fn matches_local_month(&self, date_logged: Option<NaiveDateTime>) -> bool {
        let local = self.localize_or_now(date_logged);
        local.year() == self.now_local.year() && local.month() == self.now_local.month()
    }

    /// Half-open UTC window test used by leaderboard queries.  A lead
    /// without a timestamp never matches.
    pub fn contains_utc(&self, date_logged: Option<NaiveDateTime>) -> bool {
        match date_logged {
            Some(t) => self.start_utc <= t && t < self.end_utc,
            None => false,
        }
    }

    /// Tag a stored naive timestamp as UTC and convert it to the window's
    /// timezone, substituting "now" when the timestamp is absent.
    pub fn localize_or_now(&self, date_logged: Option<NaiveDateTime>) -> DateTime<Tz> {
        match date_logged {
            Some(t) => Utc.from_utc_datetime(&t).with_timezone(&self.tz),
            None => self.now_local,
        }
    }
}

/// Local midnight on the first of the given month, as naive UTC.
///
/// When a DST transition makes local midnight nonexistent the first valid
/// instant after it is used; when it is ambiguous the earlier offset wins.
fn local_month_start(tz: Tz, year: i32, month: u32) -> NaiveDateTime {
    let mut naive = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN);

    // DST gaps are at most a few hours; step in half-hour increments
    // until the local time exists.
    for _ in 0..48 {
        if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
            return dt.naive_utc();
        }
        naive = naive + Duration::minutes(30);
    }

    naive
}
