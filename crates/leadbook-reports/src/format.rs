//! Timestamp rendering.
//!
//! Every report renders timestamps through this module, so the display
//! format lives in exactly one place.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Display format for every timestamp a report emits: abbreviated month,
/// 12-hour clock, timezone abbreviation.
/// Example: `Mar 05, 2025 09:41 AM EAT`.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%b %d, %Y %I:%M %p %Z";

/// Render an instant in its timezone.
pub fn format_display(instant: DateTime<Tz>) -> String {
    instant.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}

/// Render a stored naive-UTC timestamp in `tz`.
///
/// The stored value is tagged as UTC first, then converted.
pub fn format_stored(stored: NaiveDateTime, tz: Tz) -> String {
    format_display(Utc.from_utc_datetime(&stored).with_timezone(&tz))
}

/// Render a distributor's last sign-in, `"Never"` when absent.
pub fn format_last_login(last_login: Option<NaiveDateTime>, tz: Tz) -> String {
    match last_login {
        Some(t) => format_stored(t, tz),
        None => "Never".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn renders_in_local_zone() {
        let s = format_stored(naive(2025, 3, 5, 6, 41, 7), chrono_tz::Africa::Kampala);
        assert_eq!(s, "Mar 05, 2025 09:41 AM EAT");
    }

    #[test]
    fn renders_twelve_hour_clock() {
        let s = format_stored(naive(2025, 3, 5, 18, 5, 0), chrono_tz::Africa::Kampala);
        assert_eq!(s, "Mar 05, 2025 09:05 PM EAT");
    }

    #[test]
    fn reparse_keeps_local_date_hour_minute() {
        // Seconds and the zone abbreviation are display-only; parsing the
        // rendered text back recovers the local date and wall time.
        let stored = naive(2025, 3, 5, 6, 41, 59);
        let rendered = format_stored(stored, chrono_tz::Africa::Kampala);
        let without_zone = rendered.rsplit_once(' ').map(|(head, _)| head).unwrap();

        let reparsed =
            NaiveDateTime::parse_from_str(without_zone, "%b %d, %Y %I:%M %p").unwrap();
        assert_eq!(reparsed, naive(2025, 3, 5, 9, 41, 0));
    }

    #[test]
    fn last_login_never_when_absent() {
        let tz = chrono_tz::Africa::Kampala;
        assert_eq!(format_last_login(None, tz), "Never");
        assert_eq!(
            format_last_login(Some(naive(2025, 3, 5, 6, 41, 0)), tz),
            "Mar 05, 2025 09:41 AM EAT"
        );
    }
}
