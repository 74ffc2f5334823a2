use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The next `count` weekly expirations on `anchor`, starting from the soonest
/// anchor day at or after `from` (inclusive when `from` already falls on the
/// anchor weekday), spaced exactly 7 days apart. Pure date arithmetic.
pub fn weekly_expirations(count: usize, anchor: Weekday, from: NaiveDate) -> Vec<NaiveDate> {
    let offset = (7 + anchor.num_days_from_monday() as i64
        - from.weekday().num_days_from_monday() as i64)
        % 7;

    (0..count as i64)
        .map(|week| from + Duration::days(offset + week * 7))
        .collect()
}
