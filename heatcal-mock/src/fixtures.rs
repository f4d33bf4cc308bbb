//! Deterministic activity records.

use chrono::{Months, NaiveDate, NaiveTime, TimeDelta};

use heatcal_core::{DayRecord, DetailEntry};

/// Project names used by the generated records.
pub const PROJECTS: [&str; 4] = ["Design", "Code", "Review", "Meetings"];

/// One record per day from a year before `today` up to `today`, with raw
/// details (no summaries).
///
/// The pattern is fixed: every seventh day has nothing tracked, the others
/// hold one to four slices spread over the working day.
#[must_use]
pub fn trailing_year(today: NaiveDate) -> Vec<DayRecord> {
    let start = today.checked_sub_months(Months::new(12)).unwrap_or(today);
    start
        .iter_days()
        .take_while(|d| *d <= today)
        .enumerate()
        .map(|(i, date)| day(date, i))
        .collect()
}

/// Records for every day of `[start, end)`, same pattern as
/// [`trailing_year`].
#[must_use]
pub fn between(start: NaiveDate, end: NaiveDate) -> Vec<DayRecord> {
    start
        .iter_days()
        .take_while(|d| *d < end)
        .enumerate()
        .map(|(i, date)| day(date, i))
        .collect()
}

/// A single day with one slice of `seconds` for `name` at 09:00 UTC.
#[must_use]
pub fn single(date: NaiveDate, name: &str, seconds: u64) -> DayRecord {
    let at = date.and_time(nine()).and_utc();
    DayRecord::from_details(date, vec![DetailEntry::new(at, name, seconds)])
}

/// A day with nothing tracked.
#[must_use]
pub fn idle(date: NaiveDate) -> DayRecord {
    DayRecord::from_details(date, Vec::new())
}

/// The 2024-01-01 record with a single 3661 second slice of project `A`
/// starting at 01:01:01.
#[must_use]
pub fn one_hour_one_minute() -> DayRecord {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN);
    let at = date
        .and_time(NaiveTime::from_hms_opt(1, 1, 1).unwrap_or(NaiveTime::MIN))
        .and_utc();
    DayRecord::from_details(date, vec![DetailEntry::new(at, "A", 3661)])
}

fn nine() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn day(date: NaiveDate, i: usize) -> DayRecord {
    if i % 7 == 3 {
        return idle(date);
    }
    let slices = i % 4 + 1;
    let start = date.and_time(nine()).and_utc();
    let details = (0..slices)
        .map(|k| {
            let minutes = (i * 37 + k * 53) % 120 + 15;
            let at = start + TimeDelta::minutes(i64::try_from(k * 150).unwrap_or(0));
            DetailEntry::new(at, PROJECTS[(i + k) % PROJECTS.len()], minutes as u64 * 60)
        })
        .collect();
    DayRecord::from_details(date, details)
}

