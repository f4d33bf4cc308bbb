use chrono::{Datelike, NaiveDate, NaiveDateTime};

use heatcal_types::Seconds;

/// Human-readable duration: `"1 hour 1 minute"`, `"2 hours"`, `"45 seconds"`.
///
/// Seconds are only shown when the duration is under a minute.
#[must_use]
pub fn format_duration(seconds: Seconds) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds - hours * 3600) / 60;
    if hours == 0 && minutes == 0 {
        return format!("{seconds} seconds");
    }
    let mut out = String::new();
    match hours {
        0 => {}
        1 => out.push_str("1 hour "),
        h => out.push_str(&format!("{h} hours ")),
    }
    match minutes {
        0 => {}
        1 => out.push_str("1 minute"),
        m => out.push_str(&format!("{m} minutes")),
    }
    out.trim_end().to_string()
}

/// Duration followed by "tracked", or "No time tracked".
#[must_use]
pub fn tracked(seconds: Seconds) -> String {
    if seconds == 0 {
        "No time tracked".to_string()
    } else {
        format!("{} tracked", format_duration(seconds))
    }
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `"Monday, Jan 1st 2024"`.
#[must_use]
pub fn format_day(date: NaiveDate) -> String {
    format!(
        "{}, {} {}{} {}",
        date.format("%A"),
        date.format("%b"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// `"Monday, Jan 1st 2024 14:05"`.
#[must_use]
pub fn format_day_time(at: NaiveDateTime) -> String {
    format!("{} {}", format_day(at.date()), at.format("%H:%M"))
}
