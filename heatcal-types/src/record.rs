//! Activity records supplied by the host.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Durations are whole seconds. Unsigned, so a negative duration is rejected
/// when the record is deserialised rather than drawn.
pub type Seconds = u64;

/// One activity slice: `value` seconds spent on `name` starting at `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailEntry {
    /// Start of the slice.
    pub date: DateTime<Utc>,
    /// Project or category name.
    pub name: String,
    /// Duration in seconds.
    pub value: Seconds,
}

impl DetailEntry {
    /// Construct a detail entry.
    pub fn new(date: DateTime<Utc>, name: impl Into<String>, value: Seconds) -> Self {
        Self {
            date,
            name: name.into(),
            value,
        }
    }

    /// Instant at which the slice ends.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        let secs = i64::try_from(self.value).unwrap_or(i64::MAX);
        self.date
            .checked_add_signed(chrono::Duration::seconds(secs))
            .unwrap_or(self.date)
    }
}

/// Per-day total for one category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// Category name, unique within a day's summary.
    pub name: String,
    /// Accumulated seconds.
    pub value: Seconds,
}

/// All activity of one calendar day.
///
/// `total` is expected to equal the sum of `details[].value`. The `summary`
/// is optional on input and filled in by the aggregator for a batch whose
/// first record lacks one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The calendar day.
    pub date: NaiveDate,
    /// Seconds tracked on that day.
    pub total: Seconds,
    /// Raw activity slices.
    #[serde(default)]
    pub details: Vec<DetailEntry>,
    /// Per-category totals, ordered by value descending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<SummaryEntry>>,
}

impl DayRecord {
    /// Build a record whose `total` is the sum of `details`.
    #[must_use]
    pub fn from_details(date: NaiveDate, details: Vec<DetailEntry>) -> Self {
        let total = details.iter().map(|d| d.value).sum();
        Self {
            date,
            total,
            details,
            summary: None,
        }
    }

    /// A day with nothing tracked.
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total: 0,
            details: Vec::new(),
            summary: None,
        }
    }

    /// Summary entries, or an empty slice when none were computed.
    #[must_use]
    pub fn summary(&self) -> &[SummaryEntry] {
        self.summary.as_deref().unwrap_or(&[])
    }

    /// Largest single summary value of the day.
    #[must_use]
    pub fn max_summary_value(&self) -> Seconds {
        self.summary().iter().map(|s| s.value).max().unwrap_or(0)
    }
}
