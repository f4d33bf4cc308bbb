//! Zoom levels and the user's current selection.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::HeatcalError;

/// Zoom level of the calendar, ordered coarse to fine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Trailing-year overview, one cell per day.
    #[default]
    Year,
    /// One month, one stacked bar per day.
    Month,
    /// One week, one stacked bar per day.
    Week,
    /// One day, one bar per activity slice.
    Day,
}

impl Granularity {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
        }
    }

    /// Whether cells of this view are stacked per-day summaries.
    #[must_use]
    pub const fn is_stacked(self) -> bool {
        matches!(self, Self::Month | Self::Week)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = HeatcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "day" => Ok(Self::Day),
            other => Err(HeatcalError::InvalidArg(format!(
                "unknown granularity: {other}"
            ))),
        }
    }
}

/// What the user drilled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "lowercase")]
pub enum Anchor {
    /// A specific day record, addressed by its date.
    Record(NaiveDate),
    /// A period (month or week) addressed by any date inside it.
    Period(NaiveDate),
}

impl Anchor {
    /// The date carried by the anchor.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        match self {
            Self::Record(d) | Self::Period(d) => d,
        }
    }
}

/// Current granularity plus the anchor that scopes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Active zoom level.
    pub granularity: Granularity,
    /// Record or period in view; `None` only before the first drill-down.
    pub anchor: Option<Anchor>,
}
