use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use heatcal_types::WeekConvention;

/// Date arithmetic consumed by the layout engine and navigation.
///
/// Weekdays are numbered `0..=6` relative to [`Calendar::first_weekday`], so
/// row 0 is always the first day of the week whatever the convention.
pub trait Calendar: Send + Sync {
    /// The current local date.
    fn today(&self) -> NaiveDate;

    /// First day of every week.
    fn first_weekday(&self) -> Weekday;

    /// Week number of `date` within its week-year (1-based).
    fn week(&self, date: NaiveDate) -> u32;

    /// The week-year `date` belongs to; differs from the calendar year for
    /// days near January 1st.
    fn week_year(&self, date: NaiveDate) -> i32;

    /// Number of weeks in a week-year (52 or 53).
    fn weeks_in_year(&self, week_year: i32) -> u32;

    /// UTC instant of local midnight starting `date`.
    fn day_start(&self, date: NaiveDate) -> DateTime<Utc>;

    /// Local wall-clock time of an instant.
    fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime;

    /// Local date of an instant.
    fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date()
    }

    /// Row index of `date`, 0 = first day of the week.
    fn weekday(&self, date: NaiveDate) -> u32 {
        let first = self.first_weekday().num_days_from_monday();
        let d = date.weekday().num_days_from_monday();
        (d + 7 - first) % 7
    }

    /// First day of the week containing `date`.
    fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        date.checked_sub_days(Days::new(u64::from(self.weekday(date))))
            .unwrap_or(date)
    }

    /// First day of the month containing `date`.
    fn start_of_month(&self, date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }

    /// First day of the month after the one containing `date`.
    fn next_month(&self, date: NaiveDate) -> NaiveDate {
        let start = self.start_of_month(date);
        start.checked_add_months(Months::new(1)).unwrap_or(start)
    }

    /// English name of weekday row `index` (0 = first day of the week).
    fn weekday_name(&self, index: u32) -> &'static str {
        let mut wd = self.first_weekday();
        for _ in 0..index % 7 {
            wd = wd.succ();
        }
        match wd {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

/// [`Calendar`] backed by chrono in a fixed IANA time zone.
#[derive(Debug, Clone)]
pub struct ChronoCalendar {
    tz: Tz,
    week: WeekConvention,
    pinned_today: Option<NaiveDate>,
}

impl Default for ChronoCalendar {
    fn default() -> Self {
        Self::new(Tz::UTC, WeekConvention::ISO)
    }
}

impl ChronoCalendar {
    /// Calendar for `tz` numbering weeks per `week`.
    #[must_use]
    pub const fn new(tz: Tz, week: WeekConvention) -> Self {
        Self {
            tz,
            week,
            pinned_today: None,
        }
    }

    /// Freeze `today()` at `date`.
    #[must_use]
    pub const fn with_today(mut self, date: NaiveDate) -> Self {
        self.pinned_today = Some(date);
        self
    }

    fn week1_start(&self, year: i32) -> NaiveDate {
        let min_days = u32::from(self.week.min_days_in_first_week.clamp(1, 7));
        let anchor = NaiveDate::from_ymd_opt(year, 1, min_days).unwrap_or(NaiveDate::MIN);
        self.start_of_week(anchor)
    }
}

impl Calendar for ChronoCalendar {
    fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Utc::now().with_timezone(&self.tz).date_naive())
    }

    fn first_weekday(&self) -> Weekday {
        self.week.first_day
    }

    fn week(&self, date: NaiveDate) -> u32 {
        let start = self.week1_start(self.week_year(date));
        let days = (date - start).num_days().max(0);
        u32::try_from(days / 7 + 1).unwrap_or(1)
    }

    fn week_year(&self, date: NaiveDate) -> i32 {
        let y = date.year();
        if date >= self.week1_start(y + 1) {
            y + 1
        } else if date < self.week1_start(y) {
            y - 1
        } else {
            y
        }
    }

    fn weeks_in_year(&self, week_year: i32) -> u32 {
        let days = (self.week1_start(week_year + 1) - self.week1_start(week_year)).num_days();
        u32::try_from(days / 7).unwrap_or(52)
    }

    fn day_start(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(chrono::NaiveTime::MIN);
        match self.tz.from_local_datetime(&midnight) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
            // Midnight skipped by a DST jump: the day starts at the first valid hour.
            LocalResult::None => (1..=3)
                .find_map(|h| {
                    self.tz
                        .from_local_datetime(&(midnight + chrono::Duration::hours(h)))
                        .earliest()
                })
                .map_or_else(|| Utc.from_utc_datetime(&midnight), |dt| dt.with_timezone(&Utc)),
        }
    }

    fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }
}
