//! Calendar and clock randomizers.
//!
//! The bounded randomizers (day, month, year, hour, minute, second) produce
//! plain integers within fixed inclusive ranges. They know nothing about the
//! calendar: [`DayRandomizer`] happily yields 31 for a 30-day month. The
//! composite [`DateRandomizer`] clamps the day to the chosen month.

use crate::error::ConstructionError;
use crate::generators::numeric::RangeRandomizer;
use crate::randomizer::{derive_optional_seed, Randomizer};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use seedfill_core::DateRange;
use std::time::Duration;

/// Smallest day of month.
pub const MIN_DAY: i32 = 1;
/// Largest day of month.
pub const MAX_DAY: i32 = 31;
/// Smallest month.
pub const MIN_MONTH: i32 = 1;
/// Largest month.
pub const MAX_MONTH: i32 = 12;
/// Smallest year.
pub const MIN_YEAR: i32 = 1970;
/// Largest year.
pub const MAX_YEAR: i32 = 2100;
/// Smallest hour.
pub const MIN_HOUR: i32 = 0;
/// Largest hour.
pub const MAX_HOUR: i32 = 23;
/// Smallest minute.
pub const MIN_MINUTE: i32 = 0;
/// Largest minute.
pub const MAX_MINUTE: i32 = 59;
/// Smallest second.
pub const MIN_SECOND: i32 = 0;
/// Largest second.
pub const MAX_SECOND: i32 = 59;

macro_rules! bounded_randomizer {
    ($(#[$meta:meta])* $name:ident, $min:expr, $max:expr) => {
        $(#[$meta])*
        pub struct $name {
            delegate: RangeRandomizer<i32>,
        }

        impl $name {
            /// Randomizer seeded from system entropy.
            pub fn new() -> Self {
                Self::from_seed(None)
            }

            /// Deterministic randomizer.
            pub fn with_seed(seed: u64) -> Self {
                Self::from_seed(Some(seed))
            }

            /// Randomizer seeded when `seed` is given.
            pub fn from_seed(seed: Option<u64>) -> Self {
                Self {
                    delegate: RangeRandomizer::bounded($min, $max, seed),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Randomizer for $name {
            type Output = i32;

            fn next_value(&mut self) -> i32 {
                self.delegate.next_value()
            }
        }
    };
}

bounded_randomizer!(
    /// Day of month in `[MIN_DAY, MAX_DAY]`.
    DayRandomizer,
    MIN_DAY,
    MAX_DAY
);

bounded_randomizer!(
    /// Month in `[MIN_MONTH, MAX_MONTH]`.
    MonthRandomizer,
    MIN_MONTH,
    MAX_MONTH
);

bounded_randomizer!(
    /// Year in `[MIN_YEAR, MAX_YEAR]`.
    YearRandomizer,
    MIN_YEAR,
    MAX_YEAR
);

bounded_randomizer!(
    /// Hour of day in `[MIN_HOUR, MAX_HOUR]`.
    HourRandomizer,
    MIN_HOUR,
    MAX_HOUR
);

bounded_randomizer!(
    /// Minute in `[MIN_MINUTE, MAX_MINUTE]`.
    MinuteRandomizer,
    MIN_MINUTE,
    MAX_MINUTE
);

bounded_randomizer!(
    /// Second in `[MIN_SECOND, MAX_SECOND]`.
    SecondRandomizer,
    MIN_SECOND,
    MAX_SECOND
);

/// Number of days in the given month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Dates within a range, composed from year, month and day randomizers.
pub struct DateRandomizer {
    range: DateRange,
    year: RangeRandomizer<i32>,
    month: MonthRandomizer,
    day: DayRandomizer,
}

impl DateRandomizer {
    /// Dates within `range`.
    pub fn new(range: DateRange, seed: Option<u64>) -> Result<Self, ConstructionError> {
        if range.start > range.end {
            return Err(ConstructionError::InvalidRange {
                min: range.start.to_string(),
                max: range.end.to_string(),
            });
        }
        Ok(Self {
            range,
            year: RangeRandomizer::bounded(
                range.start.year(),
                range.end.year(),
                derive_optional_seed(seed, "year"),
            ),
            month: MonthRandomizer::from_seed(derive_optional_seed(seed, "month")),
            day: DayRandomizer::from_seed(derive_optional_seed(seed, "day")),
        })
    }
}

impl Randomizer for DateRandomizer {
    type Output = NaiveDate;

    fn next_value(&mut self) -> NaiveDate {
        let year = self.year.next_value();
        let month = self.month.next_value() as u32;
        let day = (self.day.next_value() as u32).min(days_in_month(year, month));

        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or(self.range.start)
            .clamp(self.range.start, self.range.end)
    }
}

/// Times of day, composed from hour, minute and second randomizers.
pub struct TimeRandomizer {
    hour: HourRandomizer,
    minute: MinuteRandomizer,
    second: SecondRandomizer,
}

impl TimeRandomizer {
    /// Time randomizer seeded when `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            hour: HourRandomizer::from_seed(derive_optional_seed(seed, "hour")),
            minute: MinuteRandomizer::from_seed(derive_optional_seed(seed, "minute")),
            second: SecondRandomizer::from_seed(derive_optional_seed(seed, "second")),
        }
    }
}

impl Randomizer for TimeRandomizer {
    type Output = NaiveTime;

    fn next_value(&mut self) -> NaiveTime {
        let hour = self.hour.next_value() as u32;
        let minute = self.minute.next_value() as u32;
        let second = self.second.next_value() as u32;
        NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default()
    }
}

/// UTC timestamps with whole-second resolution within a range.
pub struct DateTimeRandomizer {
    start: DateTime<Utc>,
    seconds: RangeRandomizer<i64>,
}

impl DateTimeRandomizer {
    /// Timestamps in `[start, end]`.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        seed: Option<u64>,
    ) -> Result<Self, ConstructionError> {
        let start_ts = start.timestamp();
        let end_ts = end.timestamp();
        Ok(Self {
            start,
            seconds: RangeRandomizer::from_seed(start_ts, end_ts, seed)?,
        })
    }

    /// Timestamps from the first second of `range.start` to the last second
    /// of `range.end`.
    pub fn for_range(range: DateRange, seed: Option<u64>) -> Result<Self, ConstructionError> {
        let start = range.start.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        let end = range.end.and_hms_opt(23, 59, 59).map(|dt| dt.and_utc());
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end, seed),
            _ => Err(ConstructionError::invalid_config(format!(
                "date range {} to {} is not representable",
                range.start, range.end
            ))),
        }
    }

    /// Timestamps between two textual bounds (RFC 3339 or `YYYY-MM-DD`).
    pub fn parse(start: &str, end: &str, seed: Option<u64>) -> Result<Self, ConstructionError> {
        let start_dt = parse_timestamp(start).ok_or_else(|| {
            ConstructionError::invalid_config(format!("unparseable timestamp '{start}'"))
        })?;
        let end_dt = parse_timestamp(end).ok_or_else(|| {
            ConstructionError::invalid_config(format!("unparseable timestamp '{end}'"))
        })?;
        Self::new(start_dt, end_dt, seed)
    }
}

impl Randomizer for DateTimeRandomizer {
    type Output = DateTime<Utc>;

    fn next_value(&mut self) -> DateTime<Utc> {
        let ts = self.seconds.next_value();
        DateTime::from_timestamp(ts, 0).unwrap_or(self.start)
    }
}

/// Parse a timestamp string in various formats.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common date-only format
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Durations with whole-second resolution.
pub struct DurationRandomizer {
    seconds: RangeRandomizer<u64>,
}

impl DurationRandomizer {
    /// Longest duration produced by default: one day.
    pub const DEFAULT_MAX_SECS: u64 = 86_400;

    /// Durations in `[min_secs, max_secs]` seconds.
    pub fn new(min_secs: u64, max_secs: u64, seed: Option<u64>) -> Result<Self, ConstructionError> {
        Ok(Self {
            seconds: RangeRandomizer::from_seed(min_secs, max_secs, seed)?,
        })
    }

    /// Durations up to one day.
    pub fn up_to_a_day(seed: Option<u64>) -> Self {
        Self {
            seconds: RangeRandomizer::bounded(0, Self::DEFAULT_MAX_SECS, seed),
        }
    }
}

impl Randomizer for DurationRandomizer {
    type Output = Duration;

    fn next_value(&mut self) -> Duration {
        Duration::from_secs(self.seconds.next_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixture seed shared by the golden-value tests.
    const SEED: u64 = 8;

    #[test]
    fn test_day_value_within_range() {
        let mut randomizer = DayRandomizer::new();
        let value = randomizer.next_value();
        assert!((MIN_DAY..=MAX_DAY).contains(&value));
    }

    #[test]
    fn test_day_same_seed_same_value() {
        for seed in [0, 1, SEED, 123, u64::MAX] {
            let mut first = DayRandomizer::with_seed(seed);
            let mut second = DayRandomizer::with_seed(seed);
            assert_eq!(first.next_value(), second.next_value());
        }
    }

    #[test]
    fn test_day_same_seed_same_sequence() {
        let mut first = DayRandomizer::with_seed(SEED);
        let mut second = DayRandomizer::with_seed(SEED);
        let a: Vec<i32> = (0..20).map(|_| first.next_value()).collect();
        let b: Vec<i32> = (0..20).map(|_| second.next_value()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_day_golden_value() {
        let mut randomizer = DayRandomizer::with_seed(SEED);
        assert_eq!(randomizer.next_value(), 20);
    }

    #[test]
    fn test_day_unseeded_always_in_range() {
        for _ in 0..10_000 {
            let value = DayRandomizer::new().next_value();
            assert!((MIN_DAY..=MAX_DAY).contains(&value), "day {value} out of range");
        }
    }

    #[test]
    fn test_day_seeded_draws_in_range() {
        let mut randomizer = DayRandomizer::with_seed(SEED);
        for _ in 0..10_000 {
            let value = randomizer.next_value();
            assert!((MIN_DAY..=MAX_DAY).contains(&value));
        }
    }

    #[test]
    fn test_sibling_bounds() {
        let mut month = MonthRandomizer::with_seed(SEED);
        let mut year = YearRandomizer::with_seed(SEED);
        let mut hour = HourRandomizer::with_seed(SEED);
        let mut minute = MinuteRandomizer::with_seed(SEED);
        let mut second = SecondRandomizer::with_seed(SEED);

        for _ in 0..1000 {
            assert!((MIN_MONTH..=MAX_MONTH).contains(&month.next_value()));
            assert!((MIN_YEAR..=MAX_YEAR).contains(&year.next_value()));
            assert!((MIN_HOUR..=MAX_HOUR).contains(&hour.next_value()));
            assert!((MIN_MINUTE..=MAX_MINUTE).contains(&minute.next_value()));
            assert!((MIN_SECOND..=MAX_SECOND).contains(&second.next_value()));
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn test_date_within_range() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2020, 3, 15).unwrap(),
            NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
        );
        let mut randomizer = DateRandomizer::new(range, Some(SEED)).unwrap();

        for _ in 0..1000 {
            let date = randomizer.next_value();
            assert!(date >= range.start && date <= range.end, "{date} out of range");
        }
    }

    #[test]
    fn test_date_deterministic() {
        let range = DateRange::default();
        let mut first = DateRandomizer::new(range, Some(SEED)).unwrap();
        let mut second = DateRandomizer::new(range, Some(SEED)).unwrap();
        assert_eq!(first.next_value(), second.next_value());
    }

    #[test]
    fn test_date_inverted_range_rejected() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        );
        assert!(DateRandomizer::new(range, None).is_err());
    }

    #[test]
    fn test_time_deterministic() {
        let mut first = TimeRandomizer::new(Some(SEED));
        let mut second = TimeRandomizer::new(Some(SEED));
        assert_eq!(first.next_value(), second.next_value());
    }

    #[test]
    fn test_timestamp_range() {
        let mut randomizer =
            DateTimeRandomizer::parse("2020-01-01T00:00:00Z", "2024-12-31T23:59:59Z", Some(SEED))
                .unwrap();

        for _ in 0..100 {
            let dt = randomizer.next_value();
            assert!(dt.year() >= 2020 && dt.year() <= 2024);
        }
    }

    #[test]
    fn test_timestamp_with_dates_only() {
        let mut randomizer = DateTimeRandomizer::parse("2020-01-01", "2024-12-31", Some(SEED)).unwrap();
        let dt = randomizer.next_value();
        assert!(dt.year() >= 2020 && dt.year() <= 2024);
    }

    #[test]
    fn test_timestamp_unparseable() {
        let result = DateTimeRandomizer::parse("yesterday", "2024-12-31", None);
        assert!(matches!(result, Err(ConstructionError::InvalidConfig(_))));
    }

    #[test]
    fn test_timestamp_for_range_covers_last_day() {
        let day = NaiveDate::from_ymd_opt(2022, 5, 5).unwrap();
        let mut randomizer = DateTimeRandomizer::for_range(DateRange::new(day, day), Some(SEED)).unwrap();
        for _ in 0..100 {
            assert_eq!(randomizer.next_value().date_naive(), day);
        }
    }

    #[test]
    fn test_duration_bounds() {
        let mut randomizer = DurationRandomizer::new(10, 20, Some(SEED)).unwrap();
        for _ in 0..100 {
            let secs = randomizer.next_value().as_secs();
            assert!((10..=20).contains(&secs));
        }
        assert!(DurationRandomizer::new(20, 10, None).is_err());
    }
}
