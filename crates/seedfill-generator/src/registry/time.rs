//! Registry for temporal field types.

use super::{GeneratorRegistry, Resolution};
use crate::generators::time::{
    DateRandomizer, DateTimeRandomizer, DurationRandomizer, TimeRandomizer,
};
use crate::randomizer::boxed;
use seedfill_core::{DateRange, FieldDescriptor, FieldType};

/// Resolves dates, times, date-times and durations.
#[derive(Debug, Clone, Default)]
pub struct TimeRegistry {
    date_range: DateRange,
}

impl TimeRegistry {
    /// Registry generating dates and date-times within `date_range`.
    pub fn new(date_range: DateRange) -> Self {
        Self { date_range }
    }
}

impl GeneratorRegistry for TimeRegistry {
    fn name(&self) -> &str {
        "time"
    }

    fn resolve(&self, field: &FieldDescriptor, seed: Option<u64>) -> Resolution {
        match field.field_type {
            FieldType::Date => Resolution::from_result(
                "date",
                DateRandomizer::new(self.date_range, seed).map(boxed),
            ),
            FieldType::Time => Resolution::Resolved(boxed(TimeRandomizer::new(seed))),
            FieldType::DateTime => Resolution::from_result(
                "date_time",
                DateTimeRandomizer::for_range(self.date_range, seed).map(boxed),
            ),
            FieldType::Duration => {
                Resolution::Resolved(boxed(DurationRandomizer::up_to_a_day(seed)))
            }
            _ => Resolution::NoMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomizer::Randomizer;
    use chrono::NaiveDate;
    use seedfill_core::GeneratedValue;

    fn resolve(registry: &TimeRegistry, field_type: FieldType) -> Resolution {
        let field = FieldDescriptor::new("event", "at", field_type);
        registry.resolve(&field, Some(42))
    }

    #[test]
    fn test_temporal_types_resolve() {
        let registry = TimeRegistry::default();
        for field_type in [
            FieldType::Date,
            FieldType::Time,
            FieldType::DateTime,
            FieldType::Duration,
        ] {
            assert!(resolve(&registry, field_type).is_resolved());
        }
        assert!(resolve(&registry, FieldType::Int32).is_no_match());
        assert!(resolve(&registry, FieldType::Text).is_no_match());
    }

    #[test]
    fn test_dates_stay_in_range() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let registry = TimeRegistry::new(DateRange::new(start, end));

        let Resolution::Resolved(mut randomizer) = resolve(&registry, FieldType::Date) else {
            panic!("Expected Resolved");
        };
        for _ in 0..200 {
            match randomizer.next_value() {
                GeneratedValue::Date(date) => assert!(date >= start && date <= end),
                other => panic!("Expected Date, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_date_times_stay_in_range() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let registry = TimeRegistry::new(DateRange::new(start, end));

        let Resolution::Resolved(mut randomizer) = resolve(&registry, FieldType::DateTime) else {
            panic!("Expected Resolved");
        };
        for _ in 0..100 {
            match randomizer.next_value() {
                GeneratedValue::DateTime(dt) => {
                    let date = dt.date_naive();
                    assert!(date >= start && date <= end);
                }
                other => panic!("Expected DateTime, got {other:?}"),
            }
        }
    }
}
