//! Selection criteria and record filtering
//!
//! Filtering applies the date range first and the weather predicate second,
//! always against the original collection. The result is an order-preserving
//! copy; an empty result is a valid outcome, not an error.

use bikegraph_common::{DateRange, RentalRecord, WeatherCondition};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The active filter portion of the user's criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive date range; an inverted range selects nothing
    pub date_range: DateRange,
    /// Optional weather predicate; `None` keeps every condition
    pub weather: Option<WeatherCondition>,
}

impl FilterCriteria {
    pub fn new(date_range: DateRange) -> Self {
        Self {
            date_range,
            weather: None,
        }
    }

    /// Restrict the selection to a single weather condition
    pub fn with_weather(mut self, weather: WeatherCondition) -> Self {
        self.weather = Some(weather);
        self
    }

    /// The same criteria with the weather predicate removed
    pub fn without_weather(&self) -> Self {
        Self {
            date_range: self.date_range,
            weather: None,
        }
    }

    /// Clamp the date range to the span of the loaded dataset
    pub fn clamped_to(&self, span: &DateRange) -> Self {
        Self {
            date_range: self.date_range.clamp_to(span),
            weather: self.weather,
        }
    }

    /// Whether a record satisfies the criteria (date range, then weather)
    pub fn matches<R: RentalRecord>(&self, record: &R) -> bool {
        self.date_range.contains(record.date())
            && self.weather.map_or(true, |weather| weather == record.weather())
    }
}

/// Select the records satisfying the criteria, preserving input order
pub fn filter_records<R: RentalRecord + Clone>(records: &[R], criteria: &FilterCriteria) -> Vec<R> {
    let filtered: Vec<R> = records
        .iter()
        .filter(|record| criteria.matches(*record))
        .cloned()
        .collect();
    debug!(
        "Filtered {} of {} records for range {}",
        filtered.len(),
        records.len(),
        criteria.date_range
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikegraph_common::{DailyRecord, Season};
    use chrono::NaiveDate;

    fn record(date: (i32, u32, u32), weather: WeatherCondition, count: u32) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            season: Season::Spring,
            weather,
            working_day: true,
            count,
        }
    }

    fn sample_records() -> Vec<DailyRecord> {
        vec![
            record((2011, 1, 1), WeatherCondition::Clear, 100),
            record((2011, 1, 2), WeatherCondition::Cloudy, 120),
            record((2011, 1, 3), WeatherCondition::Clear, 90),
            record((2011, 1, 4), WeatherCondition::LightRain, 40),
            record((2011, 2, 1), WeatherCondition::Clear, 150),
        ]
    }

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
    }

    #[test]
    fn test_filter_by_date_range_inclusive() {
        let records = sample_records();
        let criteria = FilterCriteria::new(range((2011, 1, 2), (2011, 1, 4)));
        let filtered = filter_records(&records, &criteria);

        assert_eq!(filtered.len(), 3);
        assert!(filtered
            .iter()
            .all(|r| criteria.date_range.contains(r.date)));
        // Order of the source collection is preserved
        assert_eq!(filtered[0].count, 120);
        assert_eq!(filtered[2].count, 40);
    }

    #[test]
    fn test_filter_with_weather_predicate() {
        let records = sample_records();
        let criteria = FilterCriteria::new(range((2011, 1, 1), (2011, 2, 1)))
            .with_weather(WeatherCondition::Clear);
        let filtered = filter_records(&records, &criteria);

        assert_eq!(filtered.len(), 3);
        assert!(filtered
            .iter()
            .all(|r| r.weather == WeatherCondition::Clear));
    }

    #[test]
    fn test_weather_predicate_narrows_monotonically() {
        let records = sample_records();
        let broad = FilterCriteria::new(range((2011, 1, 1), (2011, 2, 1)));
        let narrow = broad.with_weather(WeatherCondition::Cloudy);

        let all = filter_records(&records, &broad);
        let subset = filter_records(&records, &narrow);

        assert!(subset.len() <= all.len());
        for record in &subset {
            assert!(all.contains(record));
        }
    }

    #[test]
    fn test_inverted_range_selects_nothing() {
        let records = sample_records();
        let criteria = FilterCriteria::new(range((2011, 2, 1), (2011, 1, 1)));
        assert!(filter_records(&records, &criteria).is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let records = sample_records();
        let criteria = FilterCriteria::new(range((2011, 1, 1), (2011, 2, 1)))
            .with_weather(WeatherCondition::HeavyRain);
        assert!(filter_records(&records, &criteria).is_empty());
    }

    #[test]
    fn test_filtering_does_not_mutate_source() {
        let records = sample_records();
        let criteria = FilterCriteria::new(range((2011, 1, 1), (2011, 1, 1)));
        let _ = filter_records(&records, &criteria);
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].count, 100);
    }

    #[test]
    fn test_clamped_to_span() {
        let span = range((2011, 1, 1), (2011, 12, 31));
        let criteria = FilterCriteria::new(range((2010, 1, 1), (2012, 6, 1)))
            .with_weather(WeatherCondition::Clear)
            .clamped_to(&span);

        assert_eq!(criteria.date_range, span);
        assert_eq!(criteria.weather, Some(WeatherCondition::Clear));
    }

    #[test]
    fn test_without_weather() {
        let criteria = FilterCriteria::new(range((2011, 1, 1), (2011, 2, 1)))
            .with_weather(WeatherCondition::Clear);
        let relaxed = criteria.without_weather();
        assert!(relaxed.weather.is_none());
        assert_eq!(relaxed.date_range, criteria.date_range);
    }
}
