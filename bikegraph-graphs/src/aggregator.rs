//! Aggregation pipeline turning filtered rental records into report data
//!
//! Every report is the same shape: group the filtered records by a derived
//! key, reduce each group (sum, mean, or the full distribution), and where a
//! fixed key domain exists, reindex the result over it so absent keys appear
//! with value zero. An empty selection stays empty; it is never zero-filled
//! into a fake all-zeros report.

use crate::selection::{filter_records, FilterCriteria};
use bikegraph_common::{
    DailyRecord, DayType, HourlyRecord, RentalRecord, Season, WeatherCondition,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Group rental counts by a derived key, keys held in ascending order
///
/// Deterministic for identical input; the source slice is left untouched and
/// an empty input produces an empty mapping.
pub fn group_counts<R, K, F>(records: &[R], key_fn: F) -> BTreeMap<K, Vec<u32>>
where
    R: RentalRecord,
    K: Ord,
    F: Fn(&R) -> K,
{
    let mut groups: BTreeMap<K, Vec<u32>> = BTreeMap::new();
    for record in records {
        groups.entry(key_fn(record)).or_default().push(record.count());
    }
    groups
}

/// Mean of a group of counts; an empty group has no mean
pub fn mean(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| f64::from(*v)).sum::<f64>() / values.len() as f64)
}

/// Sum of a group of counts
pub fn sum(values: &[u32]) -> u64 {
    values.iter().map(|v| u64::from(*v)).sum()
}

/// Trait for aggregating records into report data points
pub trait DataAggregator<R: RentalRecord, T> {
    /// Process filtered records and return aggregated data points
    fn aggregate(&self, records: &[R]) -> Vec<T>;
}

/// Data point of the daily rental trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: u64,
}

/// Aggregator for the daily rental trend (sum of counts per date)
#[derive(Debug, Default)]
pub struct DailyTrendAggregator;

impl DataAggregator<DailyRecord, TrendPoint> for DailyTrendAggregator {
    fn aggregate(&self, records: &[DailyRecord]) -> Vec<TrendPoint> {
        let result: Vec<TrendPoint> = group_counts(records, |record: &DailyRecord| record.date)
            .into_iter()
            .map(|(date, counts)| TrendPoint {
                date,
                total: sum(&counts),
            })
            .collect();

        debug!("Aggregated {} daily trend data points", result.len());
        result
    }
}

/// Data point of the working-day versus weekend comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTypePoint {
    pub day_type: DayType,
    pub mean: f64,
}

/// Aggregator for mean rentals per day type
#[derive(Debug, Default)]
pub struct DayTypeAggregator;

impl DataAggregator<DailyRecord, DayTypePoint> for DayTypeAggregator {
    fn aggregate(&self, records: &[DailyRecord]) -> Vec<DayTypePoint> {
        let result: Vec<DayTypePoint> =
            group_counts(records, |record: &DailyRecord| DayType::from_flag(record.working_day))
                .into_iter()
                .filter_map(|(day_type, counts)| {
                    mean(&counts).map(|mean| DayTypePoint { day_type, mean })
                })
                .collect();

        debug!("Aggregated {} day type data points", result.len());
        result
    }
}

/// Per-season distribution of daily rental counts, for box-plot summaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonDistribution {
    pub season: Season,
    pub counts: Vec<u32>,
}

/// Aggregator keeping the full per-record distribution for each season
#[derive(Debug, Default)]
pub struct SeasonalDistributionAggregator;

impl DataAggregator<DailyRecord, SeasonDistribution> for SeasonalDistributionAggregator {
    fn aggregate(&self, records: &[DailyRecord]) -> Vec<SeasonDistribution> {
        let result: Vec<SeasonDistribution> =
            group_counts(records, |record: &DailyRecord| record.season)
                .into_iter()
                .map(|(season, counts)| SeasonDistribution { season, counts })
                .collect();

        debug!("Aggregated {} season distributions", result.len());
        result
    }
}

/// Data point of the weather-impact comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherImpactPoint {
    pub weather: WeatherCondition,
    pub mean: f64,
}

/// Aggregator for mean rentals per weather condition, in fixed category order
#[derive(Debug, Default)]
pub struct WeatherImpactAggregator;

impl DataAggregator<DailyRecord, WeatherImpactPoint> for WeatherImpactAggregator {
    fn aggregate(&self, records: &[DailyRecord]) -> Vec<WeatherImpactPoint> {
        // BTreeMap iteration follows the enum ordering, which is code order
        let result: Vec<WeatherImpactPoint> =
            group_counts(records, |record: &DailyRecord| record.weather)
                .into_iter()
                .filter_map(|(weather, counts)| {
                    mean(&counts).map(|mean| WeatherImpactPoint { weather, mean })
                })
                .collect();

        debug!("Aggregated {} weather impact data points", result.len());
        result
    }
}

/// Temporal granularities of the peak-time analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeGranularity {
    HourOfDay,
    DayOfWeek,
    WeekOfMonth,
    MonthOfYear,
    Year,
}

impl TimeGranularity {
    /// All granularities of the peak-time analysis
    pub const ALL: [TimeGranularity; 5] = [
        TimeGranularity::HourOfDay,
        TimeGranularity::DayOfWeek,
        TimeGranularity::WeekOfMonth,
        TimeGranularity::MonthOfYear,
        TimeGranularity::Year,
    ];

    /// Fixed key domain this granularity is reindexed over, if one exists
    pub fn domain(&self) -> Option<std::ops::RangeInclusive<u32>> {
        match self {
            TimeGranularity::HourOfDay => Some(0..=23),
            TimeGranularity::DayOfWeek => Some(0..=6),
            TimeGranularity::WeekOfMonth => Some(1..=5),
            TimeGranularity::MonthOfYear => Some(1..=12),
            TimeGranularity::Year => None,
        }
    }

    /// Extract the bucket key of a record under this granularity
    pub fn bucket(&self, record: &HourlyRecord) -> u32 {
        match self {
            TimeGranularity::HourOfDay => u32::from(record.hour),
            TimeGranularity::DayOfWeek => record.date.weekday().num_days_from_monday(),
            TimeGranularity::WeekOfMonth => (record.date.day() - 1) / 7 + 1,
            TimeGranularity::MonthOfYear => record.date.month(),
            TimeGranularity::Year => record.date.year() as u32,
        }
    }

    /// Axis label of this granularity
    pub fn axis_label(&self) -> &'static str {
        match self {
            TimeGranularity::HourOfDay => "Jam",
            TimeGranularity::DayOfWeek => "Hari",
            TimeGranularity::WeekOfMonth => "Minggu dalam Bulan",
            TimeGranularity::MonthOfYear => "Bulan",
            TimeGranularity::Year => "Tahun",
        }
    }

    /// File-name fragment of this granularity
    pub fn slug(&self) -> &'static str {
        match self {
            TimeGranularity::HourOfDay => "jam",
            TimeGranularity::DayOfWeek => "hari",
            TimeGranularity::WeekOfMonth => "minggu",
            TimeGranularity::MonthOfYear => "bulan",
            TimeGranularity::Year => "tahun",
        }
    }

    /// Display label of one bucket under this granularity
    pub fn bucket_label(&self, bucket: u32) -> String {
        match self {
            TimeGranularity::HourOfDay => format!("{:02}:00", bucket),
            TimeGranularity::DayOfWeek => match bucket {
                0 => "Senin".to_string(),
                1 => "Selasa".to_string(),
                2 => "Rabu".to_string(),
                3 => "Kamis".to_string(),
                4 => "Jumat".to_string(),
                5 => "Sabtu".to_string(),
                6 => "Minggu".to_string(),
                _ => String::new(),
            },
            TimeGranularity::WeekOfMonth => format!("Minggu {}", bucket),
            TimeGranularity::MonthOfYear => match bucket {
                1 => "Jan".to_string(),
                2 => "Feb".to_string(),
                3 => "Mar".to_string(),
                4 => "Apr".to_string(),
                5 => "Mei".to_string(),
                6 => "Jun".to_string(),
                7 => "Jul".to_string(),
                8 => "Agu".to_string(),
                9 => "Sep".to_string(),
                10 => "Okt".to_string(),
                11 => "Nov".to_string(),
                12 => "Des".to_string(),
                _ => String::new(),
            },
            TimeGranularity::Year => bucket.to_string(),
        }
    }
}

/// Data point of a peak-time sub-report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucketPoint {
    pub bucket: u32,
    pub mean: f64,
}

/// Aggregator for mean rentals per time bucket of one granularity
#[derive(Debug)]
pub struct PeakTimeAggregator {
    pub granularity: TimeGranularity,
}

impl PeakTimeAggregator {
    pub fn new(granularity: TimeGranularity) -> Self {
        Self { granularity }
    }
}

impl DataAggregator<HourlyRecord, TimeBucketPoint> for PeakTimeAggregator {
    fn aggregate(&self, records: &[HourlyRecord]) -> Vec<TimeBucketPoint> {
        if records.is_empty() {
            return Vec::new();
        }

        let mut means: BTreeMap<u32, f64> =
            group_counts(records, |record| self.granularity.bucket(record))
                .into_iter()
                .filter_map(|(bucket, counts)| mean(&counts).map(|mean| (bucket, mean)))
                .collect();

        // Left-join against the fixed domain so gaps chart as zero
        if let Some(domain) = self.granularity.domain() {
            for bucket in domain {
                means.entry(bucket).or_insert(0.0);
            }
        }

        let result: Vec<TimeBucketPoint> = means
            .into_iter()
            .map(|(bucket, mean)| TimeBucketPoint { bucket, mean })
            .collect();

        debug!(
            "Aggregated {} time bucket data points ({:?})",
            result.len(),
            self.granularity
        );
        result
    }
}

/// Arg-max over time buckets; ties resolve to the earliest bucket
pub fn peak_bucket(points: &[TimeBucketPoint]) -> Option<&TimeBucketPoint> {
    points
        .iter()
        .reduce(|best, point| if point.mean > best.mean { point } else { best })
}

/// Report entry points: filter, aggregate, and surface empty selections
///
/// Every report returns `None` when the filtered selection holds no records;
/// callers substitute their own "no data" presentation.
pub struct ReportManager;

impl ReportManager {
    /// Daily trend: total rentals per date in the selection
    pub fn daily_trend(
        records: &[DailyRecord],
        criteria: &FilterCriteria,
    ) -> Option<Vec<TrendPoint>> {
        let filtered = filter_records(records, criteria);
        if filtered.is_empty() {
            return None;
        }
        Some(DailyTrendAggregator.aggregate(&filtered))
    }

    /// Mean rentals on working days versus weekends
    pub fn day_type_comparison(
        records: &[DailyRecord],
        criteria: &FilterCriteria,
    ) -> Option<Vec<DayTypePoint>> {
        let filtered = filter_records(records, criteria);
        if filtered.is_empty() {
            return None;
        }
        Some(DayTypeAggregator.aggregate(&filtered))
    }

    /// Full rental-count distribution per season
    pub fn seasonal_distribution(
        records: &[DailyRecord],
        criteria: &FilterCriteria,
    ) -> Option<Vec<SeasonDistribution>> {
        let filtered = filter_records(records, criteria);
        if filtered.is_empty() {
            return None;
        }
        Some(SeasonalDistributionAggregator.aggregate(&filtered))
    }

    /// Mean rentals per weather condition over the date range
    ///
    /// The weather predicate is deliberately not applied here; the chart
    /// compares the conditions against each other.
    pub fn weather_impact(
        records: &[DailyRecord],
        criteria: &FilterCriteria,
    ) -> Option<Vec<WeatherImpactPoint>> {
        let filtered = filter_records(records, &criteria.without_weather());
        if filtered.is_empty() {
            return None;
        }
        Some(WeatherImpactAggregator.aggregate(&filtered))
    }

    /// Mean rentals per time bucket of the given granularity
    pub fn peak_time(
        records: &[HourlyRecord],
        criteria: &FilterCriteria,
        granularity: TimeGranularity,
    ) -> Option<Vec<TimeBucketPoint>> {
        let filtered = filter_records(records, criteria);
        if filtered.is_empty() {
            return None;
        }
        Some(PeakTimeAggregator::new(granularity).aggregate(&filtered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikegraph_common::DateRange;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(
        d: NaiveDate,
        season: Season,
        weather: WeatherCondition,
        working_day: bool,
        count: u32,
    ) -> DailyRecord {
        DailyRecord {
            date: d,
            season,
            weather,
            working_day,
            count,
        }
    }

    fn hourly(d: NaiveDate, hour: u8, count: u32) -> HourlyRecord {
        HourlyRecord {
            date: d,
            hour,
            season: Season::Spring,
            weather: WeatherCondition::Clear,
            working_day: true,
            count,
        }
    }

    fn criteria(start: NaiveDate, end: NaiveDate) -> FilterCriteria {
        FilterCriteria::new(DateRange::new(start, end))
    }

    #[test]
    fn test_group_counts_empty_input() {
        let records: Vec<DailyRecord> = Vec::new();
        let groups = group_counts(&records, |r: &DailyRecord| r.date);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_mean_is_guarded() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[10]), Some(10.0));
        assert_eq!(mean(&[5, 50, 10]), Some(65.0 / 3.0));
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(&[]), 0);
        assert_eq!(sum(&[1, 2, 3]), 6);
    }

    #[test]
    fn test_daily_trend_sums_per_date() {
        let records = vec![
            daily(date(2011, 1, 2), Season::Spring, WeatherCondition::Clear, true, 30),
            daily(date(2011, 1, 1), Season::Spring, WeatherCondition::Clear, true, 100),
            daily(date(2011, 1, 2), Season::Spring, WeatherCondition::Cloudy, true, 20),
        ];

        let points = DailyTrendAggregator.aggregate(&records);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, date(2011, 1, 1));
        assert_eq!(points[0].total, 100);
        assert_eq!(points[1].date, date(2011, 1, 2));
        assert_eq!(points[1].total, 50);
    }

    #[test]
    fn test_single_working_day_scenario() {
        // One record, 2011-01-01, weathersit=1, workingday=1, cnt=100
        let records = vec![daily(
            date(2011, 1, 1),
            Season::Spring,
            WeatherCondition::Clear,
            true,
            100,
        )];
        let criteria =
            criteria(date(2011, 1, 1), date(2011, 1, 1)).with_weather(WeatherCondition::Clear);

        let filtered = filter_records(&records, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0], records[0]);

        let points = ReportManager::day_type_comparison(&records, &criteria).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].day_type, DayType::WorkingDay);
        assert_eq!(points[0].mean, 100.0);
    }

    #[test]
    fn test_day_type_means() {
        let records = vec![
            daily(date(2011, 1, 3), Season::Spring, WeatherCondition::Clear, true, 100),
            daily(date(2011, 1, 4), Season::Spring, WeatherCondition::Clear, true, 200),
            daily(date(2011, 1, 1), Season::Spring, WeatherCondition::Clear, false, 60),
        ];

        let points = DayTypeAggregator.aggregate(&records);
        assert_eq!(points.len(), 2);

        let working = points
            .iter()
            .find(|p| p.day_type == DayType::WorkingDay)
            .unwrap();
        let weekend = points
            .iter()
            .find(|p| p.day_type == DayType::Weekend)
            .unwrap();
        assert_eq!(working.mean, 150.0);
        assert_eq!(weekend.mean, 60.0);
    }

    #[test]
    fn test_seasonal_distribution_keeps_all_values() {
        let records = vec![
            daily(date(2011, 1, 1), Season::Spring, WeatherCondition::Clear, true, 10),
            daily(date(2011, 1, 2), Season::Spring, WeatherCondition::Clear, true, 30),
            daily(date(2011, 7, 1), Season::Fall, WeatherCondition::Clear, true, 90),
        ];

        let distributions = SeasonalDistributionAggregator.aggregate(&records);
        assert_eq!(distributions.len(), 2);
        assert_eq!(distributions[0].season, Season::Spring);
        assert_eq!(distributions[0].counts, vec![10, 30]);
        assert_eq!(distributions[1].season, Season::Fall);
        assert_eq!(distributions[1].counts, vec![90]);
    }

    #[test]
    fn test_weather_impact_fixed_order() {
        let records = vec![
            daily(date(2011, 1, 1), Season::Spring, WeatherCondition::LightRain, true, 40),
            daily(date(2011, 1, 2), Season::Spring, WeatherCondition::Clear, true, 100),
            daily(date(2011, 1, 3), Season::Spring, WeatherCondition::Cloudy, true, 80),
            daily(date(2011, 1, 4), Season::Spring, WeatherCondition::Clear, true, 120),
        ];

        let points = WeatherImpactAggregator.aggregate(&records);
        let order: Vec<WeatherCondition> = points.iter().map(|p| p.weather).collect();
        assert_eq!(
            order,
            vec![
                WeatherCondition::Clear,
                WeatherCondition::Cloudy,
                WeatherCondition::LightRain,
            ]
        );
        assert_eq!(points[0].mean, 110.0);
    }

    #[test]
    fn test_weather_impact_ignores_weather_predicate() {
        let records = vec![
            daily(date(2011, 1, 1), Season::Spring, WeatherCondition::Clear, true, 100),
            daily(date(2011, 1, 2), Season::Spring, WeatherCondition::Cloudy, true, 80),
        ];
        let criteria =
            criteria(date(2011, 1, 1), date(2011, 1, 2)).with_weather(WeatherCondition::Clear);

        let points = ReportManager::weather_impact(&records, &criteria).unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_peak_hour_scenario() {
        // Hours 0, 1, 2 with counts 5, 50, 10 on one date
        let d = date(2011, 1, 1);
        let records = vec![hourly(d, 0, 5), hourly(d, 1, 50), hourly(d, 2, 10)];

        let points = PeakTimeAggregator::new(TimeGranularity::HourOfDay).aggregate(&records);
        let peak = peak_bucket(&points).unwrap();
        assert_eq!(peak.bucket, 1);
        assert_eq!(peak.mean, 50.0);
    }

    #[test]
    fn test_hour_domain_zero_filled() {
        let records = vec![hourly(date(2011, 1, 1), 8, 40)];
        let points = PeakTimeAggregator::new(TimeGranularity::HourOfDay).aggregate(&records);

        assert_eq!(points.len(), 24);
        assert_eq!(points[8].mean, 40.0);
        assert_eq!(points[0].mean, 0.0);
        assert_eq!(points[23].mean, 0.0);
    }

    #[test]
    fn test_day_of_week_domain_zero_filled() {
        // 2011-01-01 is a Saturday, bucket 5 under Monday-first indexing
        let records = vec![hourly(date(2011, 1, 1), 10, 25)];
        let points = PeakTimeAggregator::new(TimeGranularity::DayOfWeek).aggregate(&records);

        assert_eq!(points.len(), 7);
        let buckets: Vec<u32> = points.iter().map(|p| p.bucket).collect();
        assert_eq!(buckets, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(points[5].mean, 25.0);
        assert_eq!(points[0].mean, 0.0);
    }

    #[test]
    fn test_month_domain_zero_filled() {
        let records = vec![hourly(date(2011, 6, 15), 10, 30)];
        let points = PeakTimeAggregator::new(TimeGranularity::MonthOfYear).aggregate(&records);

        assert_eq!(points.len(), 12);
        assert_eq!(points[5].bucket, 6);
        assert_eq!(points[5].mean, 30.0);
    }

    #[test]
    fn test_week_of_month_domain_zero_filled() {
        let records = vec![
            hourly(date(2011, 1, 1), 10, 10), // day 1, week 1
            hourly(date(2011, 1, 31), 10, 50), // day 31, week 5
        ];
        let points = PeakTimeAggregator::new(TimeGranularity::WeekOfMonth).aggregate(&records);

        assert_eq!(points.len(), 5);
        assert_eq!(points[0].mean, 10.0);
        assert_eq!(points[4].mean, 50.0);
        assert_eq!(points[1].mean, 0.0);
    }

    #[test]
    fn test_year_has_no_fixed_domain() {
        let records = vec![
            hourly(date(2011, 1, 1), 10, 10),
            hourly(date(2012, 1, 1), 10, 30),
        ];
        let points = PeakTimeAggregator::new(TimeGranularity::Year).aggregate(&records);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].bucket, 2011);
        assert_eq!(points[1].bucket, 2012);
    }

    #[test]
    fn test_empty_input_stays_empty() {
        let records: Vec<HourlyRecord> = Vec::new();
        for granularity in TimeGranularity::ALL {
            let points = PeakTimeAggregator::new(granularity).aggregate(&records);
            assert!(points.is_empty());
        }
        assert!(peak_bucket(&[]).is_none());
    }

    #[test]
    fn test_peak_bucket_tie_resolves_to_earliest() {
        let points = vec![
            TimeBucketPoint { bucket: 3, mean: 7.0 },
            TimeBucketPoint { bucket: 9, mean: 7.0 },
        ];
        assert_eq!(peak_bucket(&points).unwrap().bucket, 3);
    }

    #[test]
    fn test_reports_signal_no_data() {
        let daily_records = vec![daily(
            date(2011, 1, 1),
            Season::Spring,
            WeatherCondition::Clear,
            true,
            100,
        )];
        let hourly_records = vec![hourly(date(2011, 1, 1), 10, 25)];
        let no_match =
            criteria(date(2011, 1, 1), date(2011, 1, 1)).with_weather(WeatherCondition::HeavyRain);

        assert!(ReportManager::daily_trend(&daily_records, &no_match).is_none());
        assert!(ReportManager::day_type_comparison(&daily_records, &no_match).is_none());
        assert!(ReportManager::seasonal_distribution(&daily_records, &no_match).is_none());
        assert!(ReportManager::peak_time(
            &hourly_records,
            &no_match,
            TimeGranularity::HourOfDay
        )
        .is_none());

        // Weather impact only sees the date range; an out-of-range one is empty
        let out_of_range = criteria(date(2015, 1, 1), date(2015, 12, 31));
        assert!(ReportManager::weather_impact(&daily_records, &out_of_range).is_none());
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(TimeGranularity::HourOfDay.bucket_label(7), "07:00");
        assert_eq!(TimeGranularity::DayOfWeek.bucket_label(0), "Senin");
        assert_eq!(TimeGranularity::DayOfWeek.bucket_label(6), "Minggu");
        assert_eq!(TimeGranularity::MonthOfYear.bucket_label(5), "Mei");
        assert_eq!(TimeGranularity::WeekOfMonth.bucket_label(2), "Minggu 2");
        assert_eq!(TimeGranularity::Year.bucket_label(2011), "2011");
    }
}
