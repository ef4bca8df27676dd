//! Filtering, aggregation, and chart generation for bikegraph

pub mod aggregator;
pub mod daily_trend;
pub mod day_type;
pub mod peak_time;
pub mod renderer;
pub mod seasonal;
pub mod selection;
pub mod types;
pub mod weather_impact;

// Re-export commonly used types
pub use aggregator::{
    group_counts, mean, peak_bucket, sum, DailyTrendAggregator, DataAggregator, DayTypeAggregator,
    DayTypePoint, PeakTimeAggregator, ReportManager, SeasonDistribution,
    SeasonalDistributionAggregator, TimeBucketPoint, TimeGranularity, TrendPoint,
    WeatherImpactAggregator, WeatherImpactPoint,
};
pub use daily_trend::DailyTrendChart;
pub use day_type::DayTypeChart;
pub use peak_time::PeakTimeChart;
pub use renderer::ChartRenderer;
pub use seasonal::SeasonalChart;
pub use selection::{filter_records, FilterCriteria};
pub use types::*;
pub use weather_impact::WeatherImpactChart;
