//! Domain types for the bicycle-rental dataset

use crate::error::{BikeGraphError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Season categories as coded in the source dataset (1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// All seasons in source code order
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Map a numeric season code to the enum, rejecting codes outside 1-4
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Season::Spring),
            2 => Ok(Season::Summer),
            3 => Ok(Season::Fall),
            4 => Ok(Season::Winter),
            other => Err(BikeGraphError::dataset(format!(
                "unknown season code: {}",
                other
            ))),
        }
    }

    /// The numeric code this season carries in the source dataset
    pub fn code(&self) -> u8 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
            Season::Winter => 4,
        }
    }

    /// Display label used across charts and summaries
    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Musim Semi",
            Season::Summer => "Musim Panas",
            Season::Fall => "Musim Gugur",
            Season::Winter => "Musim Dingin",
        }
    }
}

/// Weather situation categories as coded in the source dataset (1-4)
///
/// The ordering of the variants follows the source code order, which is also
/// the fixed category order used by the weather-impact chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    LightRain,
    HeavyRain,
}

impl WeatherCondition {
    /// All conditions in fixed category order
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Clear,
        WeatherCondition::Cloudy,
        WeatherCondition::LightRain,
        WeatherCondition::HeavyRain,
    ];

    /// Map a numeric weathersit code to the enum, rejecting codes outside 1-4
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(WeatherCondition::Clear),
            2 => Ok(WeatherCondition::Cloudy),
            3 => Ok(WeatherCondition::LightRain),
            4 => Ok(WeatherCondition::HeavyRain),
            other => Err(BikeGraphError::dataset(format!(
                "unknown weathersit code: {}",
                other
            ))),
        }
    }

    /// Look up a condition by its display label
    pub fn from_label(label: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|condition| condition.label() == label)
            .ok_or_else(|| {
                BikeGraphError::validation_field(
                    format!("unknown weather label: {}", label),
                    "weather",
                )
            })
    }

    /// The numeric code this condition carries in the source dataset
    pub fn code(&self) -> u8 {
        match self {
            WeatherCondition::Clear => 1,
            WeatherCondition::Cloudy => 2,
            WeatherCondition::LightRain => 3,
            WeatherCondition::HeavyRain => 4,
        }
    }

    /// Display label used across charts and summaries
    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Cerah",
            WeatherCondition::Cloudy => "Berawan",
            WeatherCondition::LightRain => "Hujan ringan",
            WeatherCondition::HeavyRain => "Hujan lebat",
        }
    }
}

/// Working-day versus weekend classification of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayType {
    WorkingDay,
    Weekend,
}

impl DayType {
    /// Classify from the dataset's workingday flag
    pub fn from_flag(working_day: bool) -> Self {
        if working_day {
            DayType::WorkingDay
        } else {
            DayType::Weekend
        }
    }

    /// Display label used across charts and summaries
    pub fn label(&self) -> &'static str {
        match self {
            DayType::WorkingDay => "Hari Kerja",
            DayType::Weekend => "Akhir Pekan",
        }
    }
}

/// One row of the daily rental dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub season: Season,
    pub weather: WeatherCondition,
    pub working_day: bool,
    pub count: u32,
}

/// One row of the hourly rental dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    pub hour: u8,
    pub season: Season,
    pub weather: WeatherCondition,
    pub working_day: bool,
    pub count: u32,
}

/// Common view over daily and hourly records used by filtering and grouping
pub trait RentalRecord {
    /// Calendar date of the record
    fn date(&self) -> NaiveDate;

    /// Weather condition of the record
    fn weather(&self) -> WeatherCondition;

    /// Rental count of the record
    fn count(&self) -> u32;
}

impl RentalRecord for DailyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn weather(&self) -> WeatherCondition {
        self.weather
    }

    fn count(&self) -> u32 {
        self.count
    }
}

impl RentalRecord for HourlyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn weather(&self) -> WeatherCondition {
        self.weather
    }

    fn count(&self) -> u32 {
        self.count
    }
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether the range contains no dates (start after end)
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Whether the given date falls inside the range, bounds included
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Intersect this range with an enclosing span, keeping bounds inside it
    pub fn clamp_to(&self, span: &DateRange) -> DateRange {
        DateRange {
            start: self.start.max(span.start),
            end: self.end.min(span.end),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
