//! Rental dataset loading and the process-wide snapshot
//!
//! The two source CSV files (daily and hourly) are read once, converted into
//! domain records through the fails-closed categorical mappings, and held as
//! an immutable snapshot for the rest of the process lifetime.

use crate::error::{BikeGraphError, Result};
use crate::types::{DailyRecord, DateRange, HourlyRecord, Season, WeatherCondition};
use crate::utils::parse_iso_date;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Raw daily row as it appears in the source CSV; extra columns are ignored
#[derive(Debug, Deserialize)]
struct DailyRow {
    dteday: String,
    season: u8,
    weathersit: u8,
    workingday: u8,
    cnt: u32,
}

/// Raw hourly row as it appears in the source CSV; extra columns are ignored
#[derive(Debug, Deserialize)]
struct HourlyRow {
    dteday: String,
    season: u8,
    weathersit: u8,
    workingday: u8,
    hr: u8,
    cnt: u32,
}

fn working_day_from_flag(flag: u8) -> Result<bool> {
    match flag {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(BikeGraphError::dataset(format!(
            "unknown workingday flag: {}",
            other
        ))),
    }
}

impl DailyRow {
    fn into_record(self) -> Result<DailyRecord> {
        Ok(DailyRecord {
            date: parse_iso_date(&self.dteday)?,
            season: Season::from_code(self.season)?,
            weather: WeatherCondition::from_code(self.weathersit)?,
            working_day: working_day_from_flag(self.workingday)?,
            count: self.cnt,
        })
    }
}

impl HourlyRow {
    fn into_record(self) -> Result<HourlyRecord> {
        if self.hr > 23 {
            return Err(BikeGraphError::dataset(format!(
                "hour out of range: {}",
                self.hr
            )));
        }
        Ok(HourlyRecord {
            date: parse_iso_date(&self.dteday)?,
            hour: self.hr,
            season: Season::from_code(self.season)?,
            weather: WeatherCondition::from_code(self.weathersit)?,
            working_day: working_day_from_flag(self.workingday)?,
            count: self.cnt,
        })
    }
}

fn row_context(path: &Path, row_index: usize, err: BikeGraphError) -> BikeGraphError {
    // Header occupies line 1, so data row N sits on line N + 1
    BikeGraphError::dataset_with_source(
        format!("{}: row {}", path.display(), row_index + 2),
        err,
    )
}

/// Load the daily records from a CSV file
pub fn load_daily_records(path: &Path) -> Result<Vec<DailyRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<DailyRow>().enumerate() {
        let row = row.map_err(|e| row_context(path, index, e.into()))?;
        let record = row.into_record().map_err(|e| row_context(path, index, e))?;
        records.push(record);
    }
    debug!("Loaded {} daily records from {}", records.len(), path.display());
    Ok(records)
}

/// Load the hourly records from a CSV file
pub fn load_hourly_records(path: &Path) -> Result<Vec<HourlyRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<HourlyRow>().enumerate() {
        let row = row.map_err(|e| row_context(path, index, e.into()))?;
        let record = row.into_record().map_err(|e| row_context(path, index, e))?;
        records.push(record);
    }
    debug!(
        "Loaded {} hourly records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// The loaded rental dataset, read-only for the process lifetime
#[derive(Debug, Clone)]
pub struct RentalDataset {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

impl RentalDataset {
    /// Load both source files into a dataset
    pub fn load(day_csv: &Path, hour_csv: &Path) -> Result<Self> {
        let daily = load_daily_records(day_csv)?;
        let hourly = load_hourly_records(hour_csv)?;
        info!(
            "Dataset loaded: {} daily records, {} hourly records",
            daily.len(),
            hourly.len()
        );
        Ok(Self { daily, hourly })
    }

    /// Build a dataset from in-memory records
    pub fn from_records(daily: Vec<DailyRecord>, hourly: Vec<HourlyRecord>) -> Self {
        Self { daily, hourly }
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.hourly.is_empty()
    }

    /// Min/max date present in the daily records, used to clamp user ranges
    pub fn date_span(&self) -> Option<DateRange> {
        let start = self.daily.iter().map(|r| r.date).min()?;
        let end = self.daily.iter().map(|r| r.date).max()?;
        Some(DateRange::new(start, end))
    }
}

static SNAPSHOT: OnceCell<RentalDataset> = OnceCell::new();

/// Load the dataset into the process-wide snapshot, once
///
/// Subsequent calls return the already-loaded snapshot without touching the
/// source files again.
pub fn init_snapshot(day_csv: &Path, hour_csv: &Path) -> Result<&'static RentalDataset> {
    SNAPSHOT.get_or_try_init(|| RentalDataset::load(day_csv, hour_csv))
}

/// Read-only access to the snapshot, if it has been initialized
pub fn snapshot() -> Option<&'static RentalDataset> {
    SNAPSHOT.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::tempdir;

    const DAY_HEADER: &str =
        "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,cnt";
    const HOUR_HEADER: &str =
        "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,cnt";

    fn write_csv(dir: &std::path::Path, name: &str, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_load_daily_records() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "day.csv",
            &[
                DAY_HEADER,
                "1,2011-01-01,1,0,1,0,6,0,2,0.34,985",
                "2,2011-01-02,1,0,1,0,0,1,1,0.36,801",
            ],
        );

        let records = load_daily_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].date,
            NaiveDate::from_ymd_opt(2011, 1, 1).unwrap()
        );
        assert_eq!(records[0].season, Season::Spring);
        assert_eq!(records[0].weather, WeatherCondition::Cloudy);
        assert!(!records[0].working_day);
        assert_eq!(records[0].count, 985);
        assert!(records[1].working_day);
    }

    #[test]
    fn test_load_hourly_records() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "hour.csv",
            &[
                HOUR_HEADER,
                "1,2011-01-01,1,0,1,0,0,6,0,1,0.24,16",
                "2,2011-01-01,1,0,1,1,0,6,0,1,0.22,40",
            ],
        );

        let records = load_hourly_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hour, 0);
        assert_eq!(records[1].hour, 1);
        assert_eq!(records[1].count, 40);
    }

    #[test]
    fn test_load_rejects_bad_weather_code() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "day.csv",
            &[DAY_HEADER, "1,2011-01-01,1,0,1,0,6,0,7,0.34,985"],
        );

        let err = load_daily_records(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("row 2"));
    }

    #[test]
    fn test_load_rejects_bad_hour() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "hour.csv",
            &[HOUR_HEADER, "1,2011-01-01,1,0,1,24,0,6,0,1,0.24,16"],
        );

        assert!(load_hourly_records(&path).is_err());
    }

    #[test]
    fn test_load_rejects_bad_date() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "day.csv",
            &[DAY_HEADER, "1,not-a-date,1,0,1,0,6,0,1,0.34,985"],
        );

        assert!(load_daily_records(&path).is_err());
    }

    #[test]
    fn test_date_span() {
        let daily = vec![
            DailyRecord {
                date: NaiveDate::from_ymd_opt(2011, 3, 5).unwrap(),
                season: Season::Spring,
                weather: WeatherCondition::Clear,
                working_day: true,
                count: 100,
            },
            DailyRecord {
                date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
                season: Season::Spring,
                weather: WeatherCondition::Clear,
                working_day: false,
                count: 50,
            },
        ];
        let dataset = RentalDataset::from_records(daily, Vec::new());
        let span = dataset.date_span().unwrap();
        assert_eq!(span.start, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(span.end, NaiveDate::from_ymd_opt(2011, 3, 5).unwrap());
    }

    #[test]
    fn test_date_span_empty_dataset() {
        let dataset = RentalDataset::from_records(Vec::new(), Vec::new());
        assert!(dataset.is_empty());
        assert!(dataset.date_span().is_none());
    }
}
