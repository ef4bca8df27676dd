//! bikegraph dashboard - main entry point

use anyhow::{Context, Result};
use bikegraph_common::utils::parse_iso_date;
use bikegraph_common::WeatherCondition;
use bikegraph_dashboard::app::{self, AppOptions};
use bikegraph_graphs::Visualization;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long)]
    log_level: Option<String>,

    /// Start of the date range (YYYY-MM-DD); defaults to the dataset start
    #[arg(long)]
    start_date: Option<String>,

    /// End of the date range (YYYY-MM-DD); defaults to the dataset end
    #[arg(long)]
    end_date: Option<String>,

    /// Weather filter by label (Cerah, Berawan, Hujan ringan, Hujan lebat)
    #[arg(short, long)]
    weather: Option<String>,

    /// Visualization to generate
    #[arg(short, long, value_enum, default_value_t = ReportArg::Trend)]
    report: ReportArg,

    /// Print the first rows of the filtered collections
    #[arg(long)]
    show_raw: bool,

    /// Directory chart files are written into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// Visualization selection on the command line
#[derive(ValueEnum, Debug, Clone, Copy)]
enum ReportArg {
    /// Daily rental trend line chart
    Trend,
    /// Working-day versus weekend comparison
    DayType,
    /// Rental distribution per season
    Seasonal,
    /// Mean rentals per weather condition
    Weather,
    /// Peak-time analysis over the hourly records
    PeakTime,
}

impl From<ReportArg> for Visualization {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Trend => Visualization::RentalTrend,
            ReportArg::DayType => Visualization::DayTypeComparison,
            ReportArg::Seasonal => Visualization::SeasonalDistribution,
            ReportArg::Weather => Visualization::WeatherImpact,
            ReportArg::PeakTime => Visualization::PeakTime,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let start_date = args
        .start_date
        .as_deref()
        .map(parse_iso_date)
        .transpose()
        .context("invalid --start-date")?;
    let end_date = args
        .end_date
        .as_deref()
        .map(parse_iso_date)
        .transpose()
        .context("invalid --end-date")?;
    let weather = args
        .weather
        .as_deref()
        .map(WeatherCondition::from_label)
        .transpose()
        .context("invalid --weather")?;

    let options = AppOptions {
        config_path: args.config,
        log_level: args.log_level,
        start_date,
        end_date,
        weather,
        visualization: args.report.into(),
        show_raw: args.show_raw,
        output_dir: args.output_dir,
    };

    app::run(&options).context("dashboard run failed")
}
