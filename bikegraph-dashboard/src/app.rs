//! Dashboard orchestration: criteria, reports, chart files, raw preview

use bikegraph_common::{
    dataset, BikeGraphError, DateRange, DayType, LogFormat, LoggingConfig, RentalDataset, Result,
    WeatherCondition,
};
use bikegraph_config::{Config, ConfigLoader, GraphSettings};
use bikegraph_graphs::{
    filter_records, peak_bucket, ChartConfig, ChartRenderer, ColorScheme, DailyTrendChart,
    DayTypeChart, FilterCriteria, FontConfig, PeakTimeChart, ReportManager, SeasonalChart,
    TimeGranularity, Visualization, WeatherImpactChart,
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Resolved invocation options for one dashboard run
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Explicit configuration file path
    pub config_path: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Start of the date range; defaults to the dataset start
    pub start_date: Option<NaiveDate>,
    /// End of the date range; defaults to the dataset end
    pub end_date: Option<NaiveDate>,
    /// Optional weather category filter
    pub weather: Option<WeatherCondition>,
    /// Selected visualization
    pub visualization: Visualization,
    /// Whether to print the first rows of the filtered collections
    pub show_raw: bool,
    /// Output directory override for chart files
    pub output_dir: Option<PathBuf>,
}

impl AppOptions {
    /// Options with every override left empty
    pub fn new(visualization: Visualization) -> Self {
        Self {
            config_path: None,
            log_level: None,
            start_date: None,
            end_date: None,
            weather: None,
            visualization,
            show_raw: false,
            output_dir: None,
        }
    }
}

/// Execute one dashboard interaction end to end
pub fn run(options: &AppOptions) -> Result<()> {
    let config = match &options.config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    setup_logging(&config, options);

    let dataset = dataset::init_snapshot(
        Path::new(&config.data.day_csv),
        Path::new(&config.data.hour_csv),
    )?;

    let span = dataset
        .date_span()
        .ok_or_else(|| BikeGraphError::dataset("daily dataset holds no records"))?;

    let requested = DateRange::new(
        options.start_date.unwrap_or(span.start),
        options.end_date.unwrap_or(span.end),
    );
    let clamped = requested.clamp_to(&span);
    if clamped != requested {
        info!(
            "Requested range {} clamped to dataset span {}",
            requested, clamped
        );
    }

    let mut criteria = FilterCriteria::new(clamped);
    if let Some(weather) = options.weather {
        criteria = criteria.with_weather(weather);
    }

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.graph.output_dir));
    std::fs::create_dir_all(&output_dir)?;

    generate_report(
        dataset,
        &criteria,
        options.visualization,
        &config.graph,
        &output_dir,
    )?;

    if options.show_raw {
        print_raw_preview(dataset, &criteria);
    }

    Ok(())
}

/// Install the tracing subscriber from the resolved logging settings
fn setup_logging(config: &Config, options: &AppOptions) {
    let logging_config = LoggingConfig {
        level: options
            .log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone()),
        format: if config.logging.pretty {
            LogFormat::Pretty
        } else {
            LogFormat::Compact
        },
        file: config.logging.file.clone().map(PathBuf::from),
        show_target: true,
    };
    if let Err(error) = bikegraph_common::init_logging(logging_config) {
        // A subscriber may already be installed; the run proceeds without it
        eprintln!("logging initialization skipped: {}", error);
    }
}

/// Chart title carrying the active weather label, like the source dashboard
fn chart_title(visualization: Visualization, weather: Option<WeatherCondition>) -> String {
    match weather {
        Some(weather) => format!("{} - {}", visualization.title(), weather.label()),
        None => visualization.title().to_string(),
    }
}

/// Carry the configured dimensions, colors, and fonts into a chart config
fn apply_graph_settings(config: &mut ChartConfig, settings: &GraphSettings) {
    config.width = settings.width;
    config.height = settings.height;
    config.style.background_color = Some(settings.background_color.clone());
    config.style.color_scheme = ColorScheme::Custom(vec![
        settings.primary_color.clone(),
        settings.secondary_color.clone(),
    ]);
    config.style.title_font.family = settings.font_family.clone();
    config.style.axis_font = FontConfig {
        family: settings.font_family.clone(),
        size: settings.font_size,
    };
}

fn report_no_data(visualization: Visualization) {
    warn!("No records match the active criteria ({:?})", visualization);
    println!(
        "Tidak ada data penyewaan untuk filter yang dipilih ({}).",
        visualization.title()
    );
}

/// Run the selected report and render its chart file(s)
fn generate_report(
    dataset: &RentalDataset,
    criteria: &FilterCriteria,
    visualization: Visualization,
    settings: &GraphSettings,
    output_dir: &Path,
) -> Result<()> {
    match visualization {
        Visualization::RentalTrend => {
            let Some(points) = ReportManager::daily_trend(&dataset.daily, criteria) else {
                report_no_data(visualization);
                return Ok(());
            };
            let title = chart_title(visualization, criteria.weather);
            let (mut chart, mut chart_config) = DailyTrendChart::with_config(&title, None, None);
            apply_graph_settings(&mut chart_config, settings);
            chart.set_data(points);
            let path = output_dir.join("tren_penyewaan.png");
            chart.render_to_file(&chart_config, &path)?;
            println!("Grafik tersimpan: {}", path.display());
        }
        Visualization::DayTypeComparison => {
            let Some(points) = ReportManager::day_type_comparison(&dataset.daily, criteria) else {
                report_no_data(visualization);
                return Ok(());
            };
            let title = chart_title(visualization, criteria.weather);
            let (mut chart, mut chart_config) = DayTypeChart::with_config(&title, None, None);
            apply_graph_settings(&mut chart_config, settings);
            chart.set_data(points);
            let path = output_dir.join("perbandingan_hari.png");
            chart.render_to_file(&chart_config, &path)?;
            println!("Grafik tersimpan: {}", path.display());
        }
        Visualization::SeasonalDistribution => {
            let Some(distributions) =
                ReportManager::seasonal_distribution(&dataset.daily, criteria)
            else {
                report_no_data(visualization);
                return Ok(());
            };
            let title = chart_title(visualization, criteria.weather);
            let (mut chart, mut chart_config) = SeasonalChart::with_config(&title, None, None);
            apply_graph_settings(&mut chart_config, settings);
            chart.set_data(distributions);
            let path = output_dir.join("distribusi_musim.png");
            chart.render_to_file(&chart_config, &path)?;
            println!("Grafik tersimpan: {}", path.display());
        }
        Visualization::WeatherImpact => {
            let Some(points) = ReportManager::weather_impact(&dataset.daily, criteria) else {
                report_no_data(visualization);
                return Ok(());
            };
            // The comparison spans every condition, so no weather suffix
            let title = chart_title(visualization, None);
            let (mut chart, mut chart_config) =
                WeatherImpactChart::with_config(&title, None, None);
            apply_graph_settings(&mut chart_config, settings);
            chart.set_data(points);
            let path = output_dir.join("pengaruh_cuaca.png");
            chart.render_to_file(&chart_config, &path)?;
            println!("Grafik tersimpan: {}", path.display());
        }
        Visualization::PeakTime => {
            let Some(hourly_points) = ReportManager::peak_time(
                &dataset.hourly,
                criteria,
                TimeGranularity::HourOfDay,
            ) else {
                report_no_data(visualization);
                return Ok(());
            };

            for granularity in TimeGranularity::ALL {
                let points = match granularity {
                    TimeGranularity::HourOfDay => hourly_points.clone(),
                    _ => ReportManager::peak_time(&dataset.hourly, criteria, granularity)
                        .unwrap_or_default(),
                };
                let title = chart_title(visualization, criteria.weather);
                let (mut chart, mut chart_config) =
                    PeakTimeChart::with_config(granularity, &title);
                apply_graph_settings(&mut chart_config, settings);
                if granularity == TimeGranularity::HourOfDay {
                    chart_config.width = chart_config.width.max(1200);
                }
                chart.set_data(points);
                let path = output_dir.join(format!("waktu_puncak_{}.png", granularity.slug()));
                chart.render_to_file(&chart_config, &path)?;
                println!("Grafik tersimpan: {}", path.display());
            }

            if let Some(peak) = peak_bucket(&hourly_points) {
                println!(
                    "Jam puncak penyewaan: {} (rata-rata {:.1})",
                    TimeGranularity::HourOfDay.bucket_label(peak.bucket),
                    peak.mean
                );
            }
        }
    }

    Ok(())
}

/// Print the first rows of the filtered daily and hourly collections
fn print_raw_preview(dataset: &RentalDataset, criteria: &FilterCriteria) {
    let daily = filter_records(&dataset.daily, criteria);
    println!("\nData Harian ({} baris, 5 pertama):", daily.len());
    for record in daily.iter().take(5) {
        println!(
            "  {}  {}  {}  {}  {}",
            record.date,
            record.season.label(),
            record.weather.label(),
            DayType::from_flag(record.working_day).label(),
            record.count
        );
    }

    let hourly = filter_records(&dataset.hourly, criteria);
    println!("Data Jam ({} baris, 5 pertama):", hourly.len());
    for record in hourly.iter().take(5) {
        println!(
            "  {} {:02}:00  {}  {}  {}",
            record.date,
            record.hour,
            record.season.label(),
            record.weather.label(),
            record.count
        );
    }
}
