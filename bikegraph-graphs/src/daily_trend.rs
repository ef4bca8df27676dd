//! Daily rental trend line chart

use crate::aggregator::TrendPoint;
use crate::renderer::ChartRenderer;
use crate::types::{ChartConfig, ChartKind};
use bikegraph_common::{BikeGraphError, Result};
use plotters::prelude::*;
use std::path::Path;

/// Line chart of total rentals per date
#[derive(Debug)]
pub struct DailyTrendChart {
    /// Data points of the time series, date-ascending
    pub data: Vec<TrendPoint>,
}

impl DailyTrendChart {
    pub fn new(data: Vec<TrendPoint>) -> Self {
        Self { data }
    }

    /// Create a chart with a tuned configuration
    pub fn with_config(
        title: &str,
        x_label: Option<&str>,
        y_label: Option<&str>,
    ) -> (Self, ChartConfig) {
        let chart = Self::new(Vec::new());
        let config = ChartConfig {
            kind: ChartKind::Line,
            title: title.to_string(),
            x_label: x_label.map(|s| s.to_string()),
            y_label: y_label.map(|s| s.to_string()),
            ..Default::default()
        };
        (chart, config)
    }

    /// Replace the chart data
    pub fn set_data(&mut self, data: Vec<TrendPoint>) {
        self.data = data;
    }

    /// Convert data to plotters-compatible format
    fn prepare_plot_data(&self) -> Vec<(f64, f64)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, point)| (i as f64, point.total as f64))
            .collect()
    }

    /// Get max total for y-axis scaling
    fn get_max_total(&self) -> f64 {
        if self.data.is_empty() {
            return 10.0;
        }
        self.data
            .iter()
            .map(|d| d.total as f64)
            .fold(0.0, f64::max)
            * 1.1
    }
}

impl ChartRenderer for DailyTrendChart {
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(BikeGraphError::chart("No data available for trend chart"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        let bg_color = self.background_color(config);
        root.fill(&bg_color)?;

        let x_max = self.data.len().saturating_sub(1).max(1) as f64;
        let title_font = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        );
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top as i32)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(0.0..x_max, 0.0..self.get_max_total())?;

        chart
            .configure_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or("Tanggal"))
            .y_desc(config.y_label.as_deref().unwrap_or("Jumlah Penyewaan"))
            .x_label_formatter(&|x| {
                let index = x.round() as usize;
                self.data
                    .get(index)
                    .map(|point| point.date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .draw()?;

        let colors = self.scheme_colors(&config.style.color_scheme);
        let line_color = colors.first().copied().unwrap_or(RGBColor(31, 119, 180));

        chart.draw_series(LineSeries::new(self.prepare_plot_data(), &line_color))?;

        root.present()?;
        tracing::info!("Successfully rendered trend chart to {}", path.display());
        Ok(())
    }
}
