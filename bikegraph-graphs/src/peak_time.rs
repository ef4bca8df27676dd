//! Peak-time analysis bar charts
//!
//! One chart per temporal granularity; the bucket with the highest mean is
//! drawn in the secondary color so the peak stands out.

use crate::aggregator::{peak_bucket, TimeBucketPoint, TimeGranularity};
use crate::renderer::ChartRenderer;
use crate::types::{ChartConfig, ChartKind};
use bikegraph_common::{BikeGraphError, Result};
use plotters::prelude::*;
use std::path::Path;

/// Bar chart of mean rentals per time bucket
#[derive(Debug)]
pub struct PeakTimeChart {
    pub granularity: TimeGranularity,
    pub data: Vec<TimeBucketPoint>,
    /// Whether the peak bucket gets the secondary color
    pub highlight_peak: bool,
}

impl PeakTimeChart {
    pub fn new(granularity: TimeGranularity, data: Vec<TimeBucketPoint>) -> Self {
        Self {
            granularity,
            data,
            highlight_peak: true,
        }
    }

    /// Create a chart with a configuration tuned for the granularity
    pub fn with_config(granularity: TimeGranularity, title: &str) -> (Self, ChartConfig) {
        let chart = Self::new(granularity, Vec::new());
        let mut config = ChartConfig {
            kind: ChartKind::Bar,
            title: title.to_string(),
            x_label: Some(granularity.axis_label().to_string()),
            y_label: Some("Jumlah Rata-rata Penyewaan".to_string()),
            ..Default::default()
        };

        // The 24-bucket hourly chart needs the extra width
        if granularity == TimeGranularity::HourOfDay {
            config.width = 1200;
        }
        config.style.margins.bottom = 55;

        (chart, config)
    }

    /// Replace the chart data
    pub fn set_data(&mut self, data: Vec<TimeBucketPoint>) {
        self.data = data;
    }

    /// Get max mean for y-axis scaling
    fn get_max_mean(&self) -> f64 {
        let max = self.data.iter().map(|d| d.mean).fold(0.0, f64::max);
        if max <= 0.0 {
            return 10.0;
        }
        max * 1.1
    }
}

impl ChartRenderer for PeakTimeChart {
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(BikeGraphError::chart(
                "No data available for peak time chart",
            ));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        let bg_color = self.background_color(config);
        root.fill(&bg_color)?;

        let bar_count = self.data.len();
        let peak = peak_bucket(&self.data).map(|point| point.bucket);
        let title_font = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        );
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top as i32)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d((0usize..bar_count).into_segmented(), 0.0..self.get_max_mean())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bar_count.min(24))
            .x_desc(config.x_label.as_deref().unwrap_or(""))
            .y_desc(config.y_label.as_deref().unwrap_or(""))
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(index) => self
                    .data
                    .get(*index)
                    .map(|point| self.granularity.bucket_label(point.bucket))
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        let colors = self.scheme_colors(&config.style.color_scheme);
        let bar_color = colors.first().copied().unwrap_or(RGBColor(31, 119, 180));
        let peak_color = colors.get(1).copied().unwrap_or(bar_color);

        chart.draw_series(self.data.iter().enumerate().map(|(index, point)| {
            let color = if self.highlight_peak && peak == Some(point.bucket) {
                peak_color
            } else {
                bar_color
            };
            Rectangle::new(
                [
                    (SegmentValue::Exact(index), 0.0),
                    (SegmentValue::Exact(index + 1), point.mean),
                ],
                color.filled(),
            )
        }))?;

        root.present()?;
        tracing::info!(
            "Successfully rendered peak time chart ({:?}) to {}",
            self.granularity,
            path.display()
        );
        Ok(())
    }
}
