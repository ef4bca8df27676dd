//! Weather impact comparison bar chart

use crate::aggregator::WeatherImpactPoint;
use crate::renderer::ChartRenderer;
use crate::types::{ChartConfig, ChartKind};
use bikegraph_common::{BikeGraphError, Result};
use plotters::prelude::*;
use std::path::Path;

/// Bar chart of mean rentals per weather condition
///
/// Bars appear in the fixed category order Cerah, Berawan, Hujan ringan,
/// Hujan lebat; conditions absent from the selection are simply not drawn.
#[derive(Debug)]
pub struct WeatherImpactChart {
    pub data: Vec<WeatherImpactPoint>,
}

impl WeatherImpactChart {
    pub fn new(data: Vec<WeatherImpactPoint>) -> Self {
        Self { data }
    }

    /// Create a chart with a tuned configuration
    pub fn with_config(
        title: &str,
        x_label: Option<&str>,
        y_label: Option<&str>,
    ) -> (Self, ChartConfig) {
        let chart = Self::new(Vec::new());
        let mut config = ChartConfig {
            kind: ChartKind::Bar,
            title: title.to_string(),
            x_label: x_label.map(|s| s.to_string()),
            y_label: y_label.map(|s| s.to_string()),
            ..Default::default()
        };

        config.width = 800;
        config.height = 500;
        config.style.margins.bottom = 55;

        (chart, config)
    }

    /// Replace the chart data
    pub fn set_data(&mut self, data: Vec<WeatherImpactPoint>) {
        self.data = data;
    }

    /// Get max mean for y-axis scaling
    fn get_max_mean(&self) -> f64 {
        if self.data.is_empty() {
            return 10.0;
        }
        self.data.iter().map(|d| d.mean).fold(0.0, f64::max) * 1.1
    }
}

impl ChartRenderer for WeatherImpactChart {
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(BikeGraphError::chart(
                "No data available for weather impact chart",
            ));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        let bg_color = self.background_color(config);
        root.fill(&bg_color)?;

        let bar_count = self.data.len();
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
            .x_desc(config.x_label.as_deref().unwrap_or("Kondisi Cuaca"))
            .y_desc(config.y_label.as_deref().unwrap_or("Jumlah Rata-rata Penyewaan"))
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(index) => self
                    .data
                    .get(*index)
                    .map(|point| point.weather.label().to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        let colors = self.scheme_colors(&config.style.color_scheme);
        let bar_color = colors.first().copied().unwrap_or(RGBColor(31, 119, 180));

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(bar_color.filled())
                .margin(8)
                .data(self.data.iter().enumerate().map(|(index, point)| (index, point.mean))),
        )?;

        root.present()?;
        tracing::info!(
            "Successfully rendered weather impact chart to {}",
            path.display()
        );
        Ok(())
    }
}
