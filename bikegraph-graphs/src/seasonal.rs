//! Seasonal rental distribution box plot

use crate::aggregator::SeasonDistribution;
use crate::renderer::ChartRenderer;
use crate::types::{ChartConfig, ChartKind};
use bikegraph_common::{BikeGraphError, Result};
use plotters::prelude::*;
use std::path::Path;

/// Box plot of the rental-count distribution per season
#[derive(Debug)]
pub struct SeasonalChart {
    pub data: Vec<SeasonDistribution>,
}

impl SeasonalChart {
    pub fn new(data: Vec<SeasonDistribution>) -> Self {
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
            kind: ChartKind::BoxPlot,
            title: title.to_string(),
            x_label: x_label.map(|s| s.to_string()),
            y_label: y_label.map(|s| s.to_string()),
            ..Default::default()
        };

        config.width = 900;
        config.height = 550;
        config.style.margins.bottom = 55;

        (chart, config)
    }

    /// Replace the chart data
    pub fn set_data(&mut self, data: Vec<SeasonDistribution>) {
        self.data = data;
    }

    /// Get max count for y-axis scaling
    fn get_max_count(&self) -> f32 {
        let max = self
            .data
            .iter()
            .flat_map(|dist| dist.counts.iter())
            .copied()
            .max()
            .unwrap_or(0);
        if max == 0 {
            return 10.0;
        }
        max as f32 * 1.1
    }
}

impl ChartRenderer for SeasonalChart {
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(BikeGraphError::chart(
                "No data available for seasonal chart",
            ));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        let bg_color = self.background_color(config);
        root.fill(&bg_color)?;

        let box_count = self.data.len();
        let title_font = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        );
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top as i32)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d((0usize..box_count).into_segmented(), 0f32..self.get_max_count())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or("Musim"))
            .y_desc(config.y_label.as_deref().unwrap_or("Jumlah Penyewaan"))
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(index) => self
                    .data
                    .get(*index)
                    .map(|dist| dist.season.label().to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        let colors = self.scheme_colors(&config.style.color_scheme);
        let box_color = colors.first().copied().unwrap_or(RGBColor(31, 119, 180));

        chart.draw_series(self.data.iter().enumerate().map(|(index, dist)| {
            let quartiles = Quartiles::new(&dist.counts);
            Boxplot::new_vertical(SegmentValue::CenterOf(index), &quartiles)
                .width(30)
                .whisker_width(0.5)
                .style(box_color)
        }))?;

        root.present()?;
        tracing::info!("Successfully rendered seasonal chart to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikegraph_common::Season;
    use tempfile::tempdir;

    fn distributions() -> Vec<SeasonDistribution> {
        vec![
            SeasonDistribution {
                season: Season::Spring,
                counts: vec![120, 140, 200, 90, 160],
            },
            SeasonDistribution {
                season: Season::Summer,
                counts: vec![300, 280, 350, 400],
            },
        ]
    }

    #[test]
    fn test_get_max_count() {
        let chart = SeasonalChart::new(Vec::new());
        assert_eq!(chart.get_max_count(), 10.0);

        let chart = SeasonalChart::new(distributions());
        assert!((chart.get_max_count() - 440.0).abs() < 0.5);
    }

    #[test]
    fn test_with_config() {
        let (_, config) = SeasonalChart::with_config(
            "Distribusi Penyewaan Berdasarkan Musim",
            Some("Musim"),
            Some("Jumlah Penyewaan"),
        );
        assert_eq!(config.kind, ChartKind::BoxPlot);
        assert_eq!(config.width, 900);
    }

    #[test]
    fn test_render_to_file() {
        let (mut chart, config) =
            SeasonalChart::with_config("Distribusi Penyewaan Berdasarkan Musim", None, None);
        chart.set_data(distributions());

        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("seasonal_test.png");

        assert!(chart.render_to_file(&config, &file_path).is_ok());
        assert!(file_path.exists());
    }

    #[test]
    fn test_render_empty_data_error() {
        let (chart, config) = SeasonalChart::with_config("Distribusi Musim", None, None);
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("empty_test.png");

        assert!(chart.render_to_file(&config, &file_path).is_err());
    }
}
