//! Report selection and chart configuration types

use serde::{Deserialize, Serialize};

/// The visualization modes a user can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visualization {
    RentalTrend,
    DayTypeComparison,
    SeasonalDistribution,
    WeatherImpact,
    PeakTime,
}

impl Visualization {
    /// Display title, also the base of the rendered chart caption
    pub fn title(&self) -> &'static str {
        match self {
            Visualization::RentalTrend => "Tren Penyewaan Sepeda",
            Visualization::DayTypeComparison => "Perbandingan Hari Kerja & Akhir Pekan",
            Visualization::SeasonalDistribution => "Penyewaan Sepeda Berdasarkan Musim",
            Visualization::WeatherImpact => "Pengaruh Cuaca terhadap Penyewaan",
            Visualization::PeakTime => "Analisis Waktu Puncak Penyewaan",
        }
    }
}

/// The chart shapes the reports draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
    Bar,
    BoxPlot,
}

/// Per-chart rendering configuration
///
/// Chart modules produce a tuned instance from `with_config`; the dashboard
/// then overlays the user's configured dimensions, colors, and fonts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub style: StyleConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::Line,
            title: "Grafik".to_string(),
            width: 1000,
            height: 600,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

/// Series color selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ColorScheme {
    Default,
    Monochrome,
    /// Explicit `#RRGGBB` entries, applied in order
    Custom(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Pixel sizes of the areas around the plot: top doubles as the overall
/// margin, bottom and left hold the axis labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 45,
            left: 60,
        }
    }
}

/// Styling shared by every chart kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub color_scheme: ColorScheme,
    pub background_color: Option<String>,
    pub title_font: FontConfig,
    pub axis_font: FontConfig,
    pub margins: MarginConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Default,
            background_color: Some("#FFFFFF".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 20,
            },
            axis_font: FontConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visualization_titles() {
        assert_eq!(Visualization::RentalTrend.title(), "Tren Penyewaan Sepeda");
        assert_eq!(
            Visualization::PeakTime.title(),
            "Analisis Waktu Puncak Penyewaan"
        );
    }

    #[test]
    fn test_chart_config_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.kind, ChartKind::Line);
        assert_eq!((config.width, config.height), (1000, 600));
        assert!(config.x_label.is_none() && config.y_label.is_none());
        // Title font is larger than the axis font out of the box
        assert!(config.style.title_font.size > config.style.axis_font.size);
    }
}
