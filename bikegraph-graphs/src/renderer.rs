//! Chart rendering seam and shared color handling

use crate::types::{ChartConfig, ColorScheme};
use bikegraph_common::Result;
use plotters::prelude::*;
use std::path::Path;

/// Series palette matching the source dashboard's matplotlib defaults
const DEFAULT_PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

/// Grayscale palette for print-friendly output
const MONOCHROME_PALETTE: [RGBColor; 4] = [
    RGBColor(0, 0, 0),
    RGBColor(64, 64, 64),
    RGBColor(128, 128, 128),
    RGBColor(192, 192, 192),
];

/// Parse a `#RRGGBB` color string; anything else is rejected
pub fn parse_hex_color(value: &str) -> Option<RGBColor> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(RGBColor(red, green, blue))
}

/// Seam every chart module implements to draw itself onto a file
pub trait ChartRenderer {
    /// Render the chart to a file path
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()>;

    /// Series colors of the active scheme
    ///
    /// Unparsable custom entries degrade to black instead of failing the
    /// render.
    fn scheme_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => DEFAULT_PALETTE.to_vec(),
            ColorScheme::Monochrome => MONOCHROME_PALETTE.to_vec(),
            ColorScheme::Custom(values) => values
                .iter()
                .map(|value| parse_hex_color(value).unwrap_or(RGBColor(0, 0, 0)))
                .collect(),
        }
    }

    /// Fill color of the drawing area, white unless configured otherwise
    fn background_color(&self, config: &ChartConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(WHITE)
    }
}
