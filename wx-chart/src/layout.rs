//! Chart dimensions in pixels.

use serde::{Deserialize, Serialize};

/// Padding around the plotting cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Padding {
            top: 40.0,
            right: 40.0,
            bottom: 40.0,
            left: 40.0,
        }
    }
}

/// Layout of one city chart: the plotting cell on the left, the summary
/// panel on the right.
///
/// Fields missing from a JSON layout file take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub svg_width: f64,
    pub svg_height: f64,
    pub padding: Padding,
    /// Gap between the plotting cell and the summary panel
    pub cell_padding: f64,
    pub panel_width: f64,
    pub panel_height: f64,
    /// Temperature anomaly range shown on the y axis, in degrees Fahrenheit
    pub temperature_domain: (f64, f64),
}

impl Default for ChartLayout {
    fn default() -> Self {
        ChartLayout {
            svg_width: 1200.0,
            svg_height: 500.0,
            padding: Padding::default(),
            cell_padding: 10.0,
            panel_width: 400.0,
            panel_height: 200.0,
            temperature_domain: (-35.0, 35.0),
        }
    }
}

impl ChartLayout {
    /// Parse a layout from JSON, e.g. `{"svg_width": 1400, "padding": {"left": 60}}`.
    pub fn from_json_str(json: &str) -> serde_json::Result<ChartLayout> {
        serde_json::from_str(json)
    }

    /// Width of the plotting cell.
    pub fn cell_width(&self) -> f64 {
        self.svg_width - self.padding.left - self.padding.right - self.panel_width
    }

    /// Height of the plotting cell.
    pub fn cell_height(&self) -> f64 {
        self.svg_height - self.padding.top - self.padding.bottom
    }

    /// Top-left corner of the plotting cell within the svg.
    pub fn cell_origin(&self) -> (f64, f64) {
        (self.padding.left, self.padding.top)
    }

    /// Top-left corner of the summary panel within the svg.
    pub fn panel_origin(&self) -> (f64, f64) {
        (
            self.cell_width() + self.padding.left + self.padding.right + self.cell_padding,
            self.padding.top,
        )
    }
}
