//! Brushing: selecting a date sub-range by dragging across the x axis.

use crate::{layout::ChartLayout, scale::TimeScale};
use std::str::FromStr;
use thiserror::Error;
use wx_core::{dataset::Dataset, interval::DateInterval};

#[derive(Error, Debug, PartialEq)]
#[error("Invalid brush extent {0:?}, expected \"X0,X1\" in pixels")]
pub struct BrushParseError(pub String);

/// The current brush, as a pixel extent within the plotting cell.
///
/// A cleared brush (`None`) selects the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrushSelection(pub Option<(f64, f64)>);

impl BrushSelection {
    pub fn cleared() -> BrushSelection {
        BrushSelection(None)
    }

    pub fn extent(x0: f64, x1: f64) -> BrushSelection {
        BrushSelection(Some((x0, x1)))
    }

    /// The date interval selected on a chart of `dataset`.
    ///
    /// Pixels are clamped to the plotting cell before inverting through the
    /// chart's time scale. Returns `None` only for an empty dataset.
    pub fn to_interval(&self, dataset: &Dataset, layout: &ChartLayout) -> Option<DateInterval> {
        match self.0 {
            None => dataset.full_span(),
            Some((x0, x1)) => {
                let scale = TimeScale::for_dataset(dataset, layout)?;
                let clamp = |x: f64| x.min(layout.cell_width()).max(0.0);
                Some(DateInterval::from_datetimes(
                    scale.invert(clamp(x0)),
                    scale.invert(clamp(x1)),
                ))
            }
        }
    }
}

impl FromStr for BrushSelection {
    type Err = BrushParseError;

    /// Parse "X0,X1"; an empty string is a cleared brush.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(BrushSelection::cleared());
        }
        let parse = |part: Option<&str>| -> Result<f64, BrushParseError> {
            part.and_then(|p| p.trim().parse::<f64>().ok())
                .filter(|x| x.is_finite())
                .ok_or_else(|| BrushParseError(s.to_string()))
        };
        let mut parts = trimmed.split(',');
        let x0 = parse(parts.next())?;
        let x1 = parse(parts.next())?;
        if parts.next().is_some() {
            return Err(BrushParseError(s.to_string()));
        }
        Ok(BrushSelection::extent(x0, x1))
    }
}
