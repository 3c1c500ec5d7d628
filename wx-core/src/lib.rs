//! Core types for per-city daily weather data.
//!
//! - `record`: the row normalizer turning raw CSV columns into `DailyWeatherRecord`s
//! - `dataset`: an ordered, immutable year of records for one city
//! - `interval`: inclusive calendar date intervals
//! - `summary`: the range aggregator producing `SummaryStats`
//! - `city`: the static table of supported cities

pub mod city;
pub mod dataset;
pub mod error;
pub mod interval;
pub mod record;
pub mod summary;

pub use error::{Result, WeatherError};
