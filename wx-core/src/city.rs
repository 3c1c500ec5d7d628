use crate::error::{Result, WeatherError};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Embedded CSV table of supported cities: `code,name`.
pub static CITIES_CSV: &str = include_str!("../../fixtures/cities.csv");

/// Selector value meaning "every configured city".
pub const ALL_CITIES: &str = "ALL";

/// A city with a weather history file, keyed by its station code.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
pub struct City {
    /// Short station code, also the data file stem (e.g. "KSEA" for KSEA.csv)
    pub code: String,
    /// Display name used as the chart title
    pub name: String,
}

impl City {
    /// Parse a `code,name` CSV (with headers) into cities.
    pub fn parse_city_csv(csv_object: &str) -> Result<Vec<City>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes());
        let mut cities = Vec::new();
        for row in rdr.deserialize() {
            let city: City = row?;
            cities.push(city);
        }
        Ok(cities)
    }

    /// Every configured city, in display order.
    pub fn all() -> Result<Vec<City>> {
        City::parse_city_csv(CITIES_CSV)
    }

    /// Find a configured city by code, ignoring case.
    pub fn lookup(code: &str) -> Result<City> {
        let wanted = code.trim();
        City::all()?
            .into_iter()
            .find(|city| city.code.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WeatherError::UnknownCity(wanted.to_string()))
    }

    /// File name of this city's data, e.g. "KSEA.csv".
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.code)
    }
}

/// Which charts to show: every city, or a single one.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CitySelection {
    All,
    One(City),
}

impl CitySelection {
    /// Parse "ALL" (any case) or a city code.
    pub fn parse(value: &str) -> Result<CitySelection> {
        if value.trim().eq_ignore_ascii_case(ALL_CITIES) {
            Ok(CitySelection::All)
        } else {
            City::lookup(value).map(CitySelection::One)
        }
    }

    pub fn cities(&self) -> Result<Vec<City>> {
        match self {
            CitySelection::All => City::all(),
            CitySelection::One(city) => Ok(vec![city.clone()]),
        }
    }
}
