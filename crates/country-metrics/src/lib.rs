//! Country Node-Metric Engine
//!
//! Joins observed network node counts with per-country statistics (GDP,
//! population, land area) and derives one of ten selectable metrics as a
//! sorted value series plus the color-axis configuration a choropleth or
//! table renderer needs.
//!
//! # Metric Catalog
//!
//! | Id | Metric | Scale | Zero handling |
//! |----|--------|-------|---------------|
//! | 1  | Nodes | log | value ≤ 0 excluded |
//! | 2  | GDP (billions USD) | log | floored at 1 |
//! | 3  | Land area (km²) | log | floored at 1 |
//! | 4  | Population | log | floored at 1 |
//! | 5  | Nodes per $trillion GDP | log | value ≤ 0 excluded |
//! | 6  | Nodes per 1,000,000 km² | log | value ≤ 0 excluded |
//! | 7  | Nodes per 1,000,000 people | log | value ≤ 0 excluded |
//! | 8  | Nodes/GDP z-score | linear | none (fixed [-1, 1] domain) |
//! | 9  | Nodes/land z-score | linear | none (fixed [-1, 1] domain) |
//! | 10 | Nodes/population z-score | linear | none (fixed [-1, 1] domain) |
//!
//! The pipeline is two pure stages: [`joiner::join`] merges the two raw
//! datasets once per data load, and [`series::compute_series`] derives a
//! fresh [`series::MetricSeries`] on every metric selection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod joiner;
pub mod loader;
pub mod metric;
pub mod series;

pub use metric::{ColorScale, Metric, ScaleType};
pub use series::{compute_series, compute_series_by_id, MetricSeries, SeriesEntry};

#[derive(Error, Debug)]
pub enum MetricError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid metric id {0}: expected 1-10")]
    InvalidMetric(u8),
    #[error("standardization undefined: zero variance across {0} countries")]
    UndefinedStandardization(usize),
}

pub type Result<T> = std::result::Result<T, MetricError>;

/// One observed node, attributed to a country
///
/// Multiple records may share a country code; the joiner sums them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeCountRecord {
    #[serde(rename = "countryCode")]
    pub country_code: String,
    #[serde(rename = "Count")]
    pub count: u64,
}

/// Per-country statistics from the World Bank export
///
/// GDP is in billions of USD, land area in km². Some territories
/// (e.g. Taiwan) are absent from the source by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryStatRecord {
    /// ISO 3166-1 alpha-3 country code (e.g. "USA", "DEU")
    #[serde(rename = "countryCode")]
    pub country_code: String,
    #[serde(rename = "Country Name")]
    pub country_name: String,
    pub gdp: f64,
    pub population: u64,
    #[serde(rename = "landArea")]
    pub land_area: f64,
}

/// A country statistic record enriched with its summed node count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedCountryRecord {
    pub country_code: String,
    pub country_name: String,
    pub gdp: f64,
    pub population: u64,
    pub land_area: f64,
    /// Total observed nodes, 0 when no node record matched the code
    pub nodes: u64,
}
