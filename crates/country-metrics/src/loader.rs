//! Data loading from JSON files
//!
//! The two source files are Excel/pandas exports, so numeric fields can
//! be absent, null, or floats. Missing numerics default to 0 and never
//! reject a record; only a missing country code drops one.

use crate::{CountryStatRecord, NodeCountRecord, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Raw node count row from node_countries.json
#[derive(Debug, Deserialize)]
struct RawNodeCount {
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
    #[serde(rename = "Count")]
    count: Option<f64>,
}

/// Raw country statistics row from country_data.json
#[derive(Debug, Deserialize)]
struct RawCountryStat {
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
    #[serde(rename = "Country Name")]
    country_name: Option<String>,
    gdp: Option<f64>,
    population: Option<f64>,
    #[serde(rename = "landArea")]
    land_area: Option<f64>,
}

fn as_count(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v as u64,
        _ => 0,
    }
}

fn as_stat(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Load node count records from a JSON file
pub fn load_node_counts(path: impl AsRef<Path>) -> Result<Vec<NodeCountRecord>> {
    let path = path.as_ref();
    info!("Loading node counts from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: Vec<RawNodeCount> = serde_json::from_reader(reader)?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for row in raw {
        let country_code = match row.country_code {
            Some(code) if !code.is_empty() => code,
            _ => {
                skipped += 1;
                continue;
            }
        };
        records.push(NodeCountRecord {
            country_code,
            count: as_count(row.count),
        });
    }

    info!(
        "Loaded {} node count records ({} skipped for missing country code)",
        records.len(),
        skipped
    );

    Ok(records)
}

/// Load country statistic records from a JSON file
pub fn load_country_stats(path: impl AsRef<Path>) -> Result<Vec<CountryStatRecord>> {
    let path = path.as_ref();
    info!("Loading country statistics from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: Vec<RawCountryStat> = serde_json::from_reader(reader)?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for row in raw {
        let country_code = match row.country_code {
            Some(code) if !code.is_empty() => code,
            _ => {
                skipped += 1;
                continue;
            }
        };
        records.push(CountryStatRecord {
            country_code,
            country_name: row.country_name.unwrap_or_else(|| "Unknown".to_string()),
            gdp: as_stat(row.gdp),
            population: as_count(row.population),
            land_area: as_stat(row.land_area),
        });
    }

    info!(
        "Loaded {} countries ({} skipped for missing country code)",
        records.len(),
        skipped
    );

    Ok(records)
}
