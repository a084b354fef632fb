//! Metric series computation
//!
//! Pure function over the joined records: derive the selected metric for
//! every country, apply its zero/non-finite policy, compute the
//! color-axis domain, and return the entries sorted descending by value.
//! Every invocation produces a fresh series; nothing is cached or
//! mutated.

use crate::metric::{ColorScale, Metric, ScaleType};
use crate::{EnrichedCountryRecord, MetricError, Result};
use chrono::Utc;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Fixed lower bound of the logarithmic color-axis domain
pub const LOG_DOMAIN_MIN: f64 = 1.0;
/// Fixed domain for standardized metrics
pub const STDEV_DOMAIN: [f64; 2] = [-1.0, 1.0];

/// One country's computed value
#[derive(Debug, Clone, Serialize)]
pub struct SeriesEntry {
    pub country_code: String,
    pub country_name: String,
    pub value: f64,
}

/// Everything a map or table renderer needs to draw the series
#[derive(Debug, Clone, Serialize)]
pub struct ColorAxis {
    pub scale: ScaleType,
    /// [min, max] value range mapped onto the color scale
    pub domain: [f64; 2],
    pub color: ColorScale,
    pub legend: &'static str,
    pub tooltip: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesMetadata {
    pub total_countries: usize,
    pub rendered: usize,
    pub excluded: usize,
    pub generated_at: String,
}

/// Computed output series for one metric selection
#[derive(Debug, Clone, Serialize)]
pub struct MetricSeries {
    pub metric: Metric,
    pub metric_id: u8,
    /// Sorted descending by value; tie order is unspecified
    pub entries: Vec<SeriesEntry>,
    pub color_axis: ColorAxis,
    pub metadata: SeriesMetadata,
}

/// Compute the series for a raw metric id, rejecting 0 ("not selected")
/// and ids above 10.
pub fn compute_series_by_id(records: &[EnrichedCountryRecord], id: u8) -> Result<MetricSeries> {
    let metric = Metric::from_id(id).ok_or(MetricError::InvalidMetric(id))?;
    compute_series(records, metric)
}

/// Compute the sorted output series and rendering descriptor for one
/// metric over one immutable snapshot of joined records.
pub fn compute_series(records: &[EnrichedCountryRecord], metric: Metric) -> Result<MetricSeries> {
    let def = metric.def();

    let mut raw: Vec<f64> = records.iter().map(|r| (def.value)(r)).collect();

    if def.standardize {
        standardize(&mut raw)?;
    }

    let mut entries: Vec<SeriesEntry> = records
        .iter()
        .zip(raw)
        .filter_map(|(r, value)| {
            // drop zeros and non-finite values so the log scale stays
            // well-defined; floored and standardized metrics keep all
            if def.zero_is_invalid && !(value > 0.0 && value.is_finite()) {
                debug!("Excluding {} (value {})", r.country_code, value);
                return None;
            }
            Some(SeriesEntry {
                country_code: r.country_code.clone(),
                country_name: r.country_name.clone(),
                value,
            })
        })
        .collect();

    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

    let domain = if def.standardize {
        STDEV_DOMAIN
    } else {
        let max = entries
            .iter()
            .map(|e| e.value)
            .filter(|v| v.is_finite())
            .fold(LOG_DOMAIN_MIN, f64::max);
        [LOG_DOMAIN_MIN, max]
    };

    let excluded = records.len() - entries.len();
    info!(
        "Computed {:?}: {} rendered, {} excluded, domain [{}, {}]",
        metric,
        entries.len(),
        excluded,
        domain[0],
        domain[1]
    );

    Ok(MetricSeries {
        metric,
        metric_id: metric.id(),
        entries,
        color_axis: ColorAxis {
            scale: def.scale,
            domain,
            color: def.color,
            legend: def.legend,
            tooltip: def.tooltip,
        },
        metadata: SeriesMetadata {
            total_countries: records.len(),
            rendered: records.len() - excluded,
            excluded,
            generated_at: Utc::now().to_rfc3339(),
        },
    })
}

/// Replace each value with its z-score over the population mean and
/// population standard deviation (denominator n).
///
/// Non-finite entries are deliberately not filtered first: a single
/// zero denominator poisons the mean and stdev, matching the upstream
/// data pipeline this engine replaces. Zero variance is the only
/// reported failure.
fn standardize(values: &mut [f64]) -> Result<()> {
    if values.is_empty() {
        return Err(MetricError::UndefinedStandardization(0));
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let stdev = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();

    if stdev == 0.0 {
        return Err(MetricError::UndefinedStandardization(values.len()));
    }

    for v in values.iter_mut() {
        *v = (*v - mean) / stdev;
    }

    Ok(())
}
