//! Data-driven metric definition table
//!
//! Each selectable metric is one [`MetricDef`] entry: how to derive the
//! raw value from an enriched record, how zeros and non-finite values are
//! handled, whether the value is standardized to a z-score, and the
//! color-axis configuration the renderer needs. Adding a metric is a
//! table change, not new branch logic.

use crate::EnrichedCountryRecord;
use serde::{Deserialize, Serialize};

/// Ratio scale factor: GDP arrives in $bn, ratios are per $trillion
pub const PER_TRILLION_GDP: f64 = 1e3;
/// Ratio scale factor: per 1,000,000 km² / per 1,000,000 people
pub const PER_MILLION: f64 = 1e6;

/// White-to-blue ramp used by all logarithmic metrics
pub const LOG_RAMP: ColorScale = ColorScale::Ramp {
    min_color: "#ffffff",
    max_color: "#0000ff",
};

/// Diverging red/white/blue stops used by the standardized metrics,
/// mapped onto the fixed [-1, 1] domain
pub const STDEV_STOPS: &[(f64, &str)] = &[
    (0.0, "#ff0000"),
    (0.35, "#ff0000"),
    (0.5, "#ffffff"),
    (1.0, "#0000ff"),
];

/// Color-axis scale type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Logarithmic,
    Linear,
}

/// Color configuration for the choropleth color axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// Two-color ramp interpolated across the domain
    Ramp {
        min_color: &'static str,
        max_color: &'static str,
    },
    /// Gradient stops at fractional positions across the domain
    Stops(&'static [(f64, &'static str)]),
}

/// Static definition of one selectable metric
pub struct MetricDef {
    /// Derive the raw value from an enriched record. May return a
    /// non-finite value when a denominator is zero or missing.
    pub value: fn(&EnrichedCountryRecord) -> f64,
    /// Exclude records whose computed value is ≤ 0 or non-finite, so a
    /// logarithmic scale stays well-defined
    pub zero_is_invalid: bool,
    /// Convert raw values to z-scores before display
    pub standardize: bool,
    pub scale: ScaleType,
    pub color: ColorScale,
    pub legend: &'static str,
    pub tooltip: &'static str,
}

/// Selectable metric, identified by its stable id 1-10
///
/// Id 0 means "no metric selected" and is rejected by
/// [`Metric::from_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Nodes = 1,
    Gdp = 2,
    LandArea = 3,
    Population = 4,
    NodesPerGdp = 5,
    NodesPerLandArea = 6,
    NodesPerPopulation = 7,
    NodesPerGdpStdev = 8,
    NodesPerLandAreaStdev = 9,
    NodesPerPopulationStdev = 10,
}

impl Metric {
    /// All metrics in id order
    pub const ALL: [Metric; 10] = [
        Metric::Nodes,
        Metric::Gdp,
        Metric::LandArea,
        Metric::Population,
        Metric::NodesPerGdp,
        Metric::NodesPerLandArea,
        Metric::NodesPerPopulation,
        Metric::NodesPerGdpStdev,
        Metric::NodesPerLandAreaStdev,
        Metric::NodesPerPopulationStdev,
    ];

    /// Resolve a metric id; 0 ("not selected") and ids above 10 are None
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Metric::Nodes),
            2 => Some(Metric::Gdp),
            3 => Some(Metric::LandArea),
            4 => Some(Metric::Population),
            5 => Some(Metric::NodesPerGdp),
            6 => Some(Metric::NodesPerLandArea),
            7 => Some(Metric::NodesPerPopulation),
            8 => Some(Metric::NodesPerGdpStdev),
            9 => Some(Metric::NodesPerLandAreaStdev),
            10 => Some(Metric::NodesPerPopulationStdev),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Definition table entry for this metric
    pub fn def(self) -> &'static MetricDef {
        &METRIC_TABLE[self as usize - 1]
    }
}

fn nodes(r: &EnrichedCountryRecord) -> f64 {
    r.nodes as f64
}

fn gdp_floored(r: &EnrichedCountryRecord) -> f64 {
    r.gdp.max(1.0)
}

fn land_area_floored(r: &EnrichedCountryRecord) -> f64 {
    r.land_area.max(1.0)
}

fn population_floored(r: &EnrichedCountryRecord) -> f64 {
    (r.population as f64).max(1.0)
}

fn nodes_per_gdp(r: &EnrichedCountryRecord) -> f64 {
    r.nodes as f64 / r.gdp * PER_TRILLION_GDP
}

fn nodes_per_land_area(r: &EnrichedCountryRecord) -> f64 {
    r.nodes as f64 / r.land_area * PER_MILLION
}

fn nodes_per_population(r: &EnrichedCountryRecord) -> f64 {
    r.nodes as f64 / r.population as f64 * PER_MILLION
}

/// The ten metric definitions, indexed by id - 1
pub const METRIC_TABLE: [MetricDef; 10] = [
    // 1: raw node count
    MetricDef {
        value: nodes,
        zero_is_invalid: true,
        standardize: false,
        scale: ScaleType::Logarithmic,
        color: LOG_RAMP,
        legend: "Nodes",
        tooltip: "Country: {point.name}<br> Nodes: {point.value}",
    },
    // 2: GDP, floored at 1 so the log scale never sees zero
    MetricDef {
        value: gdp_floored,
        zero_is_invalid: false,
        standardize: false,
        scale: ScaleType::Logarithmic,
        color: LOG_RAMP,
        legend: "GDP (Billions USD)",
        tooltip: "Country: {point.name}<br> GDP: {point.value} $bn USD",
    },
    // 3: land area, floored at 1
    MetricDef {
        value: land_area_floored,
        zero_is_invalid: false,
        standardize: false,
        scale: ScaleType::Logarithmic,
        color: LOG_RAMP,
        legend: "Land Area (km²)",
        tooltip: "Country: {point.name}<br> Land Area: {point.value} km²",
    },
    // 4: population, floored at 1
    MetricDef {
        value: population_floored,
        zero_is_invalid: false,
        standardize: false,
        scale: ScaleType::Logarithmic,
        color: LOG_RAMP,
        legend: "Population",
        tooltip: "Country: {point.name}<br> Population: {point.value}",
    },
    // 5: nodes per $trillion GDP
    MetricDef {
        value: nodes_per_gdp,
        zero_is_invalid: true,
        standardize: false,
        scale: ScaleType::Logarithmic,
        color: LOG_RAMP,
        legend: "Nodes per $trillion USD GDP",
        tooltip: "Country: {point.name}<br> Value: {point.value}",
    },
    // 6: nodes per 1,000,000 km²
    MetricDef {
        value: nodes_per_land_area,
        zero_is_invalid: true,
        standardize: false,
        scale: ScaleType::Logarithmic,
        color: LOG_RAMP,
        legend: "Nodes per 1,000,000 km²",
        tooltip: "Country: {point.name}<br> Value: {point.value}",
    },
    // 7: nodes per 1,000,000 people
    MetricDef {
        value: nodes_per_population,
        zero_is_invalid: true,
        standardize: false,
        scale: ScaleType::Logarithmic,
        color: LOG_RAMP,
        legend: "Nodes per 1,000,000 people",
        tooltip: "Country: {point.name}<br> Value: {point.value}",
    },
    // 8: nodes/GDP z-score
    MetricDef {
        value: nodes_per_gdp,
        zero_is_invalid: false,
        standardize: true,
        scale: ScaleType::Linear,
        color: ColorScale::Stops(STDEV_STOPS),
        legend: "Nodes per $trillion USD GDP - number of stdevs from mean",
        tooltip: "Country: {point.name}<br> #Std Dev from mean: {point.value}",
    },
    // 9: nodes/land z-score
    MetricDef {
        value: nodes_per_land_area,
        zero_is_invalid: false,
        standardize: true,
        scale: ScaleType::Linear,
        color: ColorScale::Stops(STDEV_STOPS),
        legend: "Nodes per 1,000,000 km² - number of stdevs from mean",
        tooltip: "Country: {point.name}<br> #Std Dev from mean: {point.value}",
    },
    // 10: nodes/population z-score
    MetricDef {
        value: nodes_per_population,
        zero_is_invalid: false,
        standardize: true,
        scale: ScaleType::Linear,
        color: ColorScale::Stops(STDEV_STOPS),
        legend: "Nodes per 1,000,000 people - number of stdevs from mean",
        tooltip: "Country: {point.name}<br> #Std Dev from mean: {point.value}",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn record(nodes: u64, gdp: f64, population: u64, land_area: f64) -> EnrichedCountryRecord {
        EnrichedCountryRecord {
            country_code: "TST".to_string(),
            country_name: "Test".to_string(),
            gdp,
            population,
            land_area,
            nodes,
        }
    }

    #[test]
    fn test_from_id_covers_full_range() {
        assert!(Metric::from_id(0).is_none());
        assert!(Metric::from_id(11).is_none());
        for id in 1..=10 {
            let metric = Metric::from_id(id).unwrap();
            assert_eq!(metric.id(), id);
        }
    }

    #[test]
    fn test_standardized_metrics_are_linear_with_stops() {
        for metric in Metric::ALL {
            let def = metric.def();
            if def.standardize {
                assert_eq!(def.scale, ScaleType::Linear, "{:?}", metric);
                assert_eq!(def.color, ColorScale::Stops(STDEV_STOPS), "{:?}", metric);
                assert!(!def.zero_is_invalid, "{:?}", metric);
            } else {
                assert_eq!(def.scale, ScaleType::Logarithmic, "{:?}", metric);
                assert_eq!(def.color, LOG_RAMP, "{:?}", metric);
            }
        }
    }

    #[test]
    fn test_floored_metrics_never_below_one() {
        let r = record(0, 0.0, 0, 0.0);
        assert_eq!((Metric::Gdp.def().value)(&r), 1.0);
        assert_eq!((Metric::LandArea.def().value)(&r), 1.0);
        assert_eq!((Metric::Population.def().value)(&r), 1.0);
    }

    #[test]
    fn test_ratio_scale_factors() {
        let r = record(10, 2000.0, 50_000_000, 500_000.0);
        assert_eq!((Metric::NodesPerGdp.def().value)(&r), 5.0);
        assert_eq!((Metric::NodesPerLandArea.def().value)(&r), 20.0);
        let per_capita = (Metric::NodesPerPopulation.def().value)(&r);
        assert!((per_capita - 0.2).abs() < 1e-12, "{}", per_capita);
    }

    #[test]
    fn test_zero_denominator_is_non_finite() {
        let r = record(10, 0.0, 0, 0.0);
        assert!(!(Metric::NodesPerGdp.def().value)(&r).is_finite());
        assert!(!(Metric::NodesPerLandArea.def().value)(&r).is_finite());
        assert!(!(Metric::NodesPerPopulation.def().value)(&r).is_finite());

        // 0/0 is NaN rather than infinity, still non-finite
        let r = record(0, 0.0, 0, 0.0);
        assert!((Metric::NodesPerGdp.def().value)(&r).is_nan());
    }

    #[test]
    fn test_stdev_stops_span_domain() {
        assert_eq!(STDEV_STOPS.len(), 4);
        assert_eq!(STDEV_STOPS[0], (0.0, "#ff0000"));
        assert_eq!(STDEV_STOPS[3], (1.0, "#0000ff"));
    }
}
