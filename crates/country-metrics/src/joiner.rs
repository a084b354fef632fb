//! Left-join of node counts onto country statistics
//!
//! Runs once per raw-data load; the enriched records are reused across
//! metric selections and must not be mutated afterwards.

use crate::{CountryStatRecord, EnrichedCountryRecord, NodeCountRecord};
use std::collections::HashMap;
use tracing::info;

/// Merge node counts into country statistics, one output record per
/// statistic record in input order.
///
/// Node counts sharing a country code are summed. Codes with no matching
/// statistic record are dropped silently: the statistics source does not
/// recognize every territory (e.g. Taiwan), and there is nothing to join
/// them onto.
pub fn join(
    node_counts: &[NodeCountRecord],
    country_stats: &[CountryStatRecord],
) -> Vec<EnrichedCountryRecord> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for rec in node_counts {
        *totals.entry(rec.country_code.as_str()).or_insert(0) += rec.count;
    }

    let enriched: Vec<EnrichedCountryRecord> = country_stats
        .iter()
        .map(|c| EnrichedCountryRecord {
            country_code: c.country_code.clone(),
            country_name: c.country_name.clone(),
            gdp: c.gdp,
            population: c.population,
            land_area: c.land_area,
            nodes: totals.get(c.country_code.as_str()).copied().unwrap_or(0),
        })
        .collect();

    let matched = enriched.iter().filter(|e| e.nodes > 0).count();
    info!(
        "Joined {} node records onto {} countries ({} with nodes)",
        node_counts.len(),
        enriched.len(),
        matched
    );

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(code: &str, count: u64) -> NodeCountRecord {
        NodeCountRecord {
            country_code: code.to_string(),
            count,
        }
    }

    fn stat(code: &str, name: &str, gdp: f64, population: u64, land_area: f64) -> CountryStatRecord {
        CountryStatRecord {
            country_code: code.to_string(),
            country_name: name.to_string(),
            gdp,
            population,
            land_area,
        }
    }

    fn fixture_stats() -> Vec<CountryStatRecord> {
        vec![
            stat("USA", "United States", 25000.0, 330_000_000, 9_834_000.0),
            stat("DEU", "Germany", 4000.0, 83_000_000, 357_000.0),
            stat("FRA", "France", 2800.0, 67_000_000, 549_000.0),
        ]
    }

    #[test]
    fn test_counts_summed_and_defaulted() {
        let nodes = vec![node("USA", 10), node("USA", 5), node("DEU", 3)];
        let enriched = join(&nodes, &fixture_stats());

        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].nodes, 15);
        assert_eq!(enriched[1].nodes, 3);
        assert_eq!(enriched[2].nodes, 0);
    }

    #[test]
    fn test_one_record_per_stat_in_input_order() {
        let enriched = join(&[], &fixture_stats());
        let codes: Vec<&str> = enriched.iter().map(|e| e.country_code.as_str()).collect();
        assert_eq!(codes, vec!["USA", "DEU", "FRA"]);
    }

    #[test]
    fn test_unrecognized_codes_dropped() {
        // TWN is absent from the statistics source
        let nodes = vec![node("TWN", 40), node("DEU", 1)];
        let enriched = join(&nodes, &fixture_stats());

        assert_eq!(enriched.len(), 3);
        assert!(enriched.iter().all(|e| e.country_code != "TWN"));
        assert_eq!(enriched[1].nodes, 1);
    }

    #[test]
    fn test_stat_fields_copied_through() {
        let enriched = join(&[node("DEU", 7)], &fixture_stats());
        let deu = &enriched[1];
        assert_eq!(deu.country_name, "Germany");
        assert_eq!(deu.gdp, 4000.0);
        assert_eq!(deu.population, 83_000_000);
        assert_eq!(deu.land_area, 357_000.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(join(&[], &[]).is_empty());
    }
}
