use crate::model::product::{OriginCount, finite_or_zero};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const NO_ORIGIN: &str = "N/A";

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    #[schema(example = 3)]
    pub total: i64,
    #[schema(example = 21.5)]
    pub avg_price: f64,
    #[schema(example = "Brazil")]
    pub popular_origin: String,
}

impl CatalogStats {
    pub fn compute(prices: &[f64], origins: &[OriginCount]) -> Self {
        let total = prices.len() as i64;

        let avg_price = if prices.is_empty() {
            0.0
        } else {
            let sum: f64 = prices.iter().copied().map(finite_or_zero).sum();
            round_to_cents(sum / prices.len() as f64)
        };

        let popular_origin = popular_origin(origins)
            .unwrap_or(NO_ORIGIN)
            .to_string();

        Self {
            total,
            avg_price,
            popular_origin,
        }
    }
}

/// Most frequent origin; on a tie the one listed first wins, so callers pass
/// counts in first-seen order.
pub fn popular_origin(origins: &[OriginCount]) -> Option<&str> {
    let mut best: Option<&OriginCount> = None;

    for candidate in origins
        .iter()
        .filter(|c| c.count > 0 && !c.origin.is_empty())
    {
        if best.is_none_or(|b| candidate.count > b.count) {
            best = Some(candidate);
        }
    }

    best.map(|c| c.origin.as_str())
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, i64)]) -> Vec<OriginCount> {
        pairs
            .iter()
            .map(|(origin, count)| OriginCount {
                origin: origin.to_string(),
                count: *count,
            })
            .collect()
    }

    #[test]
    fn empty_catalog_has_zero_average_and_no_origin() {
        let stats = CatalogStats::compute(&[], &[]);
        assert_eq!(
            stats,
            CatalogStats {
                total: 0,
                avg_price: 0.0,
                popular_origin: "N/A".into(),
            }
        );
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        let stats = CatalogStats::compute(&[10.0, 10.0, 10.01], &[]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.avg_price, 10.0);

        let stats = CatalogStats::compute(&[12.345, 12.345], &[]);
        assert_eq!(stats.avg_price, round_to_cents(12.345));
    }

    #[test]
    fn non_finite_prices_count_as_zero() {
        let stats = CatalogStats::compute(&[f64::NAN, 10.0], &[]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.avg_price, 5.0);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["avgPrice"], 5.0);
    }

    #[test]
    fn most_frequent_origin_wins() {
        let origins = counts(&[("Colombia", 1), ("Brazil", 2)]);
        assert_eq!(popular_origin(&origins), Some("Brazil"));
    }

    #[test]
    fn ties_go_to_the_first_seen_origin() {
        let origins = counts(&[("Ethiopia", 2), ("Kenya", 2), ("Peru", 1)]);
        assert_eq!(popular_origin(&origins), Some("Ethiopia"));
    }

    #[test]
    fn empty_origins_are_ignored() {
        let origins = counts(&[("", 5), ("Peru", 1)]);
        assert_eq!(popular_origin(&origins), Some("Peru"));
        assert_eq!(popular_origin(&counts(&[("", 3)])), None);
    }
}
