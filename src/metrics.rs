use crate::pairs::PairCountMap;
use crate::types::{BasketCount, PairKey};

/// Aggregate skew metrics over accumulated pair counts.
#[derive(Clone, Debug, PartialEq)]
pub struct PairSkew {
    pub total: BasketCount,
    pub pairs: usize,
    pub min: BasketCount,
    pub max: BasketCount,
    pub mean: f64,
    pub max_share: f64,
    pub per_pair: Vec<PairShare>,
}

/// Per-pair share of the total co-occurrence mass.
#[derive(Clone, Debug, PartialEq)]
pub struct PairShare {
    pub pair: PairKey,
    pub baskets: BasketCount,
    pub share: f64,
}

/// Compute skew metrics from final pair counts.
/// `per_pair` is sorted by descending count, then ascending pair key.
pub fn pair_skew(counts: &PairCountMap) -> Option<PairSkew> {
    if counts.is_empty() {
        return None;
    }
    let total: BasketCount = counts.values().sum();
    let pairs = counts.len();
    let min = *counts.values().min().expect("counts non-empty");
    let max = *counts.values().max().expect("counts non-empty");
    let mean = total as f64 / pairs as f64;
    let max_share = if total == 0 {
        0.0
    } else {
        max as f64 / total as f64
    };
    let mut per_pair: Vec<PairShare> = counts
        .iter()
        .map(|(pair, baskets)| PairShare {
            pair: *pair,
            baskets: *baskets,
            share: if total == 0 {
                0.0
            } else {
                *baskets as f64 / total as f64
            },
        })
        .collect();
    per_pair.sort_by(|a, b| b.baskets.cmp(&a.baskets).then_with(|| a.pair.cmp(&b.pair)));
    Some(PairSkew {
        total,
        pairs,
        min,
        max,
        mean,
        max_share,
        per_pair,
    })
}

/// Group a count with commas for report output.
pub fn format_count_with_commas(value: u64) -> String {
    let raw = value.to_string();
    let mut grouped_reversed = String::with_capacity(raw.len() + (raw.len() / 3));
    for (idx, ch) in raw.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped_reversed.push(',');
        }
        grouped_reversed.push(ch);
    }
    grouped_reversed.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn pair_skew_reports_balance() {
        let mut counts = HashMap::new();
        counts.insert((1, 2), 2);
        counts.insert((2, 3), 2);
        let skew = pair_skew(&counts).expect("skew");
        assert_eq!(skew.total, 4);
        assert_eq!(skew.pairs, 2);
        assert_eq!(skew.min, 2);
        assert_eq!(skew.max, 2);
        assert!((skew.max_share - 0.5).abs() < 1e-6);
        assert!(
            skew.per_pair
                .iter()
                .all(|entry| (entry.share - 0.5).abs() < 1e-6)
        );
    }

    #[test]
    fn pair_skew_reports_imbalance_in_stable_order() {
        let mut counts = HashMap::new();
        counts.insert((1, 2), 4);
        counts.insert((1, 3), 2);
        counts.insert((2, 3), 2);
        let skew = pair_skew(&counts).expect("skew");
        assert_eq!(skew.total, 8);
        assert_eq!(skew.max, 4);
        assert_eq!(skew.per_pair[0].pair, (1, 2));
        assert_eq!(skew.per_pair[1].pair, (1, 3));
        assert_eq!(skew.per_pair[2].pair, (2, 3));
    }

    #[test]
    fn pair_skew_is_none_for_empty_counts() {
        assert!(pair_skew(&HashMap::new()).is_none());
    }

    #[test]
    fn formatting_is_stable() {
        assert_eq!(format_count_with_commas(0), "0");
        assert_eq!(format_count_with_commas(999), "999");
        assert_eq!(format_count_with_commas(1_234_567), "1,234,567");
    }
}
