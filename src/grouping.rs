//! Per-batch basket grouping.
//!
//! Grouping is scoped to a single batch: records sharing a basket id that
//! arrive in different batches are grouped independently, so a basket split
//! across a batch boundary contributes two disjoint partial sets (see
//! `PairCountEngine` for the resulting counting caveat).

use std::collections::{BTreeSet, HashMap};

use crate::data::ProductRecord;
use crate::types::{BasketId, ProductId};

/// Per-batch mapping from basket id to its deduplicated product set.
pub type BasketGroups = HashMap<BasketId, BTreeSet<ProductId>>;

/// Group one batch of validated records by basket id.
///
/// Repeated `(basket, product)` rows collapse into a single set member, so a
/// duplicate listing cannot inflate that basket's pair contributions.
/// `BTreeSet` iteration is ascending, which downstream pair expansion relies
/// on for canonical key order.
pub fn group_by_basket(records: &[ProductRecord]) -> BasketGroups {
    let mut baskets: BasketGroups = HashMap::new();
    for record in records {
        baskets
            .entry(record.basket.clone())
            .or_default()
            .insert(record.product);
    }
    baskets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_records_by_basket_id() {
        let records = vec![
            ProductRecord::new("b1", 3),
            ProductRecord::new("b2", 1),
            ProductRecord::new("b1", 1),
            ProductRecord::new("b2", 2),
        ];
        let groups = group_by_basket(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups["b1"].iter().copied().collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(
            groups["b2"].iter().copied().collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn duplicate_products_collapse_into_one_member() {
        let records = vec![
            ProductRecord::new("b1", 7),
            ProductRecord::new("b1", 7),
            ProductRecord::new("b1", 9),
        ];
        let groups = group_by_basket(&records);
        assert_eq!(groups["b1"].len(), 2);
    }

    #[test]
    fn empty_batch_yields_no_groups() {
        assert!(group_by_basket(&[]).is_empty());
    }
}
