use serde::{Deserialize, Serialize};

pub use crate::types::{BasketCount, BasketId, ProductId};

/// One input record that survived the validity filter.
///
/// Invalid rows (missing basket id, missing or non-positive product id) are
/// dropped at the source boundary and never exist as `ProductRecord`s.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRecord {
    /// Basket this record belongs to.
    pub basket: BasketId,
    /// Validated product identifier, always `> 0`.
    pub product: ProductId,
}

impl ProductRecord {
    /// Convenience constructor used by sources and tests.
    pub fn new(basket: impl Into<BasketId>, product: ProductId) -> Self {
        Self {
            basket: basket.into(),
            product,
        }
    }
}

/// One decoded batch plus its row-level filtering stats.
#[derive(Clone, Debug, Default)]
pub struct RecordBatch {
    /// Records that passed the validity filter, in input order.
    pub records: Vec<ProductRecord>,
    /// Raw rows consumed from the source while filling this batch.
    pub rows_read: usize,
    /// Rows that failed the two-column contract.
    pub malformed: usize,
    /// Rows dropped by the validity filter (missing basket or invalid product id).
    pub invalid: usize,
}

impl RecordBatch {
    /// True when no raw rows were consumed at all.
    pub fn is_empty(&self) -> bool {
        self.rows_read == 0
    }
}

/// One row of the final results table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultRow {
    /// Smaller product id of the pair.
    pub product_1: ProductId,
    /// Larger product id of the pair.
    pub product_2: ProductId,
    /// Number of baskets in which both products appeared.
    pub baskets: BasketCount,
}
