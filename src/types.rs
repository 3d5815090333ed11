/// Transaction basket identifier as read from the input table.
/// Examples: `b1`, `store7:2024-03-15:txn-0012`
pub type BasketId = String;
/// Validated product identifier (strictly positive).
/// Examples: `3`, `10442`
pub type ProductId = i64;
/// Number of baskets in which a product pair co-occurred.
pub type BasketCount = u64;
/// Canonical unordered product pair, smaller id first.
/// Example: `(3, 5)` for products 5 and 3 in one basket
pub type PairKey = (ProductId, ProductId);
/// Identifier for the source that produced a batch, used in logs and summaries.
/// Examples: `baskets.csv`, `in_memory`
pub type SourceId = String;
