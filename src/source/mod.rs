//! Record source interfaces and built-in sources.
//!
//! Ownership model:
//! - `RecordSource` is the engine-facing interface that produces bounded
//!   batches of validated records.
//! - `DelimitedFileSource` decodes a headerless delimited table and applies
//!   the validity filter at the boundary.
//! - `InMemorySource` serves prebuilt records for tests and small datasets.

use crate::data::{ProductRecord, RecordBatch};
use crate::errors::PairCountError;
use crate::types::SourceId;

/// Delimited-file source implementation.
pub mod delimited;
pub use delimited::DelimitedFileSource;

/// Engine-facing record source.
///
/// Sources apply the validity filter before returning records: invalid rows
/// are tallied in batch stats and never reach grouping. Input order is
/// preserved within a batch. After a failed batch a source must either have
/// advanced past the failure or end its stream, so the engine can continue
/// without rereading the same fault.
pub trait RecordSource {
    /// Stable source identifier used in logs and summaries.
    fn id(&self) -> &str;

    /// Fetch up to `limit` validated records, or `Ok(None)` once exhausted.
    fn next_batch(&mut self, limit: usize) -> Result<Option<RecordBatch>, PairCountError>;
}

/// In-memory record source for tests and small datasets.
pub struct InMemorySource {
    id: SourceId,
    records: Vec<ProductRecord>,
    position: usize,
}

impl InMemorySource {
    /// Create an in-memory source from prebuilt records.
    pub fn new(id: impl Into<SourceId>, records: Vec<ProductRecord>) -> Self {
        Self {
            id: id.into(),
            records,
            position: 0,
        }
    }
}

impl RecordSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn next_batch(&mut self, limit: usize) -> Result<Option<RecordBatch>, PairCountError> {
        if self.position >= self.records.len() {
            return Ok(None);
        }
        let end = self.records.len().min(self.position + limit.max(1));
        let records = self.records[self.position..end].to_vec();
        self.position = end;
        Ok(Some(RecordBatch {
            rows_read: records.len(),
            records,
            malformed: 0,
            invalid: 0,
        }))
    }
}
