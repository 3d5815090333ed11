//! Headerless delimited-file record source.

use std::fs::{self, File};
use std::path::Path;

use csv::{ReaderBuilder, StringRecordsIntoIter};

use crate::constants::records::{EXPECTED_FIELDS, MISSING_TOKEN};
use crate::data::{ProductRecord, RecordBatch};
use crate::errors::PairCountError;
use crate::source::RecordSource;
use crate::types::{ProductId, SourceId};

/// Streaming reader over a headerless `(basket_id, product_id)` table.
///
/// Validation happens at two levels. The file must exist and be non-empty
/// before the first batch (`SourceNotFound` / `SourceEmpty`). After that,
/// every row is checked against the two-column contract and the validity
/// filter; row-level failures are skipped and tallied, never fatal.
/// Reopening the same path restarts the stream from the beginning.
pub struct DelimitedFileSource {
    id: SourceId,
    rows: StringRecordsIntoIter<File>,
    batch_index: usize,
    finished: bool,
}

impl DelimitedFileSource {
    /// Open `path`, validating existence and non-emptiness up front.
    pub fn open(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, PairCountError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|_| PairCountError::SourceNotFound {
            path: path.to_path_buf(),
        })?;
        if metadata.len() == 0 {
            return Err(PairCountError::SourceEmpty {
                path: path.to_path_buf(),
            });
        }
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_path(path)?;
        Ok(Self {
            id: path.display().to_string(),
            rows: reader.into_records(),
            batch_index: 0,
            finished: false,
        })
    }
}

impl RecordSource for DelimitedFileSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn next_batch(&mut self, limit: usize) -> Result<Option<RecordBatch>, PairCountError> {
        if self.finished {
            return Ok(None);
        }
        self.batch_index += 1;
        let mut batch = RecordBatch::default();
        // The batch bound counts raw rows, not surviving records, so the
        // memory proxy holds even when most rows are filtered out.
        while batch.rows_read < limit.max(1) {
            match self.rows.next() {
                None => {
                    self.finished = true;
                    break;
                }
                Some(Ok(row)) => {
                    batch.rows_read += 1;
                    if row.len() != EXPECTED_FIELDS {
                        batch.malformed += 1;
                        continue;
                    }
                    let basket = present_field(row.get(0).unwrap_or(""));
                    let product = parse_product_id(row.get(1).unwrap_or(""));
                    match (basket, product) {
                        (Some(basket), Some(product)) => {
                            batch.records.push(ProductRecord::new(basket, product));
                        }
                        _ => batch.invalid += 1,
                    }
                }
                Some(Err(err)) => {
                    if err.is_io_error() {
                        // Transport failure: poison this batch and end the
                        // stream so the engine cannot reread the same fault.
                        self.finished = true;
                        return Err(PairCountError::BatchFailed {
                            batch: self.batch_index,
                            reason: err.to_string(),
                        });
                    }
                    batch.rows_read += 1;
                    batch.malformed += 1;
                }
            }
        }
        if batch.is_empty() && self.finished {
            return Ok(None);
        }
        Ok(Some(batch))
    }
}

/// Normalize one field, treating blank, whitespace-only, and `NA` tokens as
/// missing.
fn present_field(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == MISSING_TOKEN {
        None
    } else {
        Some(trimmed)
    }
}

/// Parse a product id from a loosely-typed numeric field.
///
/// Integer literals and float literals with a zero fractional part both
/// parse (`"7"` and `"7.0"` yield 7). Missing, unparseable, and
/// non-positive values are all invalid.
fn parse_product_id(raw: &str) -> Option<ProductId> {
    let token = present_field(raw)?;
    let value = match token.parse::<ProductId>() {
        Ok(value) => value,
        Err(_) => {
            let float = token.parse::<f64>().ok()?;
            if !float.is_finite() || float.fract() != 0.0 || float.abs() >= i64::MAX as f64 {
                return None;
            }
            float as ProductId
        }
    };
    (value > 0).then_some(value)
}
