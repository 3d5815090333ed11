//! Result sorting and serialization.

use std::fmt::Display;
use std::path::Path;

use csv::WriterBuilder;
use tempfile::NamedTempFile;

use crate::constants::output::OUTPUT_COLUMNS;
use crate::data::ResultRow;
use crate::errors::PairCountError;
use crate::pairs::PairCountMap;

/// Produce output rows sorted ascending by `(product_1, product_2)`.
///
/// Rows with a non-positive leading id are dropped as a final invariant
/// check; upstream validation should make the filter unreachable.
pub fn sorted_rows(counts: &PairCountMap) -> Vec<ResultRow> {
    let mut rows: Vec<ResultRow> = counts
        .iter()
        .map(|(&(product_1, product_2), &baskets)| ResultRow {
            product_1,
            product_2,
            baskets,
        })
        .collect();
    rows.sort_by_key(|row| (row.product_1, row.product_2));
    rows.retain(|row| row.product_1 > 0);
    rows
}

/// Write the results table atomically and return the row count.
///
/// Rows are staged in a temp file in the destination directory and persisted
/// over `path` in one rename, so a failed write never leaves partial output
/// at the final location. Any sink failure surfaces as `WriteFailed`.
pub fn write_results(
    counts: &PairCountMap,
    path: &Path,
    delimiter: u8,
) -> Result<usize, PairCountError> {
    let rows = sorted_rows(counts);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(|err| write_failed(path, &err))?;
    {
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_writer(&mut staged);
        writer
            .write_record(OUTPUT_COLUMNS)
            .map_err(|err| write_failed(path, &err))?;
        for row in &rows {
            writer.serialize(row).map_err(|err| write_failed(path, &err))?;
        }
        writer.flush().map_err(|err| write_failed(path, &err))?;
    }
    staged.persist(path).map_err(|err| write_failed(path, &err))?;
    Ok(rows.len())
}

fn write_failed(path: &Path, err: &dyn Display) -> PairCountError {
    PairCountError::WriteFailed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
