use std::path::PathBuf;

use crate::constants::chunking::DEFAULT_MEMORY_CEILING_MB;
use crate::constants::records::DEFAULT_DELIMITER;
use crate::errors::PairCountError;

/// Configuration for a single aggregation run.
///
/// All values are static for the duration of the run; the engine never
/// re-reads configuration mid-loop.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Path to the headerless `(basket_id, product_id)` input table.
    pub input_path: PathBuf,
    /// Path where the sorted results table is written.
    pub output_path: PathBuf,
    /// Simulated upper bound (MB) applied to probed available memory.
    pub memory_ceiling_mb: f64,
    /// Field delimiter shared by the input and output tables.
    pub delimiter: u8,
}

impl EngineConfig {
    /// Create a config with explicit input and output locations.
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            memory_ceiling_mb: DEFAULT_MEMORY_CEILING_MB,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Override the simulated memory ceiling.
    pub fn with_memory_ceiling_mb(mut self, memory_ceiling_mb: f64) -> Self {
        self.memory_ceiling_mb = memory_ceiling_mb;
        self
    }

    /// Override the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Reject configurations the batch planner cannot work with.
    pub fn validate(&self) -> Result<(), PairCountError> {
        if !self.memory_ceiling_mb.is_finite() || self.memory_ceiling_mb <= 0.0 {
            return Err(PairCountError::Configuration(format!(
                "memory ceiling must be a positive number of megabytes, got {}",
                self.memory_ceiling_mb
            )));
        }
        Ok(())
    }
}
