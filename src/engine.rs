//! Streaming aggregation engine.
//!
//! One sequential pass: read batch, group, accumulate, repeat, then
//! serialize. Batching exists solely to bound peak memory; there is no
//! overlap between batches and no parallel workers, and the count map has a
//! single owner for the whole run.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::constants::engine::MAX_CONSECUTIVE_BATCH_FAILURES;
use crate::errors::PairCountError;
use crate::grouping::group_by_basket;
use crate::heuristics::{BatchPlan, plan_batches};
use crate::memory::MemoryProbe;
use crate::metrics::pair_skew;
use crate::output::write_results;
use crate::pairs::PairAccumulator;
use crate::source::{DelimitedFileSource, RecordSource};

/// Summary of one completed run.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    /// Raw probed available memory (MB).
    pub available_memory_mb: f64,
    /// Probe capped by the configured ceiling (MB).
    pub effective_memory_mb: f64,
    /// Records per batch used for the whole run.
    pub batch_size: usize,
    /// Batches processed, including batches emptied by filtering.
    pub batches: usize,
    /// Batches that failed and contributed nothing.
    pub failed_batches: usize,
    /// Raw rows consumed from the source.
    pub rows_read: usize,
    /// Rows that failed the two-column contract.
    pub malformed_rows: usize,
    /// Rows dropped by the validity filter.
    pub invalid_rows: usize,
    /// Records that survived filtering.
    pub records_kept: usize,
    /// Basket groups observed across all batches, at per-batch granularity.
    pub baskets_grouped: usize,
    /// Distinct canonical pairs accumulated.
    pub distinct_pairs: usize,
    /// Rows written to the results table.
    pub output_rows: usize,
}

impl RunSummary {
    fn new(plan: &BatchPlan) -> Self {
        Self {
            available_memory_mb: plan.available_mb,
            effective_memory_mb: plan.effective_mb,
            batch_size: plan.batch_size,
            batches: 0,
            failed_batches: 0,
            rows_read: 0,
            malformed_rows: 0,
            invalid_rows: 0,
            records_kept: 0,
            baskets_grouped: 0,
            distinct_pairs: 0,
            output_rows: 0,
        }
    }
}

/// Single-run co-occurrence pipeline.
///
/// Known limitation: baskets are grouped within each batch independently.
/// If one basket's rows straddle a batch boundary, pairs whose members land
/// in different batches are not counted for that basket, and a pair whose
/// members repeat in both fragments is counted once per fragment. Counts
/// are exact when the input is grouped by basket id or when the batch size
/// exceeds the largest basket. The engine does not re-buffer partial
/// baskets across batch boundaries.
pub struct PairCountEngine {
    config: EngineConfig,
}

impl PairCountEngine {
    /// Create an engine for one configured run.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Borrow the run configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline against the configured input table.
    pub fn run(&self, probe: &dyn MemoryProbe) -> Result<RunSummary, PairCountError> {
        self.config.validate()?;
        let mut source = DelimitedFileSource::open(&self.config.input_path, self.config.delimiter)?;
        self.run_with_source(probe, &mut source)
    }

    /// Run the pipeline against an explicit source.
    ///
    /// The memory probe is consumed exactly once, before the first batch;
    /// the resulting batch size holds for the entire run.
    pub fn run_with_source(
        &self,
        probe: &dyn MemoryProbe,
        source: &mut dyn RecordSource,
    ) -> Result<RunSummary, PairCountError> {
        self.config.validate()?;
        let plan = plan_batches(probe.available_mb(), self.config.memory_ceiling_mb);
        info!(
            source = source.id(),
            available_mb = plan.available_mb,
            effective_mb = plan.effective_mb,
            batch_size = plan.batch_size,
            "planned batch size from memory probe"
        );

        let mut summary = RunSummary::new(&plan);
        let mut accumulator = PairAccumulator::new();
        let mut consecutive_failures = 0usize;
        loop {
            match source.next_batch(plan.batch_size) {
                Ok(None) => break,
                Ok(Some(batch)) => {
                    consecutive_failures = 0;
                    summary.batches += 1;
                    summary.rows_read += batch.rows_read;
                    summary.malformed_rows += batch.malformed;
                    summary.invalid_rows += batch.invalid;
                    summary.records_kept += batch.records.len();
                    let baskets = group_by_basket(&batch.records);
                    summary.baskets_grouped += baskets.len();
                    accumulator.accumulate(&baskets);
                    debug!(
                        batch = summary.batches,
                        rows = batch.rows_read,
                        records = batch.records.len(),
                        baskets = baskets.len(),
                        "processed batch"
                    );
                }
                Err(err) => {
                    // A poisoned batch contributes nothing but does not
                    // abort the run.
                    summary.failed_batches += 1;
                    consecutive_failures += 1;
                    warn!(
                        source = source.id(),
                        error = %err,
                        "batch failed, continuing with empty contribution"
                    );
                    if consecutive_failures >= MAX_CONSECUTIVE_BATCH_FAILURES {
                        warn!(
                            source = source.id(),
                            failures = consecutive_failures,
                            "stopping reads after consecutive batch failures"
                        );
                        break;
                    }
                }
            }
        }

        if summary.records_kept == 0 {
            return Err(PairCountError::NoDataProcessed);
        }

        summary.distinct_pairs = accumulator.len();
        if let Some(skew) = pair_skew(accumulator.counts()) {
            debug!(
                pairs = skew.pairs,
                total = skew.total,
                max_share = skew.max_share,
                "pair count distribution"
            );
        }
        summary.output_rows =
            write_results(accumulator.counts(), &self.config.output_path, self.config.delimiter)?;
        info!(
            batches = summary.batches,
            records = summary.records_kept,
            baskets = summary.baskets_grouped,
            pairs = summary.distinct_pairs,
            output = %self.config.output_path.display(),
            "run complete"
        );
        Ok(summary)
    }
}
