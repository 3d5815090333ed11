//! Memory-aware batch sizing.
//!
//! The batch size is a monotone proxy for memory pressure, not a hard
//! accounting mechanism: nothing enforces that a batch of `batch_size`
//! records fits in the effective megabytes, since record width is unknown
//! up front. Less memory simply means smaller batches and more iterations.

pub use crate::constants::chunking::{
    DEFAULT_BATCH_RECORDS, DEFAULT_MEMORY_CEILING_MB, LOW_MEMORY_DIVISOR,
    LOW_MEMORY_THRESHOLD_MB, MIN_BATCH_RECORDS, MODERATE_BATCH_RECORDS,
    MODERATE_MEMORY_THRESHOLD_MB,
};

/// Batch size decision derived from a single memory probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchPlan {
    /// Raw probed available memory (MB).
    pub available_mb: f64,
    /// Probe capped by the configured ceiling (MB).
    pub effective_mb: f64,
    /// Records per batch for the whole run.
    pub batch_size: usize,
}

/// Convert one memory sample into the batch plan used for the entire run.
///
/// The ceiling caps the probe before tiering, and tier boundaries are
/// strict less-than:
/// - effective < 20 MB: `max(100, floor(effective / 5))`
/// - effective < 40 MB: 500
/// - otherwise: 2000
pub fn plan_batches(available_mb: f64, ceiling_mb: f64) -> BatchPlan {
    let effective_mb = available_mb.min(ceiling_mb);
    let batch_size = if effective_mb < LOW_MEMORY_THRESHOLD_MB {
        let scaled = (effective_mb / LOW_MEMORY_DIVISOR).floor();
        let scaled = if scaled.is_finite() && scaled > 0.0 {
            scaled as usize
        } else {
            0
        };
        MIN_BATCH_RECORDS.max(scaled)
    } else if effective_mb < MODERATE_MEMORY_THRESHOLD_MB {
        MODERATE_BATCH_RECORDS
    } else {
        DEFAULT_BATCH_RECORDS
    };
    BatchPlan {
        available_mb,
        effective_mb,
        batch_size,
    }
}
