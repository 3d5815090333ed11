/// Constants used by memory-aware batch sizing.
pub mod chunking {
    /// Default simulated memory ceiling (MB) applied to the probed value.
    pub const DEFAULT_MEMORY_CEILING_MB: f64 = 50.0;
    /// Effective memory (MB) below which the low-memory batch size applies.
    pub const LOW_MEMORY_THRESHOLD_MB: f64 = 20.0;
    /// Effective memory (MB) below which the moderate batch size applies.
    pub const MODERATE_MEMORY_THRESHOLD_MB: f64 = 40.0;
    /// Divisor applied to effective memory when deriving the low-memory batch size.
    pub const LOW_MEMORY_DIVISOR: f64 = 5.0;
    /// Smallest batch size the engine will ever use.
    pub const MIN_BATCH_RECORDS: usize = 100;
    /// Batch size used under moderate memory pressure.
    pub const MODERATE_BATCH_RECORDS: usize = 500;
    /// Batch size used when effective memory is unconstrained.
    pub const DEFAULT_BATCH_RECORDS: usize = 2000;
}

/// Constants used by record decoding and validity filtering.
pub mod records {
    /// Token treated as a missing value in addition to blank fields.
    pub const MISSING_TOKEN: &str = "NA";
    /// Default field delimiter for the input and output tables.
    pub const DEFAULT_DELIMITER: u8 = b',';
    /// Field count every input row must carry.
    pub const EXPECTED_FIELDS: usize = 2;
}

/// Constants used by the engine loop.
pub mod engine {
    /// Consecutive failed batches tolerated before the run stops reading.
    pub const MAX_CONSECUTIVE_BATCH_FAILURES: usize = 3;
}

/// Constants used by result serialization.
pub mod output {
    /// Column header emitted for the results table.
    pub const OUTPUT_COLUMNS: [&str; 3] = ["product_1", "product_2", "baskets"];
}
