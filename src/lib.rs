#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// CLI runner shared by the `basket-pairs` binary.
pub mod app;
/// Run configuration types.
pub mod config;
/// Centralized constants used across batch sizing, decoding, and output.
pub mod constants;
/// Input record, batch, and result row types.
pub mod data;
/// Streaming aggregation engine and run summary.
pub mod engine;
/// Per-batch basket grouping.
pub mod grouping;
/// Memory-aware batch sizing heuristics.
pub mod heuristics;
/// Host memory probing capability.
pub mod memory;
/// Aggregate metrics over accumulated pair counts.
pub mod metrics;
/// Result sorting and serialization.
pub mod output;
/// Pair canonicalization and the co-occurrence accumulator.
pub mod pairs;
/// Record source traits and built-in sources.
pub mod source;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::EngineConfig;
pub use data::{ProductRecord, RecordBatch, ResultRow};
pub use engine::{PairCountEngine, RunSummary};
pub use errors::PairCountError;
pub use heuristics::{BatchPlan, plan_batches};
pub use memory::{FixedMemoryProbe, MemoryProbe, SystemMemoryProbe};
pub use pairs::{PairAccumulator, PairCountMap, canonical_pair};
pub use source::{DelimitedFileSource, InMemorySource, RecordSource};
pub use types::{BasketCount, BasketId, PairKey, ProductId, SourceId};
