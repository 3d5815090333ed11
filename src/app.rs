//! CLI runner shared by the `basket-pairs` binary.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, error::ErrorKind};

use crate::config::EngineConfig;
use crate::constants::chunking::DEFAULT_MEMORY_CEILING_MB;
use crate::engine::{PairCountEngine, RunSummary};
use crate::memory::SystemMemoryProbe;
use crate::metrics::format_count_with_commas;

#[derive(Debug, Parser)]
#[command(
    name = "basket-pairs",
    disable_help_subcommand = true,
    about = "Count product pair co-occurrence across transaction baskets",
    long_about = "Stream a delimited basket/product table in memory-bounded batches and write a sorted table of pairwise basket co-occurrence counts."
)]
struct PairCountCli {
    #[arg(
        value_name = "INPUT",
        help = "Path to the headerless (basket_id, product_id) input table"
    )]
    input: PathBuf,
    #[arg(value_name = "OUTPUT", help = "Path for the results table")]
    output: PathBuf,
    #[arg(
        long = "memory-ceiling-mb",
        value_name = "MB",
        default_value_t = DEFAULT_MEMORY_CEILING_MB,
        value_parser = parse_positive_mb,
        help = "Simulated memory ceiling (MB) applied to the probed available memory"
    )]
    memory_ceiling_mb: f64,
    #[arg(
        long,
        value_name = "CHAR",
        default_value = ",",
        value_parser = parse_delimiter,
        help = "Single-character field delimiter shared by input and output tables"
    )]
    delimiter: u8,
    #[arg(
        long = "summary-json",
        help = "Print the run summary as JSON instead of the text report"
    )]
    summary_json: bool,
}

/// Run the co-occurrence pipeline from CLI arguments.
pub fn run_pair_count_app<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<PairCountCli, _>(
        std::iter::once("basket-pairs".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let config = EngineConfig::new(cli.input, cli.output)
        .with_memory_ceiling_mb(cli.memory_ceiling_mb)
        .with_delimiter(cli.delimiter);
    let output_path = config.output_path.clone();
    let summary = PairCountEngine::new(config).run(&SystemMemoryProbe)?;

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&summary, &output_path);
    }
    Ok(())
}

fn print_report(summary: &RunSummary, output_path: &Path) {
    println!(
        "Processed {} batch(es) of up to {} records (effective memory {:.1} MB).",
        summary.batches, summary.batch_size, summary.effective_memory_mb
    );
    println!(
        "  rows read:      {}",
        format_count_with_commas(summary.rows_read as u64)
    );
    println!(
        "  records kept:   {} ({} malformed, {} invalid)",
        format_count_with_commas(summary.records_kept as u64),
        format_count_with_commas(summary.malformed_rows as u64),
        format_count_with_commas(summary.invalid_rows as u64)
    );
    println!(
        "  basket groups:  {}",
        format_count_with_commas(summary.baskets_grouped as u64)
    );
    println!(
        "  distinct pairs: {}",
        format_count_with_commas(summary.distinct_pairs as u64)
    );
    if summary.failed_batches > 0 {
        println!("  failed batches: {}", summary.failed_batches);
    }
    println!("Results written to {}", output_path.display());
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

fn parse_positive_mb(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid memory ceiling '{raw}': must be a number of megabytes"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!(
            "invalid memory ceiling '{raw}': must be a positive number of megabytes"
        ));
    }
    Ok(value)
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    let mut bytes = raw.bytes();
    match (bytes.next(), bytes.next()) {
        (Some(byte), None) if byte.is_ascii() => Ok(byte),
        _ => Err(format!(
            "invalid delimiter '{raw}': must be a single ASCII character"
        )),
    }
}
