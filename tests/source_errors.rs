use std::fs;

use tempfile::tempdir;

use basket_pairs::{
    EngineConfig, FixedMemoryProbe, PairCountEngine, PairCountError, ProductRecord, RecordBatch,
    RecordSource,
};

#[test]
fn missing_input_aborts_before_processing() {
    let temp = tempdir().unwrap();
    let output = temp.path().join("results.csv");
    let config = EngineConfig::new(temp.path().join("absent.csv"), &output);

    let result = PairCountEngine::new(config).run(&FixedMemoryProbe::new(100.0));
    assert!(matches!(
        result,
        Err(PairCountError::SourceNotFound { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn zero_byte_input_aborts_before_processing() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("empty.csv");
    fs::write(&input, "").unwrap();
    let output = temp.path().join("results.csv");

    let result = PairCountEngine::new(EngineConfig::new(&input, &output))
        .run(&FixedMemoryProbe::new(100.0));
    assert!(matches!(result, Err(PairCountError::SourceEmpty { .. })));
    assert!(!output.exists());
}

#[test]
fn all_invalid_input_is_no_data_processed_with_no_output() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("baskets.csv");
    fs::write(&input, "b1,NA\nb2,abc\nb3,0\nb4,-7\nb5,\n").unwrap();
    let output = temp.path().join("results.csv");

    let result = PairCountEngine::new(EngineConfig::new(&input, &output))
        .run(&FixedMemoryProbe::new(100.0));
    assert!(matches!(result, Err(PairCountError::NoDataProcessed)));
    assert!(!output.exists());
}

#[test]
fn unwritable_output_is_write_failed() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("baskets.csv");
    fs::write(&input, "b1,1\nb1,2\n").unwrap();
    let output = temp.path().join("no_such_dir").join("results.csv");

    let result = PairCountEngine::new(EngineConfig::new(&input, &output))
        .run(&FixedMemoryProbe::new(100.0));
    assert!(matches!(result, Err(PairCountError::WriteFailed { .. })));
    assert!(!output.exists());
}

/// Source that fails one mid-run batch and then recovers.
struct FlakySource {
    calls: usize,
}

impl RecordSource for FlakySource {
    fn id(&self) -> &str {
        "flaky"
    }

    fn next_batch(&mut self, _limit: usize) -> Result<Option<RecordBatch>, PairCountError> {
        self.calls += 1;
        match self.calls {
            1 => Ok(Some(RecordBatch {
                records: vec![ProductRecord::new("b1", 1), ProductRecord::new("b1", 2)],
                rows_read: 2,
                malformed: 0,
                invalid: 0,
            })),
            2 => Err(PairCountError::BatchFailed {
                batch: 2,
                reason: "simulated transport fault".into(),
            }),
            3 => Ok(Some(RecordBatch {
                records: vec![ProductRecord::new("b2", 1), ProductRecord::new("b2", 2)],
                rows_read: 2,
                malformed: 0,
                invalid: 0,
            })),
            _ => Ok(None),
        }
    }
}

#[test]
fn poisoned_batch_contributes_nothing_but_run_continues() {
    let temp = tempdir().unwrap();
    let output = temp.path().join("results.csv");
    let config = EngineConfig::new(temp.path().join("unused.csv"), &output);

    let mut source = FlakySource { calls: 0 };
    let summary = PairCountEngine::new(config)
        .run_with_source(&FixedMemoryProbe::new(100.0), &mut source)
        .unwrap();

    assert_eq!(summary.batches, 2);
    assert_eq!(summary.failed_batches, 1);
    assert_eq!(summary.records_kept, 4);
    let contents = fs::read_to_string(&output).unwrap();
    assert_eq!(contents, "product_1,product_2,baskets\n1,2,2\n");
}

/// Source that fails every batch.
struct BrokenSource;

impl RecordSource for BrokenSource {
    fn id(&self) -> &str {
        "broken"
    }

    fn next_batch(&mut self, _limit: usize) -> Result<Option<RecordBatch>, PairCountError> {
        Err(PairCountError::BatchFailed {
            batch: 1,
            reason: "permanently broken".into(),
        })
    }
}

#[test]
fn persistently_failing_source_stops_and_reports_no_data() {
    let temp = tempdir().unwrap();
    let output = temp.path().join("results.csv");
    let config = EngineConfig::new(temp.path().join("unused.csv"), &output);

    let mut source = BrokenSource;
    let result =
        PairCountEngine::new(config).run_with_source(&FixedMemoryProbe::new(100.0), &mut source);
    assert!(matches!(result, Err(PairCountError::NoDataProcessed)));
    assert!(!output.exists());
}

#[test]
fn invalid_memory_ceiling_is_a_configuration_error() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("baskets.csv");
    fs::write(&input, "b1,1\nb1,2\n").unwrap();
    let config = EngineConfig::new(&input, temp.path().join("results.csv"))
        .with_memory_ceiling_mb(-5.0);

    let result = PairCountEngine::new(config).run(&FixedMemoryProbe::new(100.0));
    assert!(matches!(result, Err(PairCountError::Configuration(_))));
}
