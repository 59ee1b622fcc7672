//! Test driver: feeds vectors through the dispatcher and tallies outcomes.

use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

use crate::dispatch::dispatch_with;
use crate::handlers::MessageHandler;
use crate::protocol::header::peek_header;
use crate::source::{
    BuiltinVectors, Expectation, HexFileSource, SourceError, TestVector, VectorSource,
};
use crate::{RunReport, RunSummary, VectorResult, make_stub_report};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Run every vector of a hex vector file.
pub fn run_vector_file<H: MessageHandler>(
    path: &Path,
    handler: &mut H,
) -> Result<RunReport, DriverError> {
    let source = HexFileSource::open(path)?;
    let bytes = path.metadata()?.len();
    run_vectors(&path.display().to_string(), bytes, source, handler)
}

/// Run the reference vectors.
pub fn run_builtin<H: MessageHandler>(handler: &mut H) -> Result<RunReport, DriverError> {
    run_vectors(BuiltinVectors::INPUT_NAME, 0, BuiltinVectors::new(), handler)
}

pub fn run_vectors<S: VectorSource, H: MessageHandler>(
    input_name: &str,
    input_bytes: u64,
    mut source: S,
    handler: &mut H,
) -> Result<RunReport, DriverError> {
    let mut report = make_stub_report(input_name, input_bytes);
    let mut summary = RunSummary::default();

    while let Some(vector) = source.next_vector()? {
        let result = run_one(summary.total, &vector, handler);
        summary.total += 1;
        if result.passed {
            summary.passed += 1;
        } else {
            summary.failed += 1;
            error!(
                index = result.index,
                origin = result.origin,
                expected = %result.expected,
                outcome = %result.outcome,
                "vector failed"
            );
        }
        report.results.push(result);
    }

    info!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        "run summary"
    );
    report.summary = summary;
    Ok(report)
}

fn run_one<H: MessageHandler>(index: u64, vector: &TestVector, handler: &mut H) -> VectorResult {
    let header = peek_header(&vector.bytes).ok();
    let (outcome, error) = match dispatch_with(&vector.bytes, handler) {
        Ok(_) => ("ok".to_string(), None),
        Err(err) => (err.kind().to_string(), Some(err.to_string())),
    };
    let passed = match vector.expect {
        Expectation::Ok => error.is_none(),
        Expectation::Fail(kind) => outcome == kind.as_str(),
    };

    VectorResult {
        index,
        origin: vector.origin as u64,
        id: header.map(|h| h.id),
        msg_type: header.map(|h| h.msg_type),
        len: header.map(|h| h.len),
        expected: vector.expect.label().to_string(),
        outcome,
        error,
        passed,
    }
}
