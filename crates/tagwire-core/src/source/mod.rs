//! Vector sources feeding the test driver.
//!
//! A source yields complete, length-prefixed message buffers one at a time,
//! each paired with the outcome the driver should expect.

mod builtin;
mod hex;

pub use builtin::BuiltinVectors;
pub use hex::{HexFileSource, parse_vector_line};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatch::ErrorKind;

/// Outcome a vector is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    Ok,
    Fail(ErrorKind),
}

impl Expectation {
    pub fn label(&self) -> &'static str {
        match self {
            Expectation::Ok => "ok",
            Expectation::Fail(kind) => kind.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    /// 1-based line number for file sources, position for built-in ones.
    pub origin: usize,
    pub bytes: Vec<u8>,
    pub expect: Expectation,
}

pub trait VectorSource {
    fn next_vector(&mut self) -> Result<Option<TestVector>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid vector on line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
}
