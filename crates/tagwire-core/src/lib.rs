//! tagwire core library: decoding and dispatch of tagged binary messages.
//!
//! Every message starts with a 4-byte header (`id`, `type`, little-endian
//! `len`) followed by `len` payload bytes. The dispatcher reads the header,
//! selects the payload decoder from the type tag, and routes the decoded
//! message to its handler. Decoding is byte-oriented and side-effect free;
//! handlers are the only place output happens.
//!
//! Invariants:
//! - A declared length is never trusted: payload reads are bounds-checked.
//! - A typed message can only be obtained by decoding it.
//! - Malformed input yields an error value; nothing panics or aborts.
//!
//! Layers: `protocol` (layout/reader/decoders) -> `dispatch` -> `handlers`.
//! The `source` and `driver` modules run vector lists through the dispatcher
//! and build a deterministic report.
//!
//! # Examples
//! ```
//! use tagwire_core::{ConsoleHandlers, ErrorKind, dispatch_with};
//!
//! let mut handlers = ConsoleHandlers::new(Vec::new());
//! let err = dispatch_with(&[0x03, 0x22, 0x04, 0x00], &mut handlers).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnknownMessageType);
//! ```

use serde::{Deserialize, Serialize};

mod dispatch;
mod driver;
mod handlers;
pub mod protocol;
mod source;

pub use dispatch::{
    DispatchError, DispatchResult, Dispatched, ErrorKind, decode_message, dispatch, dispatch_with,
};
pub use driver::{DriverError, run_builtin, run_vector_file, run_vectors};
pub use handlers::{
    ConsoleHandlers, HandlerError, MessageHandler, handle_display, handle_motor, render_text,
};
pub use protocol::{
    DecodeError, DisplayMessage, EncodeError, Header, Message, MessageKind, MotorCommand,
    decode_display, decode_motor, encode_display, encode_frame, encode_motor, parse_header,
    to_hex,
};
pub use source::{
    BuiltinVectors, Expectation, HexFileSource, SourceError, TestVector, VectorSource,
    parse_vector_line,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the caller does not stamp the report.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Result of a vector run, in input order.
///
/// # Examples
/// ```
/// use tagwire_core::make_stub_report;
///
/// let report = make_stub_report("vectors.hex", 42);
/// assert_eq!(report.report_version, tagwire_core::REPORT_VERSION);
/// assert!(report.results.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the run.
    pub generated_at: String,
    /// Input metadata.
    pub input: InputInfo,
    /// Pass/fail tally.
    pub summary: RunSummary,
    /// One entry per vector.
    pub results: Vec<VectorResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    /// Build commit, when the front end knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided, or `<builtin>`.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
}

/// Outcome of dispatching one vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorResult {
    /// 0-based position in the run.
    pub index: u64,
    /// Line number (file input) or 1-based position (built-in input).
    pub origin: u64,
    /// Header fields, present when the buffer held a full header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<u16>,
    /// Expected outcome (`ok` or an error kind name).
    pub expected: String,
    /// Actual outcome (`ok` or an error kind name).
    pub outcome: String,
    /// Error message when dispatch failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub passed: bool,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

/// Build a report with base fields filled and no results.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> RunReport {
    RunReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "tagwire".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: None,
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: RunSummary::default(),
        results: vec![],
    }
}
