//! Wire-format decoding.
//!
//! The protocol follows a layered structure:
//! - `layout`: byte offsets, type tags and sizes (source of truth)
//! - `reader`: bounds-checked byte access
//! - `header`, `display`, `motor`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Decoders are pure and borrow the input buffer; a variant can only be
//! obtained by decoding it from bytes that passed every bounds check.

pub mod display;
pub mod encoder;
pub mod error;
pub mod header;
pub mod layout;
pub mod message;
pub mod motor;
pub(crate) mod reader;

pub use display::{DisplayMessage, decode_display};
pub use encoder::{EncodeError, encode_display, encode_frame, encode_motor, to_hex};
pub use error::DecodeError;
pub use header::{Header, parse_header};
pub use message::{Message, MessageKind};
pub use motor::{MotorCommand, decode_motor};
