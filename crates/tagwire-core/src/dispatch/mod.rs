//! Type-tag dispatch.
//!
//! A dispatch call parses the header, selects the variant decoder from the
//! type tag, and hands the decoded message to the matching handler. Every
//! decode failure is detected before any handler runs. Calls are independent
//! and keep no state.

pub mod error;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::handlers::{ConsoleHandlers, MessageHandler};
use crate::protocol::header::peek_header;
use crate::protocol::{Message, MessageKind, decode_display, decode_motor, parse_header};

pub use error::{DispatchError, ErrorKind};

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatched {
    pub id: u8,
    pub kind: MessageKind,
}

pub type DispatchResult = Result<Dispatched, DispatchError>;

/// Decode `buf` into a typed message without running any handler.
///
/// # Examples
/// ```
/// use tagwire_core::{Message, decode_message};
///
/// let buf = [0x01, 0x34, 0x02, 0x00, b'h', b'i'];
/// match decode_message(&buf)? {
///     Message::Display(msg) => assert_eq!(msg.payload(), b"hi"),
///     other => panic!("unexpected {other:?}"),
/// }
/// # Ok::<(), tagwire_core::DispatchError>(())
/// ```
pub fn decode_message(buf: &[u8]) -> Result<Message<'_>, DispatchError> {
    let header = peek_header(buf)?;
    debug!(
        id = header.id,
        msg_type = header.msg_type,
        len = header.len,
        "message header"
    );

    // The payload of an unrecognized tag is never read, so its declared
    // length is not checked.
    match MessageKind::from_tag(header.msg_type) {
        Some(MessageKind::Display) => {
            let header = parse_header(buf)?;
            Ok(Message::Display(decode_display(buf, &header)?))
        }
        Some(MessageKind::Motor) => {
            let header = parse_header(buf)?;
            Ok(Message::Motor(decode_motor(buf, &header)?))
        }
        None => {
            error!(
                id = header.id,
                msg_type = header.msg_type,
                "unknown message type"
            );
            Err(DispatchError::UnknownMessageType(header.msg_type))
        }
    }
}

/// Dispatch `buf` to the default console handlers (display text on stdout).
pub fn dispatch(buf: &[u8]) -> DispatchResult {
    dispatch_with(buf, &mut ConsoleHandlers::stdout())
}

/// Dispatch `buf` to `handler`.
///
/// # Examples
/// ```
/// use tagwire_core::{ConsoleHandlers, MessageKind, dispatch_with};
///
/// let mut handlers = ConsoleHandlers::new(Vec::new());
/// let buf = [0x01, 0x34, 0x05, 0x00, b'H', b'e', b'l', b'l', b'o'];
/// let done = dispatch_with(&buf, &mut handlers)?;
/// assert_eq!(done.kind, MessageKind::Display);
/// assert_eq!(handlers.into_inner(), b"Display message: Hello\n");
/// # Ok::<(), tagwire_core::DispatchError>(())
/// ```
pub fn dispatch_with<H: MessageHandler>(buf: &[u8], handler: &mut H) -> DispatchResult {
    let message = decode_message(buf)?;
    let header = message.header();

    match &message {
        Message::Display(msg) => handler.on_display(msg),
        Message::Motor(cmd) => handler.on_motor(cmd),
    }
    .map_err(|err| {
        error!(
            id = header.id,
            msg_type = header.msg_type,
            error = %err,
            "handler failed"
        );
        DispatchError::Handler(err)
    })?;

    Ok(Dispatched {
        id: header.id,
        kind: message.kind(),
    })
}
