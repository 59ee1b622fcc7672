use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::handlers::HandlerError;
use crate::protocol::DecodeError;

/// Failure of a single dispatch call.
///
/// # Examples
/// ```
/// use tagwire_core::{DispatchError, ErrorKind};
///
/// let err = DispatchError::UnknownMessageType(0x22);
/// assert_eq!(err.kind(), ErrorKind::UnknownMessageType);
/// assert!(err.to_string().contains("0x22"));
/// ```
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("unknown message type 0x{0:02x}")]
    UnknownMessageType(u8),
    #[error("handler failed: {0}")]
    Handler(#[from] HandlerError),
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Decode(DecodeError::TooShort { .. }) => ErrorKind::TooShort,
            DispatchError::Decode(DecodeError::LengthOutOfBounds { .. }) => {
                ErrorKind::LengthOutOfBounds
            }
            DispatchError::Decode(DecodeError::MalformedPayload { .. }) => {
                ErrorKind::MalformedPayload
            }
            DispatchError::UnknownMessageType(_) => ErrorKind::UnknownMessageType,
            DispatchError::Handler(_) => ErrorKind::HandlerFailure,
        }
    }
}

/// Flat failure taxonomy, stable across error payload changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TooShort,
    LengthOutOfBounds,
    MalformedPayload,
    UnknownMessageType,
    HandlerFailure,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::TooShort,
        ErrorKind::LengthOutOfBounds,
        ErrorKind::MalformedPayload,
        ErrorKind::UnknownMessageType,
        ErrorKind::HandlerFailure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::TooShort => "too_short",
            ErrorKind::LengthOutOfBounds => "length_out_of_bounds",
            ErrorKind::MalformedPayload => "malformed_payload",
            ErrorKind::UnknownMessageType => "unknown_message_type",
            ErrorKind::HandlerFailure => "handler_failure",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{DispatchError, ErrorKind};
    use crate::handlers::HandlerError;
    use crate::protocol::DecodeError;

    #[test]
    fn kind_covers_taxonomy() {
        let cases = [
            (
                DispatchError::from(DecodeError::TooShort {
                    needed: 4,
                    actual: 0,
                }),
                ErrorKind::TooShort,
            ),
            (
                DispatchError::from(DecodeError::LengthOutOfBounds {
                    declared: 9,
                    available: 0,
                }),
                ErrorKind::LengthOutOfBounds,
            ),
            (
                DispatchError::from(DecodeError::MalformedPayload {
                    msg_type: 0x80,
                    expected: 8,
                    actual: 1,
                }),
                ErrorKind::MalformedPayload,
            ),
            (
                DispatchError::UnknownMessageType(1),
                ErrorKind::UnknownMessageType,
            ),
            (
                DispatchError::from(HandlerError::AllocationFailure { requested: 1 }),
                ErrorKind::HandlerFailure,
            ),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in ErrorKind::ALL {
            assert_eq!(ErrorKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(ErrorKind::from_name("ok"), None);
    }
}
