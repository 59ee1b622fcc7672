use thiserror::Error;

/// Errors returned while decoding a header or a message payload.
///
/// # Examples
/// ```
/// use tagwire_core::DecodeError;
///
/// let err = DecodeError::TooShort { needed: 4, actual: 2 };
/// assert!(err.to_string().contains("buffer too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("declared payload length {declared} exceeds the {available} bytes available")]
    LengthOutOfBounds { declared: u16, available: usize },
    #[error("malformed payload for type 0x{msg_type:02x}: expected {expected} bytes, got {actual}")]
    MalformedPayload {
        msg_type: u8,
        expected: usize,
        actual: usize,
    },
}
