use serde::{Deserialize, Serialize};

use super::error::DecodeError;
use super::layout;
use super::reader::MessageReader;

/// Common 4-byte prefix shared by every message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Opaque message identifier.
    pub id: u8,
    /// Type tag selecting the payload shape.
    pub msg_type: u8,
    /// Declared payload length in bytes.
    pub len: u16,
}

impl Header {
    /// Payload length as a `usize`.
    pub fn payload_len(&self) -> usize {
        self.len as usize
    }
}

/// Read the header at the start of `buf`.
///
/// The declared length is checked against the bytes that follow the header;
/// bytes past the declared payload are ignored.
///
/// # Examples
/// ```
/// use tagwire_core::parse_header;
///
/// let header = parse_header(&[0x01, 0x34, 0x01, 0x00, b'A'])?;
/// assert_eq!(header.id, 1);
/// assert_eq!(header.msg_type, 0x34);
/// assert_eq!(header.len, 1);
/// # Ok::<(), tagwire_core::DecodeError>(())
/// ```
pub fn parse_header(buf: &[u8]) -> Result<Header, DecodeError> {
    let header = peek_header(buf)?;
    MessageReader::new(buf).require_payload(header.len)?;
    Ok(header)
}

/// Read the fixed prefix without checking the declared length.
///
/// Used to classify the type tag before any payload byte is trusted.
pub(crate) fn peek_header(buf: &[u8]) -> Result<Header, DecodeError> {
    let reader = MessageReader::new(buf);
    reader.require_len(layout::HEADER_LEN)?;

    let id = reader.read_u8(layout::ID_OFFSET)?;
    let msg_type = reader.read_u8(layout::TYPE_OFFSET)?;
    let len = reader.read_u16_le(layout::LEN_RANGE.clone())?;

    Ok(Header { id, msg_type, len })
}

#[cfg(test)]
mod tests {
    use super::{Header, parse_header, peek_header};
    use crate::protocol::error::DecodeError;

    #[test]
    fn parse_header_ok() {
        let header = parse_header(&[0x07, 0x80, 0x02, 0x00, 0xaa, 0xbb]).unwrap();
        assert_eq!(
            header,
            Header {
                id: 7,
                msg_type: 0x80,
                len: 2
            }
        );
        assert_eq!(header.payload_len(), 2);
    }

    #[test]
    fn parse_header_reads_len_little_endian() {
        let mut buf = vec![0x01, 0x34, 0x00, 0x01];
        buf.extend(std::iter::repeat_n(0u8, 0x100));
        let header = parse_header(&buf).unwrap();
        assert_eq!(header.len, 0x0100);
    }

    #[test]
    fn parse_header_too_short() {
        for len in 0..4 {
            let buf = vec![0u8; len];
            let err = parse_header(&buf).unwrap_err();
            assert_eq!(
                err,
                DecodeError::TooShort {
                    needed: 4,
                    actual: len
                }
            );
        }
    }

    #[test]
    fn parse_header_length_out_of_bounds() {
        let err = parse_header(&[0x01, 0x34, 0xff, 0x7f]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::LengthOutOfBounds {
                declared: 0x7fff,
                available: 0
            }
        );
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn parse_header_ignores_trailing_bytes() {
        let header = parse_header(&[0x01, 0x34, 0x01, 0x00, b'A', b'B']).unwrap();
        assert_eq!(header.len, 1);
    }

    #[test]
    fn peek_header_skips_length_check() {
        let header = peek_header(&[0x03, 0x22, 0x04, 0x00]).unwrap();
        assert_eq!(header.len, 4);
        assert!(parse_header(&[0x03, 0x22, 0x04, 0x00]).is_err());
    }
}
