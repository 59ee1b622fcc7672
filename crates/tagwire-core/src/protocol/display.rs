use super::error::DecodeError;
use super::header::Header;
use super::reader::MessageReader;

/// Text display request; the payload is untrusted and length-bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMessage<'a> {
    header: Header,
    payload: &'a [u8],
}

impl<'a> DisplayMessage<'a> {
    pub fn header(&self) -> Header {
        self.header
    }

    /// Raw payload bytes, exactly `header().len` long.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

pub fn decode_display<'a>(
    buf: &'a [u8],
    header: &Header,
) -> Result<DisplayMessage<'a>, DecodeError> {
    let reader = MessageReader::new(buf);
    let payload = reader.read_payload(header.len)?;
    Ok(DisplayMessage {
        header: *header,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::decode_display;
    use crate::protocol::error::DecodeError;
    use crate::protocol::header::{Header, parse_header};

    #[test]
    fn decode_display_hello() {
        let buf = [0x01, 0x34, 0x05, 0x00, 0x48, 0x65, 0x6c, 0x6c, 0x6f];
        let header = parse_header(&buf).unwrap();
        let msg = decode_display(&buf, &header).unwrap();
        assert_eq!(msg.payload(), b"Hello");
        assert_eq!(msg.header().id, 1);
    }

    #[test]
    fn decode_display_empty_payload() {
        let buf = [0x09, 0x34, 0x00, 0x00];
        let header = parse_header(&buf).unwrap();
        let msg = decode_display(&buf, &header).unwrap();
        assert!(msg.payload().is_empty());
    }

    #[test]
    fn decode_display_stops_at_declared_len() {
        let buf = [0x01, 0x34, 0x02, 0x00, b'o', b'k', b'!', b'!'];
        let header = parse_header(&buf).unwrap();
        let msg = decode_display(&buf, &header).unwrap();
        assert_eq!(msg.payload(), b"ok");
    }

    #[test]
    fn decode_display_rechecks_bounds() {
        let buf = [0x01, 0x34, 0x01, 0x00];
        let forged = Header {
            id: 1,
            msg_type: 0x34,
            len: 9,
        };
        let err = decode_display(&buf, &forged).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::LengthOutOfBounds { declared: 9, .. }
        ));
    }
}
