use super::error::DecodeError;
use super::header::Header;
use super::layout;
use super::reader::MessageReader;

/// Drive command carrying two axis values.
///
/// Fields are private; `decode_motor` is the only constructor.
///
/// ```compile_fail
/// use tagwire_core::{Header, MotorCommand};
///
/// let _cmd = MotorCommand {
///     header: Header { id: 9, msg_type: 0x34, len: 3 },
///     forward_back: 0.0,
///     left_right: 0.0,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorCommand {
    header: Header,
    forward_back: f32,
    left_right: f32,
}

impl MotorCommand {
    pub fn header(&self) -> Header {
        self.header
    }

    pub fn forward_back(&self) -> f32 {
        self.forward_back
    }

    pub fn left_right(&self) -> f32 {
        self.left_right
    }
}

pub fn decode_motor(buf: &[u8], header: &Header) -> Result<MotorCommand, DecodeError> {
    let reader = MessageReader::new(buf);
    reader.require_payload(header.len)?;
    if header.payload_len() != layout::MOTOR_PAYLOAD_LEN {
        return Err(DecodeError::MalformedPayload {
            msg_type: header.msg_type,
            expected: layout::MOTOR_PAYLOAD_LEN,
            actual: header.payload_len(),
        });
    }

    let forward_back = reader.read_f32_le(layout::FORWARD_BACK_RANGE.clone())?;
    let left_right = reader.read_f32_le(layout::LEFT_RIGHT_RANGE.clone())?;

    Ok(MotorCommand {
        header: *header,
        forward_back,
        left_right,
    })
}

#[cfg(test)]
mod tests {
    use super::decode_motor;
    use crate::protocol::error::DecodeError;
    use crate::protocol::header::{Header, parse_header};

    #[test]
    fn decode_motor_reference_packet() {
        let buf = [
            0x02, 0x80, 0x08, 0x00, 0x00, 0x00, 0x80, 0x3f, 0x00, 0x00, 0x00, 0xbf,
        ];
        let header = parse_header(&buf).unwrap();
        let cmd = decode_motor(&buf, &header).unwrap();
        assert_eq!(cmd.header().id, 2);
        assert_eq!(cmd.forward_back(), 1.0);
        assert_eq!(cmd.left_right(), -0.5);
    }

    #[test]
    fn decode_motor_wrong_length() {
        let buf = [0x02, 0x80, 0x04, 0x00, 0x00, 0x00, 0x80, 0x3f];
        let header = parse_header(&buf).unwrap();
        let err = decode_motor(&buf, &header).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MalformedPayload {
                msg_type: 0x80,
                expected: 8,
                actual: 4
            }
        );
    }

    #[test]
    fn decode_motor_rechecks_bounds() {
        let buf = [0x02, 0x80, 0x08, 0x00];
        let forged = Header {
            id: 2,
            msg_type: 0x80,
            len: 8,
        };
        let err = decode_motor(&buf, &forged).unwrap_err();
        assert!(matches!(err, DecodeError::LengthOutOfBounds { .. }));
    }
}
