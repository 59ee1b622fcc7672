//! Frame builders, the inverse of the decoders.

use thiserror::Error;

use super::layout;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("payload too large: {len} bytes (max {max})")]
    PayloadTooLarge { len: usize, max: usize },
}

/// Build a frame with an arbitrary type tag and payload.
///
/// # Examples
/// ```
/// use tagwire_core::encode_frame;
///
/// let frame = encode_frame(3, 0x22, &[])?;
/// assert_eq!(frame, vec![0x03, 0x22, 0x00, 0x00]);
/// # Ok::<(), tagwire_core::EncodeError>(())
/// ```
pub fn encode_frame(id: u8, msg_type: u8, payload: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let len = u16::try_from(payload.len()).map_err(|_| EncodeError::PayloadTooLarge {
        len: payload.len(),
        max: u16::MAX as usize,
    })?;
    Ok(write_frame(id, msg_type, len, payload))
}

fn write_frame(id: u8, msg_type: u8, len: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(layout::HEADER_LEN + payload.len());
    frame.push(id);
    frame.push(msg_type);
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(payload);
    frame
}

pub fn encode_display(id: u8, text: &[u8]) -> Result<Vec<u8>, EncodeError> {
    encode_frame(id, layout::MSG_DISPLAY, text)
}

pub fn encode_motor(id: u8, forward_back: f32, left_right: f32) -> Vec<u8> {
    let mut payload = [0u8; layout::MOTOR_PAYLOAD_LEN];
    payload[..4].copy_from_slice(&forward_back.to_le_bytes());
    payload[4..].copy_from_slice(&left_right.to_le_bytes());
    write_frame(
        id,
        layout::MSG_MOTOR,
        layout::MOTOR_PAYLOAD_LEN as u16,
        &payload,
    )
}

/// Format bytes as spaced lowercase hex (`01 34 05 00`).
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
