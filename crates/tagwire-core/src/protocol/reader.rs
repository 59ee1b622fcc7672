use super::error::DecodeError;
use super::layout;

pub struct MessageReader<'a> {
    buf: &'a [u8],
}

impl<'a> MessageReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.buf.len() < needed {
            return Err(DecodeError::TooShort {
                needed,
                actual: self.buf.len(),
            });
        }
        Ok(())
    }

    /// Checks that a declared payload length fits behind the header.
    pub fn require_payload(&self, declared: u16) -> Result<(), DecodeError> {
        let available = self.buf.len().saturating_sub(layout::HEADER_LEN);
        if declared as usize > available {
            return Err(DecodeError::LengthOutOfBounds {
                declared,
                available,
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.buf.get(offset).copied().ok_or(DecodeError::TooShort {
            needed: offset + 1,
            actual: self.buf.len(),
        })
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, DecodeError> {
        let bytes = self.read_array::<2>(range)?;
        Ok(u16::from_le_bytes(bytes))
    }

    pub fn read_f32_le(&self, range: std::ops::Range<usize>) -> Result<f32, DecodeError> {
        let bytes = self.read_array::<4>(range)?;
        Ok(f32::from_le_bytes(bytes))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.buf.get(range.clone()).ok_or(DecodeError::TooShort {
            needed: range.end,
            actual: self.buf.len(),
        })
    }

    /// Returns the `declared` payload bytes following the header.
    pub fn read_payload(&self, declared: u16) -> Result<&'a [u8], DecodeError> {
        self.require_payload(declared)?;
        let end = layout::PAYLOAD_OFFSET + declared as usize;
        self.read_slice(layout::PAYLOAD_OFFSET..end)
    }

    fn read_array<const N: usize>(
        &self,
        range: std::ops::Range<usize>,
    ) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| DecodeError::TooShort {
            needed: N,
            actual: bytes.len(),
        })
    }
}
