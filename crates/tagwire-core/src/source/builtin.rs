use crate::dispatch::ErrorKind;

use super::{Expectation, SourceError, TestVector, VectorSource};

const DISPLAY_PACKET: &[u8] = &[0x01, 0x34, 0x05, 0x00, 0x48, 0x65, 0x6c, 0x6c, 0x6f];
const MOTOR_PACKET: &[u8] = &[
    0x02, 0x80, 0x08, 0x00, 0x00, 0x00, 0x80, 0x3f, 0x00, 0x00, 0x00, 0xbf,
];
const INVALID_PACKET: &[u8] = &[0x03, 0x22, 0x04, 0x00];

/// Reference packets: a display "Hello", a motor command, and an unknown tag.
pub struct BuiltinVectors {
    next: usize,
}

impl BuiltinVectors {
    pub const INPUT_NAME: &'static str = "<builtin>";

    const VECTORS: [(&'static [u8], Expectation); 3] = [
        (DISPLAY_PACKET, Expectation::Ok),
        (MOTOR_PACKET, Expectation::Ok),
        (
            INVALID_PACKET,
            Expectation::Fail(ErrorKind::UnknownMessageType),
        ),
    ];

    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn len(&self) -> usize {
        Self::VECTORS.len()
    }

    pub fn is_empty(&self) -> bool {
        Self::VECTORS.is_empty()
    }
}

impl Default for BuiltinVectors {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorSource for BuiltinVectors {
    fn next_vector(&mut self) -> Result<Option<TestVector>, SourceError> {
        let Some((bytes, expect)) = Self::VECTORS.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        Ok(Some(TestVector {
            origin: self.next,
            bytes: bytes.to_vec(),
            expect: *expect,
        }))
    }
}
