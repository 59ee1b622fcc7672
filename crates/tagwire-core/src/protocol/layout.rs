pub const ID_OFFSET: usize = 0;
pub const TYPE_OFFSET: usize = 1;
pub const LEN_RANGE: std::ops::Range<usize> = 2..4;
pub const HEADER_LEN: usize = 4;
pub const PAYLOAD_OFFSET: usize = HEADER_LEN;

pub const MSG_DISPLAY: u8 = 0x34;
pub const MSG_MOTOR: u8 = 0x80;

pub const MOTOR_PAYLOAD_LEN: usize = 8;
pub const FORWARD_BACK_RANGE: std::ops::Range<usize> = 4..8;
pub const LEFT_RIGHT_RANGE: std::ops::Range<usize> = 8..12;
