use serde::{Deserialize, Serialize};

use super::display::DisplayMessage;
use super::header::Header;
use super::layout;
use super::motor::MotorCommand;

/// Recognized message kinds, keyed by their type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Display,
    Motor,
}

impl MessageKind {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            layout::MSG_DISPLAY => Some(Self::Display),
            layout::MSG_MOTOR => Some(Self::Motor),
            _ => None,
        }
    }
}

/// A decoded message. Only the decoders build these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message<'a> {
    Display(DisplayMessage<'a>),
    Motor(MotorCommand),
}

impl Message<'_> {
    pub fn header(&self) -> Header {
        match self {
            Message::Display(msg) => msg.header(),
            Message::Motor(cmd) => cmd.header(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Display(_) => MessageKind::Display,
            Message::Motor(_) => MessageKind::Motor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MessageKind;

    #[test]
    fn kind_from_tag() {
        assert_eq!(MessageKind::from_tag(0x34), Some(MessageKind::Display));
        assert_eq!(MessageKind::from_tag(0x80), Some(MessageKind::Motor));
        assert_eq!(MessageKind::from_tag(0x22), None);
    }
}
