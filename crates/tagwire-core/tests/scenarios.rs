use tagwire_core::{
    DecodeError, DispatchError, DisplayMessage, ErrorKind, HandlerError, Message, MessageHandler,
    MessageKind, MotorCommand, decode_message, dispatch, dispatch_with,
};

#[derive(Default)]
struct Capture {
    display: Option<Vec<u8>>,
    motor: Option<(f32, f32)>,
}

impl MessageHandler for Capture {
    fn on_display(&mut self, msg: &DisplayMessage<'_>) -> Result<(), HandlerError> {
        self.display = Some(msg.payload().to_vec());
        Ok(())
    }

    fn on_motor(&mut self, cmd: &MotorCommand) -> Result<(), HandlerError> {
        self.motor = Some((cmd.forward_back(), cmd.left_right()));
        Ok(())
    }
}

#[test]
fn display_hello() {
    let buf = [0x01, 0x34, 0x05, 0x00, 0x48, 0x65, 0x6c, 0x6c, 0x6f];
    let mut capture = Capture::default();
    let done = dispatch_with(&buf, &mut capture).unwrap();
    assert_eq!(done.kind, MessageKind::Display);
    assert_eq!(capture.display.as_deref(), Some(&b"Hello"[..]));
    assert!(dispatch(&buf).is_ok());
}

#[test]
fn motor_reference_packet() {
    let buf = [
        0x02, 0x80, 0x08, 0x00, 0x00, 0x00, 0x80, 0x3f, 0x00, 0x00, 0x00, 0xbf,
    ];
    let mut capture = Capture::default();
    dispatch_with(&buf, &mut capture).unwrap();
    let (forward_back, left_right) = capture.motor.unwrap();
    assert_eq!(forward_back, 1.0);
    // 0xbf000000 as little-endian f32
    assert_eq!(left_right, -0.5);
    assert!(dispatch(&buf).is_ok());
}

#[test]
fn motor_full_reverse() {
    let buf = [
        0x02, 0x80, 0x08, 0x00, 0x00, 0x00, 0x80, 0x3f, 0x00, 0x00, 0x80, 0xbf,
    ];
    let mut capture = Capture::default();
    dispatch_with(&buf, &mut capture).unwrap();
    assert_eq!(capture.motor, Some((1.0, -1.0)));
}

#[test]
fn unknown_type() {
    let err = dispatch(&[0x03, 0x22, 0x04, 0x00]).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownMessageType(0x22)));
}

#[test]
fn declared_length_past_end() {
    let err = dispatch(&[0x01, 0x34, 0xff, 0x7f]).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Decode(DecodeError::LengthOutOfBounds {
            declared: 0x7fff,
            available: 0
        })
    ));
}

#[test]
fn two_byte_buffer() {
    let err = dispatch(&[0x01, 0x34]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooShort);
}

#[test]
fn decode_message_without_handlers() {
    let buf = [0x05, 0x80, 0x08, 0x00, 0, 0, 0, 0, 0, 0, 0x80, 0x3f];
    let Message::Motor(cmd) = decode_message(&buf).unwrap() else {
        panic!("expected motor message");
    };
    assert_eq!(cmd.header().id, 5);
    assert_eq!(cmd.forward_back(), 0.0);
    assert_eq!(cmd.left_right(), 1.0);
}

#[test]
fn motor_header_comes_from_the_wire() {
    let buf = tagwire_core::encode_motor(9, 0.25, -0.75);
    let message = decode_message(&buf).unwrap();
    assert_eq!(message.kind(), MessageKind::Motor);
    let Message::Motor(cmd) = message else {
        panic!("expected motor message");
    };
    assert_eq!(cmd.header(), message.header());
    assert_eq!(cmd.header().msg_type, 0x80);
    assert_eq!(cmd.header().len, 8);
    assert_eq!((cmd.forward_back(), cmd.left_right()), (0.25, -0.75));
}
