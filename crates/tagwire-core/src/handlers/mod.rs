//! Per-kind message handlers.
//!
//! Handlers run only after a message decoded cleanly. `MessageHandler` is the
//! seam the dispatcher calls through; `ConsoleHandlers` renders display text
//! to a writer and reports motor commands through the log.

pub mod display;
pub mod error;
pub mod motor;

use std::io::Write;

use crate::protocol::{DisplayMessage, MotorCommand};

pub use display::{handle_display, render_text};
pub use error::HandlerError;
pub use motor::handle_motor;

pub trait MessageHandler {
    fn on_display(&mut self, msg: &DisplayMessage<'_>) -> Result<(), HandlerError>;
    fn on_motor(&mut self, cmd: &MotorCommand) -> Result<(), HandlerError>;
}

/// Default handlers: display text goes to `out`, motor commands to the log.
pub struct ConsoleHandlers<W: Write> {
    out: W,
}

impl<W: Write> ConsoleHandlers<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleHandlers<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> MessageHandler for ConsoleHandlers<W> {
    fn on_display(&mut self, msg: &DisplayMessage<'_>) -> Result<(), HandlerError> {
        handle_display(&mut self.out, msg)
    }

    fn on_motor(&mut self, cmd: &MotorCommand) -> Result<(), HandlerError> {
        handle_motor(cmd)
    }
}
