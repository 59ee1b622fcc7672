use tracing::debug;

use crate::protocol::MotorCommand;

use super::error::HandlerError;

/// Report a motor command. Nothing is actuated.
pub fn handle_motor(cmd: &MotorCommand) -> Result<(), HandlerError> {
    debug!(
        id = cmd.header().id,
        forward_back = cmd.forward_back(),
        left_right = cmd.left_right(),
        "update motor"
    );
    Ok(())
}
