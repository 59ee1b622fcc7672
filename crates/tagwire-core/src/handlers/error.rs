use thiserror::Error;

/// Errors raised by a handler after a message decoded cleanly.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to allocate {requested} bytes for display text")]
    AllocationFailure { requested: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
