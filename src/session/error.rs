use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("event script line {line}: {reason}")]
    Script { line: usize, reason: String },

    #[error("event script I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
