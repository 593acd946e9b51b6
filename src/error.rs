use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, OutlineError>;
