// error module - the error type shared by the core and both front-ends
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid location `{input}`: {source}")]
    InvalidLocation {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("location `{0}` cannot carry a file path")]
    NotAFileLocation(String),

    #[error("session file is corrupt: {0}")]
    Session(#[from] serde_json::Error),

    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("gui failed: {0}")]
    Gui(String),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
