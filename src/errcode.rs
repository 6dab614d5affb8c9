//! FLH error codes.

use std::io;

use thiserror::Error;

pub type FlhResult<T> = Result<T, FlhError>;

#[derive(Debug, Error)]
pub enum FlhError {
    // Generic failure.  Please try to make something more meaningful.
    #[error("No good")]
    NoGood,

    #[error("File not found")]
    NoFile,

    #[error("Not a regular file")]
    NotARegularFile,

    #[error("Bad magic")]
    BadMagic,

    #[error("Truncated stream")]
    Truncated,

    #[error("Corrupted")]
    Corrupted,

    #[error("Wrong resolution")]
    WrongResolution,

    #[error("Unsupported depth: {0} bpp")]
    BadDepth(u16),

    #[error("No frames found")]
    NoFrames,

    #[error("Exceeded limit")]
    ExceededLimit,

    #[error("Unsupported bitmap: {0}")]
    UnsupportedBitmap(String),

    #[error("IO error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for FlhError {
    /// Short reads while decoding indicate a truncated animation, not
    /// an IO failure.
    fn from(err: io::Error) -> FlhError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FlhError::Truncated
        } else {
            FlhError::Io(err)
        }
    }
}
