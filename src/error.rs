use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(
        "Invalid match at position {position} (displacement {displacement}, length {length})"
    )]
    InvalidMatch {
        position: usize,
        displacement: usize,
        length: usize,
    },

    #[error(
        "Match finder returned an invalid candidate at position {position} (displacement {displacement}, length {length})"
    )]
    InvalidMatchCandidate {
        position: usize,
        displacement: usize,
        length: usize,
    },

    #[error("Start position {start} is beyond the end of a {len}-byte buffer")]
    StartOutOfBounds { start: usize, len: usize },
}

pub type Result<T> = core::result::Result<T, CompressionError>;
