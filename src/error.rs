//! Error taxonomy shared by the playlist, controller and persistence code.
//!
//! Every variant here is recoverable: callers report it (usually at warn
//! level) and carry on. Nothing in this crate panics on a bad path or a
//! failed save.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A selected or added path does not exist on the filesystem.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// A blank path was given to a persistence operation.
    #[error("empty path given")]
    EmptyInput,

    /// Underlying I/O failure during playlist save/load.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// A seek fraction or index fell outside its valid range.
    #[error("value out of range: {0}")]
    InvalidRange(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
