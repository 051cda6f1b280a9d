//! Error types for the fallible edges of the crate.
//!
//! Building and querying a [`Lexicon`](crate::Lexicon) never fails. Errors only
//! come from reading a corpus.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A weighted corpus line had no weight after its text.
    #[error("line {line}: missing weight")]
    MissingWeight { line: usize },

    #[error("line {line}: invalid weight {value:?}")]
    InvalidWeight { line: usize, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
