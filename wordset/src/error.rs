use std::num::ParseIntError;

use thiserror::Error;

/// Errors produced when parsing the rendered form of a [`Set`](crate::Set).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input is not enclosed in `{` and `}`.
    #[error("set must be enclosed in braces, got {input:?}")]
    MissingBraces { input: String },

    /// An element or run bound is not a non-negative integer.
    #[error("invalid integer {token:?}: {source}")]
    InvalidInteger {
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// A run `lo..hi` with `lo > hi`.
    #[error("run {lo}..{hi} is descending")]
    DescendingRun { lo: usize, hi: usize },
}

/// A specialized Result type for wordset operations.
pub type Result<T> = std::result::Result<T, Error>;
