//! Core error type shared by every module in the crate.
//!
//! Library code returns `Result<T, Error>` and propagates with `?`; the
//! pipeline/CLI boundary wraps these in `anyhow::Context` once a file path
//! or document id is available to attach.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid UTF-8 at byte offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("NFKC normalization failed")]
    NormalizationFailed,

    #[error("length mismatch: {a} vs {b}")]
    LengthMismatch { a: usize, b: usize },

    #[error("input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("out of memory while allocating {requested} bytes")]
    OutOfMemory { requested: usize },

    #[error("hash store exhausted: {entries} entries reached configured cap of {cap}")]
    HashStoreFull { entries: usize, cap: usize },

    #[error("failed to decode {what}: {reason}")]
    DecodeError { what: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
