// src/error.rs
//! Error taxonomy for the load pipeline and configuration.
//!
//! A reload fails as a whole: every variant of [`LoadError`] turns into the
//! `Error` refresh state and leaves the canonical leaderboard untouched.
//! Per-row anomalies are not errors at all (see `normalize`).

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Source unreachable, I/O failure, or a non-success HTTP status.
    #[error("transport: {0}")]
    Transport(String),

    /// Body could not be decoded into a table.
    #[error("decode: {0}")]
    Decode(String),
}

impl LoadError {
    pub fn is_transport(&self) -> bool { matches!(self, LoadError::Transport(_)) }
    pub fn is_decode(&self) -> bool { matches!(self, LoadError::Decode(_)) }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Transport(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("line {line}: invalid value for `{key}`: {value}")]
    InvalidValue { line: usize, key: String, value: String },

    #[error("unsupported source `{0}` (use a local path or http://host/path)")]
    UnsupportedSource(String),

    #[error("{0}")]
    Io(#[from] io::Error),
}
