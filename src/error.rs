// src/error.rs
use thiserror::Error;

/// Errors surfaced by the monitoring pipeline.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// A comma separated list (`phrases` or `boards`) had nothing in it.
    #[error("no {0} provided")]
    EmptyInput(&'static str),

    /// A board did not start with the `/r/` prefix.
    #[error("not a valid board: {0:?} (expected a /r/ prefix)")]
    InvalidFormat(String),

    /// A required credential was empty.
    #[error("missing config field: {0}")]
    MissingField(&'static str),

    /// Fetch failure bubbled up from a content source, kept as-is.
    #[error("fetching {board} failed")]
    Source {
        board: String,
        #[source]
        source: anyhow::Error,
    },

    /// A board task panicked or was cancelled before reporting.
    #[error("board task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
