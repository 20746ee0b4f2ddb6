// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod model;
pub mod output;
pub mod search;
pub mod source;
pub mod validate;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::Aggregator;
pub use crate::config::{RunOptions, SourceConfig};
pub use crate::error::{MonitorError, Result};
pub use crate::matcher::match_harvest;
pub use crate::model::{Comment, Harvest, Post, Response, ResponseKind};
pub use crate::search::search_all;
pub use crate::source::{reddit::RedditSource, ContentSource};
pub use crate::validate::{validate_boards, validate_phrases};
