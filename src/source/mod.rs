// src/source/mod.rs
pub mod reddit;

use anyhow::Result;

use crate::model::Harvest;

/// Anything that can list recent posts and comments for a board.
///
/// Errors are opaque to the pipeline: they are passed through untouched and
/// fail the whole run.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, board: &str) -> Result<Harvest>;
}
