// src/config/mod.rs
pub mod source;

pub use source::SourceConfig;

/// Reddit caps listing pages at 100 items.
pub const MAX_LISTING_LIMIT: u32 = 100;

/// Per-run knobs that are not credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Items requested per listing (posts and comments separately).
    pub listing_limit: u32,
}

impl RunOptions {
    /// `listing_limit` is clamped into 1..=100.
    pub fn new(listing_limit: u32) -> Self {
        Self {
            listing_limit: listing_limit.clamp(1, MAX_LISTING_LIMIT),
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new(MAX_LISTING_LIMIT)
    }
}
