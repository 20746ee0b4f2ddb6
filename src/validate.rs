// src/validate.rs
//! Turns raw comma separated CLI values into phrase and board lists.

use crate::error::{MonitorError, Result};

/// Every board path must start with this.
pub const BOARD_PREFIX: &str = "/r/";

fn split_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

/// Split phrases on commas, keeping each element verbatim. Empty phrases
/// inside a non-empty list are kept and match everything; so are duplicates.
pub fn validate_phrases(raw: &str) -> Result<Vec<String>> {
    let phrases = split_list(raw);
    if phrases.is_empty() {
        return Err(MonitorError::EmptyInput("phrases"));
    }
    Ok(phrases)
}

/// Split boards on commas and require the `/r/` prefix on each one.
pub fn validate_boards(raw: &str) -> Result<Vec<String>> {
    let boards = split_list(raw);
    if boards.is_empty() {
        return Err(MonitorError::EmptyInput("boards"));
    }
    if let Some(bad) = boards.iter().find(|b| !b.starts_with(BOARD_PREFIX)) {
        return Err(MonitorError::InvalidFormat(bad.clone()));
    }
    Ok(boards)
}
