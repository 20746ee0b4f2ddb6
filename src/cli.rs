// src/cli.rs
use clap::Parser;

use crate::config::{RunOptions, MAX_LISTING_LIMIT};
use crate::output::OutputFormat;

/// Look for phrases in the newest posts and comments of some subreddits.
#[derive(Debug, Parser)]
#[command(name = "what-they-saying", version, about)]
pub struct Cli {
    /// A comma separated list of all the subreddits you are interested in (e.g. /r/rust,/r/golang).
    #[arg(long)]
    pub subreddits: String,

    /// A comma separated list of all the phrases you are interested in.
    #[arg(long)]
    pub phrases: String,

    /// Posts and comments requested per subreddit (1-100).
    #[arg(long, env = "LISTING_LIMIT", default_value_t = MAX_LISTING_LIMIT)]
    pub limit: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Body)]
    pub format: OutputFormat,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions::new(self.limit)
    }
}
