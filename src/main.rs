//! what-they-saying: one pass over the given subreddits, printing every
//! post or comment body that mentions one of the phrases.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use what_they_saying::cli::Cli;
use what_they_saying::{
    output, search_all, validate_boards, validate_phrases, ContentSource, RedditSource,
    SourceConfig,
};

/// Logs go to stderr so stdout carries only matches.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("what_they_saying=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env when present; real env vars win.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let phrases = validate_phrases(&cli.phrases)?;
    let boards = validate_boards(&cli.subreddits)?;
    let config = SourceConfig::from_env()?;

    let source: Arc<dyn ContentSource> = Arc::new(
        RedditSource::new(config, cli.run_options()).context("creating reddit client")?,
    );

    tracing::info!(boards = ?boards, phrases = phrases.len(), "searching");
    let responses = search_all(source, &boards, &phrases)
        .await
        .context("failed to get some data")?;

    let stdout = std::io::stdout();
    output::render(&responses, cli.format, &mut stdout.lock())?;
    Ok(())
}
