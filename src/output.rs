// src/output.rs
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::model::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Matched text only, one per line.
    #[default]
    Body,
    /// Kind, author, time and text, tab separated.
    Long,
    /// One JSON object per line.
    Json,
}

/// Write responses in aggregation order.
pub fn render<W: Write>(responses: &[Response], format: OutputFormat, out: &mut W) -> Result<()> {
    for r in responses {
        match format {
            OutputFormat::Body => writeln!(out, "{}", r.body)?,
            OutputFormat::Long => writeln!(
                out,
                "{}\t{}\t{}\t{}",
                r.kind,
                r.author,
                format_ts(r.posted_at),
                r.body
            )?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, r)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn format_ts(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
