// src/search.rs
//! Fan-out over boards: fetch, match, aggregate, all-or-nothing.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;
use tokio::task::JoinSet;

use crate::aggregate::Aggregator;
use crate::error::{MonitorError, Result};
use crate::matcher::match_harvest;
use crate::model::Response;
use crate::source::ContentSource;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("monitor_fetch_total", "Board fetches attempted.");
        describe_counter!("monitor_fetch_errors_total", "Board fetches that failed.");
        describe_counter!("monitor_matches_total", "Responses produced by the matcher.");
        describe_histogram!("monitor_fetch_ms", "Board fetch time in milliseconds.");
        describe_gauge!("monitor_last_run_ts", "Unix ts when a search run last finished.");
    });
}

/// Search every board concurrently and pool the matches.
///
/// One task is spawned per board with no cap. Every task runs to
/// completion even after a sibling fails; the first failure seen is
/// returned and any partial matches are dropped. On success the result
/// holds each board's matches as one contiguous run, boards in the order
/// they finished.
pub async fn search_all(
    source: Arc<dyn ContentSource>,
    boards: &[String],
    phrases: &[String],
) -> Result<Vec<Response>> {
    ensure_metrics_described();

    let run_started = Instant::now();
    let phrases: Arc<[String]> = phrases.into();
    let aggregator = Arc::new(Aggregator::new());
    let mut tasks = JoinSet::new();

    for board in boards {
        let board = board.clone();
        let source = source.clone();
        let phrases = phrases.clone();
        let aggregator = aggregator.clone();

        tasks.spawn(async move {
            let t0 = Instant::now();
            counter!("monitor_fetch_total").increment(1);

            let harvest = source.fetch(&board).await;
            histogram!("monitor_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

            let harvest = harvest.map_err(|e| {
                counter!("monitor_fetch_errors_total").increment(1);
                MonitorError::Source {
                    board: board.clone(),
                    source: e,
                }
            })?;

            if harvest.is_empty() {
                tracing::debug!(board = %board, "board listing was empty");
            }

            let matches = match_harvest(&harvest, &phrases);
            let n = matches.len();
            counter!("monitor_matches_total").increment(n as u64);
            aggregator.append(matches);

            tracing::info!(
                board = %board,
                posts = harvest.posts.len(),
                comments = harvest.comments.len(),
                matches = n,
                pooled = aggregator.len(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "board searched"
            );
            Ok::<_, MonitorError>(())
        });
    }

    let mut first_err: Option<MonitorError> = None;
    while let Some(joined) = tasks.join_next().await {
        let err = match joined {
            Ok(Ok(())) => continue,
            Ok(Err(e)) => e,
            Err(join_err) => MonitorError::Task(join_err.to_string()),
        };
        tracing::warn!(error = ?err, "board search failed");
        if first_err.is_none() {
            first_err = Some(err);
        }
    }

    gauge!("monitor_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);

    if let Some(err) = first_err {
        return Err(err);
    }

    // Every task has been joined, so ours is the last handle.
    let results = match Arc::try_unwrap(aggregator) {
        Ok(agg) => agg.into_inner(),
        Err(shared) => {
            return Err(MonitorError::Task(format!(
                "aggregator still shared after join ({} holders)",
                Arc::strong_count(&shared)
            )))
        }
    };

    tracing::info!(
        boards = boards.len(),
        matches = results.len(),
        elapsed_ms = run_started.elapsed().as_millis() as u64,
        "search finished"
    );
    Ok(results)
}
