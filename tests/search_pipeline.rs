// tests/search_pipeline.rs
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use what_they_saying::{
    search_all, Comment, ContentSource, Harvest, MonitorError, Post, ResponseKind,
};

/// Board -> number of matching comments, with failing boards and
/// per-board delay so completion order differs from launch order.
struct StubSource {
    hits: HashMap<String, usize>,
    fail_on: HashSet<String>,
    delay_ms: HashMap<String, u64>,
    finished: AtomicUsize,
}

impl StubSource {
    fn new(hits: &[(&str, usize)]) -> Self {
        Self {
            hits: hits.iter().map(|(b, n)| (b.to_string(), *n)).collect(),
            fail_on: HashSet::new(),
            delay_ms: HashMap::new(),
            finished: AtomicUsize::new(0),
        }
    }

    fn failing(mut self, board: &str) -> Self {
        self.fail_on.insert(board.to_string());
        self
    }

    fn delayed(mut self, board: &str, ms: u64) -> Self {
        self.delay_ms.insert(board.to_string(), ms);
        self
    }
}

#[async_trait]
impl ContentSource for StubSource {
    async fn fetch(&self, board: &str) -> Result<Harvest> {
        if let Some(ms) = self.delay_ms.get(board) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        } else {
            tokio::task::yield_now().await;
        }
        let out = if self.fail_on.contains(board) {
            Err(anyhow!("upstream said 503 for {board}"))
        } else {
            let n = self.hits.get(board).copied().unwrap_or(0);
            let comments = (0..n)
                .map(|i| Comment {
                    author: board.to_string(),
                    body: format!("{board} mentions tokio #{i}"),
                    created_at: i as u64,
                })
                .collect();
            let posts = vec![Post {
                author: board.to_string(),
                title: "unrelated".into(),
                self_text: "nothing here".into(),
                created_at: 0,
            }];
            Ok(Harvest { posts, comments })
        };
        self.finished.fetch_add(1, Ordering::SeqCst);
        out
    }
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_failed_board_fails_the_batch() {
    let stub = Arc::new(
        StubSource::new(&[("/r/a", 2), ("/r/b", 3)])
            .failing("/r/b")
            .delayed("/r/a", 50),
    );
    let source: Arc<dyn ContentSource> = stub.clone();

    let res = search_all(source, &strings(&["/r/a", "/r/b"]), &strings(&["tokio"])).await;

    match res {
        Err(MonitorError::Source { board, source }) => {
            assert_eq!(board, "/r/b");
            assert!(source.to_string().contains("503"));
        }
        other => panic!("expected a source failure, got {other:?}"),
    }
    // the slow healthy board still ran to completion before we returned
    assert_eq!(stub.finished.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn earliest_failure_wins_when_several_boards_fail() {
    let stub = Arc::new(
        StubSource::new(&[("/r/ok", 1)])
            .failing("/r/slow")
            .failing("/r/fast")
            .delayed("/r/slow", 120)
            .delayed("/r/fast", 10)
            .delayed("/r/ok", 60),
    );
    let source: Arc<dyn ContentSource> = stub.clone();

    let res = search_all(
        source,
        &strings(&["/r/slow", "/r/ok", "/r/fast"]),
        &strings(&["tokio"]),
    )
    .await;

    match res {
        Err(MonitorError::Source { board, source }) => {
            assert_eq!(board, "/r/fast");
            assert!(source.to_string().contains("/r/fast"));
        }
        other => panic!("expected the fast board's failure, got {other:?}"),
    }
    assert_eq!(stub.finished.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn all_boards_ok_pools_every_match() {
    let source: Arc<dyn ContentSource> =
        Arc::new(StubSource::new(&[("/r/a", 2), ("/r/b", 3), ("/r/c", 0)]));

    let out = search_all(
        source,
        &strings(&["/r/a", "/r/b", "/r/c"]),
        &strings(&["TOKIO"]),
    )
    .await
    .unwrap();

    assert_eq!(out.len(), 5);
    assert!(out.iter().all(|r| r.kind == ResponseKind::Comment));
    assert_eq!(out.iter().filter(|r| r.author == "/r/a").count(), 2);
    assert_eq!(out.iter().filter(|r| r.author == "/r/b").count(), 3);
}

#[tokio::test]
async fn board_batch_keeps_scan_order() {
    let source: Arc<dyn ContentSource> = Arc::new(StubSource::new(&[("/r/solo", 4)]));
    let out = search_all(source, &strings(&["/r/solo"]), &strings(&["tokio"]))
        .await
        .unwrap();
    let stamps: Vec<_> = out.iter().map(|r| r.posted_at).collect();
    assert_eq!(stamps, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn no_boards_means_no_results() {
    let source: Arc<dyn ContentSource> = Arc::new(StubSource::new(&[]));
    let out = search_all(source, &[], &strings(&["tokio"])).await.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn duplicate_boards_are_searched_twice() {
    let source: Arc<dyn ContentSource> = Arc::new(StubSource::new(&[("/r/a", 1)]));
    let out = search_all(source, &strings(&["/r/a", "/r/a"]), &strings(&["tokio"]))
        .await
        .unwrap();
    assert_eq!(out.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn fifty_boards_never_lose_appends() {
    let boards: Vec<String> = (0..50).map(|i| format!("/r/board{i}")).collect();
    let hits: Vec<(&str, usize)> = boards
        .iter()
        .enumerate()
        .map(|(i, b)| (b.as_str(), i % 7 + 1))
        .collect();
    let expected: usize = hits.iter().map(|(_, n)| n).sum();
    let phrases = strings(&["tokio"]);

    for _ in 0..20 {
        let source: Arc<dyn ContentSource> = Arc::new(StubSource::new(&hits));
        let out = search_all(source, &boards, &phrases).await.unwrap();
        assert_eq!(out.len(), expected);

        // each board's batch lands as one contiguous run
        let mut seen = HashSet::new();
        let mut prev: Option<&str> = None;
        for r in &out {
            if prev != Some(r.author.as_str()) {
                assert!(seen.insert(r.author.clone()), "{} interleaved", r.author);
                prev = Some(r.author.as_str());
            }
        }
        assert_eq!(seen.len(), 50);
    }
}

struct PanickingSource;

#[async_trait]
impl ContentSource for PanickingSource {
    async fn fetch(&self, board: &str) -> Result<Harvest> {
        if board == "/r/boom" {
            panic!("source blew up");
        }
        Ok(Harvest::default())
    }
}

#[tokio::test]
async fn panicking_task_is_reported_as_failure() {
    let source: Arc<dyn ContentSource> = Arc::new(PanickingSource);
    let err = search_all(source, &strings(&["/r/ok", "/r/boom"]), &strings(&["x"]))
        .await
        .unwrap_err();
    assert!(matches!(err, MonitorError::Task(_)));
}
