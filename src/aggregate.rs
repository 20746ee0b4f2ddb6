// src/aggregate.rs
use std::sync::{Mutex, MutexGuard};

use crate::model::Response;

/// Append-only result sink shared by the board tasks.
///
/// Each task appends its whole batch under one lock, so batches from
/// different boards never interleave record by record.
#[derive(Debug, Default)]
pub struct Aggregator {
    results: Mutex<Vec<Response>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, batch: Vec<Response>) {
        if batch.is_empty() {
            return;
        }
        self.lock().extend(batch);
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Consume the sink once every writer is done.
    pub fn into_inner(self) -> Vec<Response> {
        self.results
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Writers only ever extend with whole batches; poisoned data is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<Response>> {
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
