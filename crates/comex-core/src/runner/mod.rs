//! Batch runner: a bounded pool of per-URL export tasks.
//!
//! Keeps up to `max_concurrent` exports in flight at once; when one finishes,
//! the next queued URL is started until the queue is empty. A failed URL is
//! logged and counted, never fatal to the batch.

mod process;

pub use process::process_url;

use anyhow::Result;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::task::JoinSet;

use crate::client::{CommentRecord, ExportClient};
use crate::retry::RetryPolicy;

/// Tunables for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of URL tasks in flight at once.
    pub max_concurrent: usize,
    /// Fixed interval between status polls.
    pub poll_interval: Duration,
    /// Shared retry policy for submit, poll, and download requests.
    pub retry: RetryPolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            poll_interval: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

/// Result of a batch run: merged records plus per-URL accounting.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Records from all successful jobs, in completion order.
    pub records: Vec<CommentRecord>,
    /// URLs whose job finished and downloaded.
    pub completed: usize,
    /// URLs that failed at any stage.
    pub failed: usize,
}

/// Runs every URL through the export pipeline with up to
/// `opts.max_concurrent` jobs in flight.
pub async fn run_batch(
    client: &ExportClient,
    urls: Vec<String>,
    opts: &BatchOptions,
) -> Result<BatchSummary> {
    let max_concurrent = opts.max_concurrent.max(1);
    let mut queue: VecDeque<String> = urls.into();
    let mut join_set = JoinSet::new();
    let mut summary = BatchSummary::default();

    loop {
        while join_set.len() < max_concurrent {
            let Some(url) = queue.pop_front() else {
                break;
            };
            let client = client.clone();
            let retry = opts.retry;
            let poll_interval = opts.poll_interval;
            join_set.spawn(async move {
                let outcome = process_url(&client, &url, &retry, poll_interval).await;
                (url, outcome)
            });
        }

        if join_set.is_empty() {
            break;
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let (url, outcome) = res.map_err(|e| anyhow::anyhow!("export task join: {}", e))?;
        match outcome {
            Ok(records) => {
                summary.completed += 1;
                summary.records.extend(records);
            }
            Err(err) => {
                summary.failed += 1;
                tracing::warn!(%url, "export failed: {:#}", err);
            }
        }
    }

    Ok(summary)
}
