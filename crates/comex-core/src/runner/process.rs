//! Per-URL export pipeline: submit, poll, download.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::client::{CommentRecord, ExportClient};
use crate::job::{poll_until_terminal, PollOutcome};
use crate::retry::{run_with_retry, RetryPolicy};

/// Runs one post URL through submit → poll → download and returns its records.
///
/// Errors name the stage that failed; the batch runner logs them and moves on.
pub async fn process_url(
    client: &ExportClient,
    post_url: &str,
    retry: &RetryPolicy,
    poll_interval: Duration,
) -> Result<Vec<CommentRecord>> {
    let submission = run_with_retry(retry, || client.submit(post_url))
        .await
        .with_context(|| format!("submit export for {post_url}"))?;
    tracing::info!(
        guid = %submission.guid,
        status = %submission.status,
        "started export for {}",
        post_url
    );

    let outcome = poll_until_terminal(client, &submission.guid, poll_interval, retry)
        .await
        .with_context(|| format!("poll job {}", submission.guid))?;
    let raw_url = match outcome {
        PollOutcome::Done { raw_url } => raw_url,
        PollOutcome::Failed { error } => {
            anyhow::bail!("job {} failed on the server: {}", submission.guid, error)
        }
    };

    let records = run_with_retry(retry, || client.download_raw(&raw_url))
        .await
        .with_context(|| format!("download results for job {}", submission.guid))?;
    tracing::info!(
        guid = %submission.guid,
        "collected {} comment(s) from {}",
        records.len(),
        post_url
    );
    Ok(records)
}
