//! Job lifecycle: server status parsing and the fixed-interval poll loop.

use std::time::Duration;

use crate::client::ExportClient;
use crate::retry::{run_with_retry, ExportError, RetryPolicy};

/// Server-side job states. Anything unrecognized is carried through as
/// non-terminal; the service uses transient labels such as `queueing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Processing,
    Done,
    Error,
    Other(String),
}

impl JobState {
    pub fn parse(s: &str) -> Self {
        match s {
            "pending" => JobState::Pending,
            "processing" => JobState::Processing,
            "done" => JobState::Done,
            "error" => JobState::Error,
            other => JobState::Other(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Done | JobState::Error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobState::Pending => "pending",
            JobState::Processing => "processing",
            JobState::Done => "done",
            JobState::Error => "error",
            JobState::Other(s) => s,
        }
    }
}

/// Terminal result of polling a job.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// Job finished; `raw_url` points at the downloadable results.
    Done { raw_url: String },
    /// Job failed on the server; message as reported by the service.
    Failed { error: String },
}

/// Polls a job at a fixed interval until it reaches a terminal state.
///
/// Individual status requests go through `retry` so one transient network
/// failure does not abandon a job that has been running for minutes.
pub async fn poll_until_terminal(
    client: &ExportClient,
    guid: &str,
    interval: Duration,
    retry: &RetryPolicy,
) -> Result<PollOutcome, ExportError> {
    loop {
        let entry = run_with_retry(retry, || client.job_status(guid)).await?;
        match JobState::parse(&entry.status) {
            JobState::Done => {
                let raw_url = entry.raw_url.ok_or_else(|| {
                    ExportError::Incomplete(format!("job {guid} is done but has no rawUrl"))
                })?;
                return Ok(PollOutcome::Done { raw_url });
            }
            JobState::Error => {
                let error = entry
                    .error
                    .unwrap_or_else(|| "unspecified server error".to_string());
                return Ok(PollOutcome::Failed { error });
            }
            state => {
                tracing::debug!(
                    guid,
                    status = state.as_str(),
                    "job not finished, checking again in {}s",
                    interval.as_secs()
                );
                tokio::time::sleep(interval).await;
            }
        }
    }
}
