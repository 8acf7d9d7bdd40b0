//! HTTP client for the comment-export API.
//!
//! Wraps submission (`PUT /api/v2/export`), status (`GET /api/v2/export?guid=`)
//! and raw-result download behind typed replies, mapping in-body rate limits
//! and incomplete bodies into `ExportError` so the retry policy can classify
//! them.

mod parse;

pub use parse::{CommentRecord, StatusData, StatusEnvelope, SubmitData, SubmitEnvelope};

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

use crate::retry::ExportError;

/// Production endpoint of the export service.
pub const DEFAULT_BASE_URL: &str = "https://exportcomments.com";

const API_PATH: &str = "/api/v2/export";
const AUTH_HEADER: &str = "X-AUTH-TOKEN";
/// The service rejects requests without this content type.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Per-client tunables, separate from the wire protocol.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Per-job comment limit passed in the submit `options`.
    pub comment_limit: u32,
    /// Timeout for the submission request.
    pub submit_timeout: Duration,
    /// Timeout for status and download requests.
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            comment_limit: 5000,
            submit_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Accepted submission: the server-issued job identifier plus initial status.
#[derive(Debug, Clone)]
pub struct Submission {
    pub guid: String,
    pub status: String,
}

/// Authenticated client for one export service endpoint.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ExportClient {
    http: reqwest::Client,
    base: Url,
    api: Url,
    token: String,
    settings: ClientSettings,
}

impl ExportClient {
    pub fn new(base_url: &str, token: &str, settings: ClientSettings) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid base URL: {base_url}"))?;
        let api = base
            .join(API_PATH)
            .with_context(|| format!("invalid base URL: {base_url}"))?;
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base,
            api,
            token: token.to_string(),
            settings,
        })
    }

    /// Submits an export job for `post_url` and returns the server-issued guid.
    ///
    /// A 200 reply can still be a rate limit (`data.status_code == 429`, with
    /// `seconds_to_wait`) or incomplete (no `status` field); both map to
    /// retryable errors.
    pub async fn submit(&self, post_url: &str) -> Result<Submission, ExportError> {
        let options = serde_json::json!({ "limit": self.settings.comment_limit }).to_string();
        let response = self
            .http
            .put(self.api.clone())
            .query(&[("url", post_url), ("options", options.as_str())])
            .header(AUTH_HEADER, &self.token)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .timeout(self.settings.submit_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Http(status.as_u16()));
        }

        let reply: SubmitEnvelope = response.json().await?;
        let data = reply.data;
        if data.status_code == Some(429) {
            let wait = Duration::from_secs(data.seconds_to_wait.unwrap_or(1));
            return Err(ExportError::RateLimited { wait });
        }
        let Some(job_status) = data.status else {
            return Err(ExportError::Incomplete(
                "submit reply carried no job status".to_string(),
            ));
        };
        let Some(guid) = data.guid else {
            return Err(ExportError::Incomplete(
                "submit reply carried no guid".to_string(),
            ));
        };
        Ok(Submission {
            guid,
            status: job_status,
        })
    }

    /// Fetches the current status entry for a job.
    pub async fn job_status(&self, guid: &str) -> Result<StatusData, ExportError> {
        let response = self
            .http
            .get(self.api.clone())
            .query(&[("guid", guid)])
            .header(AUTH_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Http(status.as_u16()));
        }

        let reply: StatusEnvelope = response.json().await?;
        reply.data.into_iter().next().ok_or_else(|| {
            ExportError::Incomplete(format!("status reply for {guid} carried no entries"))
        })
    }

    /// Downloads the raw exported records for a finished job.
    ///
    /// `raw_url` is server-relative, as returned in the status reply.
    pub async fn download_raw(&self, raw_url: &str) -> Result<Vec<CommentRecord>, ExportError> {
        let url = self
            .base
            .join(raw_url)
            .map_err(|e| ExportError::Incomplete(format!("bad rawUrl {raw_url}: {e}")))?;
        let response = self
            .http
            .get(url)
            .header(AUTH_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Http(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}
