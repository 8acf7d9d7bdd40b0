//! CLI command handlers. Each command is in its own file for clarity.

mod fetch;
mod run;
mod status;

pub use fetch::run_fetch;
pub use run::run_export;
pub use status::run_status;

use anyhow::Result;
use comex_core::client::{ClientSettings, ExportClient, DEFAULT_BASE_URL};
use comex_core::config::ComexConfig;
use comex_core::retry::RetryPolicy;
use std::time::Duration;

/// Builds an authenticated client from config, with an optional per-run
/// comment-limit override.
pub(crate) fn client_from_config(cfg: &ComexConfig, limit: Option<u32>) -> Result<ExportClient> {
    let token = cfg.resolve_api_token()?;
    let settings = ClientSettings {
        comment_limit: limit.unwrap_or(cfg.comment_limit),
        submit_timeout: Duration::from_secs(cfg.submit_timeout_secs),
        request_timeout: Duration::from_secs(cfg.request_timeout_secs),
    };
    let base_url = cfg.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
    ExportClient::new(base_url, &token, settings)
}

pub(crate) fn retry_policy(cfg: &ComexConfig) -> RetryPolicy {
    cfg.retry.as_ref().map(RetryPolicy::from).unwrap_or_default()
}
