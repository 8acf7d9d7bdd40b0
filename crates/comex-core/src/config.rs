use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides the `api_token` config field.
pub const TOKEN_ENV_VAR: &str = "COMEX_API_TOKEN";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/comex/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComexConfig {
    /// API token for the export service. `COMEX_API_TOKEN` takes precedence.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Override for the service base URL (proxies, testing).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Maximum number of export jobs in flight at once.
    pub max_concurrent_jobs: usize,
    /// Fixed interval between status polls, in seconds.
    pub poll_interval_secs: u64,
    /// Timeout for the submission request, in seconds.
    pub submit_timeout_secs: u64,
    /// Timeout for status and download requests, in seconds.
    pub request_timeout_secs: u64,
    /// Per-job comment limit sent with each submission.
    pub comment_limit: u32,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for ComexConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: None,
            max_concurrent_jobs: 5,
            poll_interval_secs: 30,
            submit_timeout_secs: 30,
            request_timeout_secs: 60,
            comment_limit: 5000,
            retry: None,
        }
    }
}

impl ComexConfig {
    /// Resolves the API token: environment variable first, then config file.
    pub fn resolve_api_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                return Ok(token.trim().to_string());
            }
        }
        match self.api_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => anyhow::bail!(
                "no API token configured: set {} or `api_token` in {}",
                TOKEN_ENV_VAR,
                config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "the config file".to_string())
            ),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("comex")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ComexConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ComexConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ComexConfig = toml::from_str(&data)?;
    Ok(cfg)
}
