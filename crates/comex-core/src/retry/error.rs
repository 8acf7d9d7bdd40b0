use std::time::Duration;

/// Error returned by a single export API request (transport or HTTP failure).
/// Used so we can classify and decide retries before converting to anyhow.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The HTTP client reported an error (timeout, connection, decode, etc.).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u16),
    /// The service accepted the request but asked us to wait and resubmit.
    #[error("rate limited, server asked for a {}s wait", wait.as_secs())]
    RateLimited { wait: Duration },
    /// A 2xx reply that is missing a field the protocol requires.
    #[error("incomplete reply: {0}")]
    Incomplete(String),
}
