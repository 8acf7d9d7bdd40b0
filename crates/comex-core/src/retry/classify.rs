//! Classify HTTP statuses and transport errors into retry policy error kinds.

use super::error::ExportError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u16) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code),
        _ => ErrorKind::Other,
    }
}

/// Classify a reqwest transport error for retry decisions.
pub fn classify_transport_error(e: &reqwest::Error) -> ErrorKind {
    if e.is_timeout() {
        return ErrorKind::Timeout;
    }
    if e.is_connect() || e.is_request() || e.is_body() {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Classify an export error (transport, HTTP, or protocol) into an ErrorKind.
pub fn classify(e: &ExportError) -> ErrorKind {
    match e {
        ExportError::Transport(te) => classify_transport_error(te),
        ExportError::Http(code) => classify_http_status(*code),
        ExportError::RateLimited { .. } => ErrorKind::Throttled,
        ExportError::Incomplete(_) => ErrorKind::Incomplete,
    }
}
