//! Error taxonomy for the Qualer SDK.
//!
//! Every transport or validation outcome maps to exactly one variant; the
//! host-visible kind set is closed. Messages never contain the credential.

use serde::Serialize;

/// Result type for SDK operations.
pub type QualerResult<T> = Result<T, QualerError>;

/// Errors produced by Qualer operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QualerError {
    /// The requested entity does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The credential was rejected (HTTP 401/403).
    #[error("unauthorized (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The remote API throttled the request (HTTP 429).
    #[error("rate limited (status {status}): {message}")]
    RateLimited { status: u16, message: String },

    /// The remote API failed or returned schema-incompatible data.
    #[error("remote fault: {message}")]
    RemoteFault { status: Option<u16>, message: String },

    /// Locally-detected bad input: invalid parameter, cursor mismatch,
    /// malformed cursor token.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// The remote API could not be reached (connect failure or timeout).
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// Missing or malformed client configuration. Surfaced to the host
    /// as `invalid` since it is detected before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// A 2xx body failed schema validation. Surfaced to the host as
    /// `remote_fault`; kept distinct internally for diagnostics.
    #[error("validation failed at `{path}`: {detail}")]
    Validation { path: String, detail: String },
}

impl QualerError {
    /// Classify an HTTP status into an error. Total: every non-2xx status
    /// maps to exactly one variant, with no unknown fallthrough.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = snippet(body);
        match status {
            401 | 403 => Self::Unauthorized { status, message },
            404 => Self::NotFound(message),
            429 => Self::RateLimited { status, message },
            _ => Self::RemoteFault {
                status: Some(status),
                message,
            },
        }
    }

    /// The host-visible error kind. Closed set: internal sub-kinds fold
    /// into it (`Validation` -> `remote_fault`, `Config` -> `invalid`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Unauthorized { .. } => "unauthorized",
            Self::RateLimited { .. } => "rate_limited",
            Self::RemoteFault { .. } | Self::Validation { .. } => "remote_fault",
            Self::Invalid(_) | Self::Config(_) => "invalid",
            Self::Unreachable(_) => "unreachable",
        }
    }

    /// The originating HTTP status, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Unauthorized { status, .. } | Self::RateLimited { status, .. } => Some(*status),
            Self::RemoteFault { status, .. } => *status,
            _ => None,
        }
    }

    /// Convenience constructor for field-level validation failures.
    pub fn validation(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Structured representation handed to the host. Never includes the
    /// credential or a raw transport string.
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            kind: self.kind(),
            status: self.status(),
            message: self.to_string(),
        }
    }
}

impl From<reqwest::Error> for QualerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Unreachable("request timed out".to_string())
        } else if e.is_connect() {
            Self::Unreachable(format!("connection failed: {}", sanitize(&e)))
        } else if e.is_decode() {
            Self::RemoteFault {
                status: e.status().map(|s| s.as_u16()),
                message: "response body was not valid JSON".to_string(),
            }
        } else {
            Self::Unreachable(sanitize(&e))
        }
    }
}

/// Structured error object returned to the host runtime.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

/// Truncate a response body for inclusion in an error message.
fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty response body)".to_string();
    }
    match trimmed.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// reqwest error strings embed the full URL; keep only the error text.
fn sanitize(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(url) = e.url() {
        msg = msg.replace(url.as_str(), "<url>");
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_is_total_and_deterministic() {
        let cases = [
            (401, "unauthorized"),
            (403, "unauthorized"),
            (404, "not_found"),
            (429, "rate_limited"),
            (500, "remote_fault"),
            (503, "remote_fault"),
        ];
        for (status, kind) in cases {
            let err = QualerError::from_status(status, "boom");
            assert_eq!(err.kind(), kind, "status {}", status);
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn test_unlisted_status_maps_to_remote_fault() {
        for status in [400, 402, 418, 451] {
            let err = QualerError::from_status(status, "");
            assert_eq!(err.kind(), "remote_fault");
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn test_internal_kinds_fold_into_closed_set() {
        assert_eq!(QualerError::validation("id", "missing").kind(), "remote_fault");
        assert_eq!(QualerError::Config("no token".into()).kind(), "invalid");
        assert_eq!(QualerError::Invalid("bad cursor".into()).kind(), "invalid");
    }

    #[test]
    fn test_validation_error_names_field_path() {
        let err = QualerError::validation("items[2].id", "expected a positive integer");
        assert!(err.to_string().contains("items[2].id"));
    }

    #[test]
    fn test_body_snippet_is_truncated() {
        let long = "x".repeat(500);
        let err = QualerError::from_status(500, &long);
        assert!(err.to_string().len() < 300);
    }

    #[test]
    fn test_envelope_shape() {
        let env = QualerError::from_status(429, "slow down").to_envelope();
        assert_eq!(env.kind, "rate_limited");
        assert_eq!(env.status, Some(429));

        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["kind"], "rate_limited");
        assert_eq!(json["status"], 429);
    }
}
