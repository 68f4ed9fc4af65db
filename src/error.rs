//! Error types for spotback.
//!
//! Every public operation either succeeds or fails with one of the typed
//! errors below. Nothing in the library logs or swallows an error; reporting
//! is left to the CLI and server layers.

use std::fmt;

use thiserror::Error;

/// Classification of a failed authorization-code (or client-credentials) exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The code is invalid, expired, already used, or the redirect URI does not match.
    InvalidGrant,
    /// The client id/secret pair was rejected.
    InvalidClient,
    /// The user declined consent at the authorize endpoint.
    AccessDenied,
    /// The token endpoint could not be reached.
    Network,
    /// The token endpoint answered with something that is not the expected JSON.
    MalformedResponse,
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthErrorKind::InvalidGrant => "invalid grant",
            AuthErrorKind::InvalidClient => "invalid client",
            AuthErrorKind::AccessDenied => "access denied",
            AuthErrorKind::Network => "network error",
            AuthErrorKind::MalformedResponse => "malformed response",
        };
        f.write_str(name)
    }
}

/// Token exchange failure. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("authentication failed ({kind}): {message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Non-2xx answer from a resource endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Spotify API error (status {status}): {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    /// Parsed from the `Retry-After` header of a 429 response.
    pub retry_after_seconds: Option<u64>,
}

impl ApiError {
    /// The access token is no longer valid; the session must be dropped.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Failure of any request against the Spotify Web API.
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The body was not the JSON document the endpoint promises (for
    /// example an HTML error page served by a proxy).
    #[error("malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    /// Transport failure: connection refused, timeout, TLS error.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl SpotifyError {
    pub fn api_status(&self) -> Option<u16> {
        match self {
            SpotifyError::Api(api) => Some(api.status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SpotifyError::Api(api) if api.is_unauthorized())
    }

    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            SpotifyError::Api(api) if api.is_rate_limited() => api.retry_after_seconds,
            _ => None,
        }
    }
}

/// Failure while serializing playlists into an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("ZIP error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl<W> From<csv::IntoInnerError<W>> for ExportError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        ExportError::Io(err.into_error())
    }
}

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid socket address: {value}")]
    InvalidAddress { key: &'static str, value: String },

    #[error("{key} is not a valid URL: {value}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("{key} must be a number of seconds, got: {value}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("cannot prepare configuration directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read .env file: {0}")]
    Dotenv(#[from] dotenv::Error),
}

/// A login handoff could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandoffError {
    #[error("unknown or already used login state")]
    UnknownState,

    #[error("login state expired, please start the login again")]
    Expired,
}

/// The persisted session could not be read or written.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}
