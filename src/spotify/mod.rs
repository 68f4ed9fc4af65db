//! # Spotify Integration Module
//!
//! Client side of the Spotify accounts service and Web API. This is the core
//! of spotback: everything the command layer shows or exports passes through
//! here.
//!
//! ```text
//! CLI / callback server
//!          ↓
//! Spotify Integration Layer
//!     ├── auth        token exchange (authorization code, client credentials)
//!     ├── pagination  cursor-following GET of any paged collection
//!     ├── playlists   playlist listing and full-track aggregation
//!     └── user        current user profile
//!          ↓
//! reqwest → Spotify Web API
//! ```
//!
//! ## Error Handling
//!
//! Every request resolves to a typed result:
//! - [`AuthError`](crate::error::AuthError) for token-endpoint failures
//! - [`SpotifyError`](crate::error::SpotifyError) for resource endpoints, with
//!   401 (session expired) and 429 (rate limited, `Retry-After` surfaced) kept
//!   distinguishable
//!
//! Nothing here retries. Whether to wait out a 429 or force a new login after
//! a 401 is decided by the caller.
//!
//! ## Concurrency
//!
//! Pages of one collection are fetched strictly one after another, each
//! request depends on the previous `next` cursor. Different playlists are
//! aggregated concurrently on the same task; no threads are spawned. The access
//! token is only ever borrowed.

pub mod auth;
pub mod pagination;
pub mod playlists;
pub mod user;

use reqwest::Client;

use crate::config::Settings;

/// Page size of the playlist list endpoint (API maximum).
pub const PLAYLISTS_PAGE_LIMIT: u32 = 50;

/// Handle on the Spotify Web API.
///
/// Holds one pooled [`reqwest::Client`] and the API base URL. Cloning is
/// cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
}

impl SpotifyClient {
    /// Builds a client with the request timeout from `settings`.
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self::with_http(http, &settings.api_url))
    }

    /// Builds a client around an existing HTTP client, e.g. one pointed at a
    /// mock server.
    pub fn with_http(http: Client, api_url: &str) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}
