//! # CLI Module
//!
//! Command implementations behind the `spotback` binary. Each command loads
//! the persisted [`Session`](crate::management::Session), talks to Spotify
//! through [`SpotifyClient`](crate::spotify::SpotifyClient) and reports with
//! the crate's status macros.
//!
//! ## Commands
//!
//! - [`login`] - Browser-based authorization-code login via the local callback server
//! - [`logout`] - Forget the stored token and profile
//! - [`whoami`] - Show the logged-in profile
//! - [`playlists`] - List the user's playlists
//! - [`export`] - Aggregate playlists and write an export file
//!
//! ## Failure Policy
//!
//! The library never retries and never logs. The decisions live here:
//!
//! - **401** drops the session, persists the logout, and asks for a new login
//! - **429** waits for `Retry-After` seconds and retries, up to a caller-chosen
//!   number of times ([`retry_rate_limited`])
//! - **Malformed responses** are reported with a hint about configuration
//!   problems, which is the usual cause
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotback login                              # Authorize in the browser
//! spotback playlists --search road            # Find playlists by name
//! spotback export 37i9dQZF1DXcBWIGoYBM5M --format csv
//! spotback export --all --format zip --output ~/backups
//! ```

mod auth;
mod export;
mod info;
mod playlists;

pub use auth::{login, logout};
pub use export::{ExportOptions, export};
pub use info::whoami;
pub use playlists::playlists;

use std::{future::Future, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Settings, error, error::SpotifyError, management::Session, spotify::SpotifyClient,
    warning,
};

/// Wait used for a 429 answer that carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Runs `op`, retrying up to `max_retries` times while it fails with a 429.
///
/// Each retry waits for the `Retry-After` value of the failed attempt. Any
/// other error, or a 429 once the retries are used up, is returned as is.
pub async fn retry_rate_limited<T, F, Fut>(max_retries: u32, mut op: F) -> Result<T, SpotifyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SpotifyError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(e) if e.api_status() == Some(429) && attempt < max_retries => {
                attempt += 1;
                let wait = e.retry_after_seconds().unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                warning!(
                    "Rate limited, waiting {} seconds (retry {}/{})",
                    wait,
                    attempt,
                    max_retries
                );
                tokio::time::sleep(Duration::from_secs(wait)).await;
            }
            result => return result,
        }
    }
}

/// Human-readable explanation of a failed API call.
pub fn describe(err: &SpotifyError) -> String {
    if err.is_unauthorized() {
        return "Your Spotify session has expired. Run `spotback login` again.".to_string();
    }
    if err.api_status() == Some(429) {
        return match err.retry_after_seconds() {
            Some(secs) => format!("Rate limited by Spotify, wait {} seconds and try again.", secs),
            None => "Rate limited by Spotify, wait a moment and try again.".to_string(),
        };
    }
    if let SpotifyError::MalformedResponse { .. } = err {
        return format!(
            "{}\nThis usually means a misconfigured API URL or redirect URI. Check your .env file.",
            err
        );
    }
    err.to_string()
}

/// Reports a failed API call and exits. A 401 logs the session out first.
pub(crate) async fn fail<T>(session: &mut Session, err: SpotifyError) -> T {
    if session.observe(&err) {
        if let Err(e) = session.persist().await {
            warning!("Failed to save session: {}", e);
        }
    }
    error!("{}", describe(&err));
}

pub(crate) async fn load_session() -> Session {
    match Session::load().await {
        Ok(session) => session,
        Err(e) => error!("Failed to load session: {}", e),
    }
}

/// Loads the session and returns it with its access token, or exits when
/// nobody is logged in.
pub(crate) async fn require_login() -> (Session, String) {
    let session = load_session().await;
    let Some(token) = session.access_token().map(str::to_string) else {
        error!("Not logged in. Run `spotback login` first.");
    };
    (session, token)
}

pub(crate) fn client(settings: &Settings) -> SpotifyClient {
    match SpotifyClient::new(settings) {
        Ok(client) => client,
        Err(e) => error!("Failed to create HTTP client: {}", e),
    }
}

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
