//! Configuration management for spotback.
//!
//! Values come from environment variables, optionally pre-populated from a
//! `.env` file in the local data directory. They are read once into a
//! [`Settings`] value which is then passed explicitly to every component
//! that needs it; nothing reads the environment behind the caller's back.
//!
//! Precedence:
//! 1. Environment variables
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use reqwest::Url;

use crate::{error::ConfigError, types::Credentials};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:9002";
pub const DEFAULT_APP_URL: &str = "http://127.0.0.1:9002";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str =
    "user-read-private user-read-email playlist-read-private playlist-read-collaborative";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 120;

/// Path of the callback route, relative to the app root.
pub const CALLBACK_PATH: &str = "/api/auth/callback/spotify";

/// Loads environment variables from `<data_local_dir>/spotback/.env`.
///
/// The directory is created when missing. A missing `.env` file is fine,
/// every setting has a default or can be passed on the command line; a file
/// that exists but cannot be parsed is reported.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotback/.env`
/// - macOS: `~/Library/Application Support/spotback/.env`
/// - Windows: `%LOCALAPPDATA%/spotback/.env`
pub async fn load_env() -> Result<(), ConfigError> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Platform-specific data directory of the application.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotback");
    path
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_address: SocketAddr,
    pub app_url: Url,
    pub auth_url: Url,
    pub token_url: Url,
    pub api_url: String,
    pub scope: String,
    /// Server-side application credentials, when configured.
    pub credentials: Option<Credentials>,
    pub request_timeout: Duration,
    pub login_timeout: Duration,
}

impl Settings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the settings through an arbitrary key lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_address = parse_address(
            "SERVER_ADDRESS",
            get("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
        )?;
        let app_url = parse_url(
            "SPOTBACK_APP_URL",
            get("SPOTBACK_APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
        )?;
        let auth_url = parse_url(
            "SPOTIFY_API_AUTH_URL",
            get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
        )?;
        let token_url = parse_url(
            "SPOTIFY_API_TOKEN_URL",
            get("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
        )?;
        let api_url = parse_url(
            "SPOTIFY_API_URL",
            get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?
        .as_str()
        .trim_end_matches('/')
        .to_string();

        let credentials = match (get("SPOTIFY_CLIENT_ID"), get("SPOTIFY_CLIENT_SECRET")) {
            (Some(id), Some(secret)) => Some(Credentials::new(id, secret)),
            _ => None,
        };

        Ok(Self {
            server_address,
            app_url,
            auth_url,
            token_url,
            api_url,
            scope: get("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            credentials,
            request_timeout: parse_secs(
                "SPOTBACK_REQUEST_TIMEOUT_SECS",
                get("SPOTBACK_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            login_timeout: parse_secs(
                "SPOTBACK_LOGIN_TIMEOUT_SECS",
                get("SPOTBACK_LOGIN_TIMEOUT_SECS"),
                DEFAULT_LOGIN_TIMEOUT_SECS,
            )?,
        })
    }

    /// Redirect URI registered with Spotify. Must match the registered value
    /// byte for byte, otherwise the token exchange fails with `invalid_grant`.
    pub fn redirect_uri(&self) -> String {
        format!(
            "{}{}",
            self.app_url.as_str().trim_end_matches('/'),
            CALLBACK_PATH
        )
    }
}

fn parse_address(key: &'static str, value: String) -> Result<SocketAddr, ConfigError> {
    SocketAddr::from_str(value.trim()).map_err(|_| ConfigError::InvalidAddress { key, value })
}

fn parse_url(key: &'static str, value: String) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|_| ConfigError::InvalidUrl { key, value })
}

fn parse_secs(
    key: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(Duration::from_secs(default)),
        Some(v) => v
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidNumber { key, value: v }),
    }
}
