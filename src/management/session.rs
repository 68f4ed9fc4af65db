use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    config,
    error::{SessionError, SpotifyError},
    types::UserProfile,
};

/// Login state of the local user: the access token and the profile, both
/// persisted between runs. Client credentials are never part of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    access_token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the session file, or an empty session when there is none yet.
    pub async fn load() -> Result<Self, SessionError> {
        Self::load_from(&Self::session_path()).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, SessionError> {
        match async_fs::read_to_string(path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn persist(&self) -> Result<(), SessionError> {
        self.persist_to(&Self::session_path()).await
    }

    pub async fn persist_to(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(self)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Replaces the token. A new token invalidates the cached profile.
    pub fn sign_in(&mut self, access_token: impl Into<String>) {
        self.access_token = Some(access_token.into());
        self.user = None;
    }

    pub fn set_user(&mut self, user: UserProfile) {
        self.user = Some(user);
    }

    /// Drops token and profile.
    pub fn logout(&mut self) {
        self.access_token = None;
        self.user = None;
    }

    /// Reacts to a failed request. A 401 means the token expired or was
    /// revoked, so the session is logged out. Returns whether it was.
    pub fn observe(&mut self, err: &SpotifyError) -> bool {
        if err.is_unauthorized() {
            self.logout();
            return true;
        }
        false
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    fn session_path() -> PathBuf {
        config::data_dir().join("session.json")
    }
}
