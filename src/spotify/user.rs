use crate::{error::SpotifyError, types::UserProfile};

use super::SpotifyClient;

impl SpotifyClient {
    /// Profile of the user the token belongs to (`GET /me`).
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, SpotifyError> {
        self.get_json(&self.endpoint("/me"), token).await
    }
}
