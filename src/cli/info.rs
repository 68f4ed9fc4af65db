use crate::{cli, config::Settings, info, success, warning};

/// Shows the logged-in user's profile.
///
/// The profile cached at login is refreshed from `/me`, which also checks
/// that the stored token is still accepted.
pub async fn whoami(settings: &Settings) {
    let (mut session, token) = cli::require_login().await;
    let spotify = cli::client(settings);

    let user = match spotify.current_user(&token).await {
        Ok(user) => user,
        Err(e) => cli::fail(&mut session, e).await,
    };

    session.set_user(user.clone());
    if let Err(e) = session.persist().await {
        warning!("Failed to save session: {}", e);
    }

    success!(
        "Logged in as {}",
        user.display_name.as_deref().unwrap_or(&user.id)
    );
    info!("User ID: {}", user.id);
    if let Some(email) = &user.email {
        info!("Email: {}", email);
    }
    if let Some(country) = &user.country {
        info!("Country: {}", country);
    }
}
