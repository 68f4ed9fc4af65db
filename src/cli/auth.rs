use std::time::{Duration, Instant};

use crate::{
    cli, config::Settings, error, info,
    server::{self, AppState, LoginOutcome},
    spotify::auth::authorize_url,
    success,
    types::Credentials,
    warning,
};

/// Logs in through the browser.
///
/// Starts the callback server, registers a pending login for the chosen
/// credentials, opens the Spotify consent page and waits until the callback
/// has run or the login timeout passes. On success the token and the user's
/// profile are persisted in the session file.
pub async fn login(settings: Settings, client_id: Option<String>, client_secret: Option<String>) {
    let credentials = match resolve_credentials(&settings, client_id, client_secret) {
        Some(credentials) => credentials,
        None => error!(
            "No client credentials. Pass --client-id and --client-secret or set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET."
        ),
    };

    let spotify = cli::client(&settings);
    let listener = match server::bind(&settings).await {
        Ok(listener) => listener,
        Err(e) => error!(
            "Cannot listen on {}: {}",
            settings.server_address, e
        ),
    };

    let state = AppState::new(settings.clone(), spotify.http().clone());
    let server_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = server::start_api_server(listener, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let login_state = state.pending.lock().await.begin(credentials.clone());
    let url = authorize_url(&settings, &credentials.client_id, &login_state);

    if webbrowser::open(url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }
    info!("Waiting for authorization in the browser...");

    let token = match wait_for_outcome(&state, settings.login_timeout).await {
        Some(Ok(token)) => token,
        Some(Err(e)) => error!("Login failed: {}", e),
        None => error!("Login timed out. Run `spotback login` to try again."),
    };

    let access_token = token.access_token;
    let mut session = cli::load_session().await;
    session.sign_in(access_token.clone());

    let user = match spotify.current_user(&access_token).await {
        Ok(user) => user,
        Err(e) => cli::fail(&mut session, e).await,
    };
    let name = user.display_name.clone().unwrap_or_else(|| user.id.clone());
    session.set_user(user);

    if let Err(e) = session.persist().await {
        error!("Failed to save session: {}", e);
    }
    success!("Logged in as {}", name);
}

/// Forgets the stored token and profile.
pub async fn logout() {
    let mut session = cli::load_session().await;
    if !session.is_authenticated() {
        info!("Not logged in.");
        return;
    }

    session.logout();
    if let Err(e) = session.persist().await {
        error!("Failed to save session: {}", e);
    }
    success!("Logged out.");
}

/// Credentials passed on the command line win over the environment. Both
/// flags must be given to take effect.
pub(crate) fn resolve_credentials(
    settings: &Settings,
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Option<Credentials> {
    match (client_id, client_secret) {
        (Some(id), Some(secret)) => Some(Credentials::new(id, secret)),
        (Some(_), None) | (None, Some(_)) => {
            warning!("--client-id and --client-secret must be given together, ignoring them");
            settings.credentials.clone()
        }
        (None, None) => settings.credentials.clone(),
    }
}

async fn wait_for_outcome(state: &AppState, max_wait: Duration) -> Option<LoginOutcome> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        if let Some(outcome) = state.take_outcome().await {
            return Some(outcome);
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}
