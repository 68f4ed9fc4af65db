use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use reqwest::Client;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    api,
    config::{CALLBACK_PATH, Settings},
    error::AuthError,
    management::PendingLogins,
    spotify::auth::AccessToken,
};

/// Result of one pass through the authorize/callback round trip.
pub type LoginOutcome = Result<AccessToken, AuthError>;

/// State shared between the callback handlers and the command that waits
/// for the login to finish.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub http: Client,
    pub pending: Arc<Mutex<PendingLogins>>,
    pub outcome: Arc<Mutex<Option<LoginOutcome>>>,
}

impl AppState {
    pub fn new(settings: Settings, http: Client) -> Self {
        let ttl = settings.login_timeout;
        Self {
            settings: Arc::new(settings),
            http,
            pending: Arc::new(Mutex::new(PendingLogins::new(ttl))),
            outcome: Arc::new(Mutex::new(None)),
        }
    }

    /// Removes and returns the login outcome, if the callback has run.
    pub async fn take_outcome(&self) -> Option<LoginOutcome> {
        self.outcome.lock().await.take()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/health", get(api::health))
        .route(CALLBACK_PATH, get(api::callback))
        .layer(Extension(state))
}

/// Binds the configured server address.
pub async fn bind(settings: &Settings) -> std::io::Result<TcpListener> {
    TcpListener::bind(settings.server_address).await
}

/// Serves the callback routes on `listener` until the task is dropped.
pub async fn start_api_server(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}
