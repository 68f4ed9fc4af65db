use axum::{Extension, extract::Query, response::Redirect};
use serde::Deserialize;

use crate::{
    error::{AuthError, AuthErrorKind},
    server::{AppState, LoginOutcome},
    spotify::auth,
    warning,
};

pub const MISSING_CODE: &str = "Code not found in callback";
pub const MISSING_STATE: &str = "Login state missing in callback";

/// Query string Spotify appends when redirecting back after consent.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub state: Option<String>,
}

/// Completes the authorization-code flow.
///
/// The outcome is stored for the waiting login command and the browser is
/// sent to the landing page with either `?status=connected` or
/// `?error=<message>`. The access token itself never appears in a URL.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState>,
) -> Redirect {
    let outcome = complete_login(&state, params).await;
    if let Err(e) = &outcome {
        warning!("Login failed: {}", e);
    }

    let location = landing_location(&state, &outcome);
    *state.outcome.lock().await = Some(outcome);
    Redirect::to(&location)
}

async fn complete_login(state: &AppState, params: CallbackParams) -> LoginOutcome {
    if let Some(reason) = params.error {
        return Err(AuthError::new(AuthErrorKind::AccessDenied, reason));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Err(AuthError::new(AuthErrorKind::InvalidGrant, MISSING_CODE));
    };

    let login_waiting = state.pending.lock().await.has_pending();
    let credentials = match params.state.filter(|s| !s.is_empty()) {
        Some(key) => state
            .pending
            .lock()
            .await
            .take(&key)
            .map_err(|e| AuthError::new(AuthErrorKind::InvalidGrant, e.to_string()))?,
        None if login_waiting => {
            return Err(AuthError::new(AuthErrorKind::InvalidGrant, MISSING_STATE));
        }
        None => state.settings.credentials.clone().ok_or_else(|| {
            AuthError::new(
                AuthErrorKind::InvalidClient,
                "No client credentials configured",
            )
        })?,
    };

    auth::exchange_code(
        &state.http,
        state.settings.token_url.as_str(),
        &code,
        &state.settings.redirect_uri(),
        &credentials,
    )
    .await
}

fn landing_location(state: &AppState, outcome: &LoginOutcome) -> String {
    let mut url = state.settings.app_url.clone();
    url.set_path("/");
    url.set_fragment(None);
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        match outcome {
            Ok(_) => query.append_pair("status", "connected"),
            Err(e) => query.append_pair("error", &e.message),
        };
    }
    url.to_string()
}
