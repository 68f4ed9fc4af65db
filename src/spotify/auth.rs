use reqwest::{Client, Url, header::AUTHORIZATION};
use serde::{Deserialize, Serialize};

use crate::{
    config::Settings,
    error::{AuthError, AuthErrorKind},
    types::Credentials,
    utils,
};

/// Bearer token issued by the accounts service.
///
/// Only `access_token` is guaranteed; expiry is not tracked, an expired token
/// shows up as a 401 from the Web API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Error body of the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Builds the URL the user's browser is sent to for consent.
///
/// `state` is the opaque handoff value the callback uses to find the pending
/// login; it carries no credential material.
pub fn authorize_url(settings: &Settings, client_id: &str, state: &str) -> Url {
    let mut url = settings.auth_url.clone();
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", client_id)
        .append_pair("scope", &settings.scope)
        .append_pair("redirect_uri", &settings.redirect_uri())
        .append_pair("state", state);
    url
}

/// Exchanges a single-use authorization code for an access token.
///
/// Sends one POST to `token_url` with HTTP Basic authentication built from
/// `credentials` and a form body of `grant_type=authorization_code`, `code`
/// and `redirect_uri`. `redirect_uri` must equal the one used in the
/// authorize request byte for byte.
///
/// Not idempotent: a code can be exchanged once, a repeated call fails with
/// [`AuthErrorKind::InvalidGrant`].
///
/// # Errors
///
/// - `InvalidClient` when the credentials are rejected
/// - `InvalidGrant` for any other OAuth error (bad/used code, redirect URI mismatch)
/// - `MalformedResponse` when the endpoint answers with something other than
///   a token or an OAuth error document, typically an HTML page
/// - `Network` when the endpoint cannot be reached
pub async fn exchange_code(
    http: &Client,
    token_url: &str,
    code: &str,
    redirect_uri: &str,
    credentials: &Credentials,
) -> Result<AccessToken, AuthError> {
    request_token(
        http,
        token_url,
        credentials,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ],
    )
    .await
}

/// Requests an application token with the client-credentials grant.
///
/// Such a token carries no user context; it can read public playlists but
/// not `/me` or private data.
pub async fn request_app_token(
    http: &Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<AccessToken, AuthError> {
    request_token(
        http,
        token_url,
        credentials,
        &[("grant_type", "client_credentials")],
    )
    .await
}

async fn request_token(
    http: &Client,
    token_url: &str,
    credentials: &Credentials,
    form: &[(&str, &str)],
) -> Result<AccessToken, AuthError> {
    let response = http
        .post(token_url)
        .header(AUTHORIZATION, utils::basic_auth_header(credentials))
        .form(form)
        .send()
        .await
        .map_err(|e| AuthError::new(AuthErrorKind::Network, e.to_string()))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| AuthError::new(AuthErrorKind::Network, e.to_string()))?;

    parse_token_response(status.is_success(), status.as_u16(), &body)
}

/// Three-way parse of a token endpoint answer: a token, an OAuth error
/// document, or neither.
fn parse_token_response(success: bool, status: u16, body: &[u8]) -> Result<AccessToken, AuthError> {
    if success {
        if let Ok(token) = serde_json::from_slice::<AccessToken>(body) {
            return Ok(token);
        }
    }

    if let Ok(err) = serde_json::from_slice::<TokenErrorBody>(body) {
        let kind = match err.error.as_str() {
            "invalid_client" | "unauthorized_client" => AuthErrorKind::InvalidClient,
            _ => AuthErrorKind::InvalidGrant,
        };
        let message = err.error_description.unwrap_or(err.error);
        return Err(AuthError::new(kind, message));
    }

    let preview: String = String::from_utf8_lossy(body).chars().take(80).collect();
    Err(AuthError::new(
        AuthErrorKind::MalformedResponse,
        format!(
            "token endpoint answered status {} with an unexpected body ({:?}); \
             check that the redirect URI matches the one registered with Spotify",
            status, preview
        ),
    ))
}
