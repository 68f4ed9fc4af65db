use axum::{extract::Query, response::Html};
use serde::Deserialize;

use crate::utils::escape_markup;

#[derive(Debug, Default, Deserialize)]
pub struct HomeParams {
    pub status: Option<String>,
    pub error: Option<String>,
}

/// Landing page the callback redirects to.
pub async fn home(Query(params): Query<HomeParams>) -> Html<String> {
    let body = match (params.error, params.status) {
        (Some(error), _) => format!(
            "<h2>Login failed.</h2><p>{}</p><p>Return to the terminal and try again.</p>",
            escape_markup(&error)
        ),
        (None, Some(status)) if status == "connected" => {
            "<h2>Connected to Spotify.</h2><p>You can close this window.</p>".to_string()
        }
        _ => "<h2>spotback</h2><p>Run <code>spotback login</code> to connect your account.</p>"
            .to_string(),
    };

    Html(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>spotback</title></head><body>{body}</body></html>"
    ))
}
