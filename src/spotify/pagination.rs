use reqwest::{Response, StatusCode, header::RETRY_AFTER};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{ApiError, SpotifyError},
    types::Page,
};

use super::SpotifyClient;

/// Longest body excerpt quoted in a malformed-response error.
const BODY_EXCERPT_LEN: usize = 120;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed { message: String },
    Plain(String),
}

impl SpotifyClient {
    /// Issues one authenticated GET and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::Api`] for any non-2xx status. 401 means the token is
    ///   no longer valid; 429 carries `retry_after_seconds` from the
    ///   `Retry-After` header when the header holds a number of seconds.
    /// - [`SpotifyError::MalformedResponse`] when a 2xx body is not the
    ///   expected JSON.
    /// - [`SpotifyError::Network`] for transport failures.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<T, SpotifyError> {
        let response = self.http.get(url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await.into());
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| SpotifyError::MalformedResponse {
            url: url.to_string(),
            message: format!("{} (body starts with {:?})", e, excerpt(&body)),
        })
    }

    /// Follows `next` links from `initial_url` until the last page and
    /// returns every item in upstream order.
    ///
    /// Pages are requested one after another. The first failing page aborts
    /// the whole fetch; items collected so far are dropped.
    pub async fn fetch_all_pages<T: DeserializeOwned>(
        &self,
        initial_url: &str,
        token: &str,
    ) -> Result<Vec<T>, SpotifyError> {
        let mut items = Vec::new();
        let mut cursor = Some(initial_url.to_string());

        while let Some(url) = cursor {
            let page: Page<T> = self.get_json(&url, token).await?;
            items.extend(page.items);
            cursor = page.next;
        }

        Ok(items)
    }
}

async fn api_error(response: Response) -> ApiError {
    let status = response.status();
    let retry_after_seconds = if status == StatusCode::TOO_MANY_REQUESTS {
        response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    } else {
        None
    };

    let body = response.bytes().await.unwrap_or_default();
    let message = match serde_json::from_slice::<ErrorEnvelope>(&body) {
        Ok(ErrorEnvelope {
            error: ErrorBody::Detailed { message },
        })
        | Ok(ErrorEnvelope {
            error: ErrorBody::Plain(message),
        }) => message,
        Err(_) => format!(
            "Spotify API request failed with status {}",
            status.as_u16()
        ),
    };

    ApiError {
        status: status.as_u16(),
        message,
        retry_after_seconds,
    }
}

fn excerpt(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_EXCERPT_LEN)
        .collect()
}
