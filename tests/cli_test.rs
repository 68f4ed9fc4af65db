use std::sync::atomic::{AtomicU32, Ordering};

use spotback::{
    cli::{describe, retry_rate_limited},
    error::{ApiError, SpotifyError},
};

fn api_error(status: u16, retry_after_seconds: Option<u64>) -> SpotifyError {
    SpotifyError::Api(ApiError {
        status,
        message: "boom".to_string(),
        retry_after_seconds,
    })
}

#[tokio::test]
async fn rate_limited_call_is_retried() {
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let result = retry_rate_limited(2, move || async move {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(api_error(429, Some(0)))
        } else {
            Ok("done")
        }
    })
    .await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn retries_are_bounded() {
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let result: Result<(), _> = retry_rate_limited(2, move || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(api_error(429, Some(0)))
    })
    .await;

    assert_eq!(result.unwrap_err().api_status(), Some(429));
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn other_errors_are_not_retried() {
    let counter = AtomicU32::new(0);
    let calls = &counter;
    let result: Result<(), _> = retry_rate_limited(5, move || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(api_error(401, None))
    })
    .await;

    assert!(result.unwrap_err().is_unauthorized());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn messages_name_the_remedy() {
    assert!(describe(&api_error(401, None)).contains("spotback login"));
    assert!(describe(&api_error(429, Some(30))).contains("wait 30 seconds"));

    let malformed = SpotifyError::MalformedResponse {
        url: "http://localhost/me".to_string(),
        message: "expected value".to_string(),
    };
    assert!(describe(&malformed).contains("redirect URI"));
}
