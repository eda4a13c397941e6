//! Process-wide HTTP plumbing.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// The process-wide request client.
///
/// One connection pool serves every [`crate::client::CompletionsClient`];
/// independent sessions share connections and nothing else.
pub fn shared_client() -> &'static reqwest::Client {
    HTTP_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(10)
            .build()
            .expect("failed to build shared HTTP client")
    })
}

/// Headers for a JSON request authenticated with a bearer key.
///
/// A key that cannot be encoded as a header value is skipped; the endpoint
/// then rejects the request with its usual authentication error.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let token = format!("Bearer {api_key}");
    if let Ok(value) = HeaderValue::from_str(&token) {
        headers.insert(AUTHORIZATION, value);
    }
    headers
}
