use reqwest::Client;
use std::time::Duration;

/// Shared client for live test calls and persistence round trips.
/// reqwest never turns a non-2xx status into an error on its own, which
/// matches the executor's "any status is a completed call" contract.
pub fn build_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(60))
        .use_rustls_tls()
        .build()
        .expect("Failed to build HTTP client")
}
