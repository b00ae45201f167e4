//! Shared helpers for wiremock-based integration tests.
#![allow(dead_code)]

use std::time::Duration;

use codedx::api::Jobs;
use codedx::{CodeDxClient, JobPoller, PollConfig};
use wiremock::ResponseTemplate;

/// Exact JSON content type the server puts on the wire.
pub const JSON: &str = "application/json;charset=utf-8";

/// A 200 response whose Content-Type matches what Code Dx actually sends
/// (wiremock's `set_body_json` would use plain `application/json`, which
/// the strict validator rejects).
pub fn json_body(value: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(value.to_string(), JSON)
}

/// Poller with millisecond timing so tests never wait on wall-clock
/// delays.
pub fn quick_poller(client: &CodeDxClient) -> JobPoller {
    JobPoller::with_config(
        Jobs::new(client.clone()),
        PollConfig {
            interval: Duration::from_millis(5),
            timeout: Duration::from_secs(5),
        },
    )
}

/// Poller whose budget expires almost immediately, for timeout scenarios.
pub fn impatient_poller(client: &CodeDxClient) -> JobPoller {
    JobPoller::with_config(
        Jobs::new(client.clone()),
        PollConfig {
            interval: Duration::from_millis(5),
            timeout: Duration::from_millis(40),
        },
    )
}
