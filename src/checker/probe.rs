// src/checker/probe.rs
// =============================================================================
// This module checks if a single URL is alive by making one HTTP request.
//
// Key functionality:
// - Sends exactly one GET per probe (no retries, no HEAD fallback)
// - Bounds every request by a timeout (default 5 seconds)
// - Turns every transport failure into Status::Invalid with a short reason,
//   so a failed probe is data and never an error
//
// The Prober trait is the seam the dispatcher works against. HttpProber is
// the real implementation; tests plug in a scripted one.
// =============================================================================

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use std::error::Error as StdError;
use std::time::Duration;
use url::Url;

use super::Status;

/// Default per-probe timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A single reachability check against one URL.
///
/// Implementations must not retry and must not touch shared mutable state;
/// whatever happens, the outcome is a Status.
pub trait Prober: Send + Sync {
    fn probe<'a>(&'a self, url: &'a str, timeout: Duration) -> BoxFuture<'a, Status>;
}

/// Prober backed by a shared reqwest client.
///
/// The client is built once and reused for every probe (connection pooling).
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("url-sentinel/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn check(&self, url: &str, timeout: Duration) -> Status {
        // Reject cells that aren't URLs before touching the network
        if let Err(e) = Url::parse(url.trim()) {
            return Status::Invalid(format!("malformed URL: {}", e));
        }

        let result = self
            .client
            .get(url.trim())
            .timeout(timeout)
            .send()
            .await;

        match result {
            Ok(response) => classify_response(response.status()),
            Err(e) => Status::Invalid(describe_error(&e)),
        }
    }
}

impl Prober for HttpProber {
    fn probe<'a>(&'a self, url: &'a str, timeout: Duration) -> BoxFuture<'a, Status> {
        Box::pin(self.check(url, timeout))
    }
}

// Only an exact 200 counts as reachable; every other code that came back
// from the server is recorded as-is
fn classify_response(code: StatusCode) -> Status {
    if code == StatusCode::OK {
        Status::Valid
    } else {
        Status::ErrorCode(code.as_u16())
    }
}

// Boils a reqwest error down to a short human-readable cause.
//
// reqwest wraps hyper, which wraps the resolver / socket / TLS errors, so the
// useful text is usually at the bottom of the source() chain.
fn describe_error(error: &reqwest::Error) -> String {
    let chain = error_chain(error);
    let lowered = chain.to_lowercase();

    if error.is_timeout() || lowered.contains("timed out") {
        "timed out".to_string()
    } else if error.is_builder() {
        format!("malformed URL: {}", root_cause(error))
    } else if lowered.contains("dns") || lowered.contains("failed to lookup address") {
        "DNS resolution failed".to_string()
    } else if lowered.contains("connection refused") {
        "connection refused".to_string()
    } else if ["certificate", "tls", "ssl"].iter().any(|word| lowered.contains(word)) {
        "TLS error".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else {
        root_cause(error)
    }
}

fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}

fn root_cause(error: &(dyn StdError + 'static)) -> String {
    let mut current = error;
    while let Some(inner) = current.source() {
        current = inner;
    }
    current.to_string()
}
