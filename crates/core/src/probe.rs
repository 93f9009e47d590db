// ABOUTME: Reachability probing for embedded targets (iframe and img sources).
// ABOUTME: Unreachable or malformed targets fail closed to the about:blank placeholder.

use std::time::Duration;

use url::Url;

/// Placeholder substituted for unreachable embed targets.
pub const PLACEHOLDER_URL: &str = "about:blank";

/// Default bound on a single probe request.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Liveness probe for iframe/img targets.
///
/// `check` returns the target unchanged when it answers with a success
/// status, and [`PLACEHOLDER_URL`] for anything else: non-2xx statuses,
/// timeouts, DNS or connection failures, and targets that are not valid
/// http(s) URLs. Never returns an error.
///
/// Implemented as a trait so traversal logic stays testable without network
/// access; tests inject deterministic stubs.
pub trait ReachabilityProbe: Send + Sync {
    fn check(&self, target: &str) -> String;
}

/// HTTP-backed probe: one blocking GET per target, no retries.
pub struct HttpProbe {
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_PROBE_TIMEOUT)
    }

    /// Probe with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build probe HTTP client");
        Self { client }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ReachabilityProbe for HttpProbe {
    fn check(&self, target: &str) -> String {
        let Ok(url) = Url::parse(target) else {
            return PLACEHOLDER_URL.to_string();
        };
        if url.scheme() != "http" && url.scheme() != "https" {
            return PLACEHOLDER_URL.to_string();
        }
        match self.client.get(url).send() {
            Ok(response) if response.status().is_success() => target.to_string(),
            _ => PLACEHOLDER_URL.to_string(),
        }
    }
}

/// Probe that trusts every target.
///
/// Used for offline operation and as a deterministic test double.
pub struct PassthroughProbe;

impl ReachabilityProbe for PassthroughProbe {
    fn check(&self, target: &str) -> String {
        target.to_string()
    }
}
