// ABOUTME: Configuration options and the fluent ClientBuilder for the pagelens client.
// ABOUTME: Carries fetch/probe timeouts, user agent, extra headers, and optional injected collaborators.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;
use crate::probe::{ReachabilityProbe, DEFAULT_PROBE_TIMEOUT};

/// Configuration options for the pagelens client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub probe_timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::blocking::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            user_agent: "pagelens/0.1".to_string(),
            headers: HashMap::new(),
            http_client: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
pub struct ClientBuilder {
    opts: Options,
    probe: Option<Box<dyn ReachabilityProbe>>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
            probe: None,
        }
    }

    /// Set the page fetch timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the per-request bound on reachability probes.
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.opts.probe_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all page fetches.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client for page fetches.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Inject a custom reachability probe; tests use deterministic stubs,
    /// offline callers use [`PassthroughProbe`](crate::probe::PassthroughProbe).
    pub fn probe(mut self, probe: Box<dyn ReachabilityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        match self.probe {
            Some(probe) => Client::with_probe(self.opts, probe),
            None => Client::new(self.opts),
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
