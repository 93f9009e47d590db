// ABOUTME: The pagelens Client: fetches a page, resolves its post-redirect base, and runs the extraction engine.
// ABOUTME: Provides normalize() for URLs and normalize_html() for already-fetched markup.

use url::Url;

use crate::error::NormalizeError;
use crate::extract::Extractor;
use crate::options::{ClientBuilder, Options};
use crate::probe::{HttpProbe, ReachabilityProbe};
use crate::resource::{fetch, FetchOptions};
use crate::result::NormalizedPage;

/// The main pagelens client.
pub struct Client {
    opts: Options,
    http_client: reqwest::blocking::Client,
    probe: Box<dyn ReachabilityProbe>,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with the given options and the HTTP-backed probe.
    pub fn new(opts: Options) -> Self {
        let probe = Box::new(HttpProbe::with_timeout(opts.probe_timeout));
        Self::with_probe(opts, probe)
    }

    /// Create a client with an injected reachability probe.
    pub fn with_probe(opts: Options, probe: Box<dyn ReachabilityProbe>) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::blocking::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self {
            opts,
            http_client,
            probe,
        }
    }

    /// Fetch `url`, rewrite every reference against the final post-redirect
    /// URL, and extract links, images, and article fragments.
    ///
    /// Fetch failures (non-2xx, transport errors) are returned as errors;
    /// the extraction engine itself never fails. The returned page carries
    /// the originally requested URL for display.
    pub fn normalize(&self, url: &str) -> Result<NormalizedPage, NormalizeError> {
        if url.is_empty() {
            return Err(NormalizeError::invalid_url(url, "Normalize", None));
        }
        if Url::parse(url).is_err() {
            return Err(NormalizeError::invalid_url(
                url,
                "Normalize",
                Some(anyhow::anyhow!("malformed URL")),
            ));
        }

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
        };
        let fetch_result = fetch(&self.http_client, url, &fetch_opts)?;
        let raw_html = fetch_result.text_utf8();

        // The final URL after redirects is the base every reference resolves against.
        let base = Url::parse(&fetch_result.final_url).map_err(|e| {
            NormalizeError::invalid_url(
                &fetch_result.final_url,
                "Normalize",
                Some(anyhow::anyhow!("invalid final URL: {}", e)),
            )
        })?;

        let extraction = Extractor::new(&base, self.probe.as_ref()).extract(&raw_html);
        Ok(NormalizedPage::new(url, extraction))
    }

    /// Normalize already-fetched HTML, with `url` supplying the base.
    pub fn normalize_html(&self, html: &str, url: &str) -> Result<NormalizedPage, NormalizeError> {
        if url.is_empty() {
            return Err(NormalizeError::invalid_url(url, "NormalizeHTML", None));
        }
        let base = Url::parse(url).map_err(|_| {
            NormalizeError::invalid_url(
                url,
                "NormalizeHTML",
                Some(anyhow::anyhow!("malformed URL")),
            )
        })?;

        let extraction = Extractor::new(&base, self.probe.as_ref()).extract(html);
        Ok(NormalizedPage::new(url, extraction))
    }
}
