// ABOUTME: Blocking HTTP fetch for the page under normalization.
// ABOUTME: Follows redirects, enforces a content-length cap, and reports the final URL used as the base.

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::NormalizeError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a page.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as UTF-8 text, replacing invalid sequences.
    pub fn text_utf8(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Fetch a page from the given URL with a blocking GET.
///
/// Redirects are followed by the client; `final_url` on the result is the
/// URL that actually answered, which callers use as the resolution base.
/// Non-2xx statuses and transport failures are errors: the extraction
/// engine is never invoked for a page that failed to fetch.
pub fn fetch(
    client: &reqwest::blocking::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, NormalizeError> {
    if url.is_empty() {
        return Err(NormalizeError::invalid_url(url, "Fetch", None));
    }

    let parsed_url = url::Url::parse(url).map_err(|e| {
        NormalizeError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(NormalizeError::invalid_url(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request.send().map_err(|e| {
        if e.is_timeout() {
            NormalizeError::timeout(url, "Fetch", Some(anyhow::anyhow!("request timed out: {}", e)))
        } else {
            NormalizeError::fetch(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", e)))
        }
    })?;

    // Check Content-Length before reading the body; fall back to parsing the
    // header manually when the client does not expose it.
    let content_length = response.content_length().or_else(|| {
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    });

    if let Some(len) = content_length {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(NormalizeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    // Capture response metadata before consuming the response.
    let status = response.status().as_u16();
    let success = response.status().is_success();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response.bytes().map_err(|e| {
        NormalizeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("failed to read body: {}", e)),
        )
    })?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(NormalizeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    if !success {
        return Err(NormalizeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("HTTP status {}", status)),
        ));
    }

    Ok(FetchResult {
        status,
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn create_test_client() -> reqwest::blocking::Client {
        reqwest::blocking::Client::builder()
            .user_agent("test-agent")
            .build()
            .unwrap()
    }

    #[test]
    fn fetch_ok_utf8() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/test");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<html>hello</html>");
        });

        let client = create_test_client();
        let result = fetch(&client, &server.url("/test"), &FetchOptions::default());
        mock.assert();

        let result = result.expect("fetch should succeed");
        assert_eq!(result.status, 200);
        assert_eq!(result.text_utf8(), "<html>hello</html>");
        assert_eq!(
            result.content_type.as_deref(),
            Some("text/html; charset=utf-8")
        );
    }

    #[test]
    fn fetch_non_2xx_rejected() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/notfound");
            then.status(404).body("not found");
        });

        let client = create_test_client();
        let result = fetch(&client, &server.url("/notfound"), &FetchOptions::default());
        mock.assert();

        let err = result.expect_err("should fail on 404");
        assert!(err.is_fetch());
    }

    #[test]
    fn fetch_reports_final_url_after_redirect() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/start");
            then.status(302).header("location", "/real/page");
        });
        server.mock(|when, then| {
            when.method(GET).path("/real/page");
            then.status(200).body("moved here");
        });

        let client = create_test_client();
        let result = fetch(&client, &server.url("/start"), &FetchOptions::default())
            .expect("fetch should follow redirect");

        assert_eq!(result.url, server.url("/start"));
        assert_eq!(result.final_url, server.url("/real/page"));
    }

    #[test]
    fn fetch_sends_custom_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/hdr")
                .header("x-requested-with", "pagelens");
            then.status(200).body("ok");
        });

        let client = create_test_client();
        let opts = FetchOptions {
            headers: HashMap::from([("x-requested-with".to_string(), "pagelens".to_string())]),
        };
        fetch(&client, &server.url("/hdr"), &opts).expect("fetch should succeed");
        mock.assert();
    }

    #[test]
    fn fetch_rejects_empty_and_malformed_urls() {
        let client = create_test_client();
        assert!(fetch(&client, "", &FetchOptions::default())
            .unwrap_err()
            .is_invalid_url());
        assert!(fetch(&client, "not a url", &FetchOptions::default())
            .unwrap_err()
            .is_invalid_url());
        assert!(fetch(&client, "ftp://ex.com/x", &FetchOptions::default())
            .unwrap_err()
            .is_invalid_url());
    }

    #[test]
    fn max_content_length_is_ten_megabytes() {
        assert_eq!(MAX_CONTENT_LENGTH, 10 * 1024 * 1024);
    }
}
