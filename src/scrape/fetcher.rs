//! HTTP fetcher
//!
//! One shared client, plain GET requests, body returned as text. The site
//! is scraped as-is: no retries, no backoff, and no status-code check (a
//! non-200 body simply fails structure extraction downstream).

use crate::config::SourceConfig;
use crate::HarvestError;
use reqwest::Client;
use url::Url;

/// Builds the HTTP client shared by every request of a run
///
/// The client carries the fixed browser-like User-Agent from the source
/// configuration and pools connections across all concurrent group tasks.
///
/// # Example
///
/// ```no_run
/// use hcpcs_harvest::config::SourceConfig;
/// use hcpcs_harvest::scrape::build_http_client;
///
/// let client = build_http_client(&SourceConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &SourceConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns the response body as text
///
/// The status code is deliberately ignored; only network-level failures
/// (DNS, connection refused, timeout, non-decodable body) are errors.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The absolute URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The decoded response body
/// * `Err(HarvestError::Http)` - Transport failure, naming the URL
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, HarvestError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    response.text().await.map_err(|source| HarvestError::Http {
        url: url.to_string(),
        source,
    })
}
