use crate::error::{Result, ScoutError};
use crate::scrapers::traits::ListingSource;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONNECTION};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP-backed source for apartments.com pages
pub struct ApartmentsScraper {
    client: Client,
}

impl ApartmentsScraper {
    /// Create a scraper whose requests give up after `timeout`
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        // gzip/deflate/br Accept-Encoding is added by reqwest's decompression features
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ListingSource for ApartmentsScraper {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status: {}", url, status);
            return Err(ScoutError::Status {
                url: url.to_string(),
                status,
            });
        }

        let html = response.text().await?;
        debug!("Downloaded {} bytes of HTML", html.len());

        Ok(html)
    }

    fn source_name(&self) -> &'static str {
        "apartments.com"
    }
}
