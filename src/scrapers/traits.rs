use crate::error::Result;
use async_trait::async_trait;

/// Anything that can hand back the raw HTML of a listing page
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the page at `url` and return its body
    async fn fetch_page(&self, url: &str) -> Result<String>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
