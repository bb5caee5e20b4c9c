use crate::error::Result;
use crate::models::UnitListing;
use crate::scrapers::parser::{extract_property_links, extract_units};
use crate::scrapers::{ListingSource, UnitFilter};
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Counters describing one scrape run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    pub searches_attempted: usize,
    pub searches_failed: usize,
    pub properties_found: usize,
    pub properties_failed: usize,
    pub units_parsed: usize,
    pub units_skipped: usize,
    pub units_matched: usize,
}

impl ScrapeReport {
    /// Searches were requested but none of their result pages loaded
    pub fn nothing_loaded(&self) -> bool {
        self.searches_attempted > 0 && self.searches_failed == self.searches_attempted
    }
}

/// Search page -> property pages -> filtered units
pub struct Pipeline<S> {
    source: S,
    filter: UnitFilter,
    today: NaiveDate,
}

impl<S: ListingSource> Pipeline<S> {
    pub fn new(source: S, filter: UnitFilter) -> Self {
        Self {
            source,
            filter,
            today: Local::now().date_naive(),
        }
    }

    /// Date substituted for units available "Now"
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Scrape every search URL in order, skipping pages that fail to load
    pub async fn collect(&self, search_urls: &[String]) -> (Vec<UnitListing>, ScrapeReport) {
        let mut report = ScrapeReport::default();
        let mut matched = Vec::new();
        // Properties can show up under several searches
        let mut visited = HashSet::new();

        for search_url in search_urls {
            report.searches_attempted += 1;
            info!(
                "Fetching {} search results: {}",
                self.source.source_name(),
                search_url
            );

            let links = match self.property_links(search_url).await {
                Ok(links) => links,
                Err(e) => {
                    warn!("Request failed for {}. Skipping... Error: {}", search_url, e);
                    report.searches_failed += 1;
                    continue;
                }
            };

            let found = links.len();
            let links: Vec<String> = links
                .into_iter()
                .filter(|link| visited.insert(link.clone()))
                .collect();

            info!("Found {} properties ({} new)", found, links.len());
            report.properties_found += links.len();

            for (idx, link) in links.iter().enumerate() {
                info!("[{}/{}] Scraping: {}", idx + 1, links.len(), link);

                match self.scrape_property(link, &mut report).await {
                    Ok(units) => matched.extend(units),
                    Err(e) => {
                        warn!("Request failed for {}. Skipping... Error: {}", link, e);
                        report.properties_failed += 1;
                    }
                }
            }
        }

        report.units_matched = matched.len();
        (matched, report)
    }

    async fn property_links(&self, search_url: &str) -> Result<Vec<String>> {
        let html = self.source.fetch_page(search_url).await?;
        extract_property_links(&html, search_url)
    }

    /// Units on one property page that pass the filter
    async fn scrape_property(
        &self,
        url: &str,
        report: &mut ScrapeReport,
    ) -> Result<Vec<UnitListing>> {
        let html = self.source.fetch_page(url).await?;
        let page = extract_units(&html, url, self.today)?;

        let mut kept = Vec::new();
        for unit in page.units {
            match unit {
                Ok(unit) => {
                    report.units_parsed += 1;
                    if self.filter.accepts(&unit) {
                        kept.push(unit);
                    }
                }
                Err(e) => {
                    warn!("Skipping unit at {}: {}", page.name, e);
                    report.units_skipped += 1;
                }
            }
        }

        debug!("{}: {} units kept", page.name, kept.len());
        Ok(kept)
    }
}
