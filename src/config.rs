use crate::error::Result;
use crate::scrapers::UnitFilter;
use crate::spreadsheet::WriteMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://www.apartments.com/apartments/under-1900-pet-friendly-cat/air-conditioning-washer-dryer-dishwasher-walk-in-closets/?sk=08c73016dc636d78d762a89107215994&bb=g34xux3r6H0p4qwx-B&sfmin=600&so=2&mid=20230630";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// Run settings, loadable from a TOML file; every key is optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Search-results pages to crawl, in order
    pub search_urls: Vec<String>,
    pub max_price: u32,
    pub min_square_footage: u32,
    /// Spreadsheet the matched units are written to
    pub output: PathBuf,
    pub write_mode: WriteMode,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Optional JSON dump of this run's matched units
    pub json_output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let filter = UnitFilter::default();
        Self {
            search_urls: vec![DEFAULT_SEARCH_URL.to_string()],
            max_price: filter.max_price,
            min_square_footage: filter.min_square_footage,
            output: PathBuf::from("apartment_data.xlsx"),
            write_mode: WriteMode::default(),
            timeout_secs: 60,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            json_output: None,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn filter(&self) -> UnitFilter {
        UnitFilter {
            max_price: self.max_price,
            min_square_footage: self.min_square_footage,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
