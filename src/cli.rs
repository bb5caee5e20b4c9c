use crate::config::Config;
use crate::error::Result;
use crate::spreadsheet::WriteMode;
use clap::Parser;
use std::path::PathBuf;

/// Scrape apartments.com listings into a spreadsheet
#[derive(Debug, Parser)]
#[command(name = "apartment-scout", version)]
pub struct Cli {
    /// TOML file with default settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Search-results page to crawl (repeatable)
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Highest monthly rent to keep
    #[arg(long)]
    pub max_price: Option<u32>,

    /// Smallest unit size to keep, in square feet
    #[arg(long = "min-sqft")]
    pub min_square_footage: Option<u32>,

    /// Output spreadsheet
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Replace the output file instead of merging into it
    #[arg(long)]
    pub overwrite: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Also dump matched units as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

impl Cli {
    /// Config file (or defaults) with command-line flags applied on top
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if !self.urls.is_empty() {
            config.search_urls = self.urls;
        }
        if let Some(max_price) = self.max_price {
            config.max_price = max_price;
        }
        if let Some(min_square_footage) = self.min_square_footage {
            config.min_square_footage = min_square_footage;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.overwrite {
            config.write_mode = WriteMode::Overwrite;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.json.is_some() {
            config.json_output = self.json;
        }

        Ok(config)
    }
}
