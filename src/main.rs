mod cli;
mod config;
mod error;
mod models;
mod pipeline;
mod scrapers;
mod spreadsheet;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use pipeline::Pipeline;
use scrapers::ApartmentsScraper;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse()
        .into_config()
        .context("Failed to load configuration")?;

    info!("🏠 Apartment Scout");
    info!(
        "Keeping units at or under ${} with at least {} sq ft",
        config.max_price, config.min_square_footage
    );

    let scraper = ApartmentsScraper::new(&config.user_agent, config.timeout())
        .context("Failed to create HTTP client")?;
    let pipeline = Pipeline::new(scraper, config.filter());

    let (units, report) = pipeline.collect(&config.search_urls).await;

    info!(
        "✅ {} of {} parsed units matched ({} properties, {} failed, {} units skipped)",
        report.units_matched,
        report.units_parsed,
        report.properties_found,
        report.properties_failed,
        report.units_skipped
    );
    if report.nothing_loaded() {
        anyhow::bail!(
            "Every search page failed to load; {} left untouched",
            config.output.display()
        );
    }

    for (i, unit) in units.iter().enumerate() {
        println!("{}. {} (${})", i + 1, unit.property_name, unit.price);
        println!("   {} sq ft, available {}", unit.square_footage, unit.available_from);
        println!("   URL: {}", unit.link);
    }

    if let Some(json_path) = &config.json_output {
        let json = serde_json::to_string_pretty(&units)?;
        tokio::fs::write(json_path, json)
            .await
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        info!("💾 Saved matched units to {}", json_path.display());
    }

    let outcome = spreadsheet::persist(&config.output, units, config.write_mode)
        .with_context(|| format!("Failed to save {}", config.output.display()))?;
    info!(
        "{} rows already present, {} added, {} total",
        outcome.existing, outcome.added, outcome.total
    );

    Ok(())
}
