//! autoconnect CLI: chat with the sales assistant, run the crawl admin panel, list inventory.
//! Config from env (and .env) with optional endpoint overrides on the command line.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use autoconnect_client::{HttpCrawlBackend, HttpInventoryBackend};
use autoconnect_cli::cli::{load_config, Cli, Commands};
use autoconnect_cli::session::run_chat;
use autoconnect_core::{init_tracing, InventoryBackend};
use autoconnect_widget::{render_crawl_panel, CrawlOutcome, CrawlPanel};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = load_config(&cli.endpoints)?;
    init_tracing(&config.log_file, config.log_stdout)?;

    match cli.command {
        Commands::Chat { typing_delay_ms } => {
            if let Some(ms) = typing_delay_ms {
                config.typing_delay = Duration::from_millis(ms);
            }
            run_chat(config).await
        }
        Commands::Crawl { url } => handle_crawl(&config.crawl_api_url, url).await,
        Commands::Models => handle_models(&config.inventory_api_url).await,
    }
}

async fn handle_crawl(service_url: &str, root_url: String) -> Result<()> {
    let mut panel = CrawlPanel::new(Arc::new(HttpCrawlBackend::new(service_url)));
    panel.set_root_url(root_url);

    let outcome = panel.submit().await;
    for line in render_crawl_panel(&panel) {
        println!("{}", line);
    }
    match outcome {
        CrawlOutcome::Completed => Ok(()),
        CrawlOutcome::Blocked | CrawlOutcome::Failed => {
            anyhow::bail!("crawl did not complete")
        }
    }
}

async fn handle_models(base_url: &str) -> Result<()> {
    let backend = HttpInventoryBackend::new(base_url);
    let cars = backend
        .list_models()
        .await
        .context("Failed to fetch the vehicle inventory")?;

    println!("Found {} vehicles", cars.len());
    for (i, car) in cars.iter().enumerate() {
        let year = car.year.map(|y| y.to_string()).unwrap_or_default();
        let price = car.price.as_ref().map(|p| p.to_string()).unwrap_or_default();
        println!("{:>3}. {:<30} {:<6} {}", i + 1, car.name, year, price);
    }
    Ok(())
}
