//! brawler-crawler - Brawl Stars brawler stats exporter
//!
//! Needs a WebDriver server (chromedriver) listening at `--webdriver`.

use anyhow::Result;
use brawler_crawler::brawlify::slugify;
use brawler_crawler::commands::CrawlCommand;
use brawler_crawler::config::{Config, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "brawler-crawler",
    version,
    about = "Export Brawl Stars brawler stats from brawlify.com",
    long_about = "Loads the brawlify.com rarity listing in a headless browser, visits every brawler page and saves the stats table of each one."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Listing page to start from
    #[arg(long, global = true, env = "BRAWL_LISTING_URL")]
    listing_url: Option<String>,

    /// Output file
    #[arg(short, long, global = true, env = "BRAWL_OUTPUT")]
    output: Option<PathBuf>,

    /// WebDriver server URL
    #[arg(long, global = true, env = "BRAWL_WEBDRIVER")]
    webdriver: Option<String>,

    /// Delay after each brawler page in milliseconds
    #[arg(long, global = true, env = "BRAWL_DELAY")]
    delay: Option<u64>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Only visit the first N brawlers
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Show the browser window instead of running headless
    #[arg(long, global = true)]
    show_browser: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl every brawler and save the stats
    #[command(alias = "c")]
    Crawl,

    /// Print the URL slug for brawler names
    Slug {
        /// Brawler names
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(url) = cli.listing_url {
        config.listing_url = url;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if let Some(webdriver) = cli.webdriver {
        config.webdriver_url = webdriver;
    }
    if let Some(delay) = cli.delay {
        config.inter_request_delay_ms = delay;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(limit) = cli.limit {
        config.max_entries = Some(limit);
    }
    if cli.show_browser {
        config.headless = false;
    }

    match cli.command {
        Commands::Crawl => {
            let report = match CrawlCommand::new(config).execute().await {
                Ok(report) => report,
                Err(e) => {
                    tracing::error!("Crawl failed: {:#}", e);
                    return Err(e);
                }
            };

            println!(
                "Saved {} records ({} skipped) to {}",
                report.collected,
                report.skipped,
                report.output_path.display()
            );
        }

        Commands::Slug { names } => {
            for name in names {
                println!("{}", slugify(&name));
            }
        }
    }

    Ok(())
}
