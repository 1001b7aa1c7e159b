//! Crawl command: listing page, then every brawler page, then one output file.

use crate::brawlify::selectors::{detail, listing};
use crate::brawlify::{AttributeRecord, CatalogEntry, Dataset, Parser};
use crate::browser::{PageRenderer, WebDriverRenderer};
use crate::config::Config;
use crate::error::CrawlError;
use crate::format::DatasetWriter;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Summary of a finished crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Entries found on the listing page
    pub discovered: usize,
    /// Records written
    pub collected: usize,
    /// Entries whose stats table never showed up
    pub skipped: usize,
    /// File the records went to
    pub output_path: PathBuf,
}

/// What the browser phase produced, before anything is written.
struct Collected {
    dataset: Dataset,
    discovered: usize,
    skipped: usize,
}

/// Executes a full crawl.
pub struct CrawlCommand {
    config: Config,
}

impl CrawlCommand {
    /// Creates a new crawl command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Starts a browser session and runs the crawl with it.
    pub async fn execute(&self) -> Result<CrawlReport> {
        let mut renderer =
            WebDriverRenderer::connect(&self.config).await.context("Failed to start browser")?;

        self.execute_with_renderer(&mut renderer).await
    }

    /// Runs the crawl with a provided renderer (for testing).
    ///
    /// The renderer is shut down before this returns, whatever the outcome.
    pub async fn execute_with_renderer(
        &self,
        renderer: &mut impl PageRenderer,
    ) -> Result<CrawlReport> {
        let collected = self.collect(renderer).await;

        if let Err(e) = renderer.shutdown().await {
            warn!("Failed to close browser session: {}", e);
        }

        let Collected { dataset, discovered, skipped } = collected?;

        if dataset.is_empty() {
            return Err(CrawlError::EmptyDataset.into());
        }

        let path = &self.config.output_path;
        info!("Saving {} records to {}", dataset.len(), path.display());
        DatasetWriter::new(self.config.format).write(&dataset, path)?;
        info!("Done, results are in {}", path.display());

        Ok(CrawlReport {
            discovered,
            collected: dataset.len(),
            skipped,
            output_path: path.clone(),
        })
    }

    async fn collect(&self, renderer: &mut impl PageRenderer) -> Result<Collected> {
        let parser = Parser::new(&self.config.listing_url)?;
        let mut entries = self.fetch_listing(renderer, &parser).await?;
        let discovered = entries.len();

        if let Some(max) = self.config.max_entries {
            if max < entries.len() {
                debug!("Limiting crawl to the first {} of {} entries", max, entries.len());
                entries.truncate(max);
            }
        }

        let mut dataset = Dataset::new();
        let mut skipped = 0;
        let total = entries.len();

        for (i, entry) in entries.iter().enumerate() {
            info!("[{}/{}] Parsing {} - {}", i + 1, total, entry.name, entry.detail_url);

            match self.fetch_detail(renderer, &parser, entry).await? {
                Some(record) => dataset.push(record),
                None => skipped += 1,
            }

            self.pause().await;
        }

        Ok(Collected { dataset, discovered, skipped })
    }

    async fn fetch_listing(
        &self,
        renderer: &mut impl PageRenderer,
        parser: &Parser,
    ) -> Result<Vec<CatalogEntry>> {
        let url = &self.config.listing_url;
        let timeout = self.config.listing_wait_timeout();

        info!("Loading brawler list from {}", url);
        renderer.load(url).await.context("Failed to load listing page")?;

        if let Err(e) = renderer.wait_for(listing::CARD, timeout).await {
            if e.is_timeout() {
                return Err(CrawlError::ListingUnavailable { url: url.clone(), timeout }.into());
            }
            return Err(e).context("Failed while waiting for listing cards");
        }

        let html = renderer.current_dom().await.context("Failed to read listing page")?;
        let entries = parser.parse_listing(&html);
        info!("Found {} brawlers", entries.len());

        Ok(entries)
    }

    /// Returns `None` when the entry has to be skipped.
    async fn fetch_detail(
        &self,
        renderer: &mut impl PageRenderer,
        parser: &Parser,
        entry: &CatalogEntry,
    ) -> Result<Option<AttributeRecord>> {
        renderer
            .load(&entry.detail_url)
            .await
            .with_context(|| format!("Failed to load {}", entry.detail_url))?;

        if let Err(e) =
            renderer.wait_for(detail::STATS_TABLE, self.config.detail_wait_timeout()).await
        {
            if e.is_timeout() {
                warn!("Stats table for {} not found, skipping: {}", entry.name, e);
                return Ok(None);
            }
            return Err(e).with_context(|| format!("Failed while waiting for {}", entry.detail_url));
        }

        let html = renderer
            .current_dom()
            .await
            .with_context(|| format!("Failed to read {}", entry.detail_url))?;

        let record = parser.parse_detail(&html, &entry.name);
        if record.is_none() {
            warn!("Stats table for {} vanished before it could be read, skipping", entry.name);
        }

        Ok(record)
    }

    async fn pause(&self) {
        let delay = self.config.inter_request_delay();
        if delay.is_zero() {
            return;
        }

        debug!("Delaying {}ms", delay.as_millis());
        tokio::time::sleep(delay).await;
    }
}
