//! HTML extraction for the brawler listing and stats pages.

use crate::brawlify::models::{AttributeRecord, CatalogEntry};
use crate::brawlify::selectors::{detail, listing};
use anyhow::{Context, Result};
use scraper::{ElementRef, Html};
use tracing::{debug, trace, warn};
use url::Url;

/// Parser for rendered brawlify.com pages.
pub struct Parser {
    listing_url: Url,
}

impl Parser {
    /// Creates a parser that resolves links against `listing_url`.
    pub fn new(listing_url: &str) -> Result<Self> {
        let listing_url = Url::parse(listing_url)
            .with_context(|| format!("Invalid listing URL: {}", listing_url))?;
        Ok(Self { listing_url })
    }

    /// Collects one entry per brawler link on the listing page, in document order.
    ///
    /// Links back to the listing page itself are dropped. Duplicates are kept.
    pub fn parse_listing(&self, html: &str) -> Vec<CatalogEntry> {
        let document = Html::parse_document(html);
        let mut entries = Vec::new();

        for anchor in document.select(&listing::ENTRY_LINK) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            let detail_url = match self.listing_url.join(href.trim()) {
                Ok(url) => url,
                Err(e) => {
                    warn!("Skipping link with unusable href {:?}: {}", href, e);
                    continue;
                }
            };

            if detail_url == self.listing_url {
                trace!("Skipping self link {}", detail_url);
                continue;
            }

            let name = display_name(anchor);
            trace!("Found entry: {} -> {}", name, detail_url);
            entries.push(CatalogEntry::new(name, detail_url));
        }

        debug!("Parsed {} entries from listing", entries.len());
        entries
    }

    /// Builds the stats record for one brawler.
    ///
    /// Returns `None` when the page has no stats table.
    pub fn parse_detail(&self, html: &str, name: &str) -> Option<AttributeRecord> {
        let document = Html::parse_document(html);
        let table = document.select(&detail::TABLE).next()?;

        let mut record = AttributeRecord::new(name);
        for row in table.select(&detail::ROW) {
            let cells: Vec<ElementRef> = row.select(&detail::CELL).collect();
            if cells.len() < 2 {
                trace!("Ignoring row with {} cell(s)", cells.len());
                continue;
            }

            let (key, value) = parse_stat_row(&cell_text(cells[0]), &cell_text(cells[1]));
            record.insert(key, value);
        }

        debug!("Parsed {} stats for {}", record.len() - 1, name);
        Some(record)
    }
}

/// Picks the portrait's alt text, falling back to the link text.
pub fn display_name(anchor: ElementRef) -> String {
    anchor
        .select(&listing::PORTRAIT)
        .next()
        .and_then(|img| img.value().attr("alt"))
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(String::from)
        .unwrap_or_else(|| visible_text(anchor))
}

/// Normalizes a raw key/value cell pair: both trimmed, one trailing colon dropped from the key.
pub fn parse_stat_row(key: &str, value: &str) -> (String, String) {
    let key = key.trim();
    let key = key.strip_suffix(':').unwrap_or(key);
    (key.to_string(), value.trim().to_string())
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Text as a browser would show it: whitespace runs collapsed, ends trimmed.
fn visible_text(element: ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}
