//! brawler-crawler - Brawl Stars brawler stats exporter
//!
//! Drives a headless browser through brawlify.com's client-rendered listing
//! and stat pages and saves one row per brawler.

pub mod brawlify;
pub mod browser;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;

pub use brawlify::{AttributeRecord, CatalogEntry, Dataset};
pub use browser::{PageRenderer, RenderError};
pub use config::Config;
pub use error::CrawlError;
