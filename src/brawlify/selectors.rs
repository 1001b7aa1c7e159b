//! CSS selectors for brawlify.com pages.
//!
//! The raw strings are also handed to the browser for its wait conditions, so
//! each one is kept as a `&str` next to its parsed form.
//!
//! **Update process**: when a crawl finds no cards or no stats, save the
//! rendered HTML as a fixture, adjust the selectors, and extend the parser
//! tests.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the rarity listing page.
pub mod listing {
    use super::*;

    /// Card container. Its presence means the client-side render finished.
    pub const CARD: &str = "div.row div.card";

    /// Links from a card to a brawler page (every detail URL lives under `/brawlers/`).
    pub static ENTRY_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.row div.card a[href*='/brawlers/']").unwrap());

    /// Portrait inside a link; its `alt` carries the display name.
    pub static PORTRAIT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
}

/// Selectors for a single brawler page.
pub mod detail {
    use super::*;

    /// Stats table.
    pub const STATS_TABLE: &str = "table.table-striped";

    pub static TABLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(STATS_TABLE).unwrap());

    pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

    /// Header and data cells, in document order.
    pub static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th, td").unwrap());
}
