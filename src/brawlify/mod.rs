//! brawlify.com-specific modules for selectors, parsing, and data models.

pub mod models;
pub mod parser;
pub mod selectors;
pub mod slug;

pub use models::{AttributeRecord, CatalogEntry, Dataset};
pub use parser::Parser;
pub use slug::slugify;
