//! Data models for catalog entries and their stat records.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One brawler card from the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Display name
    pub name: String,
    /// Absolute URL of the brawler's stats page
    pub detail_url: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self { name: name.into(), detail_url: detail_url.into() }
    }
}

/// Stats of one brawler as an insertion-ordered map of column name to value.
///
/// The `Name` column is always first. Inserting an existing key replaces its
/// value but keeps the column where it first appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    fields: Vec<(String, String)>,
}

impl AttributeRecord {
    /// Column seeded from the catalog entry.
    pub const NAME_KEY: &'static str = "Name";

    /// Creates a record holding only the `Name` column.
    pub fn new(name: impl Into<String>) -> Self {
        Self { fields: vec![(Self::NAME_KEY.to_string(), name.into())] }
    }

    /// Sets `key` to `value`; the last write wins.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Returns the value of the `Name` column.
    pub fn name(&self) -> &str {
        &self.fields[0].1
    }

    /// Column names in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false: a record carries at least its name.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for AttributeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Records collected during one crawl, in visit order. Append-only.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<AttributeRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: AttributeRecord) {
        self.records.push(record);
    }

    /// Output columns: the keys of the first record, frozen for the whole file.
    pub fn schema(&self) -> Vec<&str> {
        self.records.first().map(|r| r.keys().collect()).unwrap_or_default()
    }

    pub fn records(&self) -> &[AttributeRecord] {
        &self.records
    }

    /// Returns number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
