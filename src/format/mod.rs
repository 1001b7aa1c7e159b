//! Output formatting for collected datasets (CSV, JSON, markdown).
//!
//! Every format shares the same column rule: the first record's keys are the
//! schema. Later records are projected onto it, so a missing column comes out
//! empty and an extra key is dropped.

use crate::brawlify::{AttributeRecord, Dataset};
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Renders and saves datasets.
pub struct DatasetWriter {
    format: OutputFormat,
}

impl DatasetWriter {
    /// Creates a new writer.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Renders the dataset in the configured format.
    pub fn render(&self, dataset: &Dataset) -> Result<String> {
        if dataset.is_empty() {
            anyhow::bail!("Refusing to render an empty dataset");
        }

        match self.format {
            OutputFormat::Csv => self.csv(dataset),
            OutputFormat::Json => self.json(dataset),
            OutputFormat::Markdown => Ok(self.markdown(dataset)),
        }
    }

    /// Renders the dataset and writes it to `path`, creating parent directories.
    ///
    /// Nothing touches the filesystem unless rendering succeeded.
    pub fn write(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        let output = self.render(dataset)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, output)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;

        debug!("Wrote {} records to {}", dataset.len(), path.display());
        Ok(())
    }

    // CSV formatting

    fn csv(&self, dataset: &Dataset) -> Result<String> {
        let schema = dataset.schema();
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record(&schema).context("Failed to write CSV header")?;
        for record in dataset.records() {
            writer.write_record(project(&schema, record)).context("Failed to write CSV row")?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }

    // JSON formatting

    fn json(&self, dataset: &Dataset) -> Result<String> {
        let schema = dataset.schema();
        let rows: Vec<AttributeRecord> = dataset
            .records()
            .iter()
            .map(|record| {
                let values = project(&schema, record);
                let mut row = AttributeRecord::new(values[0]);
                for (key, value) in schema.iter().zip(values).skip(1) {
                    row.insert(*key, value);
                }
                row
            })
            .collect();

        serde_json::to_string_pretty(&rows).context("Failed to serialize dataset to JSON")
    }

    // Markdown formatting

    fn markdown(&self, dataset: &Dataset) -> String {
        let schema = dataset.schema();
        let mut lines = Vec::new();

        lines.push(format!("| {} |", schema.join(" | ")));
        lines.push(format!("|{}|", vec!["---"; schema.len()].join("|")));

        for record in dataset.records() {
            let cells: Vec<String> =
                project(&schema, record).into_iter().map(Self::markdown_escape).collect();
            lines.push(format!("| {} |", cells.join(" | ")));
        }

        lines.push(String::new());
        lines.push(format!("*{} brawlers*", dataset.len()));

        lines.join("\n")
    }

    fn markdown_escape(s: &str) -> String {
        s.replace('|', "\\|").replace('\n', " ")
    }
}

/// Values of `record` in schema order; missing columns are empty.
fn project<'a>(schema: &[&str], record: &'a AttributeRecord) -> Vec<&'a str> {
    schema.iter().map(|key| record.get(key).unwrap_or("")).collect()
}
