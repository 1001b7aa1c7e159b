//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page listing every brawler card
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Where the collected dataset is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// How long to wait for the listing cards to render
    #[serde(default = "default_listing_wait_timeout_secs")]
    pub listing_wait_timeout_secs: u64,

    /// How long to wait for a stats table to render
    #[serde(default = "default_detail_wait_timeout_secs")]
    pub detail_wait_timeout_secs: u64,

    /// Pause after every detail page, successful or not
    #[serde(default = "default_inter_request_delay_ms")]
    pub inter_request_delay_ms: u64,

    /// WebDriver endpoint (chromedriver)
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Browser executable, if not the driver's default
    #[serde(default)]
    pub browser_binary: Option<String>,

    /// Extra browser command-line switches
    #[serde(default = "default_browser_args")]
    pub browser_args: Vec<String>,

    /// Only visit the first N entries of the listing
    #[serde(default)]
    pub max_entries: Option<usize>,
}

fn default_listing_url() -> String {
    "https://brawlify.com/ru/brawlers/rarity".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data/brawlers.csv")
}

fn default_listing_wait_timeout_secs() -> u64 {
    15
}

fn default_detail_wait_timeout_secs() -> u64 {
    10
}

fn default_inter_request_delay_ms() -> u64 {
    300
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_browser_args() -> Vec<String> {
    ["--no-sandbox", "--disable-dev-shm-usage", "--disable-gpu", "--disable-extensions"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            output_path: default_output_path(),
            format: OutputFormat::Csv,
            listing_wait_timeout_secs: default_listing_wait_timeout_secs(),
            detail_wait_timeout_secs: default_detail_wait_timeout_secs(),
            inter_request_delay_ms: default_inter_request_delay_ms(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            browser_binary: None,
            browser_args: default_browser_args(),
            max_entries: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("brawler-crawler.toml");
        if local_config.exists() {
            debug!("Found brawler-crawler.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("brawler-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("BRAWL_LISTING_URL") {
            self.listing_url = url;
        }

        if let Ok(output) = std::env::var("BRAWL_OUTPUT") {
            self.output_path = PathBuf::from(output);
        }

        if let Ok(webdriver) = std::env::var("BRAWL_WEBDRIVER") {
            self.webdriver_url = webdriver;
        }

        if let Ok(delay) = std::env::var("BRAWL_DELAY") {
            if let Ok(d) = delay.parse() {
                self.inter_request_delay_ms = d;
            }
        }

        self
    }

    pub fn listing_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_wait_timeout_secs)
    }

    pub fn detail_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_wait_timeout_secs)
    }

    pub fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.inter_request_delay_ms)
    }
}

/// Output format for the collected dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: csv, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.listing_url, "https://brawlify.com/ru/brawlers/rarity");
        assert_eq!(config.output_path, PathBuf::from("data/brawlers.csv"));
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.listing_wait_timeout_secs, 15);
        assert_eq!(config.detail_wait_timeout_secs, 10);
        assert_eq!(config.inter_request_delay_ms, 300);
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert!(config.headless);
        assert!(config.browser_binary.is_none());
        assert!(config.browser_args.contains(&"--no-sandbox".to_string()));
        assert!(config.max_entries.is_none());
    }

    #[test]
    fn test_listing_wait_is_longer_than_detail_wait() {
        let config = Config::new();
        assert!(config.listing_wait_timeout() > config.detail_wait_timeout());
    }

    #[test]
    fn test_duration_accessors() {
        let config = Config::new();
        assert_eq!(config.listing_wait_timeout(), Duration::from_secs(15));
        assert_eq!(config.detail_wait_timeout(), Duration::from_secs(10));
        assert_eq!(config.inter_request_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);

        let err = "table".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
        assert!(err.contains("csv, json, markdown"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            listing_url = "https://example.com/en/brawlers/rarity"
            inter_request_delay_ms = 1000
            max_entries = 5
            headless = false
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.listing_url, "https://example.com/en/brawlers/rarity");
        assert_eq!(config.inter_request_delay_ms, 1000);
        assert_eq!(config.max_entries, Some(5));
        assert!(!config.headless);
        // Untouched fields fall back to defaults
        assert_eq!(config.detail_wait_timeout_secs, 10);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            listing_url = "https://brawlify.com/en/brawlers/rarity"
            output_path = "out/stats.json"
            format = "json"
            listing_wait_timeout_secs = 30
            detail_wait_timeout_secs = 5
            inter_request_delay_ms = 0
            webdriver_url = "http://127.0.0.1:4444"
            headless = true
            browser_binary = "/usr/bin/google-chrome"
            browser_args = ["--no-sandbox"]
            max_entries = 3
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/stats.json"));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.listing_wait_timeout_secs, 30);
        assert_eq!(config.detail_wait_timeout_secs, 5);
        assert_eq!(config.inter_request_delay_ms, 0);
        assert_eq!(config.webdriver_url, "http://127.0.0.1:4444");
        assert_eq!(config.browser_binary, Some("/usr/bin/google-chrome".to_string()));
        assert_eq!(config.browser_args, vec!["--no-sandbox"]);
        assert_eq!(config.max_entries, Some(3));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            output_path = "custom.csv"
            detail_wait_timeout_secs = 20
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.output_path, PathBuf::from("custom.csv"));
        assert_eq!(config.detail_wait_timeout_secs, 20);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"webdriver_url = "http://localhost:4444""#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn test_config_with_env() {
        let orig_url = std::env::var("BRAWL_LISTING_URL").ok();
        let orig_output = std::env::var("BRAWL_OUTPUT").ok();
        let orig_delay = std::env::var("BRAWL_DELAY").ok();

        std::env::set_var("BRAWL_LISTING_URL", "https://example.com/brawlers/rarity");
        std::env::set_var("BRAWL_OUTPUT", "env.csv");
        std::env::set_var("BRAWL_DELAY", "750");

        let config = Config::new().with_env();
        assert_eq!(config.listing_url, "https://example.com/brawlers/rarity");
        assert_eq!(config.output_path, PathBuf::from("env.csv"));
        assert_eq!(config.inter_request_delay_ms, 750);

        std::env::set_var("BRAWL_DELAY", "not_a_number");
        let config = Config::new().with_env();
        // Invalid values are ignored, keeping defaults
        assert_eq!(config.inter_request_delay_ms, 300);

        match orig_url {
            Some(v) => std::env::set_var("BRAWL_LISTING_URL", v),
            None => std::env::remove_var("BRAWL_LISTING_URL"),
        }
        match orig_output {
            Some(v) => std::env::set_var("BRAWL_OUTPUT", v),
            None => std::env::remove_var("BRAWL_OUTPUT"),
        }
        match orig_delay {
            Some(v) => std::env::set_var("BRAWL_DELAY", v),
            None => std::env::remove_var("BRAWL_DELAY"),
        }
    }
}
