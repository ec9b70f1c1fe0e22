//! HCPCS-Harvest: a flat-catalog scraper for the HCPCS billing-code reference
//!
//! This crate crawls the public HCPCS code reference site in two levels
//! (group directory -> per-group code listing -> per-code detail page) and
//! compiles every code into a single CSV catalog.

pub mod catalog;
pub mod config;
pub mod output;
pub mod scrape;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected page structure at {url}: {message}")]
    Structure { url: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{CodeEntry, CodeGroup, CodeRow, GroupReport, HarvestReport};
pub use config::Config;
pub use scrape::harvest;
