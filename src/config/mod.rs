//! Configuration module for HCPCS-Harvest
//!
//! The scraper runs with built-in defaults matching the public HCPCS
//! reference site; an optional TOML file can override the source host,
//! output path, and User-Agent.
//!
//! # Example
//!
//! ```no_run
//! use hcpcs_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("harvest.toml"))).unwrap();
//! println!("Scraping from: {}", config.source.base_url);
//! ```

mod parser;
mod types;

// Re-export types
pub use types::{Config, OutputConfig, SourceConfig};

// Re-export parser functions
pub use parser::load_config;
