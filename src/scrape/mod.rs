//! Scraping module: fetching, markup extraction, and crawl orchestration
//!
//! The crawl is a two-level fan-out: the group directory page yields one
//! concurrent future per group, and each group future walks its code
//! listing sequentially, following every code's detail link.

pub mod extract;
mod fetcher;
mod orchestrator;

pub use extract::{group_code_table, group_directory, short_description};
pub use fetcher::{build_http_client, fetch_page};
pub use orchestrator::{harvest, harvest_catalog};
