//! Data model for the harvested code catalog
//!
//! Everything here is a plain immutable record: groups discovered on the
//! directory page, rows parsed from a group's listing table, and the
//! flattened entries that become CSV rows.

use url::Url;

/// Short-description placeholder used when a code's detail page has no
/// `codeDetail` table.
pub const MISSING_DETAIL_SENTINEL: &str = "N/A";

/// A top-level code group discovered on the directory page
///
/// One `CodeGroup` is built per data row of the directory table and is
/// consumed when its crawl future is scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGroup {
    /// Group label, e.g. "HCPCS A" ("HCPCS " + first directory cell)
    pub label: String,

    /// Category label from the directory's third cell
    pub category: String,

    /// Absolute URL of the group's code-listing page
    pub listing_url: Url,
}

/// One row of a group's code-listing table, before the detail lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRow {
    /// The billing code (unique within a group, not globally)
    pub code: String,

    /// Long description from the listing's second cell
    pub long_description: String,

    /// Absolute URL of the code's detail page
    pub detail_url: Url,
}

/// A fully resolved catalog entry; one CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub group: String,
    pub category: String,
    pub code: String,
    pub long_description: String,
    /// Short description from the detail page, or [`MISSING_DETAIL_SENTINEL`]
    pub short_description: String,
}

/// Result of crawling one group: its entries plus diagnostics
///
/// Codes whose detail page lacked a `codeDetail` table are listed in
/// `missing_detail` so warnings can be emitted after the gather instead of
/// from inside concurrent tasks.
#[derive(Debug, Clone, Default)]
pub struct GroupReport {
    /// Entries in listing-table order
    pub entries: Vec<CodeEntry>,

    /// Codes that fell back to the sentinel short description, in order
    pub missing_detail: Vec<String>,
}

/// Aggregate outcome of a full crawl, before the CSV write
///
/// Entries are concatenated in directory-row order; `missing_detail`
/// holds the sentinel-substituted codes in the same group order so the
/// warning lines come out deterministically.
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    pub entries: Vec<CodeEntry>,
    pub missing_detail: Vec<String>,
}
