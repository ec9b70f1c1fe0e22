//! CSV output for the harvested catalog
//!
//! The catalog is written in one shot at the end of a successful run,
//! overwriting any previous file. Nothing is persisted on failure.

use crate::catalog::CodeEntry;
use crate::HarvestError;
use std::path::Path;

/// Column headers of the catalog file, in output order
pub const FILE_HEADERS: [&str; 5] = [
    "Group",
    "Category",
    "Code",
    "Long Description",
    "Short Description",
];

/// Writes the catalog to `path` as UTF-8 CSV with the fixed header row
///
/// Rows are written in the order given; no deduplication is performed.
/// An existing file at `path` is overwritten.
///
/// # Arguments
///
/// * `path` - Destination file path
/// * `entries` - The flattened result set, one CSV row each
///
/// # Returns
///
/// * `Ok(())` - File written and flushed
/// * `Err(HarvestError)` - CSV serialization or IO failure
pub fn write_catalog(path: &Path, entries: &[CodeEntry]) -> Result<(), HarvestError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(FILE_HEADERS)?;

    for entry in entries {
        writer.write_record([
            &entry.group,
            &entry.category,
            &entry.code,
            &entry.long_description,
            &entry.short_description,
        ])?;
    }

    writer.flush()?;
    Ok(())
}
