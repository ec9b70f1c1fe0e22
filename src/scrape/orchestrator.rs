//! Crawl orchestration: the two-level fan-out over groups and codes
//!
//! One future per directory group runs concurrently; inside a group the
//! per-code detail fetches run strictly sequentially. Results are gathered
//! positionally, so the final catalog is ordered by directory row, not by
//! completion time, and the first failing group aborts the whole batch
//! before anything is written.

use crate::catalog::{CodeEntry, CodeGroup, GroupReport, HarvestReport, MISSING_DETAIL_SENTINEL};
use crate::config::Config;
use crate::output::write_catalog;
use crate::scrape::extract::{group_code_table, group_directory, short_description};
use crate::scrape::fetcher::{build_http_client, fetch_page};
use crate::HarvestError;
use futures::future::try_join_all;
use reqwest::Client;
use std::path::Path;
use url::Url;

/// Runs the full harvest: crawl, flatten, write the CSV catalog
///
/// # Crawl flow
///
/// 1. Fetch the directory page and extract the group list
/// 2. Spawn one crawl future per group; run them all concurrently
/// 3. Gather reports in directory-row order (first error aborts the batch)
/// 4. Emit one warning line per code that lacked a detail table
/// 5. Concatenate entries and write the CSV file, overwriting
///
/// The output file is touched only on full success; any transport or
/// structure failure leaves the previous file (if any) intact.
///
/// # Arguments
///
/// * `config` - The harvest configuration
///
/// # Returns
///
/// * `Ok(())` - Catalog written to the configured path
/// * `Err(HarvestError)` - Crawl or write failed; no output produced
pub async fn harvest(config: Config) -> Result<(), HarvestError> {
    let report = harvest_catalog(&config).await?;

    for code in &report.missing_detail {
        eprintln!("Warning: No 'codeDetail' table found for {}", code);
    }

    tracing::info!(
        "Writing {} catalog rows to {}",
        report.entries.len(),
        config.output.csv_path
    );
    write_catalog(Path::new(&config.output.csv_path), &report.entries)?;

    Ok(())
}

/// Crawls the site and returns the flattened, ordered result set
///
/// Split from [`harvest`] so the crawl can be exercised without touching
/// the filesystem, and so callers can see the missing-detail diagnostics
/// instead of only the console warnings.
pub async fn harvest_catalog(config: &Config) -> Result<HarvestReport, HarvestError> {
    let client = build_http_client(&config.source).map_err(|source| HarvestError::Http {
        url: config.source.base_url.clone(),
        source,
    })?;

    let base_url = Url::parse(&config.source.base_url)?;
    let directory_url = base_url.join(&config.source.directory_path)?;

    tracing::info!("Fetching group directory from {}", directory_url);
    let directory_page = fetch_page(&client, &directory_url).await?;
    let groups = group_directory(&directory_page, &directory_url)?;
    tracing::info!("Discovered {} code groups", groups.len());

    // One future per group, gathered positionally: the catalog keeps
    // directory-row order no matter which group finishes first.
    let reports = try_join_all(
        groups
            .into_iter()
            .map(|group| crawl_group(&client, group)),
    )
    .await?;

    let mut combined = HarvestReport::default();
    for report in reports {
        combined.entries.extend(report.entries);
        combined.missing_detail.extend(report.missing_detail);
    }

    tracing::info!("Harvested {} codes in total", combined.entries.len());
    Ok(combined)
}

/// Crawls one group: listing page, then each code's detail page in turn
///
/// Detail fetches are sequential, so at most one request per group is in
/// flight at a time; overall concurrency is bounded by the group count.
async fn crawl_group(client: &Client, group: CodeGroup) -> Result<GroupReport, HarvestError> {
    tracing::debug!("Crawling group {} from {}", group.label, group.listing_url);

    let listing_page = fetch_page(client, &group.listing_url).await?;
    let rows = group_code_table(&listing_page, &group.listing_url)?;
    tracing::debug!("Group {} lists {} codes", group.label, rows.len());

    let mut report = GroupReport::default();

    for row in rows {
        let detail_page = fetch_page(client, &row.detail_url).await?;

        let short = match short_description(&detail_page, &row.detail_url)? {
            Some(short) => short,
            None => {
                report.missing_detail.push(row.code.clone());
                MISSING_DETAIL_SENTINEL.to_string()
            }
        };

        report.entries.push(CodeEntry {
            group: group.label.clone(),
            category: group.category.clone(),
            code: row.code,
            long_description: row.long_description,
            short_description: short,
        });
    }

    Ok(report)
}
