//! Markup extraction for the three page shapes the site serves
//!
//! All three extractors are pure functions over fetched page text. The
//! table/row/cell positions they assume are a versioned contract with the
//! site's markup: a directory or listing row that violates the expected
//! shape is a hard [`HarvestError::Structure`] failure, never a silent
//! skip. The only tolerated absence is the per-code `codeDetail` table.

use crate::catalog::{CodeGroup, CodeRow};
use crate::HarvestError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Prefix applied to the directory's first cell to form the group label
const GROUP_LABEL_PREFIX: &str = "HCPCS ";

/// Extracts the group directory from the directory page
///
/// Locates the table carrying the `table-hover` styling class and reads
/// each data row (header skipped): first cell = group suffix, third cell =
/// category, first anchor = listing link, resolved against `page_url`.
///
/// # Arguments
///
/// * `html` - The directory page text
/// * `page_url` - URL the page was fetched from, for link resolution and
///   error context
///
/// # Returns
///
/// * `Ok(Vec<CodeGroup>)` - One group per data row, in row order
/// * `Err(HarvestError::Structure)` - The table is missing or a row
///   violates the expected cell/anchor shape
pub fn group_directory(html: &str, page_url: &Url) -> Result<Vec<CodeGroup>, HarvestError> {
    let document = Html::parse_document(html);

    let table_selector = Selector::parse("table.table-hover").unwrap();
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| structure_error(page_url, "no table with class 'table-hover'"))?;

    let mut groups = Vec::new();

    for (index, row) in data_rows(&table).into_iter().enumerate() {
        let cells = row_cells(&row);

        let suffix = cell_text(&cells, 0)
            .ok_or_else(|| structure_error(page_url, format!("directory row {index} has no cells")))?;
        let category = cell_text(&cells, 2).ok_or_else(|| {
            structure_error(page_url, format!("directory row {index} has no category cell"))
        })?;
        let href = first_anchor_href(&row).ok_or_else(|| {
            structure_error(page_url, format!("directory row {index} has no anchor"))
        })?;

        groups.push(CodeGroup {
            label: format!("{GROUP_LABEL_PREFIX}{suffix}"),
            category,
            listing_url: page_url.join(&href)?,
        });
    }

    Ok(groups)
}

/// Extracts the code rows from a group's listing page
///
/// Reads the first table on the page, skipping the header row: first cell
/// text = code, second cell text = long description, anchor inside the
/// first cell = detail link, resolved against `page_url`.
pub fn group_code_table(html: &str, page_url: &Url) -> Result<Vec<CodeRow>, HarvestError> {
    let document = Html::parse_document(html);

    let table_selector = Selector::parse("table").unwrap();
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| structure_error(page_url, "no table found on listing page"))?;

    let mut rows = Vec::new();

    for (index, row) in data_rows(&table).into_iter().enumerate() {
        let cells = row_cells(&row);

        let code = cell_text(&cells, 0)
            .ok_or_else(|| structure_error(page_url, format!("listing row {index} has no code cell")))?;
        let long_description = cell_text(&cells, 1).ok_or_else(|| {
            structure_error(page_url, format!("listing row {index} has no description cell"))
        })?;
        let href = first_anchor_href(&cells[0]).ok_or_else(|| {
            structure_error(page_url, format!("listing row {index} has no detail anchor"))
        })?;

        rows.push(CodeRow {
            code,
            long_description,
            detail_url: page_url.join(&href)?,
        });
    }

    Ok(rows)
}

/// Extracts the short description from a code's detail page
///
/// The detail table is identified by id `codeDetail`; its first row's
/// second cell holds the short description. A page without the table is
/// tolerated and yields `Ok(None)` (the caller substitutes the sentinel);
/// a present table missing the expected row or cell is a structure error.
pub fn short_description(html: &str, page_url: &Url) -> Result<Option<String>, HarvestError> {
    let document = Html::parse_document(html);

    let table_selector = Selector::parse("table#codeDetail").unwrap();
    let table = match document.select(&table_selector).next() {
        Some(table) => table,
        None => return Ok(None),
    };

    let row_selector = Selector::parse("tr").unwrap();
    let row = table
        .select(&row_selector)
        .next()
        .ok_or_else(|| structure_error(page_url, "codeDetail table has no rows"))?;

    let cells = row_cells(&row);
    let text = cell_text(&cells, 1)
        .ok_or_else(|| structure_error(page_url, "codeDetail row has no second cell"))?;

    Ok(Some(text))
}

/// A table's rows in document order, header row skipped
fn data_rows<'a>(table: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let row_selector = Selector::parse("tr").unwrap();
    table.select(&row_selector).skip(1).collect()
}

/// Collects the `td` cells of a row, in document order
fn row_cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let cell_selector = Selector::parse("td").unwrap();
    row.select(&cell_selector).collect()
}

/// Text content of the cell at `index`, trimmed; None if the cell is absent
fn cell_text(cells: &[ElementRef<'_>], index: usize) -> Option<String> {
    cells
        .get(index)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
}

/// The href of the first anchor under `element`, if any
fn first_anchor_href(element: &ElementRef<'_>) -> Option<String> {
    let anchor_selector = Selector::parse("a[href]").unwrap();
    element
        .select(&anchor_selector)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
}

fn structure_error(page_url: &Url, message: impl Into<String>) -> HarvestError {
    HarvestError::Structure {
        url: page_url.to_string(),
        message: message.into(),
    }
}
