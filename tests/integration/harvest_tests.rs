//! Integration tests for the harvest pipeline
//!
//! These tests stand up wiremock servers serving the three page shapes
//! (group directory, group code listing, code detail) and run the full
//! crawl-and-write cycle end-to-end.

use hcpcs_harvest::config::{Config, OutputConfig, SourceConfig};
use hcpcs_harvest::scrape::{harvest, harvest_catalog};
use hcpcs_harvest::HarvestError;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, csv_path: &str) -> Config {
    Config {
        source: SourceConfig {
            base_url: base_url.to_string(),
            directory_path: "/Codes".to_string(),
            user_agent: "HarvestTest/1.0".to_string(),
        },
        output: OutputConfig {
            csv_path: csv_path.to_string(),
        },
    }
}

/// Builds a directory page with one row per (suffix, category, href)
fn directory_page(rows: &[(&str, &str, &str)]) -> String {
    let mut body = String::from(
        r#"<html><body><table class="table table-hover">
        <tr><th>Group</th><th>Codes</th><th>Category</th></tr>"#,
    );
    for (suffix, category, href) in rows {
        body.push_str(&format!(
            r#"<tr><td><a href="{href}">{suffix}</a></td><td>10</td><td>{category}</td></tr>"#
        ));
    }
    body.push_str("</table></body></html>");
    body
}

/// Builds a listing page with one row per (code, long description, href)
fn listing_page(rows: &[(&str, &str, &str)]) -> String {
    let mut body = String::from(
        r#"<html><body><table class="table">
        <tr><th>Code</th><th>Long Description</th></tr>"#,
    );
    for (code, long_desc, href) in rows {
        body.push_str(&format!(
            r#"<tr><td><a href="{href}">{code}</a></td><td>{long_desc}</td></tr>"#
        ));
    }
    body.push_str("</table></body></html>");
    body
}

/// Builds a detail page carrying a codeDetail table with the given text
fn detail_page(short_desc: &str) -> String {
    format!(
        r#"<html><body><table id="codeDetail">
        <tr><td>Short description</td><td>{short_desc}</td></tr>
        </table></body></html>"#
    )
}

/// A detail page without the codeDetail table
fn detail_page_without_table() -> String {
    "<html><body><p>No detail available</p></body></html>".to_string()
}

async fn mount_page(server: &MockServer, url_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_two_groups() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/Codes",
        directory_page(&[
            ("A", "Transportation Services", "/Codes/A"),
            ("B", "Enteral and Parenteral Therapy", "/Codes/B"),
        ]),
    )
    .await;

    mount_page(
        &server,
        "/Codes/A",
        listing_page(&[
            ("A0021", "Outside state ambulance serv", "/Codes/A/A0021"),
            ("A0080", "Noninterest escort in non er", "/Codes/A/A0080"),
        ]),
    )
    .await;
    mount_page(
        &server,
        "/Codes/B",
        listing_page(&[("B4034", "Enter feed supkit syr by day", "/Codes/B/B4034")]),
    )
    .await;

    mount_page(&server, "/Codes/A/A0021", detail_page("Ambulance outside state")).await;
    mount_page(&server, "/Codes/A/A0080", detail_page("Noninterest escort non er")).await;
    mount_page(&server, "/Codes/B/B4034", detail_page("Enteral feed supply kit")).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    let config = create_test_config(&server.uri(), csv_path.to_str().unwrap());

    harvest(config).await.unwrap();

    let content = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "Group,Category,Code,Long Description,Short Description"
    );
    assert_eq!(
        lines[1],
        "HCPCS A,Transportation Services,A0021,Outside state ambulance serv,Ambulance outside state"
    );
    assert_eq!(
        lines[2],
        "HCPCS A,Transportation Services,A0080,Noninterest escort in non er,Noninterest escort non er"
    );
    assert_eq!(
        lines[3],
        "HCPCS B,Enteral and Parenteral Therapy,B4034,Enter feed supkit syr by day,Enteral feed supply kit"
    );
}

#[tokio::test]
async fn test_row_count_matches_listing_rows_per_group() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/Codes",
        directory_page(&[("E", "Durable Medical Equipment", "/Codes/E")]),
    )
    .await;

    let codes: Vec<(String, String, String)> = (0..5)
        .map(|i| {
            (
                format!("E{:04}", i),
                format!("Equipment item {}", i),
                format!("/Codes/E/E{:04}", i),
            )
        })
        .collect();
    let code_refs: Vec<(&str, &str, &str)> = codes
        .iter()
        .map(|(c, d, h)| (c.as_str(), d.as_str(), h.as_str()))
        .collect();
    mount_page(&server, "/Codes/E", listing_page(&code_refs)).await;

    for (code, _, href) in &code_refs {
        mount_page(&server, href, detail_page(&format!("Short {code}"))).await;
    }

    let config = create_test_config(&server.uri(), "unused.csv");
    let report = harvest_catalog(&config).await.unwrap();

    assert_eq!(report.entries.len(), 5);
    assert!(report
        .entries
        .iter()
        .all(|e| e.group == "HCPCS E" && e.category == "Durable Medical Equipment"));
    assert!(report.missing_detail.is_empty());
}

#[tokio::test]
async fn test_result_order_is_directory_order_not_completion_order() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/Codes",
        directory_page(&[
            ("A", "Transportation Services", "/Codes/A"),
            ("B", "Enteral and Parenteral Therapy", "/Codes/B"),
        ]),
    )
    .await;

    // Group A responds slowly; group B finishes first but must still come
    // second in the result set.
    Mock::given(method("GET"))
        .and(path("/Codes/A"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&[(
                    "A0021",
                    "Outside state ambulance serv",
                    "/Codes/A/A0021",
                )]))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/Codes/B",
        listing_page(&[("B4034", "Enter feed supkit syr by day", "/Codes/B/B4034")]),
    )
    .await;
    mount_page(&server, "/Codes/A/A0021", detail_page("Ambulance outside state")).await;
    mount_page(&server, "/Codes/B/B4034", detail_page("Enteral feed supply kit")).await;

    let config = create_test_config(&server.uri(), "unused.csv");
    let report = harvest_catalog(&config).await.unwrap();

    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].code, "A0021");
    assert_eq!(report.entries[1].code, "B4034");
}

#[tokio::test]
async fn test_missing_detail_table_uses_sentinel_and_reports_code() {
    let server = MockServer::start().await;

    // The worked example: one group, one code, detail page without the
    // codeDetail table.
    mount_page(&server, "/Codes", directory_page(&[("1", "DME", "/Codes/1")])).await;
    mount_page(
        &server,
        "/Codes/1",
        listing_page(&[("A0001", "Ambulance Service", "/Codes/1/A0001")]),
    )
    .await;
    mount_page(&server, "/Codes/1/A0001", detail_page_without_table()).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    let config = create_test_config(&server.uri(), csv_path.to_str().unwrap());

    let report = harvest_catalog(&config).await.unwrap();
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].short_description, "N/A");
    assert_eq!(report.missing_detail, vec!["A0001".to_string()]);

    harvest(config).await.unwrap();
    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        content.lines().nth(1),
        Some("HCPCS 1,DME,A0001,Ambulance Service,N/A")
    );
}

#[tokio::test]
async fn test_fail_fast_leaves_no_output_file() {
    let server = MockServer::start().await;

    mount_page(&server, "/Codes", directory_page(&[("A", "Transportation Services", "/Codes/A")]))
        .await;

    // Listing row without an anchor: a hard structure failure
    mount_page(
        &server,
        "/Codes/A",
        r#"<table><tr><th>h</th></tr><tr><td>A0021</td><td>desc</td></tr></table>"#.to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    let config = create_test_config(&server.uri(), csv_path.to_str().unwrap());

    let result = harvest(config).await;
    assert!(matches!(result, Err(HarvestError::Structure { .. })));
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_failed_run_does_not_overwrite_previous_catalog() {
    let server = MockServer::start().await;

    // Directory page missing the hover table entirely
    mount_page(&server, "/Codes", "<html><body>maintenance</body></html>".to_string()).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    std::fs::write(&csv_path, "previous run contents\n").unwrap();

    let config = create_test_config(&server.uri(), csv_path.to_str().unwrap());
    let result = harvest(config).await;

    assert!(result.is_err());
    assert_eq!(
        std::fs::read_to_string(&csv_path).unwrap(),
        "previous run contents\n"
    );
}

#[tokio::test]
async fn test_non_success_status_body_fails_structure_not_transport() {
    let server = MockServer::start().await;

    // The fetcher ignores status codes; a 404 body just fails extraction
    Mock::given(method("GET"))
        .and(path("/Codes"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>not found</html>"))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), "unused.csv");
    let result = harvest_catalog(&config).await;

    assert!(matches!(result, Err(HarvestError::Structure { .. })));
}

#[tokio::test]
async fn test_repeated_runs_produce_byte_identical_output() {
    let server = MockServer::start().await;

    mount_page(&server, "/Codes", directory_page(&[("A", "Transportation Services", "/Codes/A")]))
        .await;
    mount_page(
        &server,
        "/Codes/A",
        listing_page(&[
            ("A0021", "Outside state ambulance serv", "/Codes/A/A0021"),
            ("A0021", "Outside state ambulance serv", "/Codes/A/A0021"),
        ]),
    )
    .await;
    mount_page(&server, "/Codes/A/A0021", detail_page("Ambulance outside state")).await;

    let dir = TempDir::new().unwrap();
    let first_path = dir.path().join("first.csv");
    let second_path = dir.path().join("second.csv");

    harvest(create_test_config(&server.uri(), first_path.to_str().unwrap()))
        .await
        .unwrap();
    harvest(create_test_config(&server.uri(), second_path.to_str().unwrap()))
        .await
        .unwrap();

    let first = std::fs::read(&first_path).unwrap();
    let second = std::fs::read(&second_path).unwrap();
    assert_eq!(first, second);

    // Duplicate listing rows are kept: no dedup
    let content = String::from_utf8(first).unwrap();
    assert_eq!(content.lines().count(), 3);
}
