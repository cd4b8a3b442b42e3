// ABOUTME: Integration tests for the folio CLI binary.
// ABOUTME: Covers saved-HTML translation, page detection, listing selection and argument errors.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const PHOTO_URL: &str = "http://recordsearch.naa.gov.au/scripts/PhotoSearchItemDetail.asp?B=1646857";
const LISTING_URL: &str =
    "http://recordsearch.naa.gov.au/SearchNRetrieve/Interface/ListingReports/ItemsListing.aspx";
const TEI_INDEX_URL: &str = "https://tei-c.org/release/doc/tei-p5-doc/en/html/index.html";

fn folio_cmd() -> Command {
    Command::cargo_bin("folio").unwrap()
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}.html", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn translates_saved_photo_page() {
    let output = folio_cmd()
        .arg("--html")
        .arg(fixture("naa_photo_detail"))
        .arg("--url")
        .arg(PHOTO_URL)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["itemType"], "manuscript");
    assert_eq!(
        records[0]["title"],
        "Ford V8 three ton lorry loaded with mail [rear view]"
    );
    assert_eq!(records[0]["archiveLocation"], "C4078, N1005B");
    assert_eq!(records[0]["url"], PHOTO_URL);
}

#[test]
fn compact_output_is_one_line() {
    let output = folio_cmd()
        .arg("--html")
        .arg(fixture("naa_photo_detail"))
        .arg("--url")
        .arg(PHOTO_URL)
        .arg("--compact")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.trim_end().lines().count(), 1);
    assert!(stdout.starts_with("[{"));
}

#[test]
fn detect_prints_page_kind() {
    folio_cmd()
        .arg("--html")
        .arg(fixture("tei_index"))
        .arg("--url")
        .arg(TEI_INDEX_URL)
        .arg("--detect")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}\tbook", TEI_INDEX_URL)));
}

#[test]
fn detect_listing_is_multiple() {
    folio_cmd()
        .arg("--html")
        .arg(fixture("naa_items_listing"))
        .arg("--url")
        .arg(LISTING_URL)
        .arg("--detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("\tmultiple"));
}

#[test]
fn listing_without_terminal_saves_nothing() {
    folio_cmd()
        .arg("--html")
        .arg(fixture("naa_items_listing"))
        .arg("--url")
        .arg(LISTING_URL)
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"))
        .stderr(predicate::str::contains("--all"));
}

#[test]
fn unsupported_url_outputs_empty_array() {
    folio_cmd()
        .arg("--html")
        .arg(fixture("naa_photo_detail"))
        .arg("--url")
        .arg("https://example.com/photo")
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("records.json");

    folio_cmd()
        .arg("--html")
        .arg(fixture("naa_photo_detail"))
        .arg("--url")
        .arg(PHOTO_URL)
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("\"archive\": \"National Archives of Australia\""));
}

#[test]
fn timing_flag_prints_elapsed() {
    folio_cmd()
        .arg("--html")
        .arg(fixture("tei_index"))
        .arg("--url")
        .arg(TEI_INDEX_URL)
        .arg("--timing")
        .assert()
        .success()
        .stderr(predicate::str::contains("elapsed:"))
        .stderr(predicate::str::contains("ms"));
}

#[test]
fn html_requires_url() {
    folio_cmd()
        .arg("--html")
        .arg(fixture("naa_photo_detail"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url is required"));
}

#[test]
fn no_input_is_an_error() {
    folio_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one URL is required"));
}

#[test]
fn html_and_positional_urls_conflict() {
    folio_cmd()
        .arg("--html")
        .arg(fixture("naa_photo_detail"))
        .arg("--url")
        .arg(PHOTO_URL)
        .arg(PHOTO_URL)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot use both"));
}

#[test]
fn missing_html_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    folio_cmd()
        .arg("--html")
        .arg(temp_dir.path().join("absent.html"))
        .arg("--url")
        .arg(PHOTO_URL)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading file"));
}

#[test]
fn url_without_translator_is_not_fetched() {
    folio_cmd()
        .arg("http://127.0.0.1:9/scripts/PhotoSearchItemDetail.asp?B=1")
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}
