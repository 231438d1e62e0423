//! E2E tests for the dashboard commands:
//! `contrib summary`, `contrib calendar`, `contrib table`, `contrib facets`,
//! `contrib review`.
//!
//! Covers: JSON shapes, the reversed-range notice, calendar navigation,
//! paging, project config, source fallbacks, and coded failures.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PAYLOAD: &str = r#"{
  "data": [
    {"date": "2024-01-01", "campaign": "Birds", "campaign_id": 1, "file": "A.jpg",
     "edit_type": "caption", "country": "US", "lang": "en"},
    {"date": "2024-06-15", "campaign": "Birds", "campaign_id": 1, "file": "B.jpg",
     "edit_type": "depicts", "country": "SE", "lang": "sv"},
    {"date": "2024-06-15", "campaign": "Nature", "campaign_id": null, "file": "C.jpg",
     "edit_type": "caption", "country": "SE", "lang": "sv"},
    {"date": "2023-11-02", "campaign": "Nature", "file": "D.jpg",
     "edit_type": "caption", "country": "DE", "lang": "de"}
  ]
}"#;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

/// Command rooted in `dir`, isolated from the caller's config and env.
fn contrib_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("contrib"));
    cmd.current_dir(dir);
    cmd.env("CONTRIB_LOG", "error");
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join("xdg"));
    cmd.env_remove("FORMAT");
    cmd.env_remove("CONTRIB_TIMING");
    cmd
}

fn write_payload(dir: &Path) -> PathBuf {
    let path = dir.join("contributions.json");
    std::fs::write(&path, PAYLOAD).unwrap();
    path
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let payload = write_payload(dir);
    let output = contrib_cmd(dir)
        .arg("--input")
        .arg(&payload)
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("contrib should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

// ---------------------------------------------------------------------------
// contrib summary
// ---------------------------------------------------------------------------

#[test]
fn summary_json_has_cards_and_series() {
    let dir = TempDir::new().unwrap();
    let json = run_json(dir.path(), &["summary"]);

    assert_eq!(json["summary"]["total"], 4);
    assert_eq!(json["summary"]["distinctCampaigns"], 2);
    assert_eq!(json["summary"]["firstDate"], "2023-11-02");
    assert_eq!(json["summary"]["lastDate"], "2024-06-15");
    assert_eq!(json["seriesByCampaign"]["Birds"], 2);
    assert_eq!(json["seriesByMonth"]["2024-06"], 2);
    assert_eq!(json["seriesByEditType"]["caption"], 3);
    assert!(json.get("invalidRange").is_none());
}

#[test]
fn summary_day_flag_matches_calendar_click() {
    let dir = TempDir::new().unwrap();
    let json = run_json(dir.path(), &["summary", "--day", "2024-06-15"]);
    assert_eq!(json["summary"]["total"], 2);
    assert_eq!(json["selection"]["fromDate"], "2024-06-15");
    assert_eq!(json["selection"]["toDate"], "2024-06-15");
}

#[test]
fn summary_combines_facets_and_search() {
    let dir = TempDir::new().unwrap();
    let json = run_json(
        dir.path(),
        &["summary", "--country", "SE", "--search", "c.JPG"],
    );
    assert_eq!(json["summary"]["total"], 1);
    assert_eq!(json["seriesByCampaign"]["Nature"], 1);
}

#[test]
fn reversed_range_is_a_notice_not_a_failure() {
    let dir = TempDir::new().unwrap();
    let payload = write_payload(dir.path());
    let output = contrib_cmd(dir.path())
        .arg("--input")
        .arg(&payload)
        .args(["summary", "--from", "2024-05-10", "--to", "2024-05-01"])
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E2001"), "stderr: {stderr}");

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["total"], 0);
    assert!(json["invalidRange"].is_string());
    assert_eq!(json["seriesByMonth"], serde_json::json!({}));
}

#[test]
fn text_output_is_the_default_when_piped() {
    let dir = TempDir::new().unwrap();
    let payload = write_payload(dir.path());
    contrib_cmd(dir.path())
        .arg("--input")
        .arg(&payload)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("total\t4\n"));
}

#[test]
fn input_can_come_from_stdin() {
    let dir = TempDir::new().unwrap();
    let output = contrib_cmd(dir.path())
        .args(["--input", "-", "summary", "--format", "json"])
        .write_stdin(PAYLOAD)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["total"], 4);
}

// ---------------------------------------------------------------------------
// contrib calendar
// ---------------------------------------------------------------------------

#[test]
fn calendar_json_is_53_by_7() {
    let dir = TempDir::new().unwrap();
    let json = run_json(dir.path(), &["calendar", "--year", "2024"]);

    let grid = &json["grid"];
    assert_eq!(grid["referenceYear"], 2024);
    assert_eq!(grid["yearTotal"], 3);
    let weeks = grid["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 53);
    assert!(weeks.iter().all(|w| w["days"].as_array().unwrap().len() == 7));
    assert_eq!(grid["monthSpans"].as_array().unwrap().len(), 12);
    assert_eq!(json["activeDays"], 2);
    assert_eq!(json["canGoForward"], true);
    assert_eq!(json["navigableYears"].as_array().unwrap().len(), 5);
}

#[test]
fn calendar_ignores_filters_and_navigates_back() {
    let dir = TempDir::new().unwrap();
    let json = run_json(dir.path(), &["calendar", "--year", "2024", "--back", "1"]);
    assert_eq!(json["grid"]["referenceYear"], 2023);
    assert_eq!(json["grid"]["yearTotal"], 1);
}

#[test]
fn calendar_never_moves_past_the_current_year() {
    let dir = TempDir::new().unwrap();
    let json = run_json(dir.path(), &["calendar", "--forward", "3"]);
    assert_eq!(json["grid"]["referenceYear"], json["currentYear"]);
    assert_eq!(json["canGoForward"], false);
}

// ---------------------------------------------------------------------------
// contrib table
// ---------------------------------------------------------------------------

#[test]
fn table_pages_newest_first() {
    let dir = TempDir::new().unwrap();
    let json = run_json(dir.path(), &["table", "--page-size", "3"]);
    assert_eq!(json["totalRows"], 4);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["page"], 1);
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["date"], "2024-06-15");

    let last = run_json(dir.path(), &["table", "--page-size", "3", "--page", "9"]);
    assert_eq!(last["page"], 2);
    assert_eq!(last["rows"][0]["file"], "D.jpg");
}

#[test]
fn table_text_sorts_by_file() {
    let dir = TempDir::new().unwrap();
    let payload = write_payload(dir.path());
    contrib_cmd(dir.path())
        .arg("--input")
        .arg(&payload)
        .args(["table", "--sort", "file", "--asc", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "2024-01-01\tBirds\tA.jpg\tcaption\tUS\ten\n",
        ));
}

#[test]
fn project_config_sets_page_size() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".contrib")).unwrap();
    std::fs::write(
        dir.path().join(".contrib/config.toml"),
        "[table]\npage_size = 2\n",
    )
    .unwrap();
    let json = run_json(dir.path(), &["table"]);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["view"]["pageSize"], 2);
}

// ---------------------------------------------------------------------------
// contrib facets / review
// ---------------------------------------------------------------------------

#[test]
fn facets_are_sorted_and_distinct() {
    let dir = TempDir::new().unwrap();
    let json = run_json(dir.path(), &["facets"]);
    assert_eq!(json["campaigns"], serde_json::json!(["Birds", "Nature"]));
    assert_eq!(json["countries"], serde_json::json!(["DE", "SE", "US"]));
    assert_eq!(json["editTypes"], serde_json::json!(["caption", "depicts"]));
}

#[test]
fn review_counts_one_year() {
    let dir = TempDir::new().unwrap();
    let json = run_json(dir.path(), &["review", "--year", "2024"]);
    assert_eq!(json["totalEdits"], 3);
    assert_eq!(json["captionEdits"], 2);
    assert_eq!(json["depictsEdits"], 1);
    assert_eq!(json["estimatedCaptionChars"], 100);
    assert_eq!(json["topCampaigns"][0]["name"], "Birds");
    assert_eq!(json["topCampaigns"][0]["edits"], 2);
}

// ---------------------------------------------------------------------------
// Sources and failures
// ---------------------------------------------------------------------------

#[test]
fn missing_source_fails_with_code() {
    let dir = TempDir::new().unwrap();
    contrib_cmd(dir.path())
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("E3002"));
}

#[test]
fn fallback_flag_substitutes_sample_records() {
    let dir = TempDir::new().unwrap();
    let output = contrib_cmd(dir.path())
        .args(["--input", "does-not-exist.json", "--fallback"])
        .args(["summary", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["total"], 100);
}

#[test]
fn malformed_payload_fails_with_decode_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{\"data\": 42}").unwrap();
    contrib_cmd(dir.path())
        .arg("--input")
        .arg(&path)
        .arg("facets")
        .assert()
        .failure()
        .stderr(predicate::str::contains("E3001"));
}

#[test]
fn broken_project_config_fails_with_config_code() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".contrib")).unwrap();
    std::fs::write(dir.path().join(".contrib/config.toml"), "[table\n").unwrap();
    contrib_cmd(dir.path())
        .args(["--demo", "alice", "facets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1001"));
}

#[test]
fn demo_history_is_stable_across_runs() {
    let dir = TempDir::new().unwrap();
    let first = contrib_cmd(dir.path())
        .args(["--demo", "alice", "review", "--year", "2024", "--format", "json"])
        .output()
        .unwrap();
    let second = contrib_cmd(dir.path())
        .args(["--demo", "alice", "review", "--year", "2024", "--format", "json"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn timing_report_goes_to_stderr() {
    let dir = TempDir::new().unwrap();
    contrib_cmd(dir.path())
        .args(["--demo", "alice", "--timing", "calendar", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("timing report"))
        .stderr(predicate::str::contains("calendar.build"));
}

#[test]
fn completions_mention_the_binary() {
    let dir = TempDir::new().unwrap();
    contrib_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("contrib"));
}
