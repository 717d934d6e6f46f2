use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn html_renders_stored_record() {
    let mut cmd = cargo_bin_cmd!("pressbox");
    cmd.arg("html").arg(fixture_path("match_report.json"));

    let output_pred = predicate::str::contains(r#"<h2 style="text-align: left;">Rovers 2-1 United</h2>"#)
        .and(predicate::str::contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn text_truncates_with_max_length() {
    let mut cmd = cargo_bin_cmd!("pressbox");
    cmd.arg("text")
        .arg(fixture_path("match_report.json"))
        .arg("--max-length")
        .arg("20");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("Rovers 2-1 United A...\n"));
}

#[test]
fn html_file_is_read_as_html() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.html");
    fs::write(&path, "<h1>Old post</h1><p>Imported &amp; kept</p>").unwrap();

    let mut cmd = cargo_bin_cmd!("pressbox");
    cmd.arg("excerpt").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("Old post Imported & kept\n"));
}

#[test]
fn analyze_prints_json_record() {
    let mut cmd = cargo_bin_cmd!("pressbox");
    cmd.arg("analyze").arg(fixture_path("match_report.json"));

    let output_pred = predicate::str::contains("\"imageCount\": 1")
        .and(predicate::str::contains("\"complexity\": \"moderate\""));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn read_time_flags_override_config() {
    let mut cmd = cargo_bin_cmd!("pressbox");
    cmd.arg("read-time")
        .arg(fixture_path("match_report.json"))
        .arg("--no-media")
        .arg("--format")
        .arg("yaml");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("formattedTime: Less than 1 min read"));
}

#[test]
fn read_time_range() {
    let mut cmd = cargo_bin_cmd!("pressbox");
    cmd.arg("read-time")
        .arg(fixture_path("match_report.json"))
        .arg("--range");

    let output_pred = predicate::str::contains("\"fast\"")
        .and(predicate::str::contains("\"average\""))
        .and(predicate::str::contains("\"slow\""));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn config_file_is_layered() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("pressbox.toml");
    fs::write(&config, "[seo]\nmax_keywords = 2\n").unwrap();

    let mut cmd = cargo_bin_cmd!("pressbox");
    cmd.arg("seo")
        .arg(fixture_path("match_report.json"))
        .arg("--config")
        .arg(&config);

    cmd.assert().success().stdout(
        predicate::str::contains("\"rovers\"")
            .and(predicate::str::contains("\"united\""))
            .and(predicate::str::contains("\"late\"").not()),
    );
}

#[test]
fn missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("pressbox");
    cmd.arg("html").arg("/definitely/not/here.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn unknown_content_type_is_rejected() {
    let mut cmd = cargo_bin_cmd!("pressbox");
    cmd.arg("read-time")
        .arg(fixture_path("match_report.json"))
        .arg("--content-type")
        .arg("poetry");

    cmd.assert().failure();
}
