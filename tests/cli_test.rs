use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn command(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("seolift").unwrap();
    cmd.current_dir(temp_dir.path());
    cmd.env("XDG_CONFIG_HOME", temp_dir.path());
    cmd
}

fn write_manifest(temp_dir: &TempDir) -> std::path::PathBuf {
    let manifest = temp_dir.path().join("manifest.json");
    fs::write(
        &manifest,
        r#"[
            {
                "url": "category/my-article.html",
                "title": "My article",
                "description": "All about my article",
                "date": "2020-01-31 14:00",
                "content": "<h1>My article</h1><a href=\"https://example.com/\">Home</a>"
            },
            {
                "url": "pages/about.html",
                "kind": "page",
                "title": "About",
                "noindex": true
            }
        ]"#,
    )
    .unwrap();
    manifest
}

#[test]
fn test_cli_requires_manifest_argument() {
    let temp_dir = TempDir::new().unwrap();

    command(&temp_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("MANIFEST"));
}

#[test]
fn test_cli_requires_site_url() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir);

    command(&temp_dir)
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("site URL"));
}

#[test]
fn test_cli_report_run_writes_report_file() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir);
    let report_file = temp_dir.path().join("seo_report.html");

    command(&temp_dir)
        .arg(&manifest)
        .args(["--site-url", "https://example.com"])
        .args(["--site-name", "My site"])
        .arg("--report-file")
        .arg(&report_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("documents analyzed"));

    let html = fs::read_to_string(&report_file).unwrap();
    assert!(html.contains("SEO report - My site"));
    assert!(html.contains("category/my-article.html"));
    assert!(html.contains("pages/about.html"));
}

#[test]
fn test_cli_enhancer_run_writes_robots_and_injects_html() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir);
    let output_path = temp_dir.path().join("output");

    let article_path = output_path.join("category/my-article.html");
    fs::create_dir_all(article_path.parent().unwrap()).unwrap();
    fs::write(
        &article_path,
        "<html><head><title>My article</title></head><body></body></html>",
    )
    .unwrap();

    command(&temp_dir)
        .arg(&manifest)
        .args(["--site-url", "https://example.com"])
        .args(["--report", "false"])
        .args(["--enhancer", "true"])
        .arg("--output-path")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("robots.txt written"));

    let robots = fs::read_to_string(output_path.join("robots.txt")).unwrap();
    assert!(robots.contains("Noindex: pages/about.html"));

    // The page file was never generated, so only the article is enhanced
    let html = fs::read_to_string(&article_path).unwrap();
    assert!(html.contains(
        "<link rel=\"canonical\" href=\"https://example.com/category/my-article.html\">"
    ));
    assert!(html.contains("BreadcrumbList"));
}

#[test]
fn test_cli_rejects_twitter_cards_without_open_graph() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir);

    command(&temp_dir)
        .arg(&manifest)
        .args(["--site-url", "https://example.com"])
        .args(["--enhancer", "true"])
        .args(["--twitter-cards", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Open Graph"));
}

#[test]
fn test_cli_reads_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = write_manifest(&temp_dir);
    let report_file = temp_dir.path().join("seo_report.html");

    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "site_url = \"https://config.example.com\"\nsite_name = \"Configured site\"\n",
    )
    .unwrap();

    command(&temp_dir)
        .arg(&manifest)
        .arg("--config")
        .arg(&config_path)
        .arg("--report-file")
        .arg(&report_file)
        .assert()
        .success();

    let html = fs::read_to_string(&report_file).unwrap();
    assert!(html.contains("SEO report - Configured site"));
}
