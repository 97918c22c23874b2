use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;
use tempfile::TempDir;

fn tint(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tint").unwrap();
    cmd.env("TINT_CONFIG", config).env_remove("RUST_LOG");
    cmd
}

/// 8x6 frame: two-row dark status bar over a mostly light page
fn write_frame(dir: &TempDir) -> PathBuf {
    let image = RgbaImage::from_fn(8, 6, |x, y| match (x, y) {
        (_, 0..=1) => Rgba([20, 20, 20, 255]),
        (0..=2, _) => Rgba([200, 30, 30, 255]),
        _ => Rgba([245, 245, 245, 255]),
    });
    let path = dir.path().join("frame.png");
    image.save(&path).unwrap();
    path
}

#[test]
fn appearance_for_black_is_light() {
    let dir = TempDir::new().unwrap();
    tint(&dir.path().join("config.toml"))
        .args(["appearance", "#000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Appearance:     light"));
}

#[test]
fn appearance_rejects_bad_color() {
    let dir = TempDir::new().unwrap();
    tint(&dir.path().join("config.toml"))
        .args(["appearance", "#12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid color"));
}

#[test]
fn sample_skips_status_bar_rows() {
    let dir = TempDir::new().unwrap();
    let frame = write_frame(&dir);
    let config = dir.path().join("config.toml");

    tint(&config)
        .arg("sample")
        .arg(&frame)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dominant color: #141414"));

    tint(&config)
        .arg("sample")
        .arg(&frame)
        .args(["--offset", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dominant color: #f5f5f5"))
        .stdout(predicate::str::contains("Appearance:     dark"));
}

#[test]
fn sample_uses_configured_inset() {
    let dir = TempDir::new().unwrap();
    let frame = write_frame(&dir);
    let config = dir.path().join("config.toml");

    tint(&config)
        .args(["config", "set-inset", "3"])
        .assert()
        .success();

    tint(&config)
        .arg("sample")
        .arg(&frame)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dominant color: #f5f5f5"));
}

#[test]
fn replay_debounces_scroll_burst() {
    let dir = TempDir::new().unwrap();
    let frame = write_frame(&dir);

    tint(&dir.path().join("config.toml"))
        .arg("replay")
        .arg(&frame)
        .args(["--offset", "2", "--events", "0:scroll,3:scroll,6:scroll"])
        .assert()
        .success()
        .stdout(predicate::str::contains("16ms  #f5f5f5  dark"))
        .stdout(predicate::str::contains("1 sample(s), 0 skipped, 1 change(s)"));
}

#[test]
fn endpoints_add_list_and_exhaust() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");

    tint(&config)
        .args(["endpoints", "add", "https://tavern.local:8000"])
        .assert()
        .success();

    tint(&config)
        .args(["endpoints", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0: example1:88888"))
        .stdout(predicate::str::contains("3: https://tavern.local:8000"));

    tint(&config)
        .args(["endpoints", "simulate", "--failures", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("load https://tavern.local:8000"))
        .stdout(predicate::str::contains("Failed to connect to all URLs:"))
        .stdout(predicate::str::contains(
            "URL 3: https://tavern.local:8000\nError: Unable to connect",
        ));
}

#[test]
fn endpoints_reject_invalid_url() {
    let dir = TempDir::new().unwrap();
    tint(&dir.path().join("config.toml"))
        .args(["endpoints", "add", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid endpoint"));
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    tint(&dir.path().join("config.toml"))
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scroll_debounce_ms = 10"));
}

#[test]
fn endpoints_list_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "endpoints = [\"not a url\"]\n").unwrap();

    tint(&config)
        .args(["endpoints", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid endpoint 'not a url'"));

    tint(&config).args(["endpoints", "reset"]).assert().success();

    tint(&config)
        .args(["endpoints", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0: example1:88888"));
}

#[test]
fn endpoints_list_rejects_empty_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "endpoints = []\n").unwrap();

    tint(&config)
        .args(["endpoints", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No endpoints are configured"));
}
