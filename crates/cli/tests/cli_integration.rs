//! End-to-end tests for the qnav binary

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn qnav(config_dir: &Path, args: &[&str], stdin: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_qnav"));
    command
        .args(args)
        .env("QNAV_CONFIG", config_dir.join("config.toml"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().expect("failed to spawn qnav");
    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(data) = stdin {
            pipe.write_all(data.as_bytes()).unwrap();
        }
    }
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_search_burst_yields_last_query() {
    let temp_dir = TempDir::new().unwrap();
    let output = qnav(
        temp_dir.path(),
        &["search", "--delay-ms", "2000"],
        Some("r\nru\nrus\nrust\n"),
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "search: rust\n");
}

#[test]
fn test_search_rejects_negative_delay() {
    let temp_dir = TempDir::new().unwrap();
    let output = qnav(temp_dir.path(), &["search", "--delay-ms", "-5"], Some("x\n"));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("non-negative"), "stderr: {}", stderr);
}

#[test]
fn test_filters_json() {
    let temp_dir = TempDir::new().unwrap();
    let output = qnav(temp_dir.path(), &["filters", "--json"], None);

    assert!(output.status.success());
    let options: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    let values: Vec<_> = options.iter().map(|o| o["value"].as_str().unwrap().to_string()).collect();
    assert_eq!(values, vec!["latest-created", "latest-edited", "week", "month"]);
}

#[test]
fn test_nav_with_sections_file() {
    let temp_dir = TempDir::new().unwrap();
    let sections = temp_dir.path().join("sections.toml");
    std::fs::write(
        &sections,
        r#"
[[sections]]
title = "rust async"
actions = { subscribe = true, add-thread = true }

[sections.parent]
title = "rust"
sub_sections = [{ title = "rust async" }, { title = "rust embedded" }]
"#,
    )
    .unwrap();

    let output = qnav(
        temp_dir.path(),
        &[
            "nav",
            "rust-async",
            "--sections",
            sections.to_str().unwrap(),
            "--filter",
            "week",
            "--json",
        ],
        None,
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["resolved"], true);
    assert_eq!(report["parent"], "rust");
    assert_eq!(report["all_link"], "/questions/rust");
    assert_eq!(report["filter"], "week");
    assert_eq!(report["show_ask_question"], true);
    assert_eq!(report["ask_question"]["kind"], "navigate");
    assert_eq!(report["ask_question"]["path"], "/questions/rust-async/new");
}

#[test]
fn test_nav_login_redirect() {
    let temp_dir = TempDir::new().unwrap();
    let output = qnav(
        temp_dir.path(),
        &["nav", "general", "--redirect-to-login", "--json"],
        None,
    );

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["resolved"], false);
    assert_eq!(
        report["ask_question"]["url"],
        "/c/portal/login?redirect=/web/guest/questions#/questions/general/new"
    );
}

#[test]
fn test_config_set_get_roundtrip() {
    let temp_dir = TempDir::new().unwrap();

    let set = qnav(temp_dir.path(), &["config", "--set", "search.debounce_ms", "250"], None);
    assert!(set.status.success());
    assert!(temp_dir.path().join("config.toml").exists());

    let get = qnav(temp_dir.path(), &["config", "--get", "search.debounce_ms"], None);
    assert_eq!(stdout(&get).trim(), "250");

    let bad = qnav(temp_dir.path(), &["config", "--set", "search.debounce_ms", "-1"], None);
    assert!(!bad.status.success());
    let get = qnav(temp_dir.path(), &["config", "--get", "search.debounce_ms"], None);
    assert_eq!(stdout(&get).trim(), "250");
}

#[test]
fn test_nav_base_url_overrides_config() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("config.toml"),
        "[navigation]\nredirect_to_login = true\nbase_url = \"/web/config-site\"\n",
    )
    .unwrap();

    let configured = qnav(temp_dir.path(), &["nav", "general", "--json"], None);
    assert!(configured.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&configured)).unwrap();
    assert_eq!(
        report["ask_question"]["url"],
        "/c/portal/login?redirect=/web/config-site#/questions/general/new"
    );

    let overridden = qnav(
        temp_dir.path(),
        &["nav", "general", "--base-url", "/group/forum", "--json"],
        None,
    );
    assert!(overridden.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&overridden)).unwrap();
    assert_eq!(
        report["ask_question"]["url"],
        "/c/portal/login?redirect=/group/forum#/questions/general/new"
    );
}

#[test]
fn test_nav_rejects_relative_base_url() {
    let temp_dir = TempDir::new().unwrap();
    let output = qnav(
        temp_dir.path(),
        &["nav", "general", "--redirect-to-login", "--base-url", "forum"],
        None,
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("absolute path"), "stderr: {}", stderr);
}

#[test]
fn test_config_rejects_oversized_delay() {
    let temp_dir = TempDir::new().unwrap();
    let output = qnav(temp_dir.path(), &["config", "--set", "search.debounce_ms", "10001"], None);

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("config.toml").exists());
}
