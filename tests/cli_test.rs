//! Integration tests for the `mekon` binary
//!
//! Every invocation runs against a throwaway data directory and config file,
//! with stdin detached so nothing can block on a terminal.

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn mekon(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mekon"))
        .args(args)
        .env("MEKON_DATA_DIR", home.join("data"))
        .env("MEKON_CONFIG", home.join("config.toml"))
        .env_remove("MEKON_LLM_API_KEY")
        .env("NO_COLOR", "1")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run mekon")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_ledger(home: &Path, body: &str) {
    let dir = home.join("data").join("revenue");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("ledger.json"), body).unwrap();
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    let output = mekon(home.path(), &["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Mekon CLI v"));
}

#[test]
fn test_no_command_shows_overview() {
    let home = TempDir::new().unwrap();
    let output = mekon(home.path(), &[]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Mekon CLI"));
    assert!(text.contains("Command Groups"));
}

#[test]
fn test_help_lists_command_groups() {
    let home = TempDir::new().unwrap();
    let output = mekon(home.path(), &["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for group in ["dash", "system", "revenue", "logs"] {
        assert!(text.contains(group), "help is missing {group}");
    }
}

#[test]
fn test_system_info_and_config() {
    let home = TempDir::new().unwrap();

    let info = mekon(home.path(), &["system", "info"]);
    assert!(info.status.success());
    assert!(stdout(&info).contains("Mekon CLI"));

    fs::write(home.path().join("config.toml"), "llm_api_key = \"sk-secret-4242\"\n").unwrap();
    let config = mekon(home.path(), &["system", "config"]);
    assert!(config.status.success());
    let text = stdout(&config);
    assert!(text.contains("Configuration"));
    assert!(text.contains("***4242"));
    assert!(!text.contains("sk-secret"));
}

#[test]
fn test_system_health_exits_zero() {
    let home = TempDir::new().unwrap();
    let output = mekon(home.path(), &["system", "health"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Health"));

    let json = mekon(home.path(), &["system", "health", "--json"]);
    assert!(json.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&json.stdout).unwrap();
    assert!(parsed["checks"].as_array().unwrap().len() >= 6);
}

#[test]
fn test_dash_no_interactive_renders_all_panels() {
    let home = TempDir::new().unwrap();
    let started = Instant::now();
    let output = mekon(home.path(), &["dash", "--no-interactive"]);

    assert!(output.status.success());
    let text = stdout(&output);
    for title in ["[1] DevOps", "[2] Revenue", "[3] Agents", "[4] System"] {
        assert!(text.contains(title), "missing {title}:\n{text}");
    }
    assert!(text.contains("Auto-refresh active"));
    assert!(!text.contains("Dashboard closed."));
    assert!(!text.contains('\x1b'), "single render must not emit escape sequences");
    assert!(started.elapsed() < Duration::from_secs(30));

    // The scriptable path leaves no trace in the activity log
    assert!(!home.path().join("data/logs/activity.jsonl").exists());
}

#[test]
fn test_dash_shows_ledger_totals() {
    let home = TempDir::new().unwrap();
    write_ledger(
        home.path(),
        r#"[{"date": "2020-01-01T00:00:00", "amount": 1234.5, "source": "acme"}]"#,
    );

    let output = mekon(home.path(), &["dash", "--no-interactive"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("$1,234.50"));
    assert!(text.contains("$1,234 from acme"));
}

#[test]
fn test_dash_malformed_ledger_still_succeeds() {
    let home = TempDir::new().unwrap();
    write_ledger(home.path(), "not json at all");

    let output = mekon(home.path(), &["dash", "--no-interactive"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Unable to load revenue data"));
}

#[test]
fn test_revenue_report_and_dashboard() {
    let home = TempDir::new().unwrap();

    let empty = mekon(home.path(), &["revenue", "report"]);
    assert!(empty.status.success());
    assert!(stdout(&empty).contains("No transactions recorded yet."));

    write_ledger(
        home.path(),
        r#"[
            {"date": "2099-01-01T00:00:00", "amount": 300, "source": "acme"},
            {"date": "2099-01-02T00:00:00", "amount": 100, "source": "globex", "note": "pilot"}
        ]"#,
    );

    let report = mekon(home.path(), &["revenue", "report", "--period", "year"]);
    assert!(report.status.success());
    let text = stdout(&report);
    assert!(text.contains("Revenue Report (year)"));
    assert!(text.contains("75.0%"));
    assert!(text.contains("$400.00"));

    let dashboard = mekon(home.path(), &["revenue", "dashboard"]);
    assert!(dashboard.status.success());
    let text = stdout(&dashboard);
    assert!(text.contains("Transactions:  2"));
    assert!(text.contains("pilot"));
}

#[test]
fn test_revenue_rejects_unknown_period() {
    let home = TempDir::new().unwrap();
    let output = mekon(home.path(), &["revenue", "report", "--period", "decade"]);
    assert!(!output.status.success());
}

#[test]
fn test_logs_lifecycle() {
    let home = TempDir::new().unwrap();

    let empty = mekon(home.path(), &["logs", "show"]);
    assert!(empty.status.success());
    assert!(stdout(&empty).contains("No log entries found."));

    // Health runs are recorded
    assert!(mekon(home.path(), &["system", "health"]).status.success());
    let tail = mekon(home.path(), &["logs", "tail"]);
    assert!(tail.status.success());
    assert!(stdout(&tail).contains("system health"));

    // Declining (empty stdin) keeps the log
    let declined = mekon(home.path(), &["logs", "clear"]);
    assert_eq!(declined.status.code(), Some(1));
    assert!(home.path().join("data/logs/activity.jsonl").exists());

    let cleared = mekon(home.path(), &["logs", "clear", "--yes"]);
    assert!(cleared.status.success());
    assert!(stdout(&cleared).contains("Removed 1 log entries."));
}
