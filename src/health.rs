//! Health check system for mekon
//!
//! Provides tool diagnostics shared by `mekon system health` and the
//! dashboard's system panel:
//! - External tool presence and version (python3, git, node, ...)
//! - Orchestration engine checkout
//! - Data directory

use crate::config::MekonConfig;
use crate::probe::{self, ProbeError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Pass,
            message: message.into(),
            details: None,
        }
    }

    pub fn warn(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warn,
            message: message.into(),
            details: None,
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Fail,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Overall health check summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSummary {
    pub status: CheckStatus,
    pub checks: Vec<CheckResult>,
    pub summary: HealthStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStats {
    pub total_checks: usize,
    pub passed: usize,
    pub warnings: usize,
    pub errors: usize,
}

/// An external tool identified by its version command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolCheck {
    pub name: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
}

pub const PYTHON: ToolCheck = ToolCheck {
    name: "Python",
    program: "python3",
    args: &["--version"],
};
pub const GIT: ToolCheck = ToolCheck {
    name: "Git",
    program: "git",
    args: &["--version"],
};
pub const NODE: ToolCheck = ToolCheck {
    name: "Node",
    program: "node",
    args: &["--version"],
};
pub const VERCEL: ToolCheck = ToolCheck {
    name: "Vercel",
    program: "vercel",
    args: &["--version"],
};
pub const DOCKER: ToolCheck = ToolCheck {
    name: "Docker",
    program: "docker",
    args: &["--version"],
};

/// Tools listed on the dashboard's system panel
pub const PANEL_TOOLS: &[ToolCheck] = &[PYTHON, GIT, NODE];

/// Tools verified by `system health`
pub const HEALTH_TOOLS: &[ToolCheck] = &[PYTHON, GIT, NODE, VERCEL, DOCKER];

/// Outcome of running a tool's version command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Exited successfully; first line of output
    Ok(String),
    /// Ran but exited non-zero
    Error,
    /// Not installed, or did not answer in time
    Unavailable,
}

impl ToolCheck {
    pub fn probe(&self, timeout: Duration) -> ToolStatus {
        match probe::run(self.program, self.args, None, timeout) {
            Ok(output) if output.success => ToolStatus::Ok(output.first_line().to_string()),
            Ok(_) => ToolStatus::Error,
            Err(ProbeError::NotFound(_)) | Err(ProbeError::TimedOut { .. }) => {
                ToolStatus::Unavailable
            }
            Err(e) => {
                debug!("{} probe failed: {}", self.name, e);
                ToolStatus::Unavailable
            }
        }
    }

    fn check(&self, timeout: Duration) -> CheckResult {
        let id = format!("tool_{}", self.program);
        match self.probe(timeout) {
            ToolStatus::Ok(version) => CheckResult::pass(id, format!("{}: {}", self.name, version)),
            ToolStatus::Error => {
                CheckResult::warn(id, format!("{} is installed but exited with an error", self.name))
            }
            ToolStatus::Unavailable => CheckResult::warn(id, format!("{} not found", self.name)),
        }
    }
}

/// Run all health checks
pub fn run_health_checks(config: &MekonConfig, timeout: Duration) -> HealthSummary {
    debug!("Starting mekon health checks...");

    let mut checks: Vec<CheckResult> = HEALTH_TOOLS.iter().map(|t| t.check(timeout)).collect();
    checks.push(check_engine(config));
    checks.push(check_data_dir(config));

    summarize(checks)
}

fn check_engine(config: &MekonConfig) -> CheckResult {
    let engine = config.engine_location();
    if engine.exists() {
        CheckResult::pass("engine", format!("Mekong CLI found: {}", engine.display()))
    } else {
        CheckResult::fail("engine", "Mekong CLI missing")
            .with_details(serde_json::json!({ "path": engine.display().to_string() }))
    }
}

fn check_data_dir(config: &MekonConfig) -> CheckResult {
    let data = config.data_path();
    if data.exists() {
        CheckResult::pass("data_dir", format!("Data directory: {}", data.display()))
    } else {
        CheckResult::warn(
            "data_dir",
            format!("Data directory not created: {}", data.display()),
        )
    }
}

fn summarize(checks: Vec<CheckResult>) -> HealthSummary {
    let passed = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Pass)
        .count();
    let warnings = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Warn)
        .count();
    let errors = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Fail)
        .count();

    let overall_status = if errors > 0 {
        CheckStatus::Fail
    } else if warnings > 0 {
        CheckStatus::Warn
    } else {
        CheckStatus::Pass
    };

    HealthSummary {
        status: overall_status,
        checks,
        summary: HealthStats {
            total_checks: passed + warnings + errors,
            passed,
            warnings,
            errors,
        },
    }
}

/// Print health summary to stdout
pub fn print_health_summary(summary: &HealthSummary, verbose: bool) {
    println!("{} Mekon System Health", crate::icons::system::gear());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    for check in &summary.checks {
        let icon = match check.status {
            CheckStatus::Pass => crate::icons::status::success(),
            CheckStatus::Warn => crate::icons::status::warning(),
            CheckStatus::Fail => crate::icons::status::error(),
        };

        let status_text = match check.status {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        };

        println!("{} {} - {}", icon, check.name, status_text);
        println!("   {}", check.message);

        if verbose {
            if let Some(details) = &check.details {
                println!("   Details: {}", details);
            }
        }
    }

    println!();
    println!(
        "Overall: {} ({} passed, {} warnings, {} errors)",
        match summary.status {
            CheckStatus::Pass => format!("{} HEALTHY", crate::icons::status::success()),
            CheckStatus::Warn => format!("{} WARNINGS", crate::icons::status::warning()),
            CheckStatus::Fail => format!("{} ERRORS", crate::icons::status::error()),
        },
        summary.summary.passed,
        summary.summary.warnings,
        summary.summary.errors
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_summary_status_rollup() {
        let all_pass = summarize(vec![CheckResult::pass("a", ""), CheckResult::pass("b", "")]);
        assert_eq!(all_pass.status, CheckStatus::Pass);
        assert_eq!(all_pass.summary.total_checks, 2);

        let warned = summarize(vec![CheckResult::pass("a", ""), CheckResult::warn("b", "")]);
        assert_eq!(warned.status, CheckStatus::Warn);

        let failed = summarize(vec![CheckResult::warn("a", ""), CheckResult::fail("b", "")]);
        assert_eq!(failed.status, CheckStatus::Fail);
        assert_eq!(failed.summary.errors, 1);
        assert_eq!(failed.summary.warnings, 1);
    }

    #[test]
    fn test_missing_tool_is_unavailable() {
        let ghost = ToolCheck {
            name: "Ghost",
            program: "mekon-ghost-tool",
            args: &["--version"],
        };
        assert_eq!(ghost.probe(Duration::from_secs(1)), ToolStatus::Unavailable);
        assert_eq!(ghost.check(Duration::from_secs(1)).status, CheckStatus::Warn);
    }

    #[test]
    fn test_engine_and_data_dir_checks() {
        let dir = TempDir::new().unwrap();
        let config = MekonConfig {
            engine_path: dir.path().join("missing-engine").display().to_string(),
            data_dir: dir.path().display().to_string(),
            ..MekonConfig::default()
        };

        assert_eq!(check_engine(&config).status, CheckStatus::Fail);
        assert_eq!(check_data_dir(&config).status, CheckStatus::Pass);

        let summary = run_health_checks(&config, Duration::from_secs(1));
        assert_eq!(summary.status, CheckStatus::Fail);
        assert_eq!(summary.checks.len(), HEALTH_TOOLS.len() + 2);
    }

    #[test]
    fn test_summary_serializes_lowercase_status() {
        let summary = summarize(vec![CheckResult::pass("a", "ok")]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "pass");
        assert!(json["checks"][0].get("details").is_none());
    }
}
