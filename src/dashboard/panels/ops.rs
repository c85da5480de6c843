//! DevOps panel: git working tree, Vercel CLI, Docker daemon

use super::{Cell, PanelBody, PanelId, PanelProvider, Tone};
use crate::probe::{self, ProbeError};
use std::path::PathBuf;
use std::time::Duration;

const VERCEL_INFO_MAX: usize = 20;

pub struct OpsProvider {
    /// Repository to inspect; the process working directory when `None`
    workdir: Option<PathBuf>,
    timeout: Duration,
}

impl OpsProvider {
    pub fn new() -> Self {
        Self {
            workdir: None,
            timeout: probe::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    fn git_row(&self) -> Result<Vec<Cell>, ProbeError> {
        let cwd = self.workdir.as_deref();
        let branch = probe::run_optional("git", &["branch", "--show-current"], cwd, self.timeout)?;
        let status = probe::run_optional("git", &["status", "--porcelain"], cwd, self.timeout)?;

        let (state, info) = match (branch, status) {
            (Some(branch), Some(status)) if status.success => {
                let state = if status.stdout.trim().is_empty() {
                    Cell::new("clean", Tone::Good)
                } else {
                    Cell::new("dirty", Tone::Warn)
                };
                (state, Cell::muted(branch.first_line()))
            }
            (Some(_), Some(_)) => (Cell::muted("n/a"), Cell::muted("not a repository")),
            _ => (Cell::muted("n/a"), Cell::empty()),
        };
        Ok(vec![Cell::label("Git"), state, info])
    }

    fn vercel_row(&self) -> Result<Vec<Cell>, ProbeError> {
        let row = match probe::run_optional("vercel", &["--version"], None, self.timeout)? {
            Some(output) => vec![
                Cell::label("Vercel"),
                Cell::new("installed", Tone::Good),
                Cell::muted(probe::truncate(output.stdout.trim(), VERCEL_INFO_MAX)),
            ],
            None => vec![Cell::label("Vercel"), Cell::muted("not found"), Cell::empty()],
        };
        Ok(row)
    }

    fn docker_row(&self) -> Result<Vec<Cell>, ProbeError> {
        let args = ["info", "--format", "{{.ContainersRunning}}"];
        let row = match probe::run_optional("docker", &args, None, self.timeout)? {
            Some(output) => {
                let running = if output.success {
                    output.first_line().to_string()
                } else {
                    "?".to_string()
                };
                vec![
                    Cell::label("Docker"),
                    Cell::new("running", Tone::Good),
                    Cell::muted(format!("{} containers", running)),
                ]
            }
            None => vec![Cell::label("Docker"), Cell::muted("not found"), Cell::empty()],
        };
        Ok(row)
    }
}

impl Default for OpsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelProvider for OpsProvider {
    fn panel(&self) -> PanelId {
        PanelId::Ops
    }

    fn probe(&self) -> anyhow::Result<PanelBody> {
        Ok(PanelBody::Table {
            columns: vec!["Platform", "Status", "Info"],
            rows: vec![self.git_row()?, self.vercel_row()?, self.docker_row()?],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_state(provider: &OpsProvider) -> String {
        provider.git_row().unwrap()[1].text.clone()
    }

    #[test]
    fn test_table_shape() {
        let dir = TempDir::new().unwrap();
        let content = OpsProvider::new().with_workdir(dir.path()).collect();
        assert_eq!(content.title(), "[1] DevOps");

        match content.body {
            PanelBody::Table { columns, rows } => {
                assert_eq!(columns, vec!["Platform", "Status", "Info"]);
                let names: Vec<&str> = rows.iter().map(|r| r[0].text.as_str()).collect();
                assert_eq!(names, vec!["Git", "Vercel", "Docker"]);
                assert!(rows.iter().all(|r| r.len() == 3));
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_outside_repository_is_na() {
        let dir = TempDir::new().unwrap();
        let provider = OpsProvider::new().with_workdir(dir.path());
        assert_eq!(git_state(&provider), "n/a");
    }

    #[test]
    fn test_clean_and_dirty_repository() {
        let dir = TempDir::new().unwrap();
        match probe::run("git", &["init", "-q"], Some(dir.path()), probe::DEFAULT_TIMEOUT) {
            Ok(output) if output.success => {}
            _ => return, // git not installed
        }

        let provider = OpsProvider::new().with_workdir(dir.path());
        assert_eq!(git_state(&provider), "clean");

        std::fs::write(dir.path().join("README.md"), "hello").unwrap();
        assert_eq!(git_state(&provider), "dirty");
    }
}
