//! System panel: versions of the local toolchain

use super::{Cell, PanelBody, PanelId, PanelProvider, Tone};
use crate::health::{ToolCheck, ToolStatus, PANEL_TOOLS};
use crate::probe::{self, DEFAULT_TIMEOUT};
use std::time::Duration;

const VERSION_MAX: usize = 25;

pub struct SystemProvider {
    tools: &'static [ToolCheck],
    timeout: Duration,
}

impl SystemProvider {
    pub fn new() -> Self {
        Self::with_tools(PANEL_TOOLS)
    }

    pub fn with_tools(tools: &'static [ToolCheck]) -> Self {
        Self {
            tools,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn row(&self, tool: &ToolCheck) -> Vec<Cell> {
        let (status, version) = match tool.probe(self.timeout) {
            ToolStatus::Ok(version) => (
                Cell::new("OK", Tone::Good),
                Cell::muted(probe::truncate(&version, VERSION_MAX)),
            ),
            ToolStatus::Error => (Cell::new("err", Tone::Warn), Cell::empty()),
            ToolStatus::Unavailable => (Cell::muted("n/a"), Cell::empty()),
        };
        vec![Cell::label(tool.name), status, version]
    }
}

impl Default for SystemProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelProvider for SystemProvider {
    fn panel(&self) -> PanelId {
        PanelId::System
    }

    fn probe(&self) -> anyhow::Result<PanelBody> {
        Ok(PanelBody::Table {
            columns: vec!["Tool", "Status", "Version"],
            rows: self.tools.iter().map(|tool| self.row(tool)).collect(),
        })
    }
}
