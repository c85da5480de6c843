//! Panel data providers
//!
//! Each provider probes one operational domain and returns a fresh
//! [`PanelContent`] on every call. Providers never fail outward: errors and
//! panics inside [`PanelProvider::probe`] become a degraded body that keeps
//! the panel's title and border.

mod agents;
mod financial;
mod ops;
mod system;

pub use agents::AgentsProvider;
pub use financial::FinancialProvider;
pub use ops::OpsProvider;
pub use system::SystemProvider;

use crate::config::MekonConfig;
use crate::probe;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// The four dashboard panels, in grid order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Ops,
    Financial,
    Agents,
    System,
}

impl PanelId {
    pub const ALL: [PanelId; 4] = [
        PanelId::Ops,
        PanelId::Financial,
        PanelId::Agents,
        PanelId::System,
    ];

    /// Panel for a focus selector; `None` for the grid and out-of-range values
    pub fn from_selector(selector: i32) -> Option<Self> {
        match selector {
            1 => Some(PanelId::Ops),
            2 => Some(PanelId::Financial),
            3 => Some(PanelId::Agents),
            4 => Some(PanelId::System),
            _ => None,
        }
    }

    /// Focus key (1-4)
    pub fn index(&self) -> u8 {
        match self {
            PanelId::Ops => 1,
            PanelId::Financial => 2,
            PanelId::Agents => 3,
            PanelId::System => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PanelId::Ops => "DevOps",
            PanelId::Financial => "Revenue",
            PanelId::Agents => "Agents",
            PanelId::System => "System",
        }
    }

    /// Border title, e.g. `[1] DevOps`
    pub fn title(&self) -> String {
        format!("[{}] {}", self.index(), self.name())
    }

    fn unavailable(&self) -> &'static str {
        match self {
            PanelId::Ops => "Unable to collect DevOps data",
            PanelId::Financial => "Unable to load revenue data",
            PanelId::Agents => "Unable to check agents",
            PanelId::System => "Unable to check system",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic styling of a piece of panel text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Label,
    Good,
    Warn,
    Bad,
    Muted,
}

/// A styled piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Label)
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Muted)
    }

    pub fn empty() -> Self {
        Self::plain("")
    }
}

/// `Label:  value` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: Cell,
}

impl Field {
    pub fn new(label: &'static str, value: Cell) -> Self {
        Self { label, value }
    }
}

/// Renderable body of a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    /// Column headers plus rows of cells
    Table {
        columns: Vec<&'static str>,
        rows: Vec<Vec<Cell>>,
    },
    /// Labelled values followed by free-form lines
    Fields { fields: Vec<Field>, extra: Vec<Cell> },
    /// Informational lines when there is nothing to show yet
    Notice(Vec<Cell>),
    /// Data could not be collected
    Degraded(String),
}

/// Layout of a body with its text removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyShape {
    Table {
        columns: Vec<&'static str>,
        rows: usize,
    },
    Fields {
        labels: Vec<&'static str>,
        extra: usize,
    },
    Notice(usize),
    Degraded,
}

impl PanelBody {
    pub fn shape(&self) -> BodyShape {
        match self {
            PanelBody::Table { columns, rows } => BodyShape::Table {
                columns: columns.clone(),
                rows: rows.len(),
            },
            PanelBody::Fields { fields, extra } => BodyShape::Fields {
                labels: fields.iter().map(|f| f.label).collect(),
                extra: extra.len(),
            },
            PanelBody::Notice(lines) => BodyShape::Notice(lines.len()),
            PanelBody::Degraded(_) => BodyShape::Degraded,
        }
    }
}

/// One panel's content for a single frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelContent {
    pub panel: PanelId,
    pub body: PanelBody,
}

impl PanelContent {
    pub fn title(&self) -> String {
        self.panel.title()
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.body, PanelBody::Degraded(_))
    }
}

const DEGRADED_REASON_MAX: usize = 60;

/// Source of one panel's content
pub trait PanelProvider: Send + Sync {
    fn panel(&self) -> PanelId;

    /// Gather live data; may fail
    fn probe(&self) -> anyhow::Result<PanelBody>;

    /// Gather live data, degrading on any error or panic
    fn collect(&self) -> PanelContent {
        let panel = self.panel();
        let body = match panic::catch_unwind(AssertUnwindSafe(|| self.probe())) {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                debug!("{} panel degraded: {:#}", panel, e);
                PanelBody::Degraded(format!(
                    "{} ({})",
                    panel.unavailable(),
                    probe::truncate(&e.to_string(), DEGRADED_REASON_MAX)
                ))
            }
            Err(_) => {
                warn!("{} panel provider panicked", panel);
                PanelBody::Degraded(panel.unavailable().to_string())
            }
        };
        PanelContent { panel, body }
    }
}

/// The four providers the dashboard draws from
pub struct Providers {
    ops: Box<dyn PanelProvider>,
    financial: Box<dyn PanelProvider>,
    agents: Box<dyn PanelProvider>,
    system: Box<dyn PanelProvider>,
}

impl Providers {
    pub fn new(
        ops: Box<dyn PanelProvider>,
        financial: Box<dyn PanelProvider>,
        agents: Box<dyn PanelProvider>,
        system: Box<dyn PanelProvider>,
    ) -> Self {
        Self {
            ops,
            financial,
            agents,
            system,
        }
    }

    /// Providers probing the real environment described by `config`
    pub fn live(config: &MekonConfig) -> Self {
        Self::new(
            Box::new(OpsProvider::new()),
            Box::new(FinancialProvider::new(config.ledger_path())),
            Box::new(AgentsProvider::new(config.clone())),
            Box::new(SystemProvider::new()),
        )
    }

    pub fn get(&self, panel: PanelId) -> &dyn PanelProvider {
        match panel {
            PanelId::Ops => self.ops.as_ref(),
            PanelId::Financial => self.financial.as_ref(),
            PanelId::Agents => self.agents.as_ref(),
            PanelId::System => self.system.as_ref(),
        }
    }

    pub fn collect(&self, panel: PanelId) -> PanelContent {
        self.get(panel).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl PanelProvider for Failing {
        fn panel(&self) -> PanelId {
            PanelId::Financial
        }

        fn probe(&self) -> anyhow::Result<PanelBody> {
            anyhow::bail!("ledger.json: expected value at line 1 column 1")
        }
    }

    struct Panicking;

    impl PanelProvider for Panicking {
        fn panel(&self) -> PanelId {
            PanelId::System
        }

        fn probe(&self) -> anyhow::Result<PanelBody> {
            panic!("probe exploded")
        }
    }

    #[test]
    fn test_selector_mapping() {
        assert_eq!(PanelId::from_selector(1), Some(PanelId::Ops));
        assert_eq!(PanelId::from_selector(4), Some(PanelId::System));
        assert_eq!(PanelId::from_selector(0), None);
        assert_eq!(PanelId::from_selector(5), None);
        assert_eq!(PanelId::from_selector(-1), None);
        for panel in PanelId::ALL {
            assert_eq!(PanelId::from_selector(panel.index() as i32), Some(panel));
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(PanelId::Ops.title(), "[1] DevOps");
        assert_eq!(PanelId::Financial.title(), "[2] Revenue");
        assert_eq!(PanelId::Agents.title(), "[3] Agents");
        assert_eq!(PanelId::System.title(), "[4] System");
    }

    #[test]
    fn test_error_degrades_with_title_kept() {
        let content = Failing.collect();
        assert_eq!(content.panel, PanelId::Financial);
        assert!(content.is_degraded());
        match content.body {
            PanelBody::Degraded(text) => {
                assert!(text.starts_with("Unable to load revenue data"));
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_panic_degrades() {
        let content = Panicking.collect();
        assert_eq!(content.title(), "[4] System");
        assert_eq!(
            content.body,
            PanelBody::Degraded("Unable to check system".to_string())
        );
    }

    #[test]
    fn test_shape_ignores_text() {
        let a = PanelBody::Table {
            columns: vec!["Tool", "Status"],
            rows: vec![vec![Cell::label("Git"), Cell::plain("git version 2.43.0")]],
        };
        let b = PanelBody::Table {
            columns: vec!["Tool", "Status"],
            rows: vec![vec![Cell::label("Git"), Cell::plain("git version 2.44.1")]],
        };
        assert_ne!(a, b);
        assert_eq!(a.shape(), b.shape());
    }
}
