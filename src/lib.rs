//! Mekon - operations toolkit with a live terminal dashboard
//!
//! The library behind the `mekon` binary:
//! - **Dashboard**: four live panels (DevOps, Revenue, Agents, System) with a
//!   background key listener and a timer-driven render loop
//! - **Config**: layered settings passed explicitly to whatever needs them
//! - **Ledger / Activity**: read-only revenue ledger and the JSONL action log
//! - **Health**: tool and environment checks
//!
//! # Example
//!
//! ```ignore
//! use mekon_core::{dashboard, MekonConfig, Providers};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> mekon_core::Result<()> {
//!     let config = MekonConfig::load(None)?;
//!     let providers = Arc::new(Providers::live(&config));
//!     dashboard::run(dashboard::DashOptions::default(), providers).await
//! }
//! ```

pub mod activity;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod icons;
pub mod ledger;
pub mod probe;

// Re-export commonly used types
pub use activity::{ActivityEntry, ActivityLog};
pub use config::MekonConfig;
pub use dashboard::{build_layout, DashOptions, PanelId, Providers, ScreenLayout, SharedView, ViewState};
pub use error::{MekonError, Result};
pub use ledger::{Ledger, LedgerEntry, Period};
