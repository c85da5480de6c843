//! System command group: configuration, health checks, info

use super::helpers::{print_table, record_activity};
use clap::Subcommand;
use mekon_core::{
    error::Result,
    health::{print_health_summary, run_health_checks, CheckStatus},
    icons,
    probe::HEALTH_TIMEOUT,
    MekonConfig,
};
use tracing::debug;

#[derive(Subcommand)]
pub enum SystemAction {
    /// Show current configuration
    Config,

    /// Run system health checks
    Health {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show check details
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version and domain overview
    Info,
}

/// Handle system command
pub async fn handle(action: SystemAction, config: &MekonConfig) -> Result<()> {
    match action {
        SystemAction::Config => show_config(config),
        SystemAction::Health { json, verbose } => health(config, json, verbose).await,
        SystemAction::Info => {
            print_info();
            Ok(())
        }
    }
}

fn set_or_not(value: &str) -> String {
    if value.is_empty() {
        "not set".to_string()
    } else {
        "set".to_string()
    }
}

fn show_config(config: &MekonConfig) -> Result<()> {
    let rows = vec![
        vec!["LLM API URL".to_string(), config.llm_api_url.clone()],
        vec!["LLM Model".to_string(), config.llm_model.clone()],
        vec![
            "LLM API Key".to_string(),
            config
                .masked_api_key()
                .unwrap_or_else(|| "not set".to_string()),
        ],
        vec![
            "Mekong CLI Path".to_string(),
            config.engine_location().display().to_string(),
        ],
        vec![
            "Data Directory".to_string(),
            config.data_path().display().to_string(),
        ],
        vec!["Vercel Token".to_string(), set_or_not(&config.vercel_token)],
        vec![
            "Cloudflare Token".to_string(),
            set_or_not(&config.cloudflare_token),
        ],
    ];

    print_table(
        &format!("{} Mekon Configuration", icons::system::gear()),
        &["Setting", "Value"],
        &rows,
    );
    Ok(())
}

async fn health(config: &MekonConfig, json: bool, verbose: bool) -> Result<()> {
    debug!("Running health checks...");

    let checked = config.clone();
    let summary =
        tokio::task::spawn_blocking(move || run_health_checks(&checked, HEALTH_TIMEOUT))
            .await
            .map_err(|e| mekon_core::MekonError::Other(format!("health checks failed: {}", e)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_health_summary(&summary, verbose);
    }

    let status = match summary.status {
        CheckStatus::Pass => "ok",
        CheckStatus::Warn => "warn",
        CheckStatus::Fail => "fail",
    };
    record_activity(
        config,
        "system health",
        &format!(
            "{} passed, {} warnings, {} errors",
            summary.summary.passed, summary.summary.warnings, summary.summary.errors
        ),
        status,
    );

    // A report with failing checks is still a successful run
    Ok(())
}

fn print_info() {
    println!(
        "{} Mekon CLI v{}",
        icons::system::rocket(),
        env!("CARGO_PKG_VERSION")
    );
    println!("All-in-one CLI for the Mekong ecosystem");
    println!();
    println!("Domains:");
    println!("  dash       Live dashboard of all domains");
    println!("  revenue    Ledger totals and reports");
    println!("  logs       Activity log");
    println!("  system     Config, health, info");
}
