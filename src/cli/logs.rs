//! Logs command group: view and manage the activity log

use super::helpers::print_table;
use clap::Subcommand;
use mekon_core::{
    error::{MekonError, Result},
    icons, ActivityEntry, ActivityLog, MekonConfig,
};
use std::io::{self, BufRead, Write};

const TAIL_ENTRIES: usize = 10;

#[derive(Subcommand)]
pub enum LogsAction {
    /// Show recent activity log entries
    Show {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },

    /// Show the last 10 entries
    Tail,

    /// Delete the activity log
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle logs command
pub async fn handle(action: LogsAction, config: &MekonConfig) -> Result<()> {
    let log = ActivityLog::new(config.activity_log_path());

    match action {
        LogsAction::Show { limit } => {
            let entries = log.read(limit)?;
            print_entries(&format!("Activity Log (last {})", entries.len()), &entries);
        }
        LogsAction::Tail => {
            let entries = log.read(TAIL_ENTRIES)?;
            print_entries("Activity Log (tail)", &entries);
        }
        LogsAction::Clear { yes } => {
            if !yes && !confirm("Clear all activity logs?")? {
                return Err(MekonError::Other("Aborted".to_string()));
            }
            let count = log.clear()?;
            println!("{} Removed {} log entries.", icons::status::success(), count);
        }
    }
    Ok(())
}

fn print_entries(title: &str, entries: &[ActivityEntry]) {
    if entries.is_empty() {
        println!("No log entries found.");
        return;
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            vec![
                entry.short_timestamp().to_string(),
                entry.action.clone(),
                entry.details.clone(),
                entry.status.clone(),
            ]
        })
        .collect();
    print_table(title, &["Timestamp", "Action", "Details", "Status"], &rows);
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N]: ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
