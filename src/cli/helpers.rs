//! Shared helper functions for CLI commands

use mekon_core::{ActivityLog, MekonConfig};
use tracing::warn;

/// Print a titled table with left-aligned, width-fitted columns
pub fn print_table(title: &str, headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", title);
    println!("{}", format_row(headers.to_vec()));
    let rule_len = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
    println!("{}", "─".repeat(rule_len));
    for row in rows {
        println!("{}", format_row(row.iter().map(String::as_str).collect()));
    }
}

/// Append to the activity log; failures are logged, never fatal
pub fn record_activity(config: &MekonConfig, action: &str, details: &str, status: &str) {
    let log = ActivityLog::new(config.activity_log_path());
    if let Err(e) = log.record(action, details, status) {
        warn!("Could not record activity '{}': {}", action, e);
    }
}
