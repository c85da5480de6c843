//! Mekon - all-in-one operations CLI
//!
//! Entry point for the `mekon` binary: parses arguments, loads configuration,
//! initializes logging and dispatches to the command handlers in `cli/`.

mod cli;

use clap::{Parser, Subcommand};
use cli::{logs::LogsAction, revenue::RevenueAction, system::SystemAction};
use mekon_core::{error::Result, icons, MekonConfig};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mekon")]
#[command(about = "Mekon CLI: all-in-one toolkit for the Mekong ecosystem", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Set log level
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Config file (overrides MEKON_CONFIG and ~/.mekon/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version info
    Version,

    /// Launch the live terminal dashboard
    Dash {
        /// Auto-refresh interval in seconds
        #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
        refresh: u64,

        /// Render once and exit
        #[arg(long)]
        no_interactive: bool,
    },

    /// System: config, health, info
    #[command(subcommand)]
    System(SystemAction),

    /// Revenue: ledger totals and reports
    #[command(subcommand)]
    Revenue(RevenueAction),

    /// Activity log management
    #[command(subcommand)]
    Logs(LogsAction),
}

fn parse_level(raw: &str) -> Level {
    match raw {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Log to stderr, or to `log_file` while the dashboard owns the screen
fn init_tracing(level: Level, log_file: Option<&Path>) {
    let level = level.as_str().to_lowercase();
    let filter = EnvFilter::new(format!("mekon={level},mekon_core={level}"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let file = log_file.and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    match file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None if log_file.is_some() => {
            // Stderr would tear the dashboard; drop logs instead
            builder.with_writer(std::io::sink).init()
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
}

fn print_banner() {
    println!("{} Mekon CLI", icons::system::rocket());
    println!("All-in-one toolkit for the Mekong ecosystem");
    println!();
    println!("Command Groups:");
    println!("  dash        Live dashboard of all domains");
    println!("  revenue     Ledger totals and reports");
    println!("  logs        Activity log");
    println!("  system      Configuration, health checks, info");
    println!();
    println!("Run mekon --help for all options");
}

async fn run(cli: Cli) -> Result<()> {
    let config = MekonConfig::load(cli.config.as_deref())?;

    let interactive_dash = matches!(
        cli.command,
        Some(Commands::Dash {
            no_interactive: false,
            ..
        })
    );
    let dash_log = interactive_dash.then(|| config.dash_log_path());
    init_tracing(parse_level(&cli.log_level), dash_log.as_deref());

    debug!("Mekon v{} starting...", env!("CARGO_PKG_VERSION"));

    match cli.command {
        None => {
            print_banner();
            Ok(())
        }
        Some(Commands::Version) => {
            println!("Mekon CLI v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Dash {
            refresh,
            no_interactive,
        }) => cli::dash::handle(&config, refresh, no_interactive).await,
        Some(Commands::System(action)) => cli::system::handle(action, &config).await,
        Some(Commands::Revenue(action)) => cli::revenue::handle(action, &config).await,
        Some(Commands::Logs(action)) => cli::logs::handle(action, &config).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} Error: {}", icons::status::error(), e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dash_defaults() {
        let cli = Cli::try_parse_from(["mekon", "dash"]).unwrap();
        match cli.command {
            Some(Commands::Dash {
                refresh,
                no_interactive,
            }) => {
                assert_eq!(refresh, 30);
                assert!(!no_interactive);
            }
            _ => panic!("expected dash"),
        }
    }

    #[test]
    fn test_zero_refresh_rejected() {
        assert!(Cli::try_parse_from(["mekon", "dash", "-r", "0"]).is_err());
    }

    #[test]
    fn test_unknown_period_rejected() {
        assert!(Cli::try_parse_from(["mekon", "revenue", "report", "--period", "decade"]).is_err());
        assert!(Cli::try_parse_from(["mekon", "revenue", "report", "-p", "year"]).is_ok());
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("loud"), Level::INFO);
    }
}
