//! # Storefront CLI Library
//!
//! Command-line front end for the storefront cart.
//!
//! ## Module Organization
//! ```text
//! storefront_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing & run)
//! ├── config.rs       ◄─── AppConfig (env vars, data directory)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Subcommand enum & dispatch
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── catalog.rs  ◄─── Catalog browsing commands
//! └── error.rs        ◄─── CLI error type & exit codes
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Command Startup                                   │
//! │                                                                         │
//! │  1. Parse Arguments ──────────────────────────────────────────────────► │
//! │     • clap derive, global --data-dir and --verbose                      │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: WARN (DEBUG with --verbose), RUST_LOG overrides          │
//! │                                                                         │
//! │  3. Load Configuration ───────────────────────────────────────────────► │
//! │     • STOREFRONT_* env vars over defaults, --data-dir over both         │
//! │                                                                         │
//! │  4. Run the Command ──────────────────────────────────────────────────► │
//! │     • Opens the cart from the data directory if the command needs it    │
//! │     • Output to stdout, errors to stderr with a typed exit code         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A panicking cart observer never fails a command. It is logged at ERROR,
//! and the default panic hook also prints its message to stderr.

pub mod commands;
pub mod config;
pub mod error;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use commands::Command;
use config::AppConfig;

/// Storefront shopping cart.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
pub struct Cli {
    /// Directory holding the saved cart
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Builds the configuration for this invocation.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::from_env();
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        config
    }
}

/// Runs the CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config();
    debug!(data_dir = %config.data_dir.display(), "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match commands::execute(cli.command, &config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            warn!(code = ?e.code, error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_cart=trace` - Show trace for the cart engine only
/// - Default: WARN, or DEBUG with `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "storefront",
            "--data-dir",
            "/tmp/cart",
            "add",
            "--id",
            "3",
            "--title",
            "Mens Cotton Jacket",
            "--price",
            "55.99",
            "--bypass-limit",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/cart")));
        assert_eq!(cli.config().data_dir, PathBuf::from("/tmp/cart"));
        match cli.command {
            Command::Add {
                id,
                price,
                bypass_limit,
                category,
                ..
            } => {
                assert_eq!(id, 3);
                assert_eq!(price, 55.99);
                assert!(bypass_limit);
                assert_eq!(category, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_update_negative_quantity() {
        let cli = Cli::try_parse_from(["storefront", "update", "4", "-2", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Update {
                id: 4,
                quantity: -2,
                allow_overflow: false
            }
        ));
    }

    #[test]
    fn test_parse_catalog_default_category() {
        let cli = Cli::try_parse_from(["storefront", "catalog", "--catalog", "p.json"]).unwrap();
        match cli.command {
            Command::Catalog { category, .. } => assert_eq!(category, "all"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_missing_args() {
        assert!(Cli::try_parse_from(["storefront", "add", "--id", "1"]).is_err());
        assert!(Cli::try_parse_from(["storefront", "remove"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
