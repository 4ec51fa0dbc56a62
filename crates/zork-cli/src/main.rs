//! Zork CLI - your zork balance and transactions in the terminal.
//!
//! Signs in with an access token kept in a local cookie jar and shows the
//! same profile and transaction history as the web dashboard.

mod commands;
mod utils;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zork_core::Config;

use commands::{session, transactions, Context};

/// Log file name inside the jar directory
const LOG_FILE: &str = "zork.log";

/// Zork - your zork balance in the terminal
#[derive(Parser)]
#[command(name = "zork", version, about, long_about = None)]
struct Cli {
    /// Base URL of the Zork API
    #[arg(long, env = "ZORK_API_URL", global = true)]
    api_url: Option<String>,

    /// Directory holding the cookie jar
    #[arg(long, env = "ZORK_JAR_DIR", global = true)]
    jar_dir: Option<PathBuf>,

    /// Also write logs to zork.log in the jar directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an access token and check it against the API
    Login,

    /// Show who is signed in and their balance
    Whoami,

    /// List your latest transactions
    Transactions {
        /// Hide transactions you sent
        #[arg(long)]
        no_sent: bool,
        /// Hide transactions you received
        #[arg(long)]
        no_received: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the access token
    Logout,
}

/// Initialize the tracing subscriber for logging
fn init_tracing(log_dir: Option<PathBuf>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, LOG_FILE));
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let jar_dir = match cli.jar_dir {
        Some(dir) => dir,
        None => Config::jar_dir()?,
    };
    std::fs::create_dir_all(&jar_dir)
        .with_context(|| format!("Failed to create {}", jar_dir.display()))?;

    let log_dir = cli.log_file.then(|| jar_dir.clone());
    let _guard = init_tracing(log_dir);

    let ctx = Context::open(cli.api_url, jar_dir)?;
    info!(api = ctx.api.base_url(), "Zork CLI starting");

    match cli.command {
        Commands::Login => session::login(&ctx).await,
        Commands::Whoami => session::whoami(&ctx).await,
        Commands::Transactions {
            no_sent,
            no_received,
            json,
        } => transactions::run(&ctx, !no_sent, !no_received, json).await,
        Commands::Logout => session::logout(&ctx),
    }
}
