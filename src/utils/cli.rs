//! Running the CLI

// Allow exits because in this file we ideally handle all errors with known exit codes
#![allow(clippy::exit)]

use crate::config::Config;
use crate::server::app::serve;
use clap::Parser;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Cupid is the backend for the Valentine's++ greeting-card site.
/// It stores submitted cards and emails both halves of the couple
/// a link back to them.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the notification email templates.
    #[arg(short, long, default_value_t = String::from("templates"))]
    templates_path: String,
    /// Cupid cli subcommands
    #[command(subcommand)]
    subcommands: Subcommands,
}

///
#[derive(Clone, clap::Subcommand)]
enum Subcommands {
    /// Serve the greeting-card API
    Serve {
        /// Port on which to serve the API.
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

/// Initialize tracing output.
///
/// Logs go to stdout unless `CUPID_LOG_DIR` names a directory, in which case
/// they go to a daily-rolling file under it. The returned guard flushes the
/// background file writer and must stay alive for the life of the process.
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Ok(log_dir) = std::env::var("CUPID_LOG_DIR") {
        let appender = tracing_appender::rolling::daily(log_dir, "cupid.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        return Some(guard);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
    None
}

/// Main entrypoint to application
///
/// # Errors
/// Errors if the server fails while running. Configuration problems do not
/// error; they exit the process with code 1.
pub fn run() -> std::io::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();
    let _guard = init_tracing();
    tracing::debug!("Starting application");
    let cli = Cli::parse();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("error: {err}");
            std::process::exit(1);
        }
    };

    match cli.subcommands {
        Subcommands::Serve { port } => serve(config, PathBuf::from(&cli.templates_path), port),
    }
}
