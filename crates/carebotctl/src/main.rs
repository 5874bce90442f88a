//! Carebot Control - ask health questions from the terminal.
//!
//! Routes in-process by default, or through carebotd with --daemon.

use carebotctl::cli::Cli;
use carebotctl::commands;
use carebotctl::errors::EXIT_SUCCESS;
use carebotctl::logging::LogEntry;
use clap::Parser;
use owo_colors::OwoColorize;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so answers stay clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();
    let req_id = LogEntry::generate_req_id();

    let mut stdout = std::io::stdout();
    let (exit_code, tag, error) = match commands::run(&cli, &mut stdout).await {
        Ok(tag) => (EXIT_SUCCESS, tag, None),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            (e.exit_code(), None, Some(e.to_string()))
        }
    };

    let entry = LogEntry {
        ts: LogEntry::now(),
        req_id,
        command: cli.command.name().to_string(),
        tag,
        exit_code,
        duration_ms: start.elapsed().as_millis() as u64,
        ok: exit_code == EXIT_SUCCESS,
        error,
    };
    // Audit log failures never change the outcome
    let _ = entry.write();

    std::process::exit(exit_code);
}
