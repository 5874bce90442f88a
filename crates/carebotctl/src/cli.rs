//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Carebot CLI
#[derive(Parser, Debug)]
#[command(name = "carebotctl")]
#[command(about = "Carebot - health questions answered with care", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (overrides $CAREBOT_CONFIG and defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Ask a running carebotd at this URL instead of routing locally
    #[arg(long, global = true)]
    pub daemon: Option<String>,

    /// Never call the external generator
    #[arg(long, global = true)]
    pub fallback_only: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask one health question
    Ask {
        /// The question
        #[arg(required = true)]
        words: Vec<String>,

        /// Print the HTML fragment as-is
        #[arg(long)]
        raw: bool,

        /// Output JSON only
        #[arg(long, conflicts_with = "raw")]
        json: bool,
    },

    /// Interactive chat session
    Chat,

    /// List curated topics
    Topics,

    /// Show which stage would answer, without calling the generator
    Route {
        #[arg(required = true)]
        words: Vec<String>,
    },
}

impl Commands {
    /// Command name for the audit log
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ask { .. } => "ask",
            Self::Chat => "chat",
            Self::Topics => "topics",
            Self::Route { .. } => "route",
        }
    }
}
