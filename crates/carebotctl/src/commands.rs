//! Command execution.
//!
//! Each command returns the decision tag it observed (if any) for the
//! audit log; output goes to the given writer.

use crate::chat::run_chat;
use crate::cli::{Cli, Commands};
use crate::client::{Answer, Backend, DaemonClient};
use crate::errors::CtlError;
use crate::render::{html_to_text, tag_label, terminal_width};
use carebot_common::{Config, DecisionTag, HealthService, Plan};
use std::io::Write;
use std::time::Duration;

/// Load configuration honoring --config and --fallback-only
pub fn load_config(cli: &Cli) -> Result<Config, CtlError> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from_path(path)?;
            config.apply_env(|name| std::env::var(name).ok())?;
            config
        }
        None => Config::load()?,
    };
    if cli.fallback_only {
        config.generator.enabled = false;
    }
    Ok(config)
}

fn local_service(config: &Config) -> Result<HealthService, CtlError> {
    HealthService::from_config(config).map_err(CtlError::Startup)
}

pub fn build_backend(cli: &Cli, config: &Config) -> Result<Backend, CtlError> {
    match &cli.daemon {
        Some(url) => Ok(Backend::Daemon(DaemonClient::new(
            url,
            Duration::from_secs(config.server.request_timeout_secs),
        )?)),
        None => Ok(Backend::Local(local_service(config)?)),
    }
}

/// Print one answer in the requested format
pub fn print_answer<W: Write>(
    out: &mut W,
    answer: &Answer,
    raw: bool,
    json: bool,
) -> Result<(), CtlError> {
    if json {
        let text = serde_json::to_string_pretty(answer)
            .map_err(|e| CtlError::InvalidResponse(e.to_string()))?;
        writeln!(out, "{}", text)?;
    } else if raw {
        writeln!(out, "{}", answer.response)?;
    } else {
        writeln!(out, "{}", html_to_text(&answer.response, terminal_width()))?;
    }
    Ok(())
}

/// Deterministic decision tag, `None` when the generator would answer
pub fn route_tag(service: &HealthService, message: &str) -> Option<DecisionTag> {
    match service.plan(message) {
        Plan::Decided(decision) => Some(decision.tag()),
        Plan::Delegate => None,
    }
}

pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<Option<String>, CtlError> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Ask { words, raw, json } => {
            let backend = build_backend(cli, &config)?;
            let answer = backend.ask(&words.join(" ")).await?;
            print_answer(out, &answer, *raw, *json)?;
            Ok(answer.tag.map(|t| t.to_string()))
        }
        Commands::Chat => {
            let backend = build_backend(cli, &config)?;
            let stdin = std::io::stdin();
            run_chat(&backend, stdin.lock(), out, terminal_width()).await?;
            Ok(None)
        }
        Commands::Topics => {
            let backend = build_backend(cli, &config)?;
            for topic in backend.topics().await? {
                writeln!(out, "  {}", topic)?;
            }
            Ok(None)
        }
        Commands::Route { words } => {
            // Always in-process: the daemon does not expose plans
            let service = local_service(&config)?;
            match route_tag(&service, &words.join(" ")) {
                Some(tag) => {
                    writeln!(out, "{}", tag_label(tag))?;
                    Ok(Some(tag.to_string()))
                }
                None => {
                    writeln!(out, "delegate")?;
                    Ok(Some("delegate".to_string()))
                }
            }
        }
    }
}
