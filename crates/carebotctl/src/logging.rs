//! Audit logging for carebotctl invocations
//!
//! One JSON line per invocation, XDG-compliant path with fallback chain.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log entry for each carebotctl invocation
#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 timestamp
    pub ts: String,

    /// Request ID (UUID)
    pub req_id: String,

    /// Command name
    pub command: String,

    /// Decision tag, when known locally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    pub exit_code: i32,

    pub duration_ms: u64,

    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogEntry {
    /// Discover log file path with fallback chain
    ///
    /// Priority:
    /// 1. $CAREBOTCTL_LOG_FILE environment variable (explicit override)
    /// 2. $XDG_STATE_HOME/carebot/ctl.jsonl (XDG standard)
    /// 3. ~/.local/state/carebot/ctl.jsonl (XDG fallback)
    pub fn discover_log_path<F>(lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CAREBOTCTL_LOG_FILE") {
            return Some(PathBuf::from(path));
        }

        if let Some(xdg_state) = lookup("XDG_STATE_HOME") {
            return Some(Path::new(&xdg_state).join("carebot").join("ctl.jsonl"));
        }

        lookup("HOME").map(|home| Path::new(&home).join(".local/state/carebot/ctl.jsonl"))
    }

    /// Append to the discovered log file
    pub fn write(&self) -> Result<(), std::io::Error> {
        match Self::discover_log_path(|name| std::env::var(name).ok()) {
            Some(path) => self.write_to(&path),
            None => Ok(()),
        }
    }

    /// Append as one JSON line, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }

    /// Generate request ID
    pub fn generate_req_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Get current timestamp in ISO 8601 format
    pub fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(command: &str) -> LogEntry {
        LogEntry {
            ts: LogEntry::now(),
            req_id: LogEntry::generate_req_id(),
            command: command.to_string(),
            tag: Some("off_topic".to_string()),
            exit_code: 0,
            duration_ms: 3,
            ok: true,
            error: None,
        }
    }

    #[test]
    fn test_discover_prefers_explicit_file() {
        let path = LogEntry::discover_log_path(|name| match name {
            "CAREBOTCTL_LOG_FILE" => Some("/tmp/ctl.jsonl".to_string()),
            "XDG_STATE_HOME" => Some("/xdg".to_string()),
            _ => None,
        });
        assert_eq!(path, Some(PathBuf::from("/tmp/ctl.jsonl")));
    }

    #[test]
    fn test_discover_xdg_then_home() {
        let xdg = LogEntry::discover_log_path(|name| {
            (name == "XDG_STATE_HOME").then(|| "/xdg".to_string())
        });
        assert_eq!(xdg, Some(PathBuf::from("/xdg/carebot/ctl.jsonl")));

        let home = LogEntry::discover_log_path(|name| (name == "HOME").then(|| "/home/u".to_string()));
        assert_eq!(
            home,
            Some(PathBuf::from("/home/u/.local/state/carebot/ctl.jsonl"))
        );

        assert_eq!(LogEntry::discover_log_path(|_| None), None);
    }

    #[test]
    fn test_write_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ctl.jsonl");

        entry("ask").write_to(&path).unwrap();
        entry("topics").write_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: LogEntry = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.command, "topics");
        assert_eq!(parsed.tag.as_deref(), Some("off_topic"));
        assert!(!lines[0].contains("\"error\""));
    }

    #[test]
    fn test_req_ids_are_unique() {
        assert_ne!(LogEntry::generate_req_id(), LogEntry::generate_req_id());
    }
}
