//! Configuration management for carebot.
//!
//! Loads settings from $CAREBOT_CONFIG, /etc/carebot/config.toml or
//! /var/lib/carebot/config.toml, in that order, and falls back to defaults.
//! Environment variables override the generator provider and credentials.

use crate::generator::GenerationParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/carebot/config.toml";

/// Default config file path for fallback
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/carebot/config.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "CAREBOT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("no API key found for {0} and fallback mode is disabled")]
    MissingCredential(Provider),

    #[error("unknown generator provider '{0}' (expected openai, gemini or ollama)")]
    UnknownProvider(String),

    #[error("generator timeout ({generator}s) must be shorter than the request timeout ({request}s)")]
    TimeoutBudget { generator: u64, request: u64 },
}

/// Hosted or local text generation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
    Ollama,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }

    /// Environment variable carrying this provider's credential
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Ollama => None,
        }
    }

    pub fn requires_credential(&self) -> bool {
        self.api_key_env().is_some()
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Ollama => "http://127.0.0.1:11434",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-3.5-turbo",
            Self::Gemini => "gemini-pro",
            Self::Ollama => "llama3.2:3b",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Whole-request budget, generator call included
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    16_384
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            request_timeout_secs: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// External generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// false = fallback-only mode, the generator is never called
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub provider: Provider,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Provider default when unset
    #[serde(default)]
    pub model: Option<String>,

    /// Provider default when unset
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_generator_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Serve curated/fallback answers when no generator is available
    #[serde(default = "default_use_fallback")]
    pub use_fallback: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_generator_timeout() -> u64 {
    20
}

fn default_temperature() -> f32 {
    0.3 // focused, low-variance answers
}

fn default_top_p() -> f32 {
    0.9
}

fn default_max_output_tokens() -> u32 {
    800
}

fn default_use_fallback() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: Provider::default(),
            api_key: None,
            model: None,
            endpoint: None,
            timeout_secs: default_generator_timeout(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            use_fallback: default_use_fallback(),
        }
    }
}

impl GeneratorConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.provider.default_endpoint())
    }

    fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }

    /// Whether the router may delegate to the generator
    pub fn is_available(&self) -> bool {
        self.enabled && (!self.provider.requires_credential() || self.has_credential())
    }

    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            top_p: self.top_p,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

/// Knowledge pack configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// TOML pack replacing the built-in entries
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Full configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl Config {
    /// Load config from the first readable location, or return defaults,
    /// then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from_path(Path::new(&path))?,
            Err(_) => Self::load_from_path(Path::new(CONFIG_PATH))
                .or_else(|_| Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH)))
                .unwrap_or_else(|e| {
                    warn!("Config not found, using defaults: {}", e);
                    Config::default()
                }),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("LLM_PROVIDER") {
            self.generator.provider = Provider::parse(&provider)?;
        }

        if let Some(env) = self.generator.provider.api_key_env() {
            if let Some(key) = lookup(env).filter(|k| !k.trim().is_empty()) {
                self.generator.api_key = Some(key);
            }
        }

        if let Some(bind) = lookup("CAREBOT_BIND") {
            self.server.bind_addr = bind;
        }

        if let Some(flag) = lookup("CAREBOT_FALLBACK_ONLY") {
            if matches!(flag.trim(), "1" | "true" | "yes") {
                self.generator.enabled = false;
            }
        }

        Ok(())
    }

    /// Reject a configuration that could never produce an answer path
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.generator.is_available() && !self.generator.use_fallback {
            return Err(ConfigError::MissingCredential(self.generator.provider));
        }
        // Generator must time out before the request layer's bodyless 408
        if self.generator.is_available()
            && self.generator.timeout_secs >= self.server.request_timeout_secs
        {
            return Err(ConfigError::TimeoutBudget {
                generator: self.generator.timeout_secs,
                request: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }

    /// Serialize as TOML (for `config` dumps and docs)
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "0.0.0.0:5000");
        assert_eq!(config.generator.provider, Provider::OpenAi);
        assert_eq!(config.generator.model(), "gpt-3.5-turbo");
        assert_eq!(config.generator.temperature, 0.3);
        assert_eq!(config.generator.max_output_tokens, 800);
        assert!(config.generator.use_fallback);
        // no key: fallback mode
        assert!(!config.generator.is_available());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[generator]
provider = "gemini"
api_key = "abc"
timeout_secs = 5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generator.provider, Provider::Gemini);
        assert_eq!(config.generator.model(), "gemini-pro");
        assert_eq!(config.generator.timeout_secs, 5);
        // Defaults for missing fields
        assert_eq!(config.generator.top_p, 0.9);
        assert!(config.generator.is_available());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                ("LLM_PROVIDER", "Gemini"),
                ("GEMINI_API_KEY", "secret"),
                ("OPENAI_API_KEY", "ignored"),
                ("CAREBOT_BIND", "127.0.0.1:8080"),
            ]))
            .unwrap();
        assert_eq!(config.generator.provider, Provider::Gemini);
        assert_eq!(config.generator.api_key.as_deref(), Some("secret"));
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert!(config.generator.is_available());
    }

    #[test]
    fn test_fallback_only_env() {
        let mut config = Config::default();
        config
            .apply_env(env(&[("OPENAI_API_KEY", "k"), ("CAREBOT_FALLBACK_ONLY", "1")]))
            .unwrap();
        assert!(!config.generator.is_available());
    }

    #[test]
    fn test_unknown_provider() {
        let mut config = Config::default();
        let err = config.apply_env(env(&[("LLM_PROVIDER", "claude")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProvider(p) if p == "claude"));
    }

    #[test]
    fn test_ollama_needs_no_credential() {
        let config = GeneratorConfig {
            provider: Provider::Ollama,
            ..GeneratorConfig::default()
        };
        assert!(config.is_available());
        assert_eq!(config.endpoint(), "http://127.0.0.1:11434");
    }

    #[test]
    fn test_missing_credential_without_fallback() {
        let mut config = Config::default();
        config.generator.use_fallback = false;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingCredential(Provider::OpenAi))
        ));
    }

    #[test]
    fn test_generator_timeout_must_fit_request_timeout() {
        let mut config = Config::default();
        config.generator.api_key = Some("k".to_string());
        config.generator.timeout_secs = 60;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TimeoutBudget {
                generator: 60,
                request: 30
            })
        ));

        config.generator.timeout_secs = 30;
        assert!(config.validate().is_err());

        config.generator.timeout_secs = 29;
        assert!(config.validate().is_ok());

        // fallback mode never calls the generator
        config.generator.timeout_secs = 60;
        config.generator.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_key_is_not_a_credential() {
        let config = GeneratorConfig {
            api_key: Some("   ".to_string()),
            ..GeneratorConfig::default()
        };
        assert!(!config.is_available());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbind_addr = \"127.0.0.1:9000\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_from_path_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\n").unwrap();
        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config =
            toml::from_str(include_str!("../../../config/carebot.example.toml")).unwrap();
        assert_eq!(config.server.max_body_bytes, 16_384);
        assert_eq!(config.generator.provider, Provider::OpenAi);
        assert!(config.knowledge.path.is_none());
    }

    #[test]
    fn test_toml_roundtrip_keeps_provider_name() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("provider = \"openai\""));
    }
}
