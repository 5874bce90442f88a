//! External text generator.
//!
//! The router only sees the `TextGenerator` trait. HTTP providers (OpenAI,
//! Gemini, Ollama) live here together with a scripted fake for tests.

use crate::config::{GeneratorConfig, Provider};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.9,
            max_output_tokens: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("generator is not configured")]
    Unavailable,

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("authentication rejected (HTTP {0})")]
    Auth(u16),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("generator returned an empty response")]
    EmptyResponse,
}

impl GenerationError {
    /// Short label, used as a metrics dimension
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Timeout(_) => "timeout",
            Self::Auth(_) => "auth",
            Self::RateLimited => "rate_limited",
            Self::Http(_) => "http",
            Self::InvalidResponse(_) => "invalid_response",
            Self::EmptyResponse => "empty_response",
        }
    }
}

/// Generic generator trait
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    async fn generate(
        &self,
        system_prompt: &str,
        user_input: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError>;
}

/// Generator backed by a hosted or local HTTP model API
pub struct HttpGenerator {
    provider: Provider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            provider: config.provider,
            endpoint: config.endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            api_key: config.api_key.clone(),
            timeout,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn map_send_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout.as_millis() as u64)
        } else {
            // reqwest errors print the request URL
            GenerationError::Http(format!("request failed: {}", e.without_url()))
        }
    }

    async fn post_json(&self, request: reqwest::RequestBuilder) -> Result<Value, GenerationError> {
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(GenerationError::Auth(status.as_u16()));
        }
        if status.as_u16() == 429 {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            return Err(GenerationError::Http(format!(
                "HTTP {} from {}",
                status, self.provider
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("failed to parse body: {}", e)))
    }

    async fn call_openai(
        &self,
        system_prompt: &str,
        user_input: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_input},
            ],
            "temperature": params.temperature,
            "max_tokens": params.max_output_tokens,
            "top_p": params.top_p,
        });

        let mut request = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let value = self.post_json(request).await?;
        extract_text(&value, &["choices", "0", "message", "content"])
    }

    async fn call_gemini(
        &self,
        system_prompt: &str,
        user_input: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let body = json!({
            "contents": [
                {"parts": [{"text": gemini_prompt(system_prompt, user_input)}]}
            ],
            "generationConfig": {
                "temperature": params.temperature,
                "topP": params.top_p,
                "topK": 40,
                "maxOutputTokens": params.max_output_tokens,
            },
        });

        let mut request = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.endpoint, self.model
            ))
            .json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("x-goog-api-key", api_key);
        }

        let value = self.post_json(request).await?;
        extract_text(&value, &["candidates", "0", "content", "parts", "0", "text"])
    }

    async fn call_ollama(
        &self,
        system_prompt: &str,
        user_input: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let body = json!({
            "model": self.model,
            "system": system_prompt,
            "prompt": user_input,
            "stream": false,
            "options": {
                "temperature": params.temperature,
                "top_p": params.top_p,
                "num_predict": params.max_output_tokens,
            },
        });

        let request = self
            .client
            .post(format!("{}/api/generate", self.endpoint))
            .json(&body);

        let value = self.post_json(request).await?;
        extract_text(&value, &["response"])
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    fn name(&self) -> &str {
        self.provider.as_str()
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_input: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        debug!("Calling {} model {}", self.provider, self.model);
        match self.provider {
            Provider::OpenAi => self.call_openai(system_prompt, user_input, params).await,
            Provider::Gemini => self.call_gemini(system_prompt, user_input, params).await,
            Provider::Ollama => self.call_ollama(system_prompt, user_input, params).await,
        }
    }
}

/// Gemini takes a single prompt: contract first, then the question
pub fn gemini_prompt(system_prompt: &str, user_input: &str) -> String {
    format!("{}\n\nUser Question: {}", system_prompt, user_input)
}

/// Walk a JSON path (object keys or array indices) to a non-empty string
fn extract_text(value: &Value, path: &[&str]) -> Result<String, GenerationError> {
    let mut current = value;
    for segment in path {
        current = match segment.parse::<usize>() {
            Ok(index) => current.get(index),
            Err(_) => current.get(*segment),
        }
        .ok_or_else(|| {
            GenerationError::InvalidResponse(format!("missing field '{}'", path.join(".")))
        })?;
    }

    let text = current
        .as_str()
        .ok_or_else(|| GenerationError::InvalidResponse(format!("'{}' is not text", path.join("."))))?
        .trim();

    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Fake generator for testing
pub struct FakeGenerator {
    responses: Mutex<Vec<Result<String, GenerationError>>>,
    calls: Mutex<Vec<(String, String)>>,
    delay: Option<Duration>,
}

impl FakeGenerator {
    /// Scripted responses; the last one repeats
    pub fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn always(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn always_error(error: GenerationError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Sleep before answering, to exercise timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// (system prompt, user input) of every call so far
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_input: &str,
        _params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((system_prompt.to_string(), user_input.to_string()));
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut responses = self
            .responses
            .lock()
            .map_err(|_| GenerationError::Http("fake generator poisoned".to_string()))?;
        match responses.len() {
            0 => Err(GenerationError::EmptyResponse),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}
