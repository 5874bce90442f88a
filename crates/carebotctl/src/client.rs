//! Answer backends: the in-process router or a running carebotd.

use crate::errors::CtlError;
use carebot_common::{DecisionTag, HealthService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// One answer, ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Known only when routing in-process
    pub tag: Option<DecisionTag>,
    pub response: String,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TopicsReply {
    topics: Vec<String>,
}

/// HTTP client for carebotd
pub struct DaemonClient {
    base_url: String,
    client: reqwest::Client,
}

impl DaemonClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CtlError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CtlError::DaemonUnavailable(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /get_response. Error statuses still carry a displayable apology.
    pub async fn ask(&self, message: &str) -> Result<String, CtlError> {
        let url = self.url("/get_response");
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(|e| CtlError::DaemonUnavailable(e.to_string()))?;

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| CtlError::InvalidResponse(e.to_string()))?;
        Ok(reply.response)
    }

    pub async fn topics(&self) -> Result<Vec<String>, CtlError> {
        let response = self
            .client
            .get(self.url("/v1/topics"))
            .send()
            .await
            .map_err(|e| CtlError::DaemonUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CtlError::InvalidResponse(format!("HTTP {}", response.status())));
        }

        let reply: TopicsReply = response
            .json()
            .await
            .map_err(|e| CtlError::InvalidResponse(e.to_string()))?;
        Ok(reply.topics)
    }
}

/// Where answers come from
pub enum Backend {
    Local(HealthService),
    Daemon(DaemonClient),
}

impl Backend {
    pub async fn ask(&self, message: &str) -> Result<Answer, CtlError> {
        match self {
            Self::Local(service) => {
                let decision = service.respond(message).await;
                Ok(Answer {
                    tag: Some(decision.tag()),
                    response: decision.render().to_string(),
                })
            }
            Self::Daemon(client) => Ok(Answer {
                tag: None,
                response: client.ask(message).await?,
            }),
        }
    }

    pub async fn topics(&self) -> Result<Vec<String>, CtlError> {
        match self {
            Self::Local(service) => Ok(service.topics().into_iter().map(str::to_string).collect()),
            Self::Daemon(client) => client.topics().await,
        }
    }
}
