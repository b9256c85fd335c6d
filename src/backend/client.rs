use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::types::{ChatMessage, MessagesRequest, MessagesResponse};
use crate::config::{BackendConfig, RequestConfig};
use crate::error::{BackendError, BackendResult};

/// Messages API version header value.
const API_VERSION: &str = "2023-06-01";

/// Abstraction over the text-generation backend.
///
/// The engine depends on this trait rather than the concrete HTTP client so
/// orchestrator behavior (degrade-on-failure in particular) can be tested by
/// injecting each failure variant directly.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Run one generation request and return the raw completion text.
    ///
    /// Implementations never retry; a single failure degrades the caller to
    /// the rule-based path.
    async fn complete(
        &self,
        system: Option<&str>,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
    ) -> BackendResult<String>;
}

/// Client for the Anthropic Messages API
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    request_config: RequestConfig,
}

impl AnthropicClient {
    /// Create a new backend client.
    ///
    /// A missing API key is not an error here; it makes every `complete`
    /// call short-circuit with `BackendError::Unavailable`.
    pub fn new(config: &BackendConfig, request_config: RequestConfig) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(BackendError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            request_config,
        })
    }

    /// Whether a credential is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a single request (internal)
    async fn execute_request(
        &self,
        api_key: &str,
        request: &MessagesRequest,
    ) -> BackendResult<MessagesResponse> {
        let url = format!("{}/v1/messages", self.base_url);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "Calling model backend"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout {
                        timeout_ms: self.request_config.timeout_ms,
                    }
                } else {
                    BackendError::Http(e)
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let messages_response: MessagesResponse =
            response.json().await.map_err(BackendError::Http)?;

        Ok(messages_response)
    }
}

#[async_trait]
impl TextBackend for AnthropicClient {
    async fn complete(
        &self,
        system: Option<&str>,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
    ) -> BackendResult<String> {
        // Expected deployment mode, not a fault: no credential means the
        // caller serves its rule-based path. Zero network cost.
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No backend credential configured, skipping model call");
            return Err(BackendError::Unavailable);
        };

        let mut request = MessagesRequest::new(&self.model, max_tokens, messages);
        if let Some(system) = system {
            request = request.with_system(system);
        }

        let start = Instant::now();

        match self.execute_request(api_key, &request).await {
            Ok(response) => {
                let latency = start.elapsed();
                info!(
                    model = %self.model,
                    latency_ms = latency.as_millis(),
                    "Backend call succeeded"
                );
                match response.first_text() {
                    Some(text) if !text.is_empty() => Ok(text.to_string()),
                    _ => Err(BackendError::EmptyCompletion),
                }
            }
            Err(e) => {
                let latency = start.elapsed();
                warn!(
                    model = %self.model,
                    error = %e,
                    latency_ms = latency.as_millis(),
                    "Backend call failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api_key: Option<&str>) -> BackendConfig {
        BackendConfig {
            api_key: api_key.map(String::from),
            base_url: "https://api.anthropic.com".to_string(),
            model: "test-model".to_string(),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = AnthropicClient::new(&test_config(Some("test_key")), RequestConfig::default());
        assert!(client.is_ok());
        assert!(client.unwrap().is_configured());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = BackendConfig {
            base_url: "https://api.anthropic.com/".to_string(),
            ..test_config(None)
        };
        let client = AnthropicClient::new(&config, RequestConfig::default()).unwrap();
        assert_eq!(client.base_url(), "https://api.anthropic.com");
    }

    #[tokio::test]
    async fn test_unconfigured_client_short_circuits() {
        let client = AnthropicClient::new(&test_config(None), RequestConfig::default()).unwrap();
        assert!(!client.is_configured());

        let result = client
            .complete(None, vec![ChatMessage::user("hello")], 100)
            .await;
        assert!(matches!(result, Err(BackendError::Unavailable)));
    }
}
