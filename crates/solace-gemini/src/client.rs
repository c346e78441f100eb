// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! Handles request construction, authentication, and transient error retry.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use solace_core::SolaceError;
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for the Google Generative Language API.
///
/// Manages the API key header, connection pooling, and a single retry on
/// transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
    max_retries: u32,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Result<Self, SolaceError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| SolaceError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| SolaceError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// Returns the model identifier this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Sends a prompt and returns the generated text.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn generate(&self, prompt: &str) -> Result<String, SolaceError> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let endpoint = self.endpoint();
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&endpoint)
                .json(&request)
                .send()
                .await
                .map_err(|e| SolaceError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            if status.is_success() {
                let body: GenerateContentResponse =
                    response.json().await.map_err(|e| SolaceError::Provider {
                        message: format!("malformed completion response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                let text = body.first_candidate_text().ok_or_else(|| {
                    SolaceError::Provider {
                        message: "completion response contained no candidates".to_string(),
                        source: None,
                    }
                })?;
                debug!(chars = text.len(), "completion received");
                return Ok(text);
            }

            let message = match response.json::<ApiErrorResponse>().await {
                Ok(err) => format!("API error {status}: {}", err.error.message),
                Err(_) => format!("API error {status}"),
            };

            if is_transient(status) && attempt < self.max_retries {
                last_error = Some(SolaceError::Provider {
                    message,
                    source: None,
                });
                continue;
            }
            return Err(SolaceError::Provider {
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| SolaceError::Provider {
            message: "completion unavailable".to_string(),
            source: None,
        }))
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

fn is_transient(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn candidate_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test-key", "gemini-1.5-flash", "https://unused.invalid")
            .unwrap()
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn generate_returns_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "What's the status?"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("Shipped.")))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let text = client.generate("What's the status?").await.unwrap();
        assert_eq!(text, "Shipped.");
    }

    #[tokio::test]
    async fn generate_surfaces_api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.generate("hi").await.unwrap_err();
        assert!(err.to_string().contains("API key not valid"), "{err}");
    }

    #[tokio::test]
    async fn generate_retries_once_on_transient_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("recovered")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let text = client.generate("hi").await.unwrap();
        assert_eq!(text, "recovered");
    }

    #[tokio::test]
    async fn empty_candidates_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, SolaceError::Provider { .. }));
    }

    #[tokio::test]
    async fn connection_failure_is_a_provider_error() {
        // Port 1 is reserved and nothing listens on it.
        let client = GeminiClient::new("test-key", "gemini-1.5-flash", "https://unused.invalid")
            .unwrap()
            .with_base_url("http://127.0.0.1:1".to_string());

        let err = client.generate("hi").await.unwrap_err();
        match err {
            SolaceError::Provider { message, source } => {
                assert!(message.contains("HTTP request failed"));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
