// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini completion provider for the Solace support service.
//!
//! Wraps the `generateContent` REST API behind the [`CompletionProvider`]
//! trait: one prompt string in, one text string out, with a single retry on
//! transient HTTP errors.

pub mod client;
pub mod types;

use async_trait::async_trait;
use solace_config::model::GeminiConfig;
use solace_core::{CompletionProvider, SolaceError};

pub use client::GeminiClient;

/// [`CompletionProvider`] implementation backed by [`GeminiClient`].
#[derive(Debug)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Builds a provider from configuration. Requires `gemini.api_key`.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, SolaceError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| SolaceError::Config("gemini.api_key is not set".to_string()))?;
        let client = GeminiClient::new(api_key, &config.model, &config.base_url)?;
        Ok(Self { client })
    }

    /// Wraps an existing client (used by tests with an overridden base URL).
    pub fn from_client(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, SolaceError> {
        self.client.generate(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_requires_api_key() {
        let config = GeminiConfig::default();
        let err = GeminiProvider::from_config(&config).unwrap_err();
        assert!(matches!(err, SolaceError::Config(_)));
    }
}
