// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use solace_core::{CompletionProvider, SolaceError};
use tokio::sync::Mutex;

/// A mock completion provider that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, a default
/// "mock response" text is returned. Flipping [`fail_next`](Self::set_failing)
/// makes every call return a provider error instead, for testing the
/// orchestrator's fallback containment.
pub struct MockCompletion {
    responses: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    failing: AtomicBool,
}

impl MockCompletion {
    /// Create a mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            failing: AtomicBool::new(false),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            prompts: Arc::new(Mutex::new(Vec::new())),
            failing: AtomicBool::new(false),
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// Make every subsequent `complete` call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, SolaceError> {
        self.prompts.lock().await.push(prompt.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(SolaceError::Provider {
                message: "completion unavailable".to_string(),
                source: None,
            });
        }
        Ok(self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_pop_in_fifo_order() {
        let mock = MockCompletion::with_responses(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(mock.complete("a").await.unwrap(), "one");
        assert_eq!(mock.complete("b").await.unwrap(), "two");
        assert_eq!(mock.complete("c").await.unwrap(), "mock response");
        assert_eq!(mock.prompts().await, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn failing_mode_returns_provider_error() {
        let mock = MockCompletion::new();
        mock.set_failing(true);
        assert!(matches!(
            mock.complete("x").await,
            Err(SolaceError::Provider { .. })
        ));
        mock.set_failing(false);
        assert!(mock.complete("x").await.is_ok());
    }
}
