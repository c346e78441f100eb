// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-completion provider trait.

use async_trait::async_trait;

use crate::error::SolaceError;

/// An opaque, fallible text-completion backend: prompt in, text out.
///
/// The orchestrator treats any failure uniformly; no structured error payload
/// is required beyond [`SolaceError::Provider`].
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a single prompt and returns the generated text.
    async fn complete(&self, prompt: &str) -> Result<String, SolaceError>;
}
