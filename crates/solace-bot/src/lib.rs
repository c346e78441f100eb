// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support assistant core: context assembly, prompt construction, ticket
//! lifecycle, and the conversation orchestrator.
//!
//! [`SupportBot`] is the entry point for conversational requests. It owns a
//! [`RecordStore`] and a [`CompletionProvider`] behind trait objects, so the
//! same orchestration runs against SQLite and a live model in production or
//! against in-memory doubles in tests.

pub mod context;
pub mod history;
pub mod knowledge;
pub mod prompt;
pub mod tickets;

use std::sync::Arc;

use solace_core::{CompletionProvider, ConversationTurn, RecordStore, SolaceError};
use tracing::error;

use crate::context::ContextAssembler;
use crate::history::render_history;
use crate::prompt::build_prompt;

/// Reply returned whenever the completion provider fails. Record lookup
/// failures never trigger this; they degrade inside the context instead.
pub const FALLBACK_REPLY: &str = "I apologize, but I'm experiencing technical \
difficulties. Please try again or contact our support team directly at \
support@solace.shop";

/// One conversational request: the current message plus optional record
/// references and prior turns supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub message: String,
    pub order_id: Option<i64>,
    pub ticket_id: Option<i64>,
    pub user_id: Option<i64>,
    pub history: Vec<ConversationTurn>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_order(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn with_ticket(mut self, ticket_id: i64) -> Self {
        self.ticket_id = Some(ticket_id);
        self
    }

    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Conversational support assistant.
///
/// `respond` never fails: every storage or provider problem resolves to
/// either a degraded context section or [`FALLBACK_REPLY`].
pub struct SupportBot {
    store: Arc<dyn RecordStore>,
    provider: Arc<dyn CompletionProvider>,
    knowledge: String,
    system_template: String,
}

impl SupportBot {
    pub fn new(
        store: Arc<dyn RecordStore>,
        provider: Arc<dyn CompletionProvider>,
        knowledge: String,
        system_template: String,
    ) -> Self {
        Self {
            store,
            provider,
            knowledge,
            system_template,
        }
    }

    /// Assembles context, renders history, builds the prompt, and asks the
    /// provider for a completion.
    pub async fn respond(&self, request: &ChatRequest) -> String {
        let assembler = ContextAssembler::new(self.store.as_ref(), &self.knowledge);
        let context = assembler
            .assemble(request.order_id, request.ticket_id, request.user_id)
            .await;

        let rendered = render_history(&request.history);
        let prompt = build_prompt(
            &self.system_template,
            &context.text(),
            rendered.as_deref(),
            &request.message,
        );

        match self.provider.complete(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "completion failed, returning fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Like [`respond`](Self::respond), but fails fast when the referenced
    /// order does not exist instead of degrading the context.
    pub async fn respond_about_order(
        &self,
        order_id: i64,
        request: &ChatRequest,
    ) -> Result<String, SolaceError> {
        if self.store.get_order(order_id).await?.is_none() {
            return Err(SolaceError::NotFound {
                entity: "order",
                id: order_id,
            });
        }
        let request = request.clone().with_order(order_id);
        Ok(self.respond(&request).await)
    }

    /// Like [`respond`](Self::respond), but fails fast when the referenced
    /// ticket does not exist.
    pub async fn respond_about_ticket(
        &self,
        ticket_id: i64,
        request: &ChatRequest,
    ) -> Result<String, SolaceError> {
        if self.store.get_ticket(ticket_id).await?.is_none() {
            return Err(SolaceError::NotFound {
                entity: "ticket",
                id: ticket_id,
            });
        }
        let request = request.clone().with_ticket(ticket_id);
        Ok(self.respond(&request).await)
    }
}
