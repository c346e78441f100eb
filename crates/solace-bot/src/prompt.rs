// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt composition for the completion backend.
//!
//! The ordering is load-bearing: system instructions (with the context
//! interpolated) must precede all dynamic content so the backend treats them
//! as grounding, and the current user message must be the last textual
//! element before the `Assistant:` cue.

use solace_config::model::AgentConfig;
use tracing::{info, warn};

/// Placeholder interpolated with the assembled context text.
pub const CONTEXT_PLACEHOLDER: &str = "{context}";

/// Default system instruction template.
pub const DEFAULT_SYSTEM_TEMPLATE: &str = "\
You are a helpful customer support assistant for an online store.

Your responsibilities:
1. Answer questions about orders, shipping, returns, and refunds
2. Provide information from our Terms and Conditions and Support Guide
3. Help customers understand our policies and procedures
4. Be polite, professional, and concise
5. If you cannot find specific information in the provided context, be honest about it

Context Information:
{context}

Important Guidelines:
- Always be courteous and empathetic
- Provide accurate information based on the context
- If discussing specific orders or tickets, use the provided database information
- Cite relevant policy sections when applicable
- Keep responses concise but complete
- If you don't know something, suggest contacting human support
";

/// Loads the system template following config priority: file > inline > default.
///
/// A file or inline template missing the `{context}` placeholder is rejected
/// with a warning and the next priority is used instead.
pub async fn load_system_template(config: &AgentConfig) -> String {
    if let Some(ref path) = config.system_prompt_file {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let trimmed = content.trim().to_string();
                if trimmed.contains(CONTEXT_PLACEHOLDER) {
                    info!(path = path.as_str(), "loaded system template from file");
                    return trimmed;
                }
                warn!(
                    path = path.as_str(),
                    "system template file lacks {{context}} placeholder, falling back"
                );
            }
            Err(e) => {
                warn!(
                    path = path.as_str(),
                    error = %e,
                    "failed to read system template file, falling back"
                );
            }
        }
    }

    if let Some(ref template) = config.system_prompt
        && template.contains(CONTEXT_PLACEHOLDER)
    {
        return template.clone();
    }

    DEFAULT_SYSTEM_TEMPLATE.to_string()
}

/// Composes the full prompt in fixed order: system instructions with the
/// context interpolated, the history block (omitted entirely when `None`),
/// the current user message, and the trailing completion cue.
pub fn build_prompt(
    template: &str,
    context_text: &str,
    history_block: Option<&str>,
    message: &str,
) -> String {
    let mut prompt = template.replacen(CONTEXT_PLACEHOLDER, context_text, 1);

    if let Some(history) = history_block {
        prompt.push_str("\n\nConversation History:\n");
        prompt.push_str(history);
    }

    prompt.push_str("\n\nUser: ");
    prompt.push_str(message);
    prompt.push_str("\n\nAssistant:");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_interpolated_before_all_dynamic_content() {
        let prompt = build_prompt(
            DEFAULT_SYSTEM_TEMPLATE,
            "POLICY TEXT",
            Some("User: earlier question\n"),
            "current question",
        );
        let context_pos = prompt.find("POLICY TEXT").unwrap();
        let history_pos = prompt.find("Conversation History:").unwrap();
        let message_pos = prompt.find("User: current question").unwrap();
        assert!(context_pos < history_pos);
        assert!(history_pos < message_pos);
        assert!(prompt.ends_with("Assistant:"));
        assert!(!prompt.contains(CONTEXT_PLACEHOLDER));
    }

    #[test]
    fn empty_history_omits_the_header_entirely() {
        let prompt = build_prompt(DEFAULT_SYSTEM_TEMPLATE, "ctx", None, "hello");
        assert!(!prompt.contains("Conversation History:"));
        assert!(prompt.contains("\n\nUser: hello\n\nAssistant:"));
    }

    #[tokio::test]
    async fn inline_template_overrides_default() {
        let config = AgentConfig {
            system_prompt: Some("Context: {context}. Be terse.".to_string()),
            ..AgentConfig::default()
        };
        let template = load_system_template(&config).await;
        assert_eq!(template, "Context: {context}. Be terse.");
    }

    #[tokio::test]
    async fn file_template_overrides_inline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.md");
        std::fs::write(&path, "From file: {context}").unwrap();

        let config = AgentConfig {
            system_prompt: Some("Inline: {context}".to_string()),
            system_prompt_file: Some(path.to_string_lossy().into_owned()),
            ..AgentConfig::default()
        };
        let template = load_system_template(&config).await;
        assert_eq!(template, "From file: {context}");
    }

    #[tokio::test]
    async fn file_without_placeholder_falls_back_to_inline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.md");
        std::fs::write(&path, "no placeholder here").unwrap();

        let config = AgentConfig {
            system_prompt: Some("Inline: {context}".to_string()),
            system_prompt_file: Some(path.to_string_lossy().into_owned()),
            ..AgentConfig::default()
        };
        let template = load_system_template(&config).await;
        assert_eq!(template, "Inline: {context}");
    }

    #[tokio::test]
    async fn missing_file_and_inline_yield_default() {
        let config = AgentConfig {
            system_prompt_file: Some("/nonexistent/template.md".to_string()),
            ..AgentConfig::default()
        };
        let template = load_system_template(&config).await;
        assert_eq!(template, DEFAULT_SYSTEM_TEMPLATE);
    }
}
