// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation history truncation and rendering.

use solace_core::ConversationTurn;

/// Number of most-recent turns included in the prompt.
pub const HISTORY_WINDOW: usize = 5;

/// Renders the last [`HISTORY_WINDOW`] turns, preserving original order,
/// one `"Role: content\n"` line per turn with the role capitalized.
///
/// Empty history yields `None`: the prompt builder then omits the
/// conversation-history header entirely.
pub fn render_history(turns: &[ConversationTurn]) -> Option<String> {
    if turns.is_empty() {
        return None;
    }

    let start = turns.len().saturating_sub(HISTORY_WINDOW);
    let mut rendered = String::new();
    for turn in &turns[start..] {
        rendered.push_str(&format!("{}: {}\n", turn.role, turn.content));
    }
    Some(rendered)
}
