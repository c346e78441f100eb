// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Solace crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Status of a customer order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Status of a support ticket.
///
/// These four values are the entire legal set. Anything else is rejected
/// with [`SolaceError::InvalidStatus`](crate::SolaceError::InvalidStatus)
/// before any mutation and is never persisted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

/// A customer order: an ordered list of item names owned by a user.
///
/// `items` preserves insertion order and may contain duplicates. The owning
/// `user_id` is immutable after creation; only `status` and `updated_at`
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub items: Vec<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating an order; the record store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub items: Vec<String>,
    pub status: OrderStatus,
}

/// A support ticket raised against an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub order_id: i64,
    pub issue_description: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a ticket; the record store assigns id and stamps
/// `created_at == updated_at`.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub order_id: i64,
    pub issue_description: String,
    pub status: TicketStatus,
}

/// A registered customer. The support core only uses the id as the join key
/// for "all orders of a user".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a user; the record store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

/// Speaker of a conversation turn.
///
/// Parsing is ASCII-case-insensitive (`"user"`, `"User"`, `"USER"` all
/// resolve); rendering is always capitalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    #[strum(to_string = "User", serialize = "user")]
    #[serde(rename = "user", alias = "User", alias = "USER")]
    User,
    #[strum(to_string = "Assistant", serialize = "assistant")]
    #[serde(rename = "assistant", alias = "Assistant", alias = "ASSISTANT")]
    Assistant,
}

/// A single prior turn of the conversation, supplied by the caller.
///
/// Content may be empty but must be present. The sequence is immutable once
/// received for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The ordered text sections handed to the completion backend as grounding.
///
/// The static knowledge section is always first; record sections follow in
/// order/ticket/user-orders order when their ids were supplied. Sections are
/// opaque fragments; the block does not parse or validate their structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextBlock {
    sections: Vec<String>,
}

impl ContextBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: impl Into<String>) {
        self.sections.push(section.into());
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Concatenates sections with a blank-line separator.
    pub fn text(&self) -> String {
        self.sections.join("\n\n")
    }
}

/// Outcome of a record lookup inside context assembly.
///
/// `Missing` and `Failed` both render as sentinel text; `Failed` is
/// additionally surfaced through the log so operators can tell store trouble
/// apart from a plain missing row.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Missing,
    Failed(String),
}

impl<T> Lookup<T> {
    /// Folds a fallible optional lookup into a `Lookup`.
    pub fn from_result(result: Result<Option<T>, crate::SolaceError>) -> Self {
        match result {
            Ok(Some(record)) => Lookup::Found(record),
            Ok(None) => Lookup::Missing,
            Err(e) => Lookup::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn ticket_status_round_trips_snake_case() {
        assert_eq!(TicketStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            TicketStatus::from_str("in_progress").unwrap(),
            TicketStatus::InProgress
        );
        assert!(TicketStatus::from_str("escalated").is_err());
    }

    #[test]
    fn role_parses_case_insensitively_and_renders_capitalized() {
        for input in ["user", "User", "USER"] {
            assert_eq!(Role::from_str(input).unwrap(), Role::User);
        }
        assert_eq!(Role::User.to_string(), "User");
        assert_eq!(Role::Assistant.to_string(), "Assistant");
    }

    #[test]
    fn role_serde_accepts_capitalized_alias() {
        let turn: ConversationTurn =
            serde_json::from_str(r#"{"role": "Assistant", "content": "hi"}"#).unwrap();
        assert_eq!(turn.role, Role::Assistant);
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains(r#""role":"assistant""#));
    }

    #[test]
    fn context_block_joins_with_blank_lines() {
        let mut block = ContextBlock::new();
        block.push("first");
        block.push("second");
        assert_eq!(block.text(), "first\n\nsecond");
    }

    #[test]
    fn lookup_from_result_maps_all_arms() {
        assert_eq!(Lookup::from_result(Ok(Some(1))), Lookup::Found(1));
        assert_eq!(Lookup::<i32>::from_result(Ok(None)), Lookup::Missing);
        let failed = Lookup::<i32>::from_result(Err(crate::SolaceError::Internal(
            "boom".to_string(),
        )));
        assert!(matches!(failed, Lookup::Failed(_)));
    }
}
