// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core trait definitions, error types, and domain types for the Solace
//! customer-support service.
//!
//! Everything that crosses a crate boundary lives here: the [`SolaceError`]
//! taxonomy, the order/ticket/user domain model, conversation types, and the
//! [`RecordStore`] / [`CompletionProvider`] adapter traits implemented by
//! `solace-storage` and `solace-gemini`.

pub mod error;
pub mod traits;
pub mod types;

pub use error::SolaceError;
pub use traits::provider::CompletionProvider;
pub use traits::store::RecordStore;
pub use types::{
    ContextBlock, ConversationTurn, Lookup, NewOrder, NewTicket, NewUser, Order,
    OrderStatus, Role, Ticket, TicketStatus, User,
};
