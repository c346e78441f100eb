// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait for order/ticket/user persistence backends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SolaceError;
use crate::types::{NewOrder, NewTicket, NewUser, Order, Ticket, TicketStatus, User};

/// Keyed storage for Order, Ticket, and User records.
///
/// Gets return `Ok(None)` for a missing id; scans return store-defined order
/// (stable for an unchanged store, not guaranteed sorted). Each write is a
/// single atomic statement: a failed insert or update leaves no partial row
/// visible to subsequent reads.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_user(&self, id: i64) -> Result<Option<User>, SolaceError>;

    async fn get_order(&self, id: i64) -> Result<Option<Order>, SolaceError>;

    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>, SolaceError>;

    /// All orders owned by a user, in store scan order.
    async fn orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, SolaceError>;

    /// All tickets raised against an order.
    async fn tickets_for_order(&self, order_id: i64) -> Result<Vec<Ticket>, SolaceError>;

    /// All tickets across every order owned by a user.
    async fn tickets_for_user(&self, user_id: i64) -> Result<Vec<Ticket>, SolaceError>;

    /// All tickets, optionally filtered by status.
    async fn list_tickets(
        &self,
        status: Option<TicketStatus>,
    ) -> Result<Vec<Ticket>, SolaceError>;

    /// Inserts a user, assigning id and equal created/updated timestamps.
    async fn insert_user(&self, new: NewUser) -> Result<User, SolaceError>;

    /// Inserts an order, assigning id and equal created/updated timestamps.
    async fn insert_order(&self, new: NewOrder) -> Result<Order, SolaceError>;

    /// Inserts a ticket, assigning id and equal created/updated timestamps.
    async fn insert_ticket(&self, new: NewTicket) -> Result<Ticket, SolaceError>;

    /// Sets a ticket's status and `updated_at`, returning the updated row or
    /// `Ok(None)` if the id does not resolve.
    async fn update_ticket_status(
        &self,
        id: i64,
        status: TicketStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Ticket>, SolaceError>;
}
