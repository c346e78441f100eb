// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the `RecordStore` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use solace_core::{
    NewOrder, NewTicket, NewUser, Order, RecordStore, SolaceError, Ticket, TicketStatus, User,
};
use tracing::debug;

use crate::database::Database;
use crate::queries;

/// SQLite-backed record store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. Insert timestamps are stamped here, truncated to
/// millisecond precision so in-memory records round-trip the TEXT columns
/// exactly.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Opens the database at `path` (running migrations) and wraps it.
    pub async fn open(path: &str) -> Result<Self, SolaceError> {
        let db = Database::open(path).await?;
        debug!(path, "SQLite record store ready");
        Ok(Self { db })
    }

    /// Wraps an already-open database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Checkpoints the WAL.
    pub async fn close(&self) -> Result<(), SolaceError> {
        self.db.close().await
    }

    /// Current time at the precision the TEXT columns store.
    fn now() -> DateTime<Utc> {
        let now = Utc::now();
        DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn get_user(&self, id: i64) -> Result<Option<User>, SolaceError> {
        queries::users::get_user(&self.db, id).await
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, SolaceError> {
        queries::orders::get_order(&self.db, id).await
    }

    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>, SolaceError> {
        queries::tickets::get_ticket(&self.db, id).await
    }

    async fn orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, SolaceError> {
        queries::orders::orders_for_user(&self.db, user_id).await
    }

    async fn tickets_for_order(&self, order_id: i64) -> Result<Vec<Ticket>, SolaceError> {
        queries::tickets::tickets_for_order(&self.db, order_id).await
    }

    async fn tickets_for_user(&self, user_id: i64) -> Result<Vec<Ticket>, SolaceError> {
        queries::tickets::tickets_for_user(&self.db, user_id).await
    }

    async fn list_tickets(
        &self,
        status: Option<TicketStatus>,
    ) -> Result<Vec<Ticket>, SolaceError> {
        queries::tickets::list_tickets(&self.db, status).await
    }

    async fn insert_user(&self, new: NewUser) -> Result<User, SolaceError> {
        queries::users::insert_user(&self.db, new, Self::now()).await
    }

    async fn insert_order(&self, new: NewOrder) -> Result<Order, SolaceError> {
        queries::orders::insert_order(&self.db, new, Self::now()).await
    }

    async fn insert_ticket(&self, new: NewTicket) -> Result<Ticket, SolaceError> {
        queries::tickets::insert_ticket(&self.db, new, Self::now()).await
    }

    async fn update_ticket_status(
        &self,
        id: i64,
        status: TicketStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Ticket>, SolaceError> {
        queries::tickets::update_ticket_status(&self.db, id, status, updated_at).await
    }
}
