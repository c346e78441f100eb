// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory record store for deterministic testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use solace_core::{
    NewOrder, NewTicket, NewUser, Order, RecordStore, SolaceError, Ticket, TicketStatus, User,
};
use tokio::sync::Mutex;

/// Which entity's lookups should fail, for degradation tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailKind {
    Orders,
    Tickets,
    Users,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    orders: BTreeMap<i64, Order>,
    tickets: BTreeMap<i64, Ticket>,
    next_id: i64,
}

/// `RecordStore` backed by in-process maps.
///
/// Ids are assigned sequentially across all entities; scans return id order,
/// which is stable for an unchanged store (matching the trait contract).
/// Timestamps are fixed to a deterministic epoch so assembled context text
/// is reproducible across runs.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_orders: AtomicBool,
    fail_tickets: AtomicBool,
    fail_users: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables {
                next_id: 1,
                ..Tables::default()
            }),
            fail_orders: AtomicBool::new(false),
            fail_tickets: AtomicBool::new(false),
            fail_users: AtomicBool::new(false),
        }
    }

    /// The fixed timestamp stamped on every record.
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    /// Make lookups of one entity kind fail with a storage error.
    pub fn set_failing(&self, kind: FailKind, failing: bool) {
        let flag = match kind {
            FailKind::Orders => &self.fail_orders,
            FailKind::Tickets => &self.fail_tickets,
            FailKind::Users => &self.fail_users,
        };
        flag.store(failing, Ordering::SeqCst);
    }

    fn check(&self, kind: FailKind) -> Result<(), SolaceError> {
        let failing = match kind {
            FailKind::Orders => self.fail_orders.load(Ordering::SeqCst),
            FailKind::Tickets => self.fail_tickets.load(Ordering::SeqCst),
            FailKind::Users => self.fail_users.load(Ordering::SeqCst),
        };
        if failing {
            return Err(SolaceError::Storage {
                source: "injected store failure".into(),
            });
        }
        Ok(())
    }

    /// Insert an order with an explicit id (test fixture convenience).
    pub async fn put_order(&self, order: Order) {
        let mut tables = self.tables.lock().await;
        tables.next_id = tables.next_id.max(order.id + 1);
        tables.orders.insert(order.id, order);
    }

    /// Insert a ticket with an explicit id (test fixture convenience).
    pub async fn put_ticket(&self, ticket: Ticket) {
        let mut tables = self.tables.lock().await;
        tables.next_id = tables.next_id.max(ticket.id + 1);
        tables.tickets.insert(ticket.id, ticket);
    }

    /// Builds a plain order fixture owned by `user_id`.
    pub fn order_fixture(id: i64, user_id: i64, items: &[&str]) -> Order {
        Order {
            id,
            user_id,
            items: items.iter().map(|s| s.to_string()).collect(),
            status: solace_core::OrderStatus::Processing,
            created_at: Self::epoch(),
            updated_at: Self::epoch(),
        }
    }

    /// Builds a plain open-ticket fixture against `order_id`.
    pub fn ticket_fixture(id: i64, order_id: i64, issue: &str) -> Ticket {
        Ticket {
            id,
            order_id,
            issue_description: issue.to_string(),
            status: TicketStatus::Open,
            created_at: Self::epoch(),
            updated_at: Self::epoch(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_user(&self, id: i64) -> Result<Option<User>, SolaceError> {
        self.check(FailKind::Users)?;
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, SolaceError> {
        self.check(FailKind::Orders)?;
        Ok(self.tables.lock().await.orders.get(&id).cloned())
    }

    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>, SolaceError> {
        self.check(FailKind::Tickets)?;
        Ok(self.tables.lock().await.tickets.get(&id).cloned())
    }

    async fn orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, SolaceError> {
        self.check(FailKind::Orders)?;
        Ok(self
            .tables
            .lock()
            .await
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn tickets_for_order(&self, order_id: i64) -> Result<Vec<Ticket>, SolaceError> {
        self.check(FailKind::Tickets)?;
        Ok(self
            .tables
            .lock()
            .await
            .tickets
            .values()
            .filter(|t| t.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn tickets_for_user(&self, user_id: i64) -> Result<Vec<Ticket>, SolaceError> {
        self.check(FailKind::Tickets)?;
        let tables = self.tables.lock().await;
        let order_ids: Vec<i64> = tables
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .map(|o| o.id)
            .collect();
        Ok(tables
            .tickets
            .values()
            .filter(|t| order_ids.contains(&t.order_id))
            .cloned()
            .collect())
    }

    async fn list_tickets(
        &self,
        status: Option<TicketStatus>,
    ) -> Result<Vec<Ticket>, SolaceError> {
        self.check(FailKind::Tickets)?;
        Ok(self
            .tables
            .lock()
            .await
            .tickets
            .values()
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect())
    }

    async fn insert_user(&self, new: NewUser) -> Result<User, SolaceError> {
        self.check(FailKind::Users)?;
        let mut tables = self.tables.lock().await;
        let id = tables.next_id;
        tables.next_id += 1;
        let user = User {
            id,
            username: new.username,
            email: new.email,
            is_active: true,
            created_at: Self::epoch(),
            updated_at: Self::epoch(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn insert_order(&self, new: NewOrder) -> Result<Order, SolaceError> {
        self.check(FailKind::Orders)?;
        let mut tables = self.tables.lock().await;
        let id = tables.next_id;
        tables.next_id += 1;
        let order = Order {
            id,
            user_id: new.user_id,
            items: new.items,
            status: new.status,
            created_at: Self::epoch(),
            updated_at: Self::epoch(),
        };
        tables.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn insert_ticket(&self, new: NewTicket) -> Result<Ticket, SolaceError> {
        self.check(FailKind::Tickets)?;
        let mut tables = self.tables.lock().await;
        let id = tables.next_id;
        tables.next_id += 1;
        let ticket = Ticket {
            id,
            order_id: new.order_id,
            issue_description: new.issue_description,
            status: new.status,
            created_at: Self::epoch(),
            updated_at: Self::epoch(),
        };
        tables.tickets.insert(id, ticket.clone());
        Ok(ticket)
    }

    async fn update_ticket_status(
        &self,
        id: i64,
        status: TicketStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Ticket>, SolaceError> {
        self.check(FailKind::Tickets)?;
        let mut tables = self.tables.lock().await;
        Ok(tables.tickets.get_mut(&id).map(|ticket| {
            ticket.status = status;
            ticket.updated_at = updated_at;
            ticket.clone()
        }))
    }
}
