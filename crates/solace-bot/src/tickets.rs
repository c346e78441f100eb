// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket lifecycle management.
//!
//! All ticket mutations go through [`TicketService`]; nothing else writes
//! ticket rows. Tickets are never deleted.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use solace_core::{NewTicket, RecordStore, SolaceError, Ticket, TicketStatus};
use tracing::info;

/// Result of a successful status transition, exposing the prior status for
/// audit and response purposes (it is not persisted separately).
#[derive(Debug, Clone)]
pub struct TicketTransition {
    pub ticket: Ticket,
    pub previous_status: TicketStatus,
}

/// Validates and applies ticket creation and status transitions.
pub struct TicketService {
    store: Arc<dyn RecordStore>,
}

impl TicketService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Creates a ticket in state `open` against an existing order.
    ///
    /// Fails with NotFound (no write) when the order id does not resolve;
    /// the created ticket has `created_at == updated_at`.
    pub async fn create(
        &self,
        order_id: i64,
        issue_description: &str,
    ) -> Result<Ticket, SolaceError> {
        if issue_description.trim().is_empty() {
            return Err(SolaceError::InvalidInput(
                "issue_description must not be empty".to_string(),
            ));
        }
        if self.store.get_order(order_id).await?.is_none() {
            return Err(SolaceError::NotFound {
                entity: "order",
                id: order_id,
            });
        }

        let ticket = self
            .store
            .insert_ticket(NewTicket {
                order_id,
                issue_description: issue_description.to_string(),
                status: TicketStatus::Open,
            })
            .await?;
        info!(ticket_id = ticket.id, order_id, "ticket created");
        Ok(ticket)
    }

    /// Applies a status transition, stamping `updated_at` to now.
    ///
    /// Any of the four legal statuses is accepted from any current state;
    /// the transition graph is deliberately unrestricted (tightening it,
    /// e.g. forbidding closed -> open, needs product confirmation). Values
    /// outside the legal set are rejected before any mutation.
    pub async fn update_status(
        &self,
        ticket_id: i64,
        status: &str,
    ) -> Result<TicketTransition, SolaceError> {
        let status = TicketStatus::from_str(status).map_err(|_| SolaceError::InvalidStatus {
            given: status.to_string(),
        })?;

        let current = self.store.get_ticket(ticket_id).await?.ok_or(
            SolaceError::NotFound {
                entity: "ticket",
                id: ticket_id,
            },
        )?;

        let updated = self
            .store
            .update_ticket_status(ticket_id, status, Utc::now())
            .await?
            .ok_or(SolaceError::NotFound {
                entity: "ticket",
                id: ticket_id,
            })?;

        info!(
            ticket_id,
            from = %current.status,
            to = %updated.status,
            "ticket status updated"
        );
        Ok(TicketTransition {
            previous_status: current.status,
            ticket: updated,
        })
    }

    /// Fetches a ticket, failing with NotFound when the id does not resolve.
    pub async fn get(&self, ticket_id: i64) -> Result<Ticket, SolaceError> {
        self.store
            .get_ticket(ticket_id)
            .await?
            .ok_or(SolaceError::NotFound {
                entity: "ticket",
                id: ticket_id,
            })
    }

    /// All tickets for an order; the order itself must exist.
    pub async fn for_order(&self, order_id: i64) -> Result<Vec<Ticket>, SolaceError> {
        if self.store.get_order(order_id).await?.is_none() {
            return Err(SolaceError::NotFound {
                entity: "order",
                id: order_id,
            });
        }
        self.store.tickets_for_order(order_id).await
    }

    /// All tickets across a user's orders. A user with no orders simply has
    /// no tickets; that is not an error.
    pub async fn for_user(&self, user_id: i64) -> Result<Vec<Ticket>, SolaceError> {
        self.store.tickets_for_user(user_id).await
    }

    /// All tickets, optionally filtered by a status string.
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Ticket>, SolaceError> {
        let status = match status {
            Some(raw) => Some(TicketStatus::from_str(raw).map_err(|_| {
                SolaceError::InvalidStatus {
                    given: raw.to_string(),
                }
            })?),
            None => None,
        };
        self.store.list_tickets(status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_test_utils::MemoryStore;

    async fn service_with_order() -> (TicketService, Arc<MemoryStore>, i64) {
        let store = Arc::new(MemoryStore::new());
        store
            .put_order(MemoryStore::order_fixture(7, 1, &["Laptop"]))
            .await;
        (TicketService::new(store.clone()), store, 7)
    }

    #[tokio::test]
    async fn create_initializes_open_with_equal_timestamps() {
        let (service, _store, order_id) = service_with_order().await;
        let ticket = service.create(order_id, "item broken").await.unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.order_id, order_id);
        assert_eq!(ticket.created_at, ticket.updated_at);
    }

    #[tokio::test]
    async fn create_against_missing_order_writes_nothing() {
        let (service, store, _order_id) = service_with_order().await;
        let err = service.create(404, "never arrives").await.unwrap_err();
        assert!(matches!(
            err,
            SolaceError::NotFound {
                entity: "order",
                id: 404
            }
        ));
        assert!(store.list_tickets(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_empty_description() {
        let (service, _store, order_id) = service_with_order().await;
        let err = service.create(order_id, "   ").await.unwrap_err();
        assert!(matches!(err, SolaceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn update_rejects_illegal_status_without_mutation() {
        let (service, store, order_id) = service_with_order().await;
        let ticket = service.create(order_id, "scratched lid").await.unwrap();

        let err = service
            .update_status(ticket.id, "escalated")
            .await
            .unwrap_err();
        assert!(matches!(err, SolaceError::InvalidStatus { .. }));
        assert!(err.to_string().contains("open, in_progress, resolved, closed"));

        // No mutation, no timestamp change.
        let unchanged = service.get(ticket.id).await.unwrap();
        assert_eq!(unchanged.status, TicketStatus::Open);
        assert_eq!(unchanged.updated_at, ticket.updated_at);
    }

    #[tokio::test]
    async fn update_exposes_previous_status_and_stamps_updated_at() {
        let (service, _store, order_id) = service_with_order().await;
        let ticket = service.create(order_id, "dead pixel").await.unwrap();

        let transition = service
            .update_status(ticket.id, "in_progress")
            .await
            .unwrap();
        assert_eq!(transition.previous_status, TicketStatus::Open);
        assert_eq!(transition.ticket.status, TicketStatus::InProgress);
        assert!(transition.ticket.updated_at > transition.ticket.created_at);
    }

    #[tokio::test]
    async fn any_legal_status_is_reachable_from_any_state() {
        // The permissive graph: closed -> open is allowed.
        let (service, _store, order_id) = service_with_order().await;
        let ticket = service.create(order_id, "loose hinge").await.unwrap();

        service.update_status(ticket.id, "closed").await.unwrap();
        let reopened = service.update_status(ticket.id, "open").await.unwrap();
        assert_eq!(reopened.previous_status, TicketStatus::Closed);
        assert_eq!(reopened.ticket.status, TicketStatus::Open);
    }

    #[tokio::test]
    async fn update_missing_ticket_is_not_found() {
        let (service, _store, _order_id) = service_with_order().await;
        let err = service.update_status(999, "closed").await.unwrap_err();
        assert!(matches!(
            err,
            SolaceError::NotFound {
                entity: "ticket",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn for_order_requires_the_order_to_exist() {
        let (service, _store, order_id) = service_with_order().await;
        service.create(order_id, "noisy fan").await.unwrap();

        assert_eq!(service.for_order(order_id).await.unwrap().len(), 1);
        assert!(service.for_order(404).await.is_err());
    }

    #[tokio::test]
    async fn list_filters_by_status_and_rejects_bad_filters() {
        let (service, _store, order_id) = service_with_order().await;
        let t1 = service.create(order_id, "a").await.unwrap();
        service.create(order_id, "b").await.unwrap();
        service.update_status(t1.id, "resolved").await.unwrap();

        assert_eq!(service.list(None).await.unwrap().len(), 2);
        assert_eq!(service.list(Some("resolved")).await.unwrap().len(), 1);
        assert!(service.list(Some("bogus")).await.is_err());
    }
}
