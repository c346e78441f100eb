// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context assembly for completion requests.
//!
//! Builds the ordered [`ContextBlock`] from static knowledge plus the record
//! lookups selected by the supplied ids. Assembly never fails: a missing
//! record or a failing lookup becomes an inline sentinel section, so one bad
//! lookup never aborts the others. Failures are additionally logged to keep
//! them distinguishable from plain missing rows.

use chrono::{DateTime, SecondsFormat, Utc};
use solace_core::{ContextBlock, Lookup, Order, RecordStore, Ticket};
use tracing::warn;

use crate::knowledge::NO_DOCUMENTS;

/// Assembles grounding context from the record store and static knowledge.
pub struct ContextAssembler<'a> {
    store: &'a dyn RecordStore,
    knowledge: &'a str,
}

impl<'a> ContextAssembler<'a> {
    pub fn new(store: &'a dyn RecordStore, knowledge: &'a str) -> Self {
        Self { store, knowledge }
    }

    /// Build the context block for the given optional record references.
    ///
    /// The static knowledge section is always first and always present;
    /// record sections follow in order/ticket/user order, each only when its
    /// id was supplied. Identical inputs against an unchanged store yield
    /// identical text.
    pub async fn assemble(
        &self,
        order_id: Option<i64>,
        ticket_id: Option<i64>,
        user_id: Option<i64>,
    ) -> ContextBlock {
        let mut block = ContextBlock::new();

        if self.knowledge.trim().is_empty() {
            block.push(NO_DOCUMENTS);
        } else {
            block.push(self.knowledge);
        }

        if let Some(id) = order_id {
            block.push(self.order_section(id).await);
        }
        if let Some(id) = ticket_id {
            block.push(self.ticket_section(id).await);
        }
        if let Some(id) = user_id {
            block.push(self.user_orders_section(id).await);
        }

        block
    }

    async fn order_section(&self, id: i64) -> String {
        match Lookup::from_result(self.store.get_order(id).await) {
            Lookup::Found(order) => format_order(&order),
            Lookup::Missing => format!("Order #{id} not found in system."),
            Lookup::Failed(reason) => {
                warn!(order_id = id, %reason, "order lookup failed during context assembly");
                format!("Error retrieving order #{id} information.")
            }
        }
    }

    async fn ticket_section(&self, id: i64) -> String {
        let ticket = match Lookup::from_result(self.store.get_ticket(id).await) {
            Lookup::Found(ticket) => ticket,
            Lookup::Missing => return format!("Ticket #{id} not found in system."),
            Lookup::Failed(reason) => {
                warn!(ticket_id = id, %reason, "ticket lookup failed during context assembly");
                return format!("Error retrieving ticket #{id} information.");
            }
        };

        // A missing (or unreadable) associated order is not an error for the
        // ticket section; its status just reads as Unknown.
        let order_status = match Lookup::from_result(self.store.get_order(ticket.order_id).await) {
            Lookup::Found(order) => order.status.to_string(),
            Lookup::Missing => "Unknown".to_string(),
            Lookup::Failed(reason) => {
                warn!(
                    ticket_id = id,
                    order_id = ticket.order_id,
                    %reason,
                    "associated order lookup failed during context assembly"
                );
                "Unknown".to_string()
            }
        };

        format_ticket(&ticket, &order_status)
    }

    async fn user_orders_section(&self, id: i64) -> String {
        let orders = match self.store.orders_for_user(id).await {
            Ok(orders) => orders,
            Err(reason) => {
                warn!(user_id = id, %reason, "user orders scan failed during context assembly");
                return format!("Error retrieving orders for user #{id}.");
            }
        };

        if orders.is_empty() {
            return format!("No orders found for user #{id}.");
        }

        let mut section = format!("User #{id} has {} order(s):\n", orders.len());
        for order in &orders {
            section.push_str(&format!(
                "\n- Order #{}: {} - {} item(s) - Created: {}",
                order.id,
                order.status,
                order.items.len(),
                format_ts(&order.created_at),
            ));
        }
        section
    }
}

fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn format_order(order: &Order) -> String {
    format!(
        "Order Information:\n\
         - Order ID: {}\n\
         - User ID: {}\n\
         - Items: {}\n\
         - Status: {}\n\
         - Created: {}\n\
         - Last Updated: {}",
        order.id,
        order.user_id,
        order.items.join(", "),
        order.status,
        format_ts(&order.created_at),
        format_ts(&order.updated_at),
    )
}

fn format_ticket(ticket: &Ticket, order_status: &str) -> String {
    format!(
        "Support Ticket Information:\n\
         - Ticket ID: {}\n\
         - Order ID: {}\n\
         - Order Status: {}\n\
         - Issue: {}\n\
         - Ticket Status: {}\n\
         - Created: {}\n\
         - Last Updated: {}",
        ticket.id,
        ticket.order_id,
        order_status,
        ticket.issue_description,
        ticket.status,
        format_ts(&ticket.created_at),
        format_ts(&ticket.updated_at),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_test_utils::{FailKind, MemoryStore};

    const KNOWLEDGE: &str = "=== SUPPORT GUIDE ===\nBe kind.";

    #[tokio::test]
    async fn no_ids_yields_only_the_knowledge_section() {
        let store = MemoryStore::new();
        let assembler = ContextAssembler::new(&store, KNOWLEDGE);
        let block = assembler.assemble(None, None, None).await;
        assert_eq!(block.sections(), &[KNOWLEDGE.to_string()]);
    }

    #[tokio::test]
    async fn empty_knowledge_falls_back_to_placeholder() {
        let store = MemoryStore::new();
        let assembler = ContextAssembler::new(&store, "");
        let block = assembler.assemble(None, None, None).await;
        assert_eq!(block.sections(), &[NO_DOCUMENTS.to_string()]);
    }

    #[tokio::test]
    async fn missing_order_emits_not_found_sentinel() {
        let store = MemoryStore::new();
        let assembler = ContextAssembler::new(&store, KNOWLEDGE);
        let block = assembler.assemble(Some(42), None, None).await;
        assert_eq!(block.sections()[1], "Order #42 not found in system.");
    }

    #[tokio::test]
    async fn found_order_section_lists_items_and_status() {
        let store = MemoryStore::new();
        store
            .put_order(MemoryStore::order_fixture(7, 3, &["Laptop", "Mouse"]))
            .await;
        let assembler = ContextAssembler::new(&store, KNOWLEDGE);
        let block = assembler.assemble(Some(7), None, None).await;
        let section = &block.sections()[1];
        assert!(section.contains("- Order ID: 7"));
        assert!(section.contains("- User ID: 3"));
        assert!(section.contains("- Items: Laptop, Mouse"));
        assert!(section.contains("- Status: processing"));
    }

    #[tokio::test]
    async fn failing_order_lookup_degrades_to_error_sentinel() {
        let store = MemoryStore::new();
        store.set_failing(FailKind::Orders, true);
        let assembler = ContextAssembler::new(&store, KNOWLEDGE);
        let block = assembler.assemble(Some(5), None, None).await;
        assert_eq!(
            block.sections()[1],
            "Error retrieving order #5 information."
        );
    }

    #[tokio::test]
    async fn ticket_with_missing_order_reports_unknown_status() {
        let store = MemoryStore::new();
        store
            .put_ticket(MemoryStore::ticket_fixture(9, 404, "box arrived empty"))
            .await;
        let assembler = ContextAssembler::new(&store, KNOWLEDGE);
        let block = assembler.assemble(None, Some(9), None).await;
        let section = &block.sections()[1];
        assert!(section.contains("- Order Status: Unknown"));
        assert!(section.contains("- Issue: box arrived empty"));
        assert!(section.contains("- Ticket Status: open"));
    }

    #[tokio::test]
    async fn user_with_no_orders_emits_sentinel() {
        let store = MemoryStore::new();
        let assembler = ContextAssembler::new(&store, KNOWLEDGE);
        let block = assembler.assemble(None, None, Some(11)).await;
        assert_eq!(block.sections()[1], "No orders found for user #11.");
    }

    #[tokio::test]
    async fn user_orders_section_has_header_and_one_line_per_order() {
        let store = MemoryStore::new();
        store
            .put_order(MemoryStore::order_fixture(1, 11, &["Tablet", "Stylus"]))
            .await;
        store
            .put_order(MemoryStore::order_fixture(2, 11, &["Webcam"]))
            .await;
        let assembler = ContextAssembler::new(&store, KNOWLEDGE);
        let block = assembler.assemble(None, None, Some(11)).await;
        let section = &block.sections()[1];
        assert!(section.starts_with("User #11 has 2 order(s):\n"));
        assert!(section.contains("- Order #1: processing - 2 item(s) - Created:"));
        assert!(section.contains("- Order #2: processing - 1 item(s) - Created:"));
    }

    #[tokio::test]
    async fn one_failing_lookup_does_not_abort_siblings() {
        let store = MemoryStore::new();
        store
            .put_order(MemoryStore::order_fixture(1, 11, &["Gaming Chair"]))
            .await;
        store.set_failing(FailKind::Tickets, true);
        let assembler = ContextAssembler::new(&store, KNOWLEDGE);
        let block = assembler.assemble(Some(1), Some(2), Some(11)).await;
        assert_eq!(block.sections().len(), 4);
        assert!(block.sections()[1].contains("- Order ID: 1"));
        assert_eq!(
            block.sections()[2],
            "Error retrieving ticket #2 information."
        );
        assert!(block.sections()[3].starts_with("User #11 has 1 order(s):"));
    }

    #[tokio::test]
    async fn assembly_is_deterministic_for_unchanged_store() {
        let store = MemoryStore::new();
        store
            .put_order(MemoryStore::order_fixture(1, 11, &["Desk Lamp"]))
            .await;
        let assembler = ContextAssembler::new(&store, KNOWLEDGE);
        let first = assembler.assemble(Some(1), Some(2), Some(11)).await;
        let second = assembler.assemble(Some(1), Some(2), Some(11)).await;
        assert_eq!(first.text(), second.text());
    }
}
