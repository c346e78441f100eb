// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket CRUD operations.

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};
use solace_core::{NewTicket, SolaceError, Ticket, TicketStatus};

use crate::database::{Database, map_tr_err};
use crate::queries::{enum_from_sql, ts_from_sql, ts_to_sql};

fn map_ticket_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(0)?,
        order_id: row.get(1)?,
        issue_description: row.get(2)?,
        status: enum_from_sql(3, &row.get::<_, String>(3)?)?,
        created_at: ts_from_sql(4, &row.get::<_, String>(4)?)?,
        updated_at: ts_from_sql(5, &row.get::<_, String>(5)?)?,
    })
}

const TICKET_COLUMNS: &str = "id, order_id, issue_description, status, created_at, updated_at";

/// Insert a new ticket with equal created/updated timestamps.
pub async fn insert_ticket(
    db: &Database,
    new: NewTicket,
    now: DateTime<Utc>,
) -> Result<Ticket, SolaceError> {
    let order_id = new.order_id;
    let description = new.issue_description.clone();
    let status = new.status.to_string();
    let ts = ts_to_sql(&now);
    let id = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO tickets (order_id, issue_description, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![order_id, description, status, ts],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(Ticket {
        id,
        order_id: new.order_id,
        issue_description: new.issue_description,
        status: new.status,
        created_at: now,
        updated_at: now,
    })
}

/// Get a ticket by id.
pub async fn get_ticket(db: &Database, id: i64) -> Result<Option<Ticket>, SolaceError> {
    db.connection()
        .call(move |conn| {
            let ticket = conn
                .query_row(
                    &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
                    params![id],
                    map_ticket_row,
                )
                .optional()?;
            Ok(ticket)
        })
        .await
        .map_err(map_tr_err)
}

/// All tickets raised against an order, in insertion order.
pub async fn tickets_for_order(db: &Database, order_id: i64) -> Result<Vec<Ticket>, SolaceError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TICKET_COLUMNS} FROM tickets WHERE order_id = ?1 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![order_id], map_ticket_row)?;
            let mut tickets = Vec::new();
            for row in rows {
                tickets.push(row?);
            }
            Ok(tickets)
        })
        .await
        .map_err(map_tr_err)
}

/// All tickets across every order owned by a user.
pub async fn tickets_for_user(db: &Database, user_id: i64) -> Result<Vec<Ticket>, SolaceError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT t.id, t.order_id, t.issue_description, t.status, t.created_at, t.updated_at
                 FROM tickets t JOIN orders o ON o.id = t.order_id
                 WHERE o.user_id = ?1 ORDER BY t.id ASC",
            )?;
            let rows = stmt.query_map(params![user_id], map_ticket_row)?;
            let mut tickets = Vec::new();
            for row in rows {
                tickets.push(row?);
            }
            Ok(tickets)
        })
        .await
        .map_err(map_tr_err)
}

/// All tickets, optionally filtered by status.
pub async fn list_tickets(
    db: &Database,
    status: Option<TicketStatus>,
) -> Result<Vec<Ticket>, SolaceError> {
    db.connection()
        .call(move |conn| {
            let mut tickets = Vec::new();
            match status {
                Some(status) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {TICKET_COLUMNS} FROM tickets WHERE status = ?1 ORDER BY id ASC"
                    ))?;
                    let rows = stmt.query_map(params![status.to_string()], map_ticket_row)?;
                    for row in rows {
                        tickets.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {TICKET_COLUMNS} FROM tickets ORDER BY id ASC"
                    ))?;
                    let rows = stmt.query_map([], map_ticket_row)?;
                    for row in rows {
                        tickets.push(row?);
                    }
                }
            }
            Ok(tickets)
        })
        .await
        .map_err(map_tr_err)
}

/// Set a ticket's status and `updated_at` in a single statement.
///
/// Returns the updated row, or `Ok(None)` when the id does not resolve.
/// The update and the re-read run inside one writer-thread call, so no
/// concurrent status change can interleave between them.
pub async fn update_ticket_status(
    db: &Database,
    id: i64,
    status: TicketStatus,
    updated_at: DateTime<Utc>,
) -> Result<Option<Ticket>, SolaceError> {
    let ts = ts_to_sql(&updated_at);
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE tickets SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.to_string(), ts, id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            let ticket = conn
                .query_row(
                    &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
                    params![id],
                    map_ticket_row,
                )
                .optional()?;
            Ok(ticket)
        })
        .await
        .map_err(map_tr_err)
}
