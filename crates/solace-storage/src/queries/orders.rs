// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order CRUD operations.

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};
use solace_core::{NewOrder, Order, SolaceError};

use crate::database::{Database, map_tr_err};
use crate::queries::{enum_from_sql, items_from_sql, ts_from_sql, ts_to_sql};

fn map_order_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(0)?,
        user_id: row.get(1)?,
        items: items_from_sql(2, &row.get::<_, String>(2)?)?,
        status: enum_from_sql(3, &row.get::<_, String>(3)?)?,
        created_at: ts_from_sql(4, &row.get::<_, String>(4)?)?,
        updated_at: ts_from_sql(5, &row.get::<_, String>(5)?)?,
    })
}

const ORDER_COLUMNS: &str = "id, user_id, items, status, created_at, updated_at";

/// Insert a new order with equal created/updated timestamps.
pub async fn insert_order(
    db: &Database,
    new: NewOrder,
    now: DateTime<Utc>,
) -> Result<Order, SolaceError> {
    let items_json = serde_json::to_string(&new.items).map_err(|e| SolaceError::Storage {
        source: Box::new(e),
    })?;
    let user_id = new.user_id;
    let status = new.status.to_string();
    let ts = ts_to_sql(&now);
    let id = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO orders (user_id, items, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![user_id, items_json, status, ts],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(Order {
        id,
        user_id: new.user_id,
        items: new.items,
        status: new.status,
        created_at: now,
        updated_at: now,
    })
}

/// Get an order by id.
pub async fn get_order(db: &Database, id: i64) -> Result<Option<Order>, SolaceError> {
    db.connection()
        .call(move |conn| {
            let order = conn
                .query_row(
                    &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"),
                    params![id],
                    map_order_row,
                )
                .optional()?;
            Ok(order)
        })
        .await
        .map_err(map_tr_err)
}

/// All orders owned by a user, in insertion (rowid) order.
pub async fn orders_for_user(db: &Database, user_id: i64) -> Result<Vec<Order>, SolaceError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ?1 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![user_id], map_order_row)?;
            let mut orders = Vec::new();
            for row in rows {
                orders.push(row?);
            }
            Ok(orders)
        })
        .await
        .map_err(map_tr_err)
}
