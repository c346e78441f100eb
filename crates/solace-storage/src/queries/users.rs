// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User CRUD operations.

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};
use solace_core::{NewUser, SolaceError, User};

use crate::database::{Database, map_tr_err};
use crate::queries::{ts_from_sql, ts_to_sql};

fn map_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        is_active: row.get(3)?,
        created_at: ts_from_sql(4, &row.get::<_, String>(4)?)?,
        updated_at: ts_from_sql(5, &row.get::<_, String>(5)?)?,
    })
}

const USER_COLUMNS: &str = "id, username, email, is_active, created_at, updated_at";

/// Insert a new user with equal created/updated timestamps.
pub async fn insert_user(
    db: &Database,
    new: NewUser,
    now: DateTime<Utc>,
) -> Result<User, SolaceError> {
    let username = new.username.clone();
    let email = new.email.clone();
    let ts = ts_to_sql(&now);
    let id = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (username, email, is_active, created_at, updated_at)
                 VALUES (?1, ?2, 1, ?3, ?3)",
                params![username, email, ts],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(User {
        id,
        username: new.username,
        email: new.email,
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

/// Get a user by id.
pub async fn get_user(db: &Database, id: i64) -> Result<Option<User>, SolaceError> {
    db.connection()
        .call(move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                    params![id],
                    map_user_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn insert_and_get_user() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("test.db").to_str().unwrap())
            .await
            .unwrap();

        let now = Utc::now();
        let created = insert_user(
            &db,
            NewUser {
                username: "john_doe".to_string(),
                email: "john@example.com".to_string(),
            },
            now,
        )
        .await
        .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = get_user(&db, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "john_doe");
        assert!(fetched.is_active);

        assert!(get_user(&db, 9999).await.unwrap().is_none());
        db.close().await.unwrap();
    }
}
