// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample data for local development and demos.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use solace_core::{NewOrder, NewUser, OrderStatus, RecordStore, SolaceError};
use tracing::info;

const SAMPLE_USERS: &[(&str, &str)] = &[
    ("john_doe", "john@example.com"),
    ("jane_smith", "jane@example.com"),
    ("bob_wilson", "bob@example.com"),
    ("alice_brown", "alice@example.com"),
    ("charlie_davis", "charlie@example.com"),
];

const SAMPLE_ITEMS: &[&[&str]] = &[
    &["Laptop", "Mouse", "Keyboard"],
    &["Phone", "Case", "Screen Protector"],
    &["Headphones", "USB Cable"],
    &["Monitor", "HDMI Cable", "Desk Mount"],
    &["Tablet", "Stylus"],
    &["Webcam", "Microphone"],
    &["External SSD", "USB Hub"],
    &["Gaming Chair"],
    &["Desk Lamp", "Cable Organizer"],
    &["Backpack", "Water Bottle"],
];

const ORDER_STATUSES: &[OrderStatus] = &[
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

/// Creates five sample users, each with two to five orders.
///
/// The RNG is seeded with a fixed value so repeated seeding of a fresh
/// database produces the same rows, which keeps demos reproducible.
pub async fn seed_sample_data(store: &dyn RecordStore) -> Result<(), SolaceError> {
    let mut rng = StdRng::seed_from_u64(0x501ace);
    let mut total_orders = 0usize;

    for (username, email) in SAMPLE_USERS {
        let user = store
            .insert_user(NewUser {
                username: (*username).to_string(),
                email: (*email).to_string(),
            })
            .await?;

        let num_orders = rng.gen_range(2..=5);
        for _ in 0..num_orders {
            let items = SAMPLE_ITEMS
                .choose(&mut rng)
                .copied()
                .unwrap_or(&["Laptop"]);
            let status = ORDER_STATUSES
                .choose(&mut rng)
                .copied()
                .unwrap_or(OrderStatus::Pending);

            store
                .insert_order(NewOrder {
                    user_id: user.id,
                    items: items.iter().map(|s| s.to_string()).collect(),
                    status,
                })
                .await?;
            total_orders += 1;
        }
        info!(user_id = user.id, username, "seeded user");
    }

    println!(
        "Seeded {} users and {} orders.",
        SAMPLE_USERS.len(),
        total_orders
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_storage::SqliteStore;

    #[tokio::test]
    async fn seeding_creates_users_with_orders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.db");
        let store = SqliteStore::open(path.to_str().unwrap()).await.unwrap();

        seed_sample_data(&store).await.unwrap();

        for user_id in 1..=5 {
            let user = store.get_user(user_id).await.unwrap().unwrap();
            assert!(!user.username.is_empty());
            let orders = store.orders_for_user(user_id).await.unwrap();
            assert!((2..=5).contains(&orders.len()));
        }
        store.close().await.unwrap();
    }
}
