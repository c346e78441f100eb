// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic test doubles for the Solace support service.
//!
//! [`MockCompletion`] implements `CompletionProvider` with scripted
//! responses; [`MemoryStore`] implements `RecordStore` over in-process maps
//! with injectable per-entity lookup failures. Both enable fast,
//! CI-runnable tests without external services.

pub mod memory_store;
pub mod mock_provider;

pub use memory_store::{FailKind, MemoryStore};
pub use mock_provider::MockCompletion;
