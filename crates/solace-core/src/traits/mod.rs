// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits implemented by the storage and provider crates.

pub mod provider;
pub mod store;
