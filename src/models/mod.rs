// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

//! # Data Models
//!
//! Value objects exchanged across the decode pipeline.
//!
//! ## Components
//!
//! ### Journal (`journal`)
//! - [`LedgerEntry`](journal::LedgerEntry): one normalized economic movement
//!   (who gained/lost what, how much, why), constructed once and handed to
//!   the external sink
//! - [`MovementKind`](journal::MovementKind): the closed set of movement
//!   types an entry can carry
//!
//! ### Transaction surface (`transaction`)
//! - [`KavaTransaction`](transaction::KavaTransaction): read-only wrapper
//!   over the raw JSON transaction tree delivered by the retrieval layer
//! - [`Message`](transaction::Message): one message's bucket of log events
//!   plus its originating message payload
//! - [`TokenLookup`](transaction::TokenLookup): injected symbol-uuid lookup
//!   collaborator

/// Normalized ledger entry records and movement kinds
pub mod journal;

/// Raw transaction wrapper, events, messages and the token lookup trait
pub mod transaction;
