// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

//! # Kava Transaction Journal Processor
//!
//! Decodes raw Kava blockchain transactions into normalized CAAJ ledger
//! entries ("crypto-asset accounting journal" records) suitable for
//! downstream accounting aggregation.
//!
//! ## Pipeline
//!
//! ```text
//! KavaTransaction → Message factory → classify() → ActionFact
//!                                                      ↓
//!                   Vec<LedgerEntry> ← Journal Mapper ←┘
//! ```
//!
//! Decoding is a pure, synchronous two-stage pass over immutable inputs:
//!
//! 1. **Classification & extraction**: each message's `message` event names
//!    an economic action (with legacy aliases across chain versions); a
//!    per-action extractor pulls token/amount pairs and addresses out of the
//!    message's event-attribute lists into a typed [`ActionFact`].
//! 2. **Journal mapping**: each fact is expanded into zero or more
//!    [`LedgerEntry`] records following fixed per-action templates (movement
//!    type, virtual counterparty accounts, narration), all sharing one trade
//!    id per transaction.
//!
//! Amounts use exact [`bigdecimal`] arithmetic throughout; binary floating
//! point is never involved.
//!
//! [`ActionFact`]: processors::actions::ActionFact
//! [`LedgerEntry`]: models::journal::LedgerEntry

/// Error taxonomy shared across the decode pipeline
pub mod errors;

/// Data models: ledger entries and the raw transaction surface
pub mod models;

/// Transaction, classification and journal-mapping processors
pub mod processors;

/// Event-attribute access and amount-lexing utilities
pub mod utils;
