// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

//! # Transaction Decode Processors
//!
//! This module contains the core decoding logic that turns raw Kava
//! transactions into normalized ledger entries.
//!
//! ## Main Components
//!
//! ### `kava_processor`
//! The orchestrator. It owns the per-transaction workflow:
//! - Failure short-circuit (failed transactions journal at most their fee)
//! - Splitting the transaction into per-message event buckets
//! - Classify/extract/map per message, in on-chain order
//! - The trailing transaction-fee entry
//!
//! ### `actions`
//! Action classification and fact extraction, one extractor module per
//! protocol family:
//! - **Staking**: delegate, begin unbonding, reward withdrawal
//! - **CDP**: create, draw, repay, deposit, withdraw, USDX minting reward
//! - **Hard**: money-market deposits, withdrawals, borrows and repays
//! - **Swap**: exact-for-tokens trades and pool share movements
//! - **Transfer**: bank sends and BEP3 atomic swap legs
//!
//! ### `journal`
//! The journal mapper: fixed per-action templates expanding extracted
//! facts into ledger entries.
//!
//! ## Data Flow
//!
//! ```text
//! KavaTransaction → Message buckets → classify → ActionFact
//!                                                    ↓
//!                     Vec<LedgerEntry> ← journal templates
//! ```
//!
//! Each action kind has exactly one extractor and one template, so new
//! chain behavior lands as one variant plus one pair of functions.

pub mod actions;
pub mod journal;
pub mod kava_processor;
