// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use strum::Display;

/// Direction/type of an economic movement inside a [`LedgerEntry`].
///
/// `GetBonds`/`LoseBonds` mark pool-share tokens minted or burned by swap
/// pool deposits/withdrawals; everything else is a plain asset movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Deposit,
    Withdraw,
    Borrow,
    Repay,
    Get,
    Lose,
    GetBonds,
    LoseBonds,
    Send,
    Receive,
}

/// One normalized CAAJ ledger entry.
///
/// Entries are value objects: built once by the journal mapper, never
/// mutated afterwards. Every entry produced while decoding one transaction
/// (fee entry included) carries the same `trade_uuid`; entries from
/// different transactions never share one.
///
/// `amount` is an exact decimal string with trailing zeros stripped.
/// `token_original_id` is `None` for the chain's native asset, which has no
/// cross-chain identity mapping. `from`/`to` may be real on-chain addresses
/// or virtual protocol accounts such as `kava_validator` or `fee`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub executed_at: String,
    pub chain: String,
    pub platform: String,
    pub application: String,
    pub transaction_id: String,
    pub trade_uuid: String,
    pub movement: MovementKind,
    pub amount: String,
    pub token_symbol: String,
    pub token_original_id: Option<String>,
    pub symbol_uuid: Option<String>,
    pub from: String,
    pub to: String,
    pub comment: String,
}
