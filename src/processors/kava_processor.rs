// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

//! Orchestrates the decode of one transaction: failure short-circuit,
//! per-message classify/extract/map in on-chain order, then the trailing
//! fee entry. All entries of a transaction share one freshly minted trade
//! uuid so downstream consumers can group them.

use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ProcessorError;
use crate::models::journal::LedgerEntry;
use crate::models::transaction::{KavaTransaction, Message, TokenLookup};
use crate::processors::actions::classify;
use crate::processors::journal::{entries_for_fact, fee_entry, JournalContext};

pub struct KavaProcessor;

impl KavaProcessor {
    /// Whether a transaction belongs to a network this processor decodes.
    pub fn can_handle(transaction: &KavaTransaction) -> bool {
        transaction.get_chain_id().contains("kava")
    }

    /// Decodes one transaction into the ledger entries relevant to
    /// `address`.
    ///
    /// A failed transaction skips message decode entirely but still burned
    /// its fee, so at most the fee entry comes out. Messages are processed
    /// in on-chain order and an action string the classifier does not know
    /// aborts the whole transaction; a message without an action contributes
    /// no entries.
    pub fn process(
        address: &str,
        transaction: &KavaTransaction,
        token_lookup: &dyn TokenLookup,
    ) -> Result<Vec<LedgerEntry>, ProcessorError> {
        let trade_uuid = Uuid::new_v4().to_string();
        let ctx = JournalContext {
            transaction,
            token_lookup,
            address,
            trade_uuid: &trade_uuid,
        };

        let mut entries = Vec::new();
        if transaction.get_fail() {
            info!(
                transaction_id = transaction.get_transaction_id(),
                "transaction failed on-chain, journaling only the fee"
            );
        } else {
            for message in Message::from_transaction(transaction)? {
                let fact = classify(&message)?;
                entries.extend(entries_for_fact(&ctx, &fact));
            }
        }

        entries.extend(fee_entry(&ctx, &transaction.get_transaction_fee()));
        debug!(
            transaction_id = transaction.get_transaction_id(),
            entries = entries.len(),
            "decoded transaction"
        );
        Ok(entries)
    }
}
