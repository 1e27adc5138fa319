// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::error;

use crate::errors::ProcessorError;

/// One key/value pair inside an event's attribute list.
///
/// Keys may repeat within a single event and the order is significant:
/// positional decoding (e.g. the paired `amount` entries of a CDP repay)
/// depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// One typed event with its ordered attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub attributes: Vec<Attribute>,
}

/// One transaction message: its bucket of log events, the originating
/// message payload (schema varies across chain versions, kept opaque), and
/// positional context. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Message {
    pub log_events: Vec<Event>,
    pub message_event: Value,
    pub height: u64,
    pub chain_id: String,
}

impl Message {
    /// Splits a transaction into its per-message event buckets.
    ///
    /// Log events come from `data.logs[].events` (one bucket per message);
    /// the originating messages live under `data.tx.value.msg` up to chain
    /// version 8 and `data.tx.body.messages` from version 9 on. A
    /// transaction without a readable log structure is malformed and aborts
    /// the whole decode.
    pub fn from_transaction(transaction: &KavaTransaction) -> Result<Vec<Message>, ProcessorError> {
        let tree = transaction.get_transaction();
        let data = &tree["data"];

        let logs = data.get("logs").and_then(Value::as_array).ok_or_else(|| {
            error!(
                transaction_id = transaction.get_transaction_id(),
                "cannot read log events from transaction"
            );
            ProcessorError::MalformedTransaction {
                reason: "data.logs is missing or not an array".to_string(),
            }
        })?;

        let message_events = if transaction.get_chain_version() < 9 {
            &data["tx"]["value"]["msg"]
        } else {
            &data["tx"]["body"]["messages"]
        };

        let height = value_as_u64(&data["height"]);
        let chain_id = transaction.get_chain_id().to_string();

        let mut messages = Vec::with_capacity(logs.len());
        for (i, log) in logs.iter().enumerate() {
            let events: Vec<Event> = serde_json::from_value(log["events"].clone()).map_err(|e| {
                ProcessorError::MalformedTransaction {
                    reason: format!("data.logs[{i}].events does not decode: {e}"),
                }
            })?;
            messages.push(Message {
                log_events: events,
                message_event: message_events.get(i).cloned().unwrap_or(Value::Null),
                height,
                chain_id: chain_id.clone(),
            });
        }

        Ok(messages)
    }
}

/// Read-only wrapper over the raw JSON transaction tree handed over by the
/// retrieval layer. All accessors are total; absent fields degrade to
/// neutral values (`""`, `0`) rather than panicking.
#[derive(Debug, Clone)]
pub struct KavaTransaction {
    transaction: Value,
}

impl KavaTransaction {
    pub fn new(transaction: Value) -> Self {
        Self { transaction }
    }

    pub fn get_transaction(&self) -> &Value {
        &self.transaction
    }

    /// Whether the transaction failed on-chain (`data.code` non-zero).
    /// Failed transactions still burned their fee but produced no effects.
    pub fn get_fail(&self) -> bool {
        value_as_u64(&self.transaction["data"]["code"]) != 0
    }

    /// Raw (unscaled) fee magnitude. Fee placement follows the tx schema
    /// version: `data.tx.value.fee` before chain version 9,
    /// `data.tx.auth_info.fee` afterwards.
    pub fn get_transaction_fee(&self) -> BigDecimal {
        let fee = if self.get_chain_version() < 9 {
            &self.transaction["data"]["tx"]["value"]["fee"]["amount"]
        } else {
            &self.transaction["data"]["tx"]["auth_info"]["fee"]["amount"]
        };
        fee.get(0)
            .map(|coin| &coin["amount"])
            .and_then(value_as_decimal)
            .unwrap_or_default()
    }

    pub fn get_timestamp(&self) -> &str {
        self.transaction["header"]["timestamp"]
            .as_str()
            .unwrap_or_default()
    }

    pub fn get_transaction_id(&self) -> &str {
        self.transaction["data"]["txhash"]
            .as_str()
            .unwrap_or_default()
    }

    pub fn get_chain_id(&self) -> &str {
        self.transaction["header"]["chain_id"]
            .as_str()
            .unwrap_or_default()
    }

    /// Chain version parsed from the numeric suffix of the chain id
    /// (`kava-8` → 8). Unparseable ids fall back to 0, which selects the
    /// legacy message schema.
    pub fn get_chain_version(&self) -> u32 {
        self.get_chain_id()
            .rsplit('-')
            .next()
            .and_then(|suffix| suffix.parse().ok())
            .unwrap_or(0)
    }
}

/// Injected token-identity collaborator resolving a token's original id to
/// the opaque symbol uuid used by the external symbol/price service.
/// Implementations must be reentrant: the processor only ever holds a
/// shared reference.
pub trait TokenLookup {
    fn get_symbol_uuid(&self, chain: &str, token_original_id: Option<&str>) -> Option<String>;
}

fn value_as_u64(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

fn value_as_decimal(value: &Value) -> Option<BigDecimal> {
    match value {
        Value::Number(n) => BigDecimal::from_str(&n.to_string()).ok(),
        Value::String(s) => BigDecimal::from_str(s).ok(),
        _ => None,
    }
}
