// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

use crate::errors::ProcessorError;
use crate::models::transaction::Event;
use crate::utils::event::{first_attribute_value, first_event_of_type};

use super::constants::{CREATE_ATOMIC_SWAP_EVENT_TYPE, MESSAGE_EVENT_TYPE, TRANSFER_EVENT_TYPE};
use super::{lex_attribute, lex_attribute_default_scale, TokenAmount};

/// Facts of a value transfer (bank send or BEP3 atomic swap leg).
///
/// Direction is not decided here: the journal mapper compares the decoding
/// address against `sender`/`recipient`, and a fact involving neither side
/// simply yields no entries.
#[derive(Debug, Clone)]
pub struct TransferFact {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub transfer: Option<TokenAmount>,
}

/// Bank send: sender sits on the `message` event, recipient and amount on
/// the `transfer` event. Send amounts scale by the default divisor.
pub fn send(events: &[Event]) -> Result<TransferFact, ProcessorError> {
    let sender = first_event_of_type(events, MESSAGE_EVENT_TYPE)
        .map(|e| first_attribute_value(&e.attributes, "sender"))
        .transpose()?
        .map(str::to_string);

    let mut recipient = None;
    let mut transfer = None;
    if let Some(event) = first_event_of_type(events, TRANSFER_EVENT_TYPE) {
        recipient = Some(first_attribute_value(&event.attributes, "recipient")?.to_string());
        transfer = Some(lex_attribute_default_scale(event, "amount")?);
    }

    Ok(TransferFact {
        sender,
        recipient,
        transfer,
    })
}

/// BEP3 swap creation: sender from the `create_atomic_swap` event,
/// recipient and escrowed amount from the `transfer` event.
pub fn create_atomic_swap(events: &[Event]) -> Result<TransferFact, ProcessorError> {
    let sender = first_event_of_type(events, CREATE_ATOMIC_SWAP_EVENT_TYPE)
        .map(|e| first_attribute_value(&e.attributes, "sender"))
        .transpose()?
        .map(str::to_string);

    let mut recipient = None;
    let mut transfer = None;
    if let Some(event) = first_event_of_type(events, TRANSFER_EVENT_TYPE) {
        recipient = Some(first_attribute_value(&event.attributes, "recipient")?.to_string());
        transfer = Some(lex_attribute(event, "amount")?);
    }

    Ok(TransferFact {
        sender,
        recipient,
        transfer,
    })
}

/// BEP3 claim or refund: everything sits on the `transfer` event.
pub fn claim_atomic_swap(events: &[Event]) -> Result<TransferFact, ProcessorError> {
    let Some(event) = first_event_of_type(events, TRANSFER_EVENT_TYPE) else {
        return Ok(TransferFact {
            sender: None,
            recipient: None,
            transfer: None,
        });
    };
    Ok(TransferFact {
        sender: Some(first_attribute_value(&event.attributes, "sender")?.to_string()),
        recipient: Some(first_attribute_value(&event.attributes, "recipient")?.to_string()),
        transfer: Some(lex_attribute(event, "amount")?),
    })
}
