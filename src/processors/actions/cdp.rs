// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

use crate::errors::ProcessorError;
use crate::models::transaction::Event;
use crate::utils::amount::{scale_to_decimal, split_amount};
use crate::utils::event::{attribute_values, first_event_of_type};

use super::constants::{CDP_DEPOSIT_EVENT_TYPE, CDP_DRAW_EVENT_TYPE, TRANSFER_EVENT_TYPE};
use super::{lex_attribute, TokenAmount};

/// Opening a CDP deposits collateral and draws debt in one message.
#[derive(Debug, Clone)]
pub struct CreateCdpFact {
    pub deposit: Option<TokenAmount>,
    pub draw: Option<TokenAmount>,
}

/// A repay may close enough debt to release collateral in the same message.
/// `withdraw` is `None` when nothing was released, which is distinct from a
/// zero-amount withdrawal.
#[derive(Debug, Clone)]
pub struct RepayCdpFact {
    pub repay: Option<TokenAmount>,
    pub withdraw: Option<TokenAmount>,
}

pub fn create_cdp(events: &[Event]) -> Result<CreateCdpFact, ProcessorError> {
    let deposit = match first_event_of_type(events, CDP_DEPOSIT_EVENT_TYPE) {
        Some(event) => Some(lex_attribute(event, "amount")?),
        None => None,
    };
    let draw = match first_event_of_type(events, CDP_DRAW_EVENT_TYPE) {
        Some(event) => Some(lex_attribute(event, "amount")?),
        None => None,
    };
    Ok(CreateCdpFact { deposit, draw })
}

pub fn draw_cdp(events: &[Event]) -> Result<Option<TokenAmount>, ProcessorError> {
    match first_event_of_type(events, CDP_DRAW_EVENT_TYPE) {
        Some(event) => Ok(Some(lex_attribute(event, "amount")?)),
        None => Ok(None),
    }
}

/// Positional decode over the transfer event's repeated `amount` attribute:
/// the first entry is always the repay, a second entry (when present) is the
/// collateral released back to the owner.
pub fn repay_cdp(events: &[Event]) -> Result<RepayCdpFact, ProcessorError> {
    let Some(event) = first_event_of_type(events, TRANSFER_EVENT_TYPE) else {
        return Ok(RepayCdpFact {
            repay: None,
            withdraw: None,
        });
    };

    let amounts = attribute_values(&event.attributes, "amount");
    let mut repay = None;
    let mut withdraw = None;
    if let Some(compound) = amounts.first() {
        repay = Some(lex_compound(compound)?);
    }
    if amounts.len() == 2 {
        withdraw = Some(lex_compound(amounts[1])?);
    }
    Ok(RepayCdpFact { repay, withdraw })
}

pub fn deposit_cdp(events: &[Event]) -> Result<Option<TokenAmount>, ProcessorError> {
    match first_event_of_type(events, TRANSFER_EVENT_TYPE) {
        Some(event) => Ok(Some(lex_attribute(event, "amount")?)),
        None => Ok(None),
    }
}

pub fn withdraw_cdp(events: &[Event]) -> Result<Option<TokenAmount>, ProcessorError> {
    match first_event_of_type(events, TRANSFER_EVENT_TYPE) {
        Some(event) => Ok(Some(lex_attribute(event, "amount")?)),
        None => Ok(None),
    }
}

fn lex_compound(compound: &str) -> Result<TokenAmount, ProcessorError> {
    let (magnitude, token) = split_amount(compound)?;
    let amount = scale_to_decimal(&magnitude, Some(&token))?;
    Ok(TokenAmount { token, amount })
}
