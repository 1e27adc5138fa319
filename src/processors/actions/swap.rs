// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

use crate::errors::ProcessorError;
use crate::models::transaction::Event;
use crate::utils::amount::{scale_to_decimal, split_amount};
use crate::utils::event::{first_attribute_value, first_event_of_type};

use super::constants::{SWAP_DEPOSIT_EVENT_TYPE, SWAP_TRADE_EVENT_TYPE, SWAP_WITHDRAW_EVENT_TYPE};
use super::{lex_attribute, TokenAmount};

/// One executed trade: what was paid in, what came out, and the swap fee.
/// All three are reported by the single `swap_trade` event, so they are
/// either all present or all absent.
#[derive(Debug, Clone)]
pub struct SwapTradeFact {
    pub input: Option<TokenAmount>,
    pub output: Option<TokenAmount>,
    pub fee: Option<TokenAmount>,
}

/// Pool share movement plus the underlying tokens that moved with it.
///
/// `share_amount` is the raw `shares` attribute string: pool shares are an
/// internal unit with no on-chain denom and are journaled unscaled. The
/// underlying token list keeps the event's attribute order.
#[derive(Debug, Clone)]
pub struct PoolShareFact {
    pub share_token: Option<String>,
    pub share_amount: Option<String>,
    pub underlying: Vec<TokenAmount>,
}

pub fn trade(events: &[Event]) -> Result<SwapTradeFact, ProcessorError> {
    let Some(event) = first_event_of_type(events, SWAP_TRADE_EVENT_TYPE) else {
        return Ok(SwapTradeFact {
            input: None,
            output: None,
            fee: None,
        });
    };
    Ok(SwapTradeFact {
        input: Some(lex_attribute(event, "input")?),
        output: Some(lex_attribute(event, "output")?),
        fee: Some(lex_attribute(event, "fee")?),
    })
}

pub fn pool_deposit(events: &[Event]) -> Result<PoolShareFact, ProcessorError> {
    pool_share_fact(events, SWAP_DEPOSIT_EVENT_TYPE)
}

pub fn pool_withdraw(events: &[Event]) -> Result<PoolShareFact, ProcessorError> {
    pool_share_fact(events, SWAP_WITHDRAW_EVENT_TYPE)
}

fn pool_share_fact(events: &[Event], event_type: &str) -> Result<PoolShareFact, ProcessorError> {
    let Some(event) = first_event_of_type(events, event_type) else {
        return Ok(PoolShareFact {
            share_token: None,
            share_amount: None,
            underlying: Vec::new(),
        });
    };

    let share_token = first_attribute_value(&event.attributes, "pool_id")?.to_string();
    let share_amount = first_attribute_value(&event.attributes, "shares")?.to_string();

    let mut underlying = Vec::new();
    for compound in first_attribute_value(&event.attributes, "amount")?
        .split(',')
        .filter(|s| !s.is_empty())
    {
        let (magnitude, token) = split_amount(compound)?;
        let amount = scale_to_decimal(&magnitude, Some(&token))?;
        underlying.push(TokenAmount { token, amount });
    }

    Ok(PoolShareFact {
        share_token: Some(share_token),
        share_amount: Some(share_amount),
        underlying,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::Attribute;
    use crate::utils::amount::decimal_string;

    fn event(event_type: &str, pairs: &[(&str, &str)]) -> Event {
        Event {
            event_type: event_type.to_string(),
            attributes: pairs
                .iter()
                .map(|(k, v)| Attribute {
                    key: k.to_string(),
                    value: v.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn trade_extracts_input_output_and_fee() {
        let events = vec![event(
            "swap_trade",
            &[
                ("input", "5000000ukava"),
                ("output", "20000000usdx"),
                ("fee", "7500ukava"),
            ],
        )];
        let fact = trade(&events).unwrap();
        let input = fact.input.unwrap();
        assert_eq!(input.token, "kava");
        assert_eq!(decimal_string(&input.amount), "5");
        assert_eq!(fact.output.unwrap().token, "usdx");
        assert_eq!(decimal_string(&fact.fee.unwrap().amount), "0.0075");
    }

    #[test]
    fn missing_trade_event_leaves_all_fields_unset() {
        let fact = trade(&[]).unwrap();
        assert!(fact.input.is_none() && fact.output.is_none() && fact.fee.is_none());
    }

    #[test]
    fn pool_deposit_keeps_shares_raw_and_orders_underlying() {
        let events = vec![event(
            "swap_deposit",
            &[
                ("pool_id", "ukava:usdx"),
                ("amount", "1000000ukava,4300000usdx"),
                ("shares", "2072912"),
            ],
        )];
        let fact = pool_deposit(&events).unwrap();
        assert_eq!(fact.share_token.as_deref(), Some("ukava:usdx"));
        // shares are journaled unscaled
        assert_eq!(fact.share_amount.as_deref(), Some("2072912"));
        assert_eq!(fact.underlying.len(), 2);
        assert_eq!(fact.underlying[0].token, "kava");
        assert_eq!(decimal_string(&fact.underlying[0].amount), "1");
        assert_eq!(fact.underlying[1].token, "usdx");
        assert_eq!(decimal_string(&fact.underlying[1].amount), "4.3");
    }

    #[test]
    fn pool_withdraw_reads_the_swap_withdraw_event() {
        let events = vec![event(
            "swap_withdraw",
            &[
                ("pool_id", "ukava:usdx"),
                ("amount", "500000ukava"),
                ("shares", "1036456"),
            ],
        )];
        let fact = pool_withdraw(&events).unwrap();
        assert_eq!(fact.underlying.len(), 1);
        assert_eq!(decimal_string(&fact.underlying[0].amount), "0.5");
    }
}
