// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

use crate::errors::ProcessorError;
use crate::models::transaction::Event;
use crate::utils::event::first_event_of_type;

use super::constants::TRANSFER_EVENT_TYPE;
use super::{lex_attribute, TokenAmount};

/// Hard money-market position change. All four hard actions (deposit,
/// withdraw, borrow, repay) report their single token/amount pair through
/// the message's `transfer` event; direction comes from the action kind.
pub fn hard_position(events: &[Event]) -> Result<Option<TokenAmount>, ProcessorError> {
    match first_event_of_type(events, TRANSFER_EVENT_TYPE) {
        Some(event) => Ok(Some(lex_attribute(event, "amount")?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::Attribute;
    use crate::utils::amount::decimal_string;

    #[test]
    fn position_is_lexed_from_the_transfer_event() {
        let events = vec![Event {
            event_type: "transfer".to_string(),
            attributes: vec![Attribute {
                key: "amount".to_string(),
                value: "13080000busd".to_string(),
            }],
        }];
        let position = hard_position(&events).unwrap().unwrap();
        assert_eq!(position.token, "busd");
        // busd is a 10^8-scaled asset
        assert_eq!(decimal_string(&position.amount), "0.1308");
    }

    #[test]
    fn absent_transfer_event_is_not_an_error() {
        assert!(hard_position(&[]).unwrap().is_none());
    }
}
