// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

use crate::errors::ProcessorError;
use crate::models::transaction::Event;
use crate::utils::amount::{collect_rewards, Reward};
use crate::utils::event::first_event_of_type;

use super::constants::{DELEGATE_EVENT_TYPE, TRANSFER_EVENT_TYPE, UNBOND_EVENT_TYPE};
use super::{lex_attribute_default_scale, TokenAmount};

/// Facts of a staking action: the (un)bonded amount, if the message staked
/// anything, plus any rewards auto-withdrawn alongside it. Reward claims
/// arrive as delegate messages without a `delegate` event, so `stake` stays
/// `None` for them.
#[derive(Debug, Clone)]
pub struct StakingFact {
    pub stake: Option<TokenAmount>,
    pub rewards: Vec<Reward>,
}

/// delegate / begin_redelegate / delegator-reward claims.
pub fn delegate(events: &[Event]) -> Result<StakingFact, ProcessorError> {
    staking_fact(events, DELEGATE_EVENT_TYPE)
}

/// begin_unbonding / MsgUndelegate.
pub fn begin_unbonding(events: &[Event]) -> Result<StakingFact, ProcessorError> {
    staking_fact(events, UNBOND_EVENT_TYPE)
}

fn staking_fact(events: &[Event], stake_event_type: &str) -> Result<StakingFact, ProcessorError> {
    let stake = match first_event_of_type(events, stake_event_type) {
        // staking amounts scale by the default divisor, denom ignored
        Some(event) => Some(lex_attribute_default_scale(event, "amount")?),
        None => None,
    };
    let rewards = collect_rewards(first_event_of_type(events, TRANSFER_EVENT_TYPE))?;
    Ok(StakingFact { stake, rewards })
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
    fn unbond_amount_and_rewards_are_extracted() {
        let events = vec![
            event("message", &[("action", "begin_unbonding")]),
            event("unbond", &[("amount", "500000ukava")]),
            event("transfer", &[("amount", "3687213ukava")]),
        ];
        let fact = begin_unbonding(&events).unwrap();
        let stake = fact.stake.unwrap();
        assert_eq!(stake.token, "kava");
        assert_eq!(decimal_string(&stake.amount), "0.5");
        assert_eq!(fact.rewards.len(), 1);
        assert_eq!(decimal_string(&fact.rewards[0].amount), "3.687213");
    }

    #[test]
    fn reward_only_claim_has_no_stake() {
        let events = vec![
            event("message", &[("action", "claim_delegator_reward")]),
            event("transfer", &[("amount", "224049hard")]),
        ];
        let fact = delegate(&events).unwrap();
        assert!(fact.stake.is_none());
        assert_eq!(fact.rewards[0].token, "hard");
    }
}
