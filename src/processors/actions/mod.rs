// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

//! # Action Classification & Fact Extraction
//!
//! First stage of the decode pipeline. Each transaction message names its
//! economic action in the `action` attribute of its `message` event; the
//! same action has carried multiple names across chain versions, so raw
//! strings are resolved through a static alias table into a canonical
//! [`ActionKind`] before a per-kind extractor pulls the typed facts out of
//! the message's sub-events.
//!
//! Extractors are individually total: a missing expected sub-event leaves
//! the corresponding fact fields `None` instead of failing. Only the
//! top-level [`classify`] dispatch can fail, and only for an action string
//! the alias table does not know.

use bigdecimal::BigDecimal;
use strum::Display;
use tracing::{debug, error};

use crate::errors::ProcessorError;
use crate::models::transaction::{Event, Message};
use crate::utils::amount::{scale_to_decimal, split_amount, Reward};
use crate::utils::event::{first_attribute_value, first_event_of_type};

use constants::*;

/// Per-action alias tables, event names and virtual account constants
pub mod constants;

/// CDP extractors: create, draw, repay, deposit, withdraw
pub mod cdp;

/// Hard (lending) module extractor
pub mod lending;

/// Staking extractors: delegate and unbond, with reward side-collection
pub mod staking;

/// Swap extractors: trades and pool deposits/withdrawals
pub mod swap;

/// Transfer extractors: bank sends and BEP3 atomic swaps
pub mod transfer;

/// Canonical action kinds after alias resolution. Closed set: new chain
/// behavior is added as a variant plus one extractor/mapper pair, not by
/// growing a branch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Delegate,
    BeginUnbonding,
    CreateCdp,
    DrawCdp,
    RepayCdp,
    DepositCdp,
    WithdrawCdp,
    ClaimUsdxMintingReward,
    HardDeposit,
    HardWithdraw,
    HardBorrow,
    HardRepay,
    ClaimHardReward,
    SwapExactForTokens,
    SwapDeposit,
    SwapWithdraw,
    ClaimSwapReward,
    Send,
    CreateAtomicSwap,
    ClaimAtomicSwap,
    Vote,
}

/// Resolves a raw on-chain action string to its canonical kind, covering
/// every legacy and fully-qualified modern name observed across chain
/// versions. `None` means the string is not modeled.
pub fn canonical_action(raw: &str) -> Option<ActionKind> {
    use ActionKind::*;

    if DELEGATE_ACTIONS.contains(&raw) {
        return Some(Delegate);
    }
    if BEGIN_UNBONDING_ACTIONS.contains(&raw) {
        return Some(BeginUnbonding);
    }
    if CLAIM_USDX_MINTING_REWARD_ACTIONS.contains(&raw) {
        return Some(ClaimUsdxMintingReward);
    }
    if HARD_DEPOSIT_ACTIONS.contains(&raw) {
        return Some(HardDeposit);
    }
    if HARD_WITHDRAW_ACTIONS.contains(&raw) {
        return Some(HardWithdraw);
    }
    if CLAIM_HARD_REWARD_ACTIONS.contains(&raw) {
        return Some(ClaimHardReward);
    }
    if SWAP_EXACT_FOR_TOKENS_ACTIONS.contains(&raw) {
        return Some(SwapExactForTokens);
    }
    if SEND_ACTIONS.contains(&raw) {
        return Some(Send);
    }
    if CREATE_ATOMIC_SWAP_ACTIONS.contains(&raw) {
        return Some(CreateAtomicSwap);
    }
    if CLAIM_ATOMIC_SWAP_ACTIONS.contains(&raw) {
        return Some(ClaimAtomicSwap);
    }
    if VOTE_ACTIONS.contains(&raw) {
        return Some(Vote);
    }

    match raw {
        "create_cdp" => Some(CreateCdp),
        "draw_cdp" => Some(DrawCdp),
        "repay_cdp" => Some(RepayCdp),
        "deposit_cdp" => Some(DepositCdp),
        "withdraw_cdp" => Some(WithdrawCdp),
        "hard_borrow" => Some(HardBorrow),
        "hard_repay" => Some(HardRepay),
        "swap_deposit" => Some(SwapDeposit),
        "swap_withdraw" => Some(SwapWithdraw),
        "claim_swap_reward" => Some(ClaimSwapReward),
        _ => None,
    }
}

/// One token with its already-scaled decimal amount.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenAmount {
    pub token: String,
    pub amount: BigDecimal,
}

/// Typed facts extracted for one message, tagged by canonical action kind.
/// Payload fields are `None` when the expected sub-event was absent; a
/// `None` is "nothing happened", never zero.
#[derive(Debug, Clone)]
pub enum ActionFact {
    Delegate(staking::StakingFact),
    BeginUnbonding(staking::StakingFact),
    CreateCdp(cdp::CreateCdpFact),
    DrawCdp(Option<TokenAmount>),
    RepayCdp(cdp::RepayCdpFact),
    DepositCdp(Option<TokenAmount>),
    WithdrawCdp(Option<TokenAmount>),
    ClaimUsdxMintingReward(Vec<Reward>),
    HardDeposit(Option<TokenAmount>),
    HardWithdraw(Option<TokenAmount>),
    HardBorrow(Option<TokenAmount>),
    HardRepay(Option<TokenAmount>),
    ClaimHardReward(Vec<Reward>),
    SwapExactForTokens(swap::SwapTradeFact),
    SwapDeposit(swap::PoolShareFact),
    SwapWithdraw(swap::PoolShareFact),
    ClaimSwapReward(Vec<Reward>),
    Send(transfer::TransferFact),
    CreateAtomicSwap(transfer::TransferFact),
    ClaimAtomicSwap(transfer::TransferFact),
    Vote,
    /// No `message` event / no action attribute. Yields zero entries.
    Unknown,
}

/// Classifies a message and extracts its typed fact record.
///
/// A message without an action attribute degrades to
/// [`ActionFact::Unknown`]; a non-empty action string outside the alias
/// table is fatal so unmodeled chain behavior surfaces instead of being
/// silently dropped.
pub fn classify(message: &Message) -> Result<ActionFact, ProcessorError> {
    let action = first_event_of_type(&message.log_events, MESSAGE_EVENT_TYPE)
        .and_then(|e| first_attribute_value(&e.attributes, "action").ok());

    let Some(action) = action else {
        debug!(
            height = message.height,
            "message carries no action attribute"
        );
        return Ok(ActionFact::Unknown);
    };
    if action.is_empty() {
        return Ok(ActionFact::Unknown);
    }

    let Some(kind) = canonical_action(action) else {
        error!(action = %action, height = message.height, "unrecognized action");
        return Err(ProcessorError::UnrecognizedAction {
            action: action.to_string(),
        });
    };
    debug!(action = %action, kind = %kind, "classified message");

    let events = &message.log_events;
    let fact = match kind {
        ActionKind::Delegate => ActionFact::Delegate(staking::delegate(events)?),
        ActionKind::BeginUnbonding => ActionFact::BeginUnbonding(staking::begin_unbonding(events)?),
        ActionKind::CreateCdp => ActionFact::CreateCdp(cdp::create_cdp(events)?),
        ActionKind::DrawCdp => ActionFact::DrawCdp(cdp::draw_cdp(events)?),
        ActionKind::RepayCdp => ActionFact::RepayCdp(cdp::repay_cdp(events)?),
        ActionKind::DepositCdp => ActionFact::DepositCdp(cdp::deposit_cdp(events)?),
        ActionKind::WithdrawCdp => ActionFact::WithdrawCdp(cdp::withdraw_cdp(events)?),
        ActionKind::ClaimUsdxMintingReward => {
            ActionFact::ClaimUsdxMintingReward(transfer_rewards(events)?)
        }
        ActionKind::HardDeposit => ActionFact::HardDeposit(lending::hard_position(events)?),
        ActionKind::HardWithdraw => ActionFact::HardWithdraw(lending::hard_position(events)?),
        ActionKind::HardBorrow => ActionFact::HardBorrow(lending::hard_position(events)?),
        ActionKind::HardRepay => ActionFact::HardRepay(lending::hard_position(events)?),
        ActionKind::ClaimHardReward => ActionFact::ClaimHardReward(transfer_rewards(events)?),
        ActionKind::SwapExactForTokens => ActionFact::SwapExactForTokens(swap::trade(events)?),
        ActionKind::SwapDeposit => ActionFact::SwapDeposit(swap::pool_deposit(events)?),
        ActionKind::SwapWithdraw => ActionFact::SwapWithdraw(swap::pool_withdraw(events)?),
        ActionKind::ClaimSwapReward => ActionFact::ClaimSwapReward(transfer_rewards(events)?),
        ActionKind::Send => ActionFact::Send(transfer::send(events)?),
        ActionKind::CreateAtomicSwap => {
            ActionFact::CreateAtomicSwap(transfer::create_atomic_swap(events)?)
        }
        ActionKind::ClaimAtomicSwap => {
            ActionFact::ClaimAtomicSwap(transfer::claim_atomic_swap(events)?)
        }
        ActionKind::Vote => ActionFact::Vote,
    };
    Ok(fact)
}

/// Rewards carried by the message's `transfer` event; empty when absent.
fn transfer_rewards(events: &[Event]) -> Result<Vec<Reward>, ProcessorError> {
    crate::utils::amount::collect_rewards(first_event_of_type(events, TRANSFER_EVENT_TYPE))
}

/// Lexes the given attribute into a token/amount pair, scaling by the
/// token-dependent divisor.
pub(crate) fn lex_attribute(event: &Event, key: &str) -> Result<TokenAmount, ProcessorError> {
    let compound = first_attribute_value(&event.attributes, key)?;
    let (magnitude, token) = split_amount(compound)?;
    let amount = scale_to_decimal(&magnitude, Some(&token))?;
    Ok(TokenAmount { token, amount })
}

/// Like [`lex_attribute`] but always scaling by the default 10^6 divisor.
/// The staking and bank-send paths have scaled this way since the first
/// chain versions and the behavior is kept as observed.
pub(crate) fn lex_attribute_default_scale(
    event: &Event,
    key: &str,
) -> Result<TokenAmount, ProcessorError> {
    let compound = first_attribute_value(&event.attributes, key)?;
    let (magnitude, token) = split_amount(compound)?;
    let amount = scale_to_decimal(&magnitude, None)?;
    Ok(TokenAmount { token, amount })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::Attribute;
    use serde_json::Value;

    fn message_with_events(events: Vec<Event>) -> Message {
        Message {
            log_events: events,
            message_event: Value::Null,
            height: 1_130_035,
            chain_id: "kava-8".to_string(),
        }
    }

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
    fn canonical_action_resolves_legacy_aliases() {
        assert_eq!(
            canonical_action("withdraw_delegator_reward"),
            Some(ActionKind::Delegate)
        );
        assert_eq!(
            canonical_action("/cosmos.staking.v1beta1.MsgDelegate"),
            Some(ActionKind::Delegate)
        );
        assert_eq!(
            canonical_action("claim_reward"),
            Some(ActionKind::ClaimUsdxMintingReward)
        );
        assert_eq!(
            canonical_action("harvest_deposit"),
            Some(ActionKind::HardDeposit)
        );
        assert_eq!(
            canonical_action("swap_for_exact_tokens"),
            Some(ActionKind::SwapExactForTokens)
        );
        assert_eq!(canonical_action("post_price"), Some(ActionKind::Vote));
        assert_eq!(
            canonical_action("refundAtomicSwap"),
            Some(ActionKind::ClaimAtomicSwap)
        );
        assert_eq!(canonical_action("liquidate"), None);
    }

    #[test]
    fn classify_without_message_event_is_unknown() {
        let message = message_with_events(vec![event("transfer", &[("amount", "5ukava")])]);
        assert!(matches!(classify(&message).unwrap(), ActionFact::Unknown));
    }

    #[test]
    fn classify_fails_on_unmodeled_action() {
        let message = message_with_events(vec![event("message", &[("action", "liquidate")])]);
        let err = classify(&message).unwrap_err();
        assert!(
            matches!(err, ProcessorError::UnrecognizedAction { action } if action == "liquidate")
        );
    }

    #[test]
    fn classify_vote_is_a_no_op() {
        for action in ["vote", "committee_vote", "post_price"] {
            let message = message_with_events(vec![event("message", &[("action", action)])]);
            assert!(matches!(classify(&message).unwrap(), ActionFact::Vote));
        }
    }

    #[test]
    fn classify_delegate_extracts_stake_and_rewards() {
        let message = message_with_events(vec![
            event("message", &[("action", "delegate")]),
            event("delegate", &[("amount", "1180ukava")]),
            event("transfer", &[("amount", "39ukava")]),
        ]);
        let ActionFact::Delegate(fact) = classify(&message).unwrap() else {
            panic!("expected delegate fact");
        };
        let stake = fact.stake.unwrap();
        assert_eq!(stake.token, "kava");
        assert_eq!(
            crate::utils::amount::decimal_string(&stake.amount),
            "0.00118"
        );
        assert_eq!(fact.rewards.len(), 1);
        assert_eq!(
            crate::utils::amount::decimal_string(&fact.rewards[0].amount),
            "0.000039"
        );
    }

    #[test]
    fn classify_delegate_without_delegate_event_keeps_fields_unset() {
        let message = message_with_events(vec![event(
            "message",
            &[("action", "withdraw_delegator_reward")],
        )]);
        let ActionFact::Delegate(fact) = classify(&message).unwrap() else {
            panic!("expected delegate fact");
        };
        assert!(fact.stake.is_none());
        assert!(fact.rewards.is_empty());
    }
}
