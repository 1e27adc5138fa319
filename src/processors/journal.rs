// Copyright © Senka
// SPDX-License-Identifier: Apache-2.0

//! Second stage of the decode pipeline: expands each [`ActionFact`] into
//! zero or more ledger entries following fixed per-action templates
//! (movement kind, virtual counterparty pair, narration). Templates are
//! pure data transforms; a fact whose fields were degraded to `None` by a
//! missing sub-event yields no entries rather than zeros.

use crate::models::journal::{LedgerEntry, MovementKind};
use crate::models::transaction::{KavaTransaction, TokenLookup};
use crate::processors::actions::constants::*;
use crate::processors::actions::transfer::TransferFact;
use crate::processors::actions::ActionFact;
use crate::utils::amount::{decimal_string, Reward};

/// Per-transaction context threaded through every template: the owning
/// transaction, the address the decode runs for, the injected token lookup
/// and the shared trade id.
pub struct JournalContext<'a> {
    pub transaction: &'a KavaTransaction,
    pub token_lookup: &'a dyn TokenLookup,
    pub address: &'a str,
    pub trade_uuid: &'a str,
}

impl JournalContext<'_> {
    /// Builds one entry, resolving the token's original id and symbol uuid
    /// through the uniform native-asset rule.
    #[allow(clippy::too_many_arguments)]
    fn movement_entry(
        &self,
        application: &str,
        movement: MovementKind,
        amount: &str,
        token: &str,
        from: &str,
        to: &str,
        comment: String,
    ) -> LedgerEntry {
        let token_original_id = token_original_id(token);
        let symbol_uuid = self
            .token_lookup
            .get_symbol_uuid(CHAIN, token_original_id.as_deref());
        self.entry(
            application,
            movement,
            amount,
            token,
            token_original_id,
            symbol_uuid,
            from,
            to,
            comment,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn entry(
        &self,
        application: &str,
        movement: MovementKind,
        amount: &str,
        token: &str,
        token_original_id: Option<String>,
        symbol_uuid: Option<String>,
        from: &str,
        to: &str,
        comment: String,
    ) -> LedgerEntry {
        LedgerEntry {
            executed_at: self.transaction.get_timestamp().to_string(),
            chain: CHAIN.to_string(),
            platform: PLATFORM.to_string(),
            application: application.to_string(),
            transaction_id: self.transaction.get_transaction_id().to_string(),
            trade_uuid: self.trade_uuid.to_string(),
            movement,
            amount: amount.to_string(),
            token_symbol: token.to_string(),
            token_original_id,
            symbol_uuid,
            from: from.to_string(),
            to: to.to_string(),
            comment,
        }
    }
}

/// Original id of a token for external symbol lookup. The native asset (in
/// any of its spellings) has no cross-chain identity and maps to `None`;
/// every other token is its own original id.
fn token_original_id(token: &str) -> Option<String> {
    match token {
        "kava" | "ukava" | "" => None,
        other => Some(other.to_string()),
    }
}

/// Expands one fact into its ledger entries, in template order.
pub fn entries_for_fact(ctx: &JournalContext, fact: &ActionFact) -> Vec<LedgerEntry> {
    use bigdecimal::Zero;

    let mut entries = Vec::new();
    match fact {
        ActionFact::Delegate(fact) => {
            if let Some(stake) = &fact.stake {
                if !stake.amount.is_zero() {
                    let amount = decimal_string(&stake.amount);
                    entries.push(ctx.movement_entry(
                        "delegate",
                        MovementKind::Deposit,
                        &amount,
                        &stake.token,
                        ctx.address,
                        VALIDATOR_ACCOUNT,
                        format!("staking {amount} {}", stake.token),
                    ));
                }
            }
            entries.extend(staking_reward_entries(ctx, &fact.rewards));
        }
        ActionFact::BeginUnbonding(fact) => {
            if let Some(stake) = &fact.stake {
                if !stake.amount.is_zero() {
                    let amount = decimal_string(&stake.amount);
                    entries.push(ctx.movement_entry(
                        "begin unbonding",
                        MovementKind::Withdraw,
                        &amount,
                        &stake.token,
                        VALIDATOR_ACCOUNT,
                        ctx.address,
                        format!("unstaking {amount} {}", stake.token),
                    ));
                }
            }
            entries.extend(staking_reward_entries(ctx, &fact.rewards));
        }
        ActionFact::CreateCdp(fact) => {
            if let Some(deposit) = &fact.deposit {
                let amount = decimal_string(&deposit.amount);
                entries.push(ctx.movement_entry(
                    "cdp deposit",
                    MovementKind::Deposit,
                    &amount,
                    &deposit.token,
                    ctx.address,
                    CDP_ACCOUNT,
                    format!("cdp deposit {amount} {}", deposit.token),
                ));
            }
            if let Some(draw) = &fact.draw {
                let amount = decimal_string(&draw.amount);
                entries.push(ctx.movement_entry(
                    "cdp borrow",
                    MovementKind::Borrow,
                    &amount,
                    &draw.token,
                    CDP_ACCOUNT,
                    ctx.address,
                    format!("cdp draw {amount} {}", draw.token),
                ));
            }
        }
        ActionFact::DrawCdp(Some(draw)) => {
            let amount = decimal_string(&draw.amount);
            // narration text kept as historically journaled
            entries.push(ctx.movement_entry(
                "cdp draw",
                MovementKind::Borrow,
                &amount,
                &draw.token,
                ctx.address,
                CDP_ACCOUNT,
                format!("cdp repay {amount} {}", draw.token),
            ));
        }
        ActionFact::RepayCdp(fact) => {
            if let Some(repay) = &fact.repay {
                let amount = decimal_string(&repay.amount);
                entries.push(ctx.movement_entry(
                    "cdp repay",
                    MovementKind::Repay,
                    &amount,
                    &repay.token,
                    ctx.address,
                    CDP_ACCOUNT,
                    format!("cdp repay {amount} {}", repay.token),
                ));
            }
            if let Some(withdraw) = &fact.withdraw {
                let amount = decimal_string(&withdraw.amount);
                entries.push(ctx.movement_entry(
                    "cdp withdraw",
                    MovementKind::Withdraw,
                    &amount,
                    &withdraw.token,
                    CDP_ACCOUNT,
                    ctx.address,
                    format!("cdp withdraw {amount} {}", withdraw.token),
                ));
            }
        }
        ActionFact::DepositCdp(Some(deposit)) => {
            let amount = decimal_string(&deposit.amount);
            entries.push(ctx.movement_entry(
                "cdp deposit",
                MovementKind::Deposit,
                &amount,
                &deposit.token,
                ctx.address,
                CDP_ACCOUNT,
                format!("cdp deposit {amount} {}", deposit.token),
            ));
        }
        ActionFact::WithdrawCdp(Some(withdraw)) => {
            let amount = decimal_string(&withdraw.amount);
            entries.push(ctx.movement_entry(
                "cdp withdraw",
                MovementKind::Withdraw,
                &amount,
                &withdraw.token,
                CDP_ACCOUNT,
                ctx.address,
                format!("cdp withdraw {amount} {}", withdraw.token),
            ));
        }
        ActionFact::ClaimUsdxMintingReward(rewards) => {
            // only the first reward is journaled; see DESIGN.md
            if let Some(reward) = rewards.first() {
                let amount = decimal_string(&reward.amount);
                entries.push(ctx.movement_entry(
                    "cdp claim reward",
                    MovementKind::Get,
                    &amount,
                    &reward.token,
                    CDP_ACCOUNT,
                    ctx.address,
                    format!("cdp reward {amount} {}", reward.token),
                ));
            }
        }
        ActionFact::HardDeposit(Some(position)) => {
            let amount = decimal_string(&position.amount);
            entries.push(ctx.movement_entry(
                "hard deposit",
                MovementKind::Deposit,
                &amount,
                &position.token,
                ctx.address,
                HARD_LENDING_ACCOUNT,
                format!("hard deposit {amount} {}", position.token),
            ));
        }
        ActionFact::HardWithdraw(Some(position)) => {
            let amount = decimal_string(&position.amount);
            entries.push(ctx.movement_entry(
                "hard withdraw",
                MovementKind::Withdraw,
                &amount,
                &position.token,
                HARD_LENDING_ACCOUNT,
                ctx.address,
                format!("hard withdraw {amount} {}", position.token),
            ));
        }
        ActionFact::HardBorrow(Some(position)) => {
            let amount = decimal_string(&position.amount);
            entries.push(ctx.movement_entry(
                "hard borrow",
                MovementKind::Borrow,
                &amount,
                &position.token,
                HARD_LENDING_ACCOUNT,
                ctx.address,
                format!("hard borrow {amount} {}", position.token),
            ));
        }
        ActionFact::HardRepay(Some(position)) => {
            let amount = decimal_string(&position.amount);
            entries.push(ctx.movement_entry(
                "hard repay",
                MovementKind::Repay,
                &amount,
                &position.token,
                ctx.address,
                HARD_LENDING_ACCOUNT,
                format!("hard repay {amount} {}", position.token),
            ));
        }
        ActionFact::ClaimHardReward(rewards) => {
            for reward in rewards {
                let amount = decimal_string(&reward.amount);
                entries.push(ctx.movement_entry(
                    "claim hard reward",
                    MovementKind::Get,
                    &amount,
                    &reward.token,
                    HARD_LENDING_ACCOUNT,
                    ctx.address,
                    format!("hard lending reward receive {amount} {}", reward.token),
                ));
            }
        }
        ActionFact::SwapExactForTokens(fact) => {
            // the three legs come from one swap_trade event: all or nothing
            let (Some(input), Some(output), Some(fee)) = (&fact.input, &fact.output, &fact.fee)
            else {
                return entries;
            };
            let input_amount = decimal_string(&input.amount);
            let output_amount = decimal_string(&output.amount);
            let fee_amount = decimal_string(&fee.amount);
            let trade_comment = format!(
                "buy {output_amount} {} sell {input_amount} {}",
                output.token, input.token
            );
            entries.push(ctx.movement_entry(
                "swap exact for tokens",
                MovementKind::Lose,
                &input_amount,
                &input.token,
                ctx.address,
                SWAP_ACCOUNT,
                trade_comment.clone(),
            ));
            entries.push(ctx.movement_entry(
                "swap exact for tokens",
                MovementKind::Get,
                &output_amount,
                &output.token,
                SWAP_ACCOUNT,
                ctx.address,
                trade_comment,
            ));
            entries.push(ctx.movement_entry(
                "swap exact for tokens",
                MovementKind::Lose,
                &fee_amount,
                &fee.token,
                ctx.address,
                SWAP_ACCOUNT,
                format!("pay {fee_amount} {} as swap fee", fee.token),
            ));
        }
        ActionFact::SwapDeposit(fact) => {
            if let (Some(share_token), Some(share_amount)) = (&fact.share_token, &fact.share_amount)
            {
                // pool shares carry their own name as original id and skip
                // the symbol lookup
                entries.push(ctx.entry(
                    "swap deposit",
                    MovementKind::GetBonds,
                    share_amount,
                    share_token,
                    Some(share_token.clone()),
                    None,
                    SWAP_ACCOUNT,
                    ctx.address,
                    format!("kava swap receive {share_amount} {share_token}"),
                ));
            }
            for input in &fact.underlying {
                let amount = decimal_string(&input.amount);
                entries.push(ctx.movement_entry(
                    "swap deposit",
                    MovementKind::Deposit,
                    &amount,
                    &input.token,
                    ctx.address,
                    SWAP_ACCOUNT,
                    format!("kava swap send {amount} {}", input.token),
                ));
            }
        }
        ActionFact::SwapWithdraw(fact) => {
            if let (Some(share_token), Some(share_amount)) = (&fact.share_token, &fact.share_amount)
            {
                entries.push(ctx.entry(
                    "swap withdraw",
                    MovementKind::LoseBonds,
                    share_amount,
                    share_token,
                    Some(share_token.clone()),
                    None,
                    ctx.address,
                    SWAP_ACCOUNT,
                    format!("kava swap send {share_amount} {share_token}"),
                ));
            }
            for output in &fact.underlying {
                let amount = decimal_string(&output.amount);
                entries.push(ctx.movement_entry(
                    "swap withdraw",
                    MovementKind::Withdraw,
                    &amount,
                    &output.token,
                    SWAP_ACCOUNT,
                    ctx.address,
                    format!("kava swap receive {amount} {}", output.token),
                ));
            }
        }
        ActionFact::ClaimSwapReward(rewards) => {
            for reward in rewards {
                let amount = decimal_string(&reward.amount);
                entries.push(ctx.movement_entry(
                    "claim swap reward",
                    MovementKind::Get,
                    &amount,
                    &reward.token,
                    SWAP_ACCOUNT,
                    ctx.address,
                    format!("kava swap reward receive {amount} {}", reward.token),
                ));
            }
        }
        ActionFact::Send(fact) => {
            entries.extend(send_entry(ctx, fact));
        }
        ActionFact::CreateAtomicSwap(fact) | ActionFact::ClaimAtomicSwap(fact) => {
            entries.extend(atomic_swap_entry(ctx, fact));
        }
        // price feeds, governance votes and null-action messages journal
        // nothing
        ActionFact::Vote | ActionFact::Unknown => {}
        // facts whose expected sub-event was absent
        ActionFact::DrawCdp(None)
        | ActionFact::DepositCdp(None)
        | ActionFact::WithdrawCdp(None)
        | ActionFact::HardDeposit(None)
        | ActionFact::HardWithdraw(None)
        | ActionFact::HardBorrow(None)
        | ActionFact::HardRepay(None) => {}
    }
    entries
}

/// Trailing fee entry for the whole transaction. Fees are always paid in
/// the native asset and scale by the default divisor; a zero fee journals
/// nothing.
pub fn fee_entry(ctx: &JournalContext, fee: &bigdecimal::BigDecimal) -> Option<LedgerEntry> {
    use crate::utils::amount::{DECIMAL_PRECISION, DEFAULT_DIVISOR};
    use bigdecimal::{BigDecimal, Zero};

    if fee.is_zero() {
        return None;
    }
    let scaled = (fee / BigDecimal::from(DEFAULT_DIVISOR))
        .with_prec(DECIMAL_PRECISION)
        .normalized();
    Some(ctx.entry(
        CHAIN,
        MovementKind::Lose,
        &decimal_string(&scaled),
        "kava",
        None,
        Some(KAVA_SYMBOL_UUID.to_string()),
        ctx.address,
        FEE_ACCOUNT,
        String::new(),
    ))
}

fn staking_reward_entries(ctx: &JournalContext, rewards: &[Reward]) -> Vec<LedgerEntry> {
    rewards
        .iter()
        .map(|reward| {
            let amount = decimal_string(&reward.amount);
            ctx.movement_entry(
                "kava staking reward",
                MovementKind::Get,
                &amount,
                &reward.token,
                STAKING_REWARD_ACCOUNT,
                ctx.address,
                format!("staking reward {amount} {}", reward.token),
            )
        })
        .collect()
}

/// One entry when the decoding address is either side of the send; `from`
/// and `to` always carry the real sender/recipient addresses.
fn send_entry(ctx: &JournalContext, fact: &TransferFact) -> Option<LedgerEntry> {
    let transfer = fact.transfer.as_ref()?;
    let sender = fact.sender.as_deref().unwrap_or_default();
    let recipient = fact.recipient.as_deref().unwrap_or_default();
    if ctx.address != sender && ctx.address != recipient {
        return None;
    }

    let amount = decimal_string(&transfer.amount);
    let (movement, comment) = if ctx.address == recipient {
        (
            MovementKind::Receive,
            format!("{recipient} receive {amount} {} from {sender}", transfer.token),
        )
    } else {
        (
            MovementKind::Send,
            format!("{sender} send {amount} {} to {recipient}", transfer.token),
        )
    };
    Some(ctx.movement_entry("send", movement, &amount, &transfer.token, sender, recipient, comment))
}

/// Atomic swap create/claim/refund share one template. The counterparty is
/// always the escrow's virtual account, never the on-chain peer.
fn atomic_swap_entry(ctx: &JournalContext, fact: &TransferFact) -> Option<LedgerEntry> {
    let transfer = fact.transfer.as_ref()?;
    let sender = fact.sender.as_deref().unwrap_or_default();
    let recipient = fact.recipient.as_deref().unwrap_or_default();
    if ctx.address != sender && ctx.address != recipient {
        return None;
    }

    let amount = decimal_string(&transfer.amount);
    let (movement, from, to, comment) = if ctx.address == recipient {
        (
            MovementKind::Receive,
            ATOMIC_SWAP_ACCOUNT,
            ctx.address,
            format!(
                "{recipient} receive {amount} {} from {ATOMIC_SWAP_ACCOUNT}",
                transfer.token
            ),
        )
    } else {
        (
            MovementKind::Send,
            ctx.address,
            ATOMIC_SWAP_ACCOUNT,
            format!(
                "{sender} send {amount} {} to {ATOMIC_SWAP_ACCOUNT}",
                transfer.token
            ),
        )
    };
    Some(ctx.movement_entry(
        "create atomic swap",
        movement,
        &amount,
        &transfer.token,
        from,
        to,
        comment,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::actions::swap::SwapTradeFact;
    use crate::processors::actions::TokenAmount;
    use crate::utils::amount::Reward;
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use std::str::FromStr;

    struct FixedLookup;

    impl TokenLookup for FixedLookup {
        fn get_symbol_uuid(&self, _chain: &str, _token_original_id: Option<&str>) -> Option<String> {
            Some("3a2570c5-15c4-2860-52a8-bff14f27a236".to_string())
        }
    }

    fn transaction() -> KavaTransaction {
        KavaTransaction::new(json!({
            "header": {"chain_id": "kava-8", "timestamp": "2021-10-15 01:57:03"},
            "data": {"txhash": "415D", "logs": []}
        }))
    }

    fn amount(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn swap_trade_yields_three_entries_in_fixed_order() {
        let transaction = transaction();
        let ctx = JournalContext {
            transaction: &transaction,
            token_lookup: &FixedLookup,
            address: "kava1addr",
            trade_uuid: "trade-1",
        };
        let fact = ActionFact::SwapExactForTokens(SwapTradeFact {
            input: Some(TokenAmount {
                token: "kava".to_string(),
                amount: amount("5"),
            }),
            output: Some(TokenAmount {
                token: "usdx".to_string(),
                amount: amount("20"),
            }),
            fee: Some(TokenAmount {
                token: "kava".to_string(),
                amount: amount("0.0075"),
            }),
        });

        let entries = entries_for_fact(&ctx, &fact);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].movement, MovementKind::Lose);
        assert_eq!(entries[1].movement, MovementKind::Get);
        assert_eq!(entries[2].movement, MovementKind::Lose);
        // the trade comment cites both sides on both trade legs
        assert_eq!(entries[0].comment, "buy 20 usdx sell 5 kava");
        assert_eq!(entries[1].comment, entries[0].comment);
        assert_eq!(entries[2].comment, "pay 0.0075 kava as swap fee");
        assert_eq!(entries[0].token_original_id, None);
        assert_eq!(entries[1].token_original_id.as_deref(), Some("usdx"));
    }

    #[test]
    fn claim_usdx_reward_journals_first_reward_only() {
        let transaction = transaction();
        let ctx = JournalContext {
            transaction: &transaction,
            token_lookup: &FixedLookup,
            address: "kava1addr",
            trade_uuid: "trade-1",
        };
        let fact = ActionFact::ClaimUsdxMintingReward(vec![
            Reward {
                token: "usdx".to_string(),
                amount: amount("1.5"),
            },
            Reward {
                token: "hard".to_string(),
                amount: amount("0.2"),
            },
        ]);

        let entries = entries_for_fact(&ctx, &fact);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].token_symbol, "usdx");
        assert_eq!(entries[0].comment, "cdp reward 1.5 usdx");
    }

    #[test]
    fn atomic_swap_counterparty_is_the_escrow_account() {
        let transaction = transaction();
        let ctx = JournalContext {
            transaction: &transaction,
            token_lookup: &FixedLookup,
            address: "kava1sender",
            trade_uuid: "trade-1",
        };
        let fact = ActionFact::CreateAtomicSwap(TransferFact {
            sender: Some("kava1sender".to_string()),
            recipient: Some("kava1deputy".to_string()),
            transfer: Some(TokenAmount {
                token: "busd".to_string(),
                amount: amount("0.1308"),
            }),
        });

        let entries = entries_for_fact(&ctx, &fact);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].movement, MovementKind::Send);
        assert_eq!(entries[0].from, "kava1sender");
        assert_eq!(entries[0].to, "kava_bc_atomic_swap");
        assert_eq!(
            entries[0].comment,
            "kava1sender send 0.1308 busd to kava_bc_atomic_swap"
        );
    }

    #[test]
    fn pool_share_entry_skips_the_symbol_lookup() {
        let transaction = transaction();
        let ctx = JournalContext {
            transaction: &transaction,
            token_lookup: &FixedLookup,
            address: "kava1addr",
            trade_uuid: "trade-1",
        };
        let fact = ActionFact::SwapDeposit(crate::processors::actions::swap::PoolShareFact {
            share_token: Some("ukava:usdx".to_string()),
            share_amount: Some("2072912".to_string()),
            underlying: vec![TokenAmount {
                token: "kava".to_string(),
                amount: amount("1"),
            }],
        });

        let entries = entries_for_fact(&ctx, &fact);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].movement, MovementKind::GetBonds);
        assert_eq!(entries[0].amount, "2072912");
        assert_eq!(entries[0].token_original_id.as_deref(), Some("ukava:usdx"));
        assert_eq!(entries[0].symbol_uuid, None);
        assert_eq!(entries[1].movement, MovementKind::Deposit);
        assert!(entries[1].symbol_uuid.is_some());
    }
}
