// Kava chain identity
pub const CHAIN: &str = "kava";
pub const PLATFORM: &str = "kava";

// Fixed symbol uuid of the native asset, used for the transaction-fee entry
pub const KAVA_SYMBOL_UUID: &str = "265cf8a8-87de-4ee3-9ac0-292df9b8d52d";

// Virtual counterparty accounts (protocol modules, not on-chain addresses)
pub const VALIDATOR_ACCOUNT: &str = "kava_validator";
pub const CDP_ACCOUNT: &str = "kava_cdp";
pub const HARD_LENDING_ACCOUNT: &str = "hard_lending";
pub const SWAP_ACCOUNT: &str = "kava_swap";
pub const ATOMIC_SWAP_ACCOUNT: &str = "kava_bc_atomic_swap";
pub const STAKING_REWARD_ACCOUNT: &str = "kava_staking_reward";
pub const FEE_ACCOUNT: &str = "fee";

// Event types located by the extractors
pub const MESSAGE_EVENT_TYPE: &str = "message";
pub const DELEGATE_EVENT_TYPE: &str = "delegate";
pub const UNBOND_EVENT_TYPE: &str = "unbond";
pub const CDP_DEPOSIT_EVENT_TYPE: &str = "cdp_deposit";
pub const CDP_DRAW_EVENT_TYPE: &str = "cdp_draw";
pub const TRANSFER_EVENT_TYPE: &str = "transfer";
pub const SWAP_TRADE_EVENT_TYPE: &str = "swap_trade";
pub const SWAP_DEPOSIT_EVENT_TYPE: &str = "swap_deposit";
pub const SWAP_WITHDRAW_EVENT_TYPE: &str = "swap_withdraw";
pub const CREATE_ATOMIC_SWAP_EVENT_TYPE: &str = "create_atomic_swap";

// Legacy/versioned action strings per canonical kind. The same action has
// carried several names across chain versions; single-name kinds are matched
// directly in `canonical_action`.
pub const DELEGATE_ACTIONS: &[&str] = &[
    "delegate",
    "begin_redelegate",
    "claim_delegator_reward",
    "withdraw_delegator_reward",
    "/cosmos.staking.v1beta1.MsgBeginRedelegate",
    "/cosmos.staking.v1beta1.MsgDelegate",
    "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward",
    "/kava.incentive.v1beta1.MsgClaimDelegatorReward",
];

pub const BEGIN_UNBONDING_ACTIONS: &[&str] =
    &["begin_unbonding", "/cosmos.staking.v1beta1.MsgUndelegate"];

pub const CLAIM_USDX_MINTING_REWARD_ACTIONS: &[&str] = &["claim_usdx_minting_reward", "claim_reward"];

pub const HARD_DEPOSIT_ACTIONS: &[&str] = &["hard_deposit", "harvest_deposit"];

pub const HARD_WITHDRAW_ACTIONS: &[&str] = &["hard_withdraw", "harvest_withdraw"];

pub const CLAIM_HARD_REWARD_ACTIONS: &[&str] = &[
    "claim_hard_reward",
    "claim_harvest_reward",
    "/kava.incentive.v1beta1.MsgClaimHardReward",
];

pub const SWAP_EXACT_FOR_TOKENS_ACTIONS: &[&str] =
    &["swap_exact_for_tokens", "swap_for_exact_tokens"];

pub const SEND_ACTIONS: &[&str] = &["send", "/cosmos.bank.v1beta1.MsgSend"];

pub const CREATE_ATOMIC_SWAP_ACTIONS: &[&str] =
    &["createAtomicSwap", "/kava.bep3.v1beta1.MsgCreateAtomicSwap"];

pub const CLAIM_ATOMIC_SWAP_ACTIONS: &[&str] = &["claimAtomicSwap", "refundAtomicSwap"];

// Price-feed and governance actions are an intentional no-op, not an error
pub const VOTE_ACTIONS: &[&str] = &["vote", "committee_vote", "post_price"];
