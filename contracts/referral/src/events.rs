use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired when an operator flag changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorSetEvent {
    pub operator: Address,
    pub allowed: bool,
    pub timestamp: u64,
}

/// Fired the first (and only) time a user's referrer is recorded.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralRecordedEvent {
    pub user: Address,
    pub referrer: Address,
    pub timestamp: u64,
}

/// Fired when a commission payment is recorded for a referrer.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommissionPaidEvent {
    pub user: Address,
    pub referrer: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_operator_set(env: &Env, operator: Address, allowed: bool) {
    env.events().publish(
        (symbol_short!("OPERATOR"), operator.clone()),
        OperatorSetEvent {
            operator,
            allowed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_referral_recorded(env: &Env, user: Address, referrer: Address) {
    env.events().publish(
        (symbol_short!("REFERRAL"), user.clone()),
        ReferralRecordedEvent {
            user,
            referrer,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_commission_paid(env: &Env, user: Address, referrer: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("COMM_PAID"), referrer.clone()),
        CommissionPaidEvent {
            user,
            referrer,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
