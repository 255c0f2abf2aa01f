//! Immutable reward entries.
//!
//! An entry is created once per deposit and never edited or deleted. The
//! fee percent in force at deposit time is already folded into
//! `net_amount`, so later configuration changes cannot affect it.

use serde::{Deserialize, Serialize};
use stipend_types::{AccrualWindow, Address, Amount, Target, Timestamp, TokenId};

/// One recorded reward deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEntry {
    /// The governance target this reward is earmarked for.
    pub target: Target,
    /// The reward token.
    pub token: TokenId,
    /// Amount deposited, before the fee.
    pub gross_amount: Amount,
    /// Amount available for distribution, after the fee.
    pub net_amount: Amount,
    /// Who deposited the reward.
    pub depositor: Address,
    /// When the entry was recorded.
    pub created_at: Timestamp,
    /// Vesting window, present only for time-vested rewards.
    pub window: Option<AccrualWindow>,
}

impl RewardEntry {
    /// Whether this entry vests over a time window instead of being
    /// split by voting weight.
    pub fn is_windowed(&self) -> bool {
        self.window.is_some()
    }
}
