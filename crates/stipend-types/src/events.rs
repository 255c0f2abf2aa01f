//! Observable events for downstream indexers.
//!
//! Every committed mutation appends exactly one event to the engine's
//! journal. Events are plain data; consumers poll the journal, nothing is
//! pushed.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, Target, Timestamp, TokenId};

/// An observable state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// A reward deposit was recorded.
    RewardAdded {
        timestamp: Timestamp,
        depositor: Address,
        target: Target,
        token: TokenId,
        gross_amount: Amount,
    },
    /// An entitlement was paid out.
    Claimed {
        timestamp: Timestamp,
        target: Target,
        token: TokenId,
        claimant: Address,
        amount: Amount,
    },
    /// The owner handed control to a new owner.
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
    /// A fee configuration field was replaced.
    FeeConfigChanged(FeeConfigChange),
}

/// Which fee configuration field changed, with old and new values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeConfigChange {
    FeePercent { old: u8, new: u8 },
    FeeAddress { old: Address, new: Address },
    DistributionAddress { old: Address, new: Address },
}
