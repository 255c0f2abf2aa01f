//! Governance targets.
//!
//! A target identifies the governance object a reward batch is earmarked
//! for: a gauge address, a vote identifier, or a proposal together with
//! the option being incentivized. Only proposal targets carry an option.

use serde::{Deserialize, Serialize};

use crate::{Address, Hash};

/// The governance object a reward batch is earmarked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// A liquidity gauge, identified by its address.
    Gauge(Address),
    /// A numbered vote in an external voting app.
    Vote(u64),
    /// A proposal hash plus the option the depositor wants to reward.
    Proposal {
        /// Hash identifying the proposal.
        id: Hash,
        /// The option within the proposal.
        option: u32,
    },
}

impl Target {
    /// The option component, present only for proposal targets.
    pub fn option(&self) -> Option<u32> {
        match self {
            Target::Proposal { option, .. } => Some(*option),
            _ => None,
        }
    }
}
