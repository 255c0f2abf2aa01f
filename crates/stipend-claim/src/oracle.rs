//! Historical voting-weight oracle.
//!
//! The claim engine consumes weights, it never computes them. Weights are
//! historical: once the decision behind a target is finalized they do not
//! change, which is why the query carries the timestamp of the entry
//! being split.

use std::collections::HashMap;

use stipend_types::{Address, Amount, Target, Timestamp};

/// Supplies a participant's influence over a target.
///
/// Implementors wrap the live voting system. The abstraction allows claim
/// arithmetic to be tested without one.
pub trait WeightOracle {
    /// `who`'s voting weight for `target` as of `at`.
    fn weight_of(&self, target: &Target, who: &Address, at: Timestamp) -> Amount;

    /// Total voting weight for `target` as of `at`.
    fn total_weight(&self, target: &Target, at: Timestamp) -> Amount;
}

/// A stub oracle backed by a fixed weight table.
///
/// The total weight for a target is the sum of the weights set for it.
/// Used in tests where no live voting system is available.
#[derive(Debug, Clone, Default)]
pub struct StubWeightOracle {
    weights: HashMap<(Target, Address), Amount>,
}

impl StubWeightOracle {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `who`'s weight for `target`, replacing any previous value.
    pub fn set_weight(&mut self, target: Target, who: Address, weight: Amount) {
        self.weights.insert((target, who), weight);
    }
}

impl WeightOracle for StubWeightOracle {
    fn weight_of(&self, target: &Target, who: &Address, _at: Timestamp) -> Amount {
        self.weights.get(&(*target, *who)).copied().unwrap_or(0)
    }

    fn total_weight(&self, target: &Target, _at: Timestamp) -> Amount {
        self.weights
            .iter()
            .filter(|((t, _), _)| t == target)
            .map(|(_, w)| w)
            .sum()
    }
}
