//! Weight-proportional claims.
//!
//! Entitlement for a claimant is computed per escrowed entry: each entry's
//! net amount is split by the oracle's weights as of the entry's creation
//! time, floors summed, and everything already paid subtracted. Claims are
//! repeatable: a repeat claim with no new deposits pays zero, a claim
//! after a new deposit pays exactly the newly accrued share.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stipend_ledger::{Clock, DistributionMode, ExternalLedger, RewardEntry, RewardLedger};
use stipend_types::{Address, Amount, Event, Target, Timestamp, TokenId};

use crate::oracle::WeightOracle;
use crate::{ClaimError, Result};

/// What has been paid to one claimant for one (target, token) key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// The governance target.
    pub target: Target,
    /// The reward token.
    pub token: TokenId,
    /// Who was paid.
    pub claimant: Address,
    /// Cumulative amount paid out.
    pub amount_paid: Amount,
    /// When the record was last advanced.
    pub claimed_at: Timestamp,
}

/// Computes entitlements and enforces capped distribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimEngine {
    records: HashMap<(Target, TokenId, Address), ClaimRecord>,
    events: Vec<Event>,
}

/// Entries that still hold value: escrow mode only, unwindowed only.
/// Forwarded and windowed entries are paid through other paths.
fn escrowed_entries<'a>(
    ledger: &'a RewardLedger,
    target: &Target,
    token: &TokenId,
) -> impl Iterator<Item = &'a RewardEntry> + 'a {
    let token = *token;
    let entries: &[RewardEntry] = match ledger.mode() {
        DistributionMode::Escrow => ledger.entries_for(target),
        DistributionMode::Forward => &[],
    };
    entries
        .iter()
        .filter(move |e| e.token == token && e.window.is_none())
}

impl ClaimEngine {
    /// Create an engine with no claim history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative amount already paid to `claimant` for the key.
    pub fn amount_paid(&self, target: &Target, token: &TokenId, claimant: &Address) -> Amount {
        self.records
            .get(&(*target, *token, *claimant))
            .map_or(0, |r| r.amount_paid)
    }

    /// Everything observed so far, in commit order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Compute the amount a claim would pay right now, without mutating
    /// anything. Zero when no entries exist or nothing new accrued.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::Overflow`] if entitlement arithmetic overflows
    pub fn estimate(
        &self,
        ledger: &RewardLedger,
        oracle: &impl WeightOracle,
        target: &Target,
        token: &TokenId,
        claimant: &Address,
    ) -> Result<Amount> {
        let mut entitled: Amount = 0;
        for entry in escrowed_entries(ledger, target, token) {
            let total = oracle.total_weight(target, entry.created_at);
            if total == 0 {
                continue;
            }
            let weight = oracle.weight_of(target, claimant, entry.created_at);
            let share = entry
                .net_amount
                .checked_mul(weight)
                .ok_or(ClaimError::Overflow)?
                / total;
            entitled = entitled.checked_add(share).ok_or(ClaimError::Overflow)?;
        }
        Ok(entitled.saturating_sub(self.amount_paid(target, token, claimant)))
    }

    /// Pay out a claimant's outstanding entitlement.
    ///
    /// A payable amount of zero is a no-op success returning zero. The
    /// claim record and `Claimed` event are committed only after the
    /// transfer succeeded.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::NotFound`] if no escrowed entry exists for the key
    /// - [`ClaimError::TransferFailed`] if the payout was rejected;
    ///   nothing is recorded in that case
    /// - [`ClaimError::Overflow`] if entitlement arithmetic overflows
    #[allow(clippy::too_many_arguments)]
    pub fn claim(
        &mut self,
        ledger: &RewardLedger,
        external: &mut impl ExternalLedger,
        oracle: &impl WeightOracle,
        clock: &impl Clock,
        target: &Target,
        token: &TokenId,
        claimant: &Address,
    ) -> Result<Amount> {
        if escrowed_entries(ledger, target, token).next().is_none() {
            return Err(ClaimError::NotFound);
        }

        let payable = self.estimate(ledger, oracle, target, token, claimant)?;
        if payable == 0 {
            tracing::debug!(claimant = %hex::encode(claimant), "nothing to claim");
            return Ok(0);
        }

        external
            .transfer(claimant, token, payable)
            .map_err(|e| ClaimError::TransferFailed(e.to_string()))?;

        let now = clock.now();
        let record = self
            .records
            .entry((*target, *token, *claimant))
            .or_insert(ClaimRecord {
                target: *target,
                token: *token,
                claimant: *claimant,
                amount_paid: 0,
                claimed_at: now,
            });
        record.amount_paid = record
            .amount_paid
            .checked_add(payable)
            .ok_or(ClaimError::Overflow)?;
        record.claimed_at = now;
        self.events.push(Event::Claimed {
            timestamp: now,
            target: *target,
            token: *token,
            claimant: *claimant,
            amount: payable,
        });
        tracing::info!(
            claimant = %hex::encode(claimant),
            amount = payable,
            "claim paid"
        );
        Ok(payable)
    }
}
