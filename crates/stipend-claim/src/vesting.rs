//! Linear time-based vesting.
//!
//! Windowed entries ignore voting weight entirely. Their net amount vests
//! linearly between the window's start and end, and the vested portion is
//! drawn down to the ledger's distribution collector on demand.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stipend_ledger::{Clock, DistributionMode, ExternalLedger, RewardEntry, RewardLedger};
use stipend_types::{AccrualWindow, Amount, Event, Target, Timestamp, TokenId};

use crate::{ClaimError, Result};

/// The portion of `net` vested at `now`.
///
/// Zero before the window starts, the full net at or after the end,
/// `floor(net * elapsed / duration)` in between.
///
/// # Errors
///
/// - [`ClaimError::Overflow`] if `net * elapsed` overflows
pub fn vested_amount(net: Amount, window: &AccrualWindow, now: Timestamp) -> Result<Amount> {
    if now <= window.start {
        return Ok(0);
    }
    if now >= window.end {
        return Ok(net);
    }
    let elapsed = Amount::from(now - window.start);
    let duration = Amount::from(window.duration());
    let scaled = net.checked_mul(elapsed).ok_or(ClaimError::Overflow)?;
    Ok(scaled / duration)
}

/// Draws vested value down to the distribution collector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VestingDistributor {
    paid: HashMap<(Target, TokenId), Amount>,
    events: Vec<Event>,
}

/// Windowed escrow entries for the key. Forwarded deposits hold nothing.
fn windowed_entries<'a>(
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
        .filter(move |e| e.token == token && e.window.is_some())
}

impl VestingDistributor {
    /// Create a distributor with no payout history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative amount already drawn down for the key.
    pub fn amount_paid(&self, target: &Target, token: &TokenId) -> Amount {
        self.paid.get(&(*target, *token)).copied().unwrap_or(0)
    }

    /// Everything observed so far, in commit order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The amount a draw-down would pay at `now`, without mutating
    /// anything. Zero when no windowed entries exist or nothing new
    /// vested.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::Overflow`] if vesting arithmetic overflows
    pub fn claimable(
        &self,
        ledger: &RewardLedger,
        target: &Target,
        token: &TokenId,
        now: Timestamp,
    ) -> Result<Amount> {
        let mut vested: Amount = 0;
        for entry in windowed_entries(ledger, target, token) {
            // Filter guarantees the window is present.
            let Some(window) = entry.window.as_ref() else {
                continue;
            };
            let part = vested_amount(entry.net_amount, window, now)?;
            vested = vested.checked_add(part).ok_or(ClaimError::Overflow)?;
        }
        Ok(vested.saturating_sub(self.amount_paid(target, token)))
    }

    /// Pay the newly vested portion to the distribution collector.
    ///
    /// A payable amount of zero is a no-op success returning zero. The
    /// payout record and `Claimed` event are committed only after the
    /// transfer succeeded.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::NotFound`] if no windowed entry exists for the key
    /// - [`ClaimError::TransferFailed`] if the payout was rejected;
    ///   nothing is recorded in that case
    /// - [`ClaimError::Overflow`] if vesting arithmetic overflows
    pub fn claim(
        &mut self,
        ledger: &RewardLedger,
        external: &mut impl ExternalLedger,
        clock: &impl Clock,
        target: &Target,
        token: &TokenId,
    ) -> Result<Amount> {
        if windowed_entries(ledger, target, token).next().is_none() {
            return Err(ClaimError::NotFound);
        }

        let now = clock.now();
        let payable = self.claimable(ledger, target, token, now)?;
        if payable == 0 {
            tracing::debug!("nothing vested to draw down");
            return Ok(0);
        }

        let collector = ledger.distribution_address();
        external
            .transfer(&collector, token, payable)
            .map_err(|e| ClaimError::TransferFailed(e.to_string()))?;

        let paid = self.paid.entry((*target, *token)).or_insert(0);
        *paid = paid.checked_add(payable).ok_or(ClaimError::Overflow)?;
        self.events.push(Event::Claimed {
            timestamp: now,
            target: *target,
            token: *token,
            claimant: collector,
            amount: payable,
        });
        tracing::info!(amount = payable, "vested reward drawn down");
        Ok(payable)
    }
}
