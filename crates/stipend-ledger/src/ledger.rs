//! The reward ledger and its owner-gated configuration surface.
//!
//! `add_reward` is the single deposit path: it splits the gross amount
//! into fee and net using the percent in force right now, instructs the
//! external ledger to move value, and only then commits the entry and its
//! event. A transfer failure aborts the call with nothing recorded.
//!
//! Collaborators are passed in as separate exclusive borrows, so a
//! transfer implementation holds no reference back into the ledger and
//! cannot re-enter it mid-operation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stipend_fees::{math, FeeConfig, Ownership};
use stipend_types::{AccrualWindow, Address, Amount, Event, Target, TokenId};

use crate::entry::RewardEntry;
use crate::external::{Clock, ExternalLedger};
use crate::{LedgerError, Result};

/// What happens to the net amount at deposit time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMode {
    /// Net is pushed to the distribution collector immediately.
    Forward,
    /// Net stays in escrow and is paid out through claims.
    Escrow,
}

/// Append-only, per-target reward bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardLedger {
    ownership: Ownership,
    config: FeeConfig,
    escrow_account: Address,
    mode: DistributionMode,
    entries: HashMap<Target, Vec<RewardEntry>>,
    events: Vec<Event>,
}

impl RewardLedger {
    /// Create a ledger.
    ///
    /// # Errors
    ///
    /// - [`stipend_fees::FeeError::FeeTooHigh`] if `fee_percent` exceeds
    ///   [`math::MAX_FEE_PERCENT`]
    pub fn new(
        owner: Address,
        fee_percent: u8,
        fee_address: Address,
        distribution_address: Address,
        escrow_account: Address,
        mode: DistributionMode,
    ) -> Result<Self> {
        let config = FeeConfig::new(fee_percent, fee_address, distribution_address)?;
        Ok(Self {
            ownership: Ownership::new(owner),
            config,
            escrow_account,
            mode,
            entries: HashMap::new(),
            events: Vec::new(),
        })
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.ownership.owner()
    }

    /// The current fee percent.
    pub fn fee_percent(&self) -> u8 {
        self.config.fee_percent()
    }

    /// The fee collector address.
    pub fn fee_address(&self) -> Address {
        self.config.fee_address()
    }

    /// The distribution collector address.
    pub fn distribution_address(&self) -> Address {
        self.config.distribution_address()
    }

    /// The account deposits are pulled into.
    pub fn escrow_account(&self) -> Address {
        self.escrow_account
    }

    /// The configured distribution mode.
    pub fn mode(&self) -> DistributionMode {
        self.mode
    }

    /// Everything observed so far, in commit order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Hand ownership to `new_owner`. Owner-only.
    ///
    /// # Errors
    ///
    /// - [`stipend_fees::FeeError::AccessDenied`] if `caller` is not the owner
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> Result<()> {
        let previous = self.ownership.transfer(caller, new_owner)?;
        self.events.push(Event::OwnershipTransferred {
            previous_owner: previous,
            new_owner,
        });
        Ok(())
    }

    /// Replace the fee percent for future deposits. Owner-only.
    ///
    /// # Errors
    ///
    /// - [`stipend_fees::FeeError::AccessDenied`] if `caller` is not the owner
    /// - [`stipend_fees::FeeError::FeeTooHigh`] if `percent` exceeds
    ///   [`math::MAX_FEE_PERCENT`]; the stored percent is unchanged
    pub fn set_fee_percent(&mut self, caller: &Address, percent: u8) -> Result<()> {
        let change = self
            .config
            .set_fee_percent(&self.ownership, caller, percent)?;
        self.events.push(Event::FeeConfigChanged(change));
        Ok(())
    }

    /// Replace the fee collector address. Owner-only.
    ///
    /// # Errors
    ///
    /// - [`stipend_fees::FeeError::AccessDenied`] if `caller` is not the owner
    pub fn set_fee_address(&mut self, caller: &Address, address: Address) -> Result<()> {
        let change = self
            .config
            .set_fee_address(&self.ownership, caller, address)?;
        self.events.push(Event::FeeConfigChanged(change));
        Ok(())
    }

    /// Replace the distribution collector address. Owner-only.
    ///
    /// # Errors
    ///
    /// - [`stipend_fees::FeeError::AccessDenied`] if `caller` is not the owner
    pub fn set_distribution_address(&mut self, caller: &Address, address: Address) -> Result<()> {
        let change = self
            .config
            .set_distribution_address(&self.ownership, caller, address)?;
        self.events.push(Event::FeeConfigChanged(change));
        Ok(())
    }

    /// Record a reward deposit.
    ///
    /// Pulls `gross_amount` from the depositor into the escrow account,
    /// pushes the fee to the fee collector, and in
    /// [`DistributionMode::Forward`] pushes the net to the distribution
    /// collector. The entry and its `RewardAdded` event are committed only
    /// after every transfer succeeded.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::ZeroAmount`] if `gross_amount` is zero
    /// - [`LedgerError::InvalidWindow`] if a degenerate window is supplied
    /// - [`LedgerError::TransferFailed`] if the external ledger rejects a
    ///   pull or push; nothing is recorded in that case
    #[allow(clippy::too_many_arguments)]
    pub fn add_reward(
        &mut self,
        external: &mut impl ExternalLedger,
        clock: &impl Clock,
        depositor: &Address,
        target: Target,
        token: TokenId,
        gross_amount: Amount,
        window: Option<AccrualWindow>,
    ) -> Result<RewardEntry> {
        if gross_amount == 0 {
            tracing::warn!(depositor = %hex::encode(depositor), "rejected zero deposit");
            return Err(LedgerError::ZeroAmount);
        }
        if let Some(w) = window {
            if !w.is_valid() {
                return Err(LedgerError::InvalidWindow {
                    start: w.start,
                    end: w.end,
                });
            }
        }

        // The percent in force right now is captured into the entry.
        let (fee, net) = math::split(gross_amount, self.config.fee_percent())?;

        external
            .transfer_from(depositor, &self.escrow_account, &token, gross_amount)
            .map_err(|e| LedgerError::TransferFailed(e.to_string()))?;
        if fee > 0 {
            external
                .transfer(&self.config.fee_address(), &token, fee)
                .map_err(|e| LedgerError::TransferFailed(e.to_string()))?;
        }
        if self.mode == DistributionMode::Forward && net > 0 {
            external
                .transfer(&self.config.distribution_address(), &token, net)
                .map_err(|e| LedgerError::TransferFailed(e.to_string()))?;
        }

        let now = clock.now();
        let entry = RewardEntry {
            target,
            token,
            gross_amount,
            net_amount: net,
            depositor: *depositor,
            created_at: now,
            window,
        };
        self.entries.entry(target).or_default().push(entry.clone());
        self.events.push(Event::RewardAdded {
            timestamp: now,
            depositor: *depositor,
            target,
            token,
            gross_amount,
        });
        tracing::info!(
            depositor = %hex::encode(depositor),
            gross = gross_amount,
            fee,
            net,
            windowed = window.is_some(),
            "reward added"
        );
        Ok(entry)
    }

    /// Entries for a target in insertion order, `offset`/`count` clamped
    /// to the available range. Empty when none exist.
    pub fn rewards_for_target(&self, target: &Target, offset: usize, count: usize) -> &[RewardEntry] {
        let Some(list) = self.entries.get(target) else {
            return &[];
        };
        let start = offset.min(list.len());
        let end = offset.saturating_add(count).min(list.len());
        &list[start..end]
    }

    /// Total entries recorded for a target.
    pub fn rewards_count_for_target(&self, target: &Target) -> usize {
        self.entries.get(target).map_or(0, Vec::len)
    }

    /// All entries for a target in insertion order.
    pub fn entries_for(&self, target: &Target) -> &[RewardEntry] {
        match self.entries.get(target) {
            Some(list) => list,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{ManualClock, MemoryTokenLedger};

    const OWNER: Address = [0x01; 32];
    const FEES: Address = [0x02; 32];
    const DIST: Address = [0x03; 32];
    const ESCROW: Address = [0x04; 32];
    const WHALE: Address = [0x05; 32];
    const TOKEN: TokenId = [0xAA; 32];
    const GAUGE: Target = Target::Gauge([0xB7; 32]);

    const BASE_TIME: u64 = 1_700_000_000;

    fn setup(mode: DistributionMode) -> (RewardLedger, MemoryTokenLedger, ManualClock) {
        let ledger = RewardLedger::new(OWNER, 10, FEES, DIST, ESCROW, mode).expect("ledger");
        let mut external = MemoryTokenLedger::new(ESCROW);
        external.credit(WHALE, TOKEN, 1_000_000);
        (ledger, external, ManualClock::new(BASE_TIME))
    }

    #[test]
    fn test_add_reward_escrow_mode() {
        let (mut ledger, mut external, clock) = setup(DistributionMode::Escrow);

        let entry = ledger
            .add_reward(&mut external, &clock, &WHALE, GAUGE, TOKEN, 100_000, None)
            .expect("add reward");

        assert_eq!(entry.gross_amount, 100_000);
        assert_eq!(entry.net_amount, 90_000);
        assert_eq!(entry.created_at, BASE_TIME);
        assert_eq!(external.balance_of(&WHALE, &TOKEN), 900_000);
        assert_eq!(external.balance_of(&FEES, &TOKEN), 10_000);
        // Net stays in escrow.
        assert_eq!(external.balance_of(&ESCROW, &TOKEN), 90_000);
        assert_eq!(external.balance_of(&DIST, &TOKEN), 0);
    }

    #[test]
    fn test_add_reward_forward_mode() {
        let (mut ledger, mut external, clock) = setup(DistributionMode::Forward);

        ledger
            .add_reward(&mut external, &clock, &WHALE, GAUGE, TOKEN, 100_000, None)
            .expect("add reward");

        assert_eq!(external.balance_of(&FEES, &TOKEN), 10_000);
        assert_eq!(external.balance_of(&DIST, &TOKEN), 90_000);
        assert_eq!(external.balance_of(&ESCROW, &TOKEN), 0);
        // The entry is still recorded for indexers.
        assert_eq!(ledger.rewards_count_for_target(&GAUGE), 1);
    }

    #[test]
    fn test_add_reward_zero_rejected() {
        let (mut ledger, mut external, clock) = setup(DistributionMode::Escrow);

        let result = ledger.add_reward(&mut external, &clock, &WHALE, GAUGE, TOKEN, 0, None);
        assert!(matches!(result, Err(LedgerError::ZeroAmount)));
        assert_eq!(ledger.rewards_count_for_target(&GAUGE), 0);
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_add_reward_degenerate_window_rejected() {
        let (mut ledger, mut external, clock) = setup(DistributionMode::Escrow);

        let window = AccrualWindow { start: 200, end: 100 };
        let result =
            ledger.add_reward(&mut external, &clock, &WHALE, GAUGE, TOKEN, 1_000, Some(window));
        assert!(matches!(result, Err(LedgerError::InvalidWindow { .. })));
        assert_eq!(ledger.rewards_count_for_target(&GAUGE), 0);
    }

    #[test]
    fn test_transfer_failure_records_nothing() {
        let (mut ledger, mut external, clock) = setup(DistributionMode::Escrow);
        external.dev_fail_transfers(true);

        let result = ledger.add_reward(&mut external, &clock, &WHALE, GAUGE, TOKEN, 1_000, None);
        assert!(matches!(result, Err(LedgerError::TransferFailed(_))));
        assert_eq!(ledger.rewards_count_for_target(&GAUGE), 0);
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_fee_captured_at_deposit_time() {
        let (mut ledger, mut external, clock) = setup(DistributionMode::Escrow);

        let first = ledger
            .add_reward(&mut external, &clock, &WHALE, GAUGE, TOKEN, 10_000, None)
            .expect("first deposit");
        ledger.set_fee_percent(&OWNER, 15).expect("raise fee");
        let second = ledger
            .add_reward(&mut external, &clock, &WHALE, GAUGE, TOKEN, 10_000, None)
            .expect("second deposit");

        assert_eq!(first.net_amount, 9_000);
        assert_eq!(second.net_amount, 8_500);
        // The recorded first entry is unchanged.
        assert_eq!(ledger.entries_for(&GAUGE)[0].net_amount, 9_000);
    }

    #[test]
    fn test_insertion_order_and_count() {
        let (mut ledger, mut external, clock) = setup(DistributionMode::Escrow);

        for i in 1..=5u128 {
            ledger
                .add_reward(&mut external, &clock, &WHALE, GAUGE, TOKEN, i * 100, None)
                .expect("deposit");
            assert_eq!(ledger.rewards_count_for_target(&GAUGE), i as usize);
        }

        let all = ledger.rewards_for_target(&GAUGE, 0, 5);
        let grosses: Vec<Amount> = all.iter().map(|e| e.gross_amount).collect();
        assert_eq!(grosses, vec![100, 200, 300, 400, 500]);
    }

    #[test]
    fn test_rewards_for_target_pagination() {
        let (mut ledger, mut external, clock) = setup(DistributionMode::Escrow);

        for i in 1..=4u128 {
            ledger
                .add_reward(&mut external, &clock, &WHALE, GAUGE, TOKEN, i * 100, None)
                .expect("deposit");
        }

        assert_eq!(ledger.rewards_for_target(&GAUGE, 1, 2).len(), 2);
        assert_eq!(ledger.rewards_for_target(&GAUGE, 1, 2)[0].gross_amount, 200);
        // Out-of-range offsets and counts clamp to empty or short slices.
        assert!(ledger.rewards_for_target(&GAUGE, 10, 2).is_empty());
        assert_eq!(ledger.rewards_for_target(&GAUGE, 3, 100).len(), 1);
        assert!(ledger
            .rewards_for_target(&Target::Vote(9), 0, 10)
            .is_empty());
    }

    #[test]
    fn test_reward_added_event() {
        let (mut ledger, mut external, clock) = setup(DistributionMode::Escrow);

        ledger
            .add_reward(&mut external, &clock, &WHALE, GAUGE, TOKEN, 5_000, None)
            .expect("deposit");

        assert_eq!(
            ledger.events(),
            &[Event::RewardAdded {
                timestamp: BASE_TIME,
                depositor: WHALE,
                target: GAUGE,
                token: TOKEN,
                gross_amount: 5_000,
            }]
        );
    }

    #[test]
    fn test_owner_surface() {
        let (mut ledger, _, _) = setup(DistributionMode::Escrow);
        let new_owner: Address = [0x0B; 32];
        let mallory: Address = [0x0C; 32];

        assert!(ledger.set_fee_percent(&mallory, 5).is_err());
        assert!(ledger.set_fee_address(&mallory, mallory).is_err());
        assert!(ledger.set_distribution_address(&mallory, mallory).is_err());
        assert!(ledger.transfer_ownership(&mallory, mallory).is_err());

        ledger
            .transfer_ownership(&OWNER, new_owner)
            .expect("transfer ownership");
        assert_eq!(ledger.owner(), new_owner);

        // Only the new owner can mutate now.
        assert!(ledger.set_fee_percent(&OWNER, 5).is_err());
        ledger.set_fee_percent(&new_owner, 5).expect("new owner sets fee");
        assert_eq!(ledger.fee_percent(), 5);

        assert_eq!(
            ledger.events()[0],
            Event::OwnershipTransferred {
                previous_owner: OWNER,
                new_owner,
            }
        );
        assert!(matches!(ledger.events()[1], Event::FeeConfigChanged(_)));
    }
}
