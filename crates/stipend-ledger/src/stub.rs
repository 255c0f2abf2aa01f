//! In-memory stubs for tests and development.
//!
//! [`MemoryTokenLedger`] keeps balances in a map and honors the transfer
//! capability without any real custody backend. [`ManualClock`] returns a
//! timestamp that tests advance explicitly.

use std::collections::HashMap;

use stipend_types::{Address, Amount, Timestamp, TokenId};

use crate::external::{Clock, ExternalLedger, TransferOutcome};

/// An in-memory token ledger backed by a balance map.
///
/// `transfer` debits the `source` account the stub was created with,
/// matching the engine's escrow account in tests. Transfers can be forced
/// to fail via [`dev_fail_transfers`](MemoryTokenLedger::dev_fail_transfers)
/// to exercise abort paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenLedger {
    source: Address,
    balances: HashMap<(Address, TokenId), Amount>,
    failing: bool,
}

impl MemoryTokenLedger {
    /// Create a stub ledger whose pushes debit `source`.
    pub fn new(source: Address) -> Self {
        Self {
            source,
            balances: HashMap::new(),
            failing: false,
        }
    }

    /// Credit an account out of thin air (test setup only).
    pub fn credit(&mut self, account: Address, token: TokenId, amount: Amount) {
        *self.balances.entry((account, token)).or_insert(0) += amount;
    }

    /// Current balance of `account` in `token`.
    pub fn balance_of(&self, account: &Address, token: &TokenId) -> Amount {
        self.balances.get(&(*account, *token)).copied().unwrap_or(0)
    }

    /// Force every subsequent transfer to fail (development/testing only).
    pub fn dev_fail_transfers(&mut self, failing: bool) {
        self.failing = failing;
    }

    fn do_move(
        &mut self,
        from: &Address,
        to: &Address,
        token: &TokenId,
        amount: Amount,
    ) -> TransferOutcome {
        if self.failing {
            return Err("transfers disabled".into());
        }
        let balance = self.balance_of(from, token);
        if balance < amount {
            return Err(format!(
                "insufficient balance: account {} holds {balance}, needs {amount}",
                hex::encode(from)
            )
            .into());
        }
        self.balances.insert((*from, *token), balance - amount);
        *self.balances.entry((*to, *token)).or_insert(0) += amount;
        Ok(())
    }
}

impl ExternalLedger for MemoryTokenLedger {
    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        token: &TokenId,
        amount: Amount,
    ) -> TransferOutcome {
        self.do_move(from, to, token, amount)
    }

    fn transfer(&mut self, to: &Address, token: &TokenId, amount: Amount) -> TransferOutcome {
        let source = self.source;
        self.do_move(&source, to, token, amount)
    }
}

/// A clock that tests set and advance explicitly.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    now: Timestamp,
}

impl ManualClock {
    /// Create a clock pinned at `now`.
    pub fn new(now: Timestamp) -> Self {
        Self { now }
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&mut self, secs: u64) {
        self.now += secs;
    }

    /// Pin the clock to an absolute timestamp.
    pub fn set(&mut self, now: Timestamp) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}
