//! Capability traits for value transfer and time.
//!
//! The ledger never holds tokens itself; it instructs an [`ExternalLedger`]
//! to move value and records only the amounts. Implementors provide the
//! actual custody. This abstraction allows the ledger and claim logic to
//! be tested without any live payment backend.

use stipend_types::{Address, Amount, Timestamp, TokenId};

/// Outcome of an external transfer instruction.
pub type TransferOutcome = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Moves value between principals on behalf of the engine.
///
/// Any failure is treated by the engine as a hard abort of the enclosing
/// operation; no entry, record, or event is committed.
pub trait ExternalLedger {
    /// Pull `amount` of `token` from `from` into `to`.
    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        token: &TokenId,
        amount: Amount,
    ) -> TransferOutcome;

    /// Push `amount` of `token` from the engine's escrow account to `to`.
    fn transfer(&mut self, to: &Address, token: &TokenId, amount: Amount) -> TransferOutcome;
}

/// Supplies the current time for entry stamping and accrual.
pub trait Clock {
    /// Current Unix timestamp in seconds.
    fn now(&self) -> Timestamp;
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}
