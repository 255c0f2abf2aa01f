//! # stipend-ledger
//!
//! Append-only reward ledger with fee split at deposit time.
//!
//! Depositors earmark reward tokens for a governance target. The ledger
//! deducts the protocol fee, routes it to the fee collector, and either
//! forwards the net amount to the distribution collector immediately or
//! escrows it for later claims, depending on the configured mode.
//!
//! ## Modules
//!
//! - [`external`] — Capability traits for value transfer and time
//! - [`stub`] — In-memory stubs for tests and development
//! - [`entry`] — Immutable reward entries
//! - [`ledger`] — The reward ledger and its owner-gated configuration

pub mod entry;
pub mod external;
pub mod ledger;
pub mod stub;

pub use entry::RewardEntry;
pub use external::{Clock, ExternalLedger, SystemClock};
pub use ledger::{DistributionMode, RewardLedger};
pub use stub::{ManualClock, MemoryTokenLedger};

use stipend_fees::FeeError;
use stipend_types::Timestamp;

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Deposit of zero requested.
    #[error("no reward to add")]
    ZeroAmount,

    /// An accrual window with no positive duration.
    #[error("invalid accrual window: start {start} is not before end {end}")]
    InvalidWindow {
        /// Window start.
        start: Timestamp,
        /// Window end.
        end: Timestamp,
    },

    /// The external ledger rejected a pull or push.
    #[error("transfer failed: {0}")]
    TransferFailed(String),

    /// Ownership or fee configuration failure.
    #[error(transparent)]
    Fee(#[from] FeeError),
}

/// Convenience result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
