//! # stipend-claim
//!
//! Claim computation over escrowed rewards.
//!
//! Two payout paths exist. Weight-proportional claims split an escrowed
//! entry among participants according to their historical voting weight,
//! supplied by a [`WeightOracle`](oracle::WeightOracle). Windowed entries
//! instead vest linearly over their accrual window and are drawn down to
//! the distribution collector. Both paths subtract what was already paid,
//! so no sequence of claims can exceed the escrowed net amounts.
//!
//! ## Modules
//!
//! - [`oracle`] — Historical voting-weight oracle
//! - [`engine`] — Weight-proportional claims
//! - [`vesting`] — Linear time-based vesting

pub mod engine;
pub mod oracle;
pub mod vesting;

pub use engine::{ClaimEngine, ClaimRecord};
pub use oracle::{StubWeightOracle, WeightOracle};
pub use vesting::VestingDistributor;

/// Error types for claim operations.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    /// No reward entry exists for the requested key.
    #[error("no rewards recorded for target")]
    NotFound,

    /// The external ledger rejected the payout.
    #[error("transfer failed: {0}")]
    TransferFailed(String),

    /// Arithmetic overflow in entitlement calculation.
    #[error("arithmetic overflow in claim calculation")]
    Overflow,
}

/// Convenience result type for claim operations.
pub type Result<T> = std::result::Result<T, ClaimError>;
