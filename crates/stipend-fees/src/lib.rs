//! # stipend-fees
//!
//! Ownership gate and protocol fee configuration.
//!
//! Every deposit pays a protocol fee of at most [`math::MAX_FEE_PERCENT`]
//! percent. The fee percent and the two collector addresses are mutable
//! only by the current owner.
//!
//! ## Modules
//!
//! - [`ownership`] — Single-owner authorization gate
//! - [`config`] — Fee percent and collector addresses
//! - [`math`] — Floor fee arithmetic

pub mod config;
pub mod math;
pub mod ownership;

pub use config::FeeConfig;
pub use ownership::Ownership;

/// Error types for fee operations.
#[derive(Debug, thiserror::Error)]
pub enum FeeError {
    /// A non-owner attempted an owner-only mutation.
    #[error("caller is not the owner")]
    AccessDenied,

    /// Requested fee percent exceeds the maximum.
    #[error("fee too high: {requested}")]
    FeeTooHigh {
        /// The rejected percent.
        requested: u8,
    },

    /// Arithmetic overflow in fee calculation.
    #[error("arithmetic overflow in fee calculation")]
    Overflow,
}

/// Convenience result type for fee operations.
pub type Result<T> = std::result::Result<T, FeeError>;
