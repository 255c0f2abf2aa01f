//! # stipend-types
//!
//! Shared domain types used across the stipend workspace.
//!
//! ## Modules
//!
//! - [`target`] — Governance targets a reward batch is earmarked for
//! - [`window`] — Accrual windows for time-vested rewards
//! - [`events`] — Observable events for downstream indexers

pub mod events;
pub mod target;
pub mod window;

pub use events::{Event, FeeConfigChange};
pub use target::Target;
pub use window::AccrualWindow;

/// Common type aliases.
pub type Address = [u8; 32];
pub type TokenId = [u8; 32];
pub type Hash = [u8; 32];
pub type Amount = u128;
pub type Timestamp = u64;
