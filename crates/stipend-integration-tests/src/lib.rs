//! # stipend-integration-tests
//!
//! Cross-crate scenario tests for the stipend workspace. The library is
//! intentionally empty; everything lives under `tests/`.
