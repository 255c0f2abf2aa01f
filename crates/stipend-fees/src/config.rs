//! Fee percent and collector addresses.
//!
//! The fee percent in force at deposit time is captured into each reward
//! entry; changing it here affects only future deposits. Collector
//! address changes take effect for the next transfer.

use serde::{Deserialize, Serialize};
use stipend_types::{Address, FeeConfigChange};

use crate::math::MAX_FEE_PERCENT;
use crate::ownership::Ownership;
use crate::{FeeError, Result};

/// Fee configuration: bounded percent plus the two collector addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    fee_percent: u8,
    fee_address: Address,
    distribution_address: Address,
}

impl FeeConfig {
    /// Create a fee configuration.
    ///
    /// # Errors
    ///
    /// - [`FeeError::FeeTooHigh`] if `fee_percent` exceeds [`MAX_FEE_PERCENT`]
    pub fn new(fee_percent: u8, fee_address: Address, distribution_address: Address) -> Result<Self> {
        if fee_percent > MAX_FEE_PERCENT {
            return Err(FeeError::FeeTooHigh {
                requested: fee_percent,
            });
        }
        Ok(Self {
            fee_percent,
            fee_address,
            distribution_address,
        })
    }

    /// The current fee percent.
    pub fn fee_percent(&self) -> u8 {
        self.fee_percent
    }

    /// The fee collector address.
    pub fn fee_address(&self) -> Address {
        self.fee_address
    }

    /// The distribution collector address.
    pub fn distribution_address(&self) -> Address {
        self.distribution_address
    }

    /// Replace the fee percent, effective for future deposits only.
    ///
    /// # Errors
    ///
    /// - [`FeeError::AccessDenied`] if `caller` is not the owner
    /// - [`FeeError::FeeTooHigh`] if `percent` exceeds [`MAX_FEE_PERCENT`];
    ///   the stored percent is left unchanged
    pub fn set_fee_percent(
        &mut self,
        ownership: &Ownership,
        caller: &Address,
        percent: u8,
    ) -> Result<FeeConfigChange> {
        ownership.require(caller)?;
        if percent > MAX_FEE_PERCENT {
            return Err(FeeError::FeeTooHigh { requested: percent });
        }
        let old = self.fee_percent;
        self.fee_percent = percent;
        tracing::info!(old, new = percent, "fee percent changed");
        Ok(FeeConfigChange::FeePercent { old, new: percent })
    }

    /// Replace the fee collector address.
    ///
    /// # Errors
    ///
    /// - [`FeeError::AccessDenied`] if `caller` is not the owner
    pub fn set_fee_address(
        &mut self,
        ownership: &Ownership,
        caller: &Address,
        address: Address,
    ) -> Result<FeeConfigChange> {
        ownership.require(caller)?;
        let old = self.fee_address;
        self.fee_address = address;
        tracing::info!("fee address changed");
        Ok(FeeConfigChange::FeeAddress { old, new: address })
    }

    /// Replace the distribution collector address.
    ///
    /// # Errors
    ///
    /// - [`FeeError::AccessDenied`] if `caller` is not the owner
    pub fn set_distribution_address(
        &mut self,
        ownership: &Ownership,
        caller: &Address,
        address: Address,
    ) -> Result<FeeConfigChange> {
        ownership.require(caller)?;
        let old = self.distribution_address;
        self.distribution_address = address;
        tracing::info!("distribution address changed");
        Ok(FeeConfigChange::DistributionAddress { old, new: address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = [0x01; 32];
    const OTHER: Address = [0x02; 32];
    const FEES: Address = [0x03; 32];
    const DIST: Address = [0x04; 32];

    fn setup() -> (Ownership, FeeConfig) {
        let ownership = Ownership::new(OWNER);
        let config = FeeConfig::new(10, FEES, DIST).expect("config");
        (ownership, config)
    }

    #[test]
    fn test_new_rejects_high_fee() {
        assert!(matches!(
            FeeConfig::new(16, FEES, DIST),
            Err(FeeError::FeeTooHigh { requested: 16 })
        ));
        // 15 is the inclusive maximum.
        FeeConfig::new(15, FEES, DIST).expect("15 percent is allowed");
    }

    #[test]
    fn test_set_fee_percent() {
        let (ownership, mut config) = setup();
        let change = config
            .set_fee_percent(&ownership, &OWNER, 15)
            .expect("set fee");
        assert_eq!(change, FeeConfigChange::FeePercent { old: 10, new: 15 });
        assert_eq!(config.fee_percent(), 15);
    }

    #[test]
    fn test_set_fee_percent_too_high_leaves_state() {
        let (ownership, mut config) = setup();
        assert!(config.set_fee_percent(&ownership, &OWNER, 16).is_err());
        assert_eq!(config.fee_percent(), 10);
    }

    #[test]
    fn test_non_owner_cannot_mutate() {
        let (ownership, mut config) = setup();
        assert!(config.set_fee_percent(&ownership, &OTHER, 5).is_err());
        assert!(config.set_fee_address(&ownership, &OTHER, OTHER).is_err());
        assert!(config
            .set_distribution_address(&ownership, &OTHER, OTHER)
            .is_err());
        assert_eq!(config.fee_percent(), 10);
        assert_eq!(config.fee_address(), FEES);
        assert_eq!(config.distribution_address(), DIST);
    }

    #[test]
    fn test_set_addresses() {
        let (ownership, mut config) = setup();
        let new_fees: Address = [0x05; 32];
        let new_dist: Address = [0x06; 32];

        config
            .set_fee_address(&ownership, &OWNER, new_fees)
            .expect("set fee address");
        config
            .set_distribution_address(&ownership, &OWNER, new_dist)
            .expect("set distribution address");

        assert_eq!(config.fee_address(), new_fees);
        assert_eq!(config.distribution_address(), new_dist);
    }
}
