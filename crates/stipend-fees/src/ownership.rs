//! Single-owner authorization gate.
//!
//! Callers are identified by the address they present; there is no
//! impersonation capability. The owner may hand control to a new owner,
//! after which the previous owner loses all mutation rights.

use serde::{Deserialize, Serialize};
use stipend_types::Address;

use crate::{FeeError, Result};

/// The current owner of a fee-configured engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    owner: Address,
}

impl Ownership {
    /// Create an ownership record with the given initial owner.
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Check that `caller` is the current owner.
    ///
    /// # Errors
    ///
    /// - [`FeeError::AccessDenied`] if `caller` is not the owner
    pub fn require(&self, caller: &Address) -> Result<()> {
        if caller != &self.owner {
            return Err(FeeError::AccessDenied);
        }
        Ok(())
    }

    /// Replace the owner. Returns the previous owner.
    ///
    /// # Errors
    ///
    /// - [`FeeError::AccessDenied`] if `caller` is not the current owner
    pub fn transfer(&mut self, caller: &Address, new_owner: Address) -> Result<Address> {
        self.require(caller)?;
        let previous = self.owner;
        self.owner = new_owner;
        tracing::info!("ownership transferred");
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: Address = [0x0A; 32];
    const BOB: Address = [0x0B; 32];
    const MALLORY: Address = [0x0C; 32];

    #[test]
    fn test_require_owner() {
        let ownership = Ownership::new(ALICE);
        ownership.require(&ALICE).expect("owner passes");
        assert!(ownership.require(&MALLORY).is_err());
    }

    #[test]
    fn test_transfer_by_owner() {
        let mut ownership = Ownership::new(ALICE);
        let previous = ownership.transfer(&ALICE, BOB).expect("transfer");
        assert_eq!(previous, ALICE);
        assert_eq!(ownership.owner(), BOB);

        // The previous owner has no rights anymore.
        assert!(ownership.require(&ALICE).is_err());
        ownership.require(&BOB).expect("new owner passes");
    }

    #[test]
    fn test_transfer_by_non_owner_rejected() {
        let mut ownership = Ownership::new(ALICE);
        assert!(matches!(
            ownership.transfer(&MALLORY, MALLORY),
            Err(FeeError::AccessDenied)
        ));
        assert_eq!(ownership.owner(), ALICE);
    }
}
