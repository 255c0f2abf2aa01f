//! Floor fee arithmetic.
//!
//! The fee is `floor(gross * percent / 100)`. Division truncates toward
//! zero, so fractional fee remainders accrue to the net amount and are
//! never lost: `fee + net == gross` holds exactly for every input.

use stipend_types::Amount;

use crate::{FeeError, Result};

/// Maximum protocol fee percent.
pub const MAX_FEE_PERCENT: u8 = 15;

/// Compute the protocol fee on a gross amount.
///
/// # Errors
///
/// - [`FeeError::FeeTooHigh`] if `percent` exceeds [`MAX_FEE_PERCENT`]
/// - [`FeeError::Overflow`] if `gross * percent` overflows
pub fn calculate_fee(gross: Amount, percent: u8) -> Result<Amount> {
    if percent > MAX_FEE_PERCENT {
        return Err(FeeError::FeeTooHigh { requested: percent });
    }
    let scaled = gross
        .checked_mul(Amount::from(percent))
        .ok_or(FeeError::Overflow)?;
    Ok(scaled / 100)
}

/// Split a gross amount into `(fee, net)`.
///
/// The remainder from flooring goes to net, so the two parts always sum
/// to the gross amount.
///
/// # Errors
///
/// - [`FeeError::FeeTooHigh`] if `percent` exceeds [`MAX_FEE_PERCENT`]
/// - [`FeeError::Overflow`] if `gross * percent` overflows
pub fn split(gross: Amount, percent: u8) -> Result<(Amount, Amount)> {
    let fee = calculate_fee(gross, percent)?;
    Ok((fee, gross - fee))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_ten_percent() {
        // 100000 tokens with 18 decimals, 10% fee.
        let gross: Amount = 100_000 * 10u128.pow(18);
        let (fee, net) = split(gross, 10).expect("split");
        assert_eq!(fee, 10_000 * 10u128.pow(18));
        assert_eq!(net, 90_000 * 10u128.pow(18));
        assert_eq!(fee + net, gross);
    }

    #[test]
    fn test_fee_zero_percent() {
        let (fee, net) = split(1_000, 0).expect("split");
        assert_eq!(fee, 0);
        assert_eq!(net, 1_000);
    }

    #[test]
    fn test_fee_floors_toward_zero() {
        // 33 * 10 / 100 = 3.3, floored to 3; remainder stays in net.
        let (fee, net) = split(33, 10).expect("split");
        assert_eq!(fee, 3);
        assert_eq!(net, 30);
    }

    #[test]
    fn test_fee_and_net_sum_for_all_percents() {
        for percent in 0..=MAX_FEE_PERCENT {
            for gross in [1u128, 7, 99, 100, 101, 12_345, u128::MAX / 100] {
                let (fee, net) = split(gross, percent).expect("split");
                assert_eq!(fee + net, gross, "lossy split at {percent}% of {gross}");
                assert_eq!(fee, gross * u128::from(percent) / 100);
            }
        }
    }

    #[test]
    fn test_fee_percent_above_max_rejected() {
        assert!(matches!(
            calculate_fee(1_000, 16),
            Err(FeeError::FeeTooHigh { requested: 16 })
        ));
    }

    #[test]
    fn test_fee_overflow_rejected() {
        assert!(matches!(
            calculate_fee(u128::MAX, 15),
            Err(FeeError::Overflow)
        ));
    }
}
