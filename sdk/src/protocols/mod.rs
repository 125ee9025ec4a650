//! Entry function call builders for the supported DeFi protocols.
//!
//! Builders only validate their input and convert human amounts into base
//! units with [crate::units]. Execution is left to
//! [crate::transactions::TransactionSubmitter]. All protocol modules target
//! Aptos mainnet deployments.

pub mod amnis;
pub mod aries;
mod error;
pub mod joule;
pub mod liquidswap;

pub use error::*;

use crate::units::{to_base_units_u64, BigDecimal};

/// Base-unit `u64` argument for `amount` scaled by `decimals`. Rejects
/// amounts that are not positive or that truncate to zero base units.
pub(crate) fn amount_argument(amount: &BigDecimal, decimals: u8) -> Result<u64, ProtocolError> {
    let base = to_base_units_u64(amount, decimals)?;

    if base == 0 {
        return Err(ProtocolError::InvalidInput(format!(
            "Amount {amount} is smaller than one base unit of a token with {decimals} decimals"
        )));
    }

    Ok(base)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::units::{parse_amount, UnitsError},
        assert_matches::assert_matches,
    };

    #[test]
    fn test_amount_argument() {
        assert_eq!(amount_argument(&parse_amount("1.5").unwrap(), 8).unwrap(), 150_000_000);
        assert_eq!(amount_argument(&parse_amount("2").unwrap(), 6).unwrap(), 2_000_000);

        assert_matches!(
            amount_argument(&parse_amount("0").unwrap(), 8),
            Err(ProtocolError::Units(UnitsError::InvalidAmount(_)))
        );
        assert_matches!(
            amount_argument(&parse_amount("0.0000001").unwrap(), 6),
            Err(ProtocolError::InvalidInput(_))
        );
        assert_matches!(
            amount_argument(&parse_amount("1000000000000").unwrap(), 8),
            Err(ProtocolError::Units(UnitsError::Overflow { .. }))
        );
    }
}
