//! Human amounts are [`BigDecimal`]s, on-chain amounts are integers scaled by
//! `10^decimals`. Conversions never go through binary floats.

use {
    bigdecimal::{num_bigint::BigInt, ToPrimitive, Zero},
    std::str::FromStr,
    thiserror::Error,
};

pub use bigdecimal::BigDecimal;

/// Number of base units (octas) in one APT.
pub const OCTAS_PER_APT: u64 = 100_000_000;

/// Decimals of the native APT coin.
pub const APT_DECIMALS: u8 = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("amount must be greater than zero, got '{0}'")]
    InvalidAmount(String),
    #[error("amount '{amount}' with {decimals} decimals does not fit into base units")]
    Overflow { amount: String, decimals: u8 },
    #[error("'{0}' is not a valid decimal amount")]
    Parse(String),
}

/// Parse a user supplied amount such as `"1.5"` or `" 0.001 "`.
pub fn parse_amount(input: &str) -> Result<BigDecimal, UnitsError> {
    BigDecimal::from_str(input.trim()).map_err(|_| UnitsError::Parse(input.to_string()))
}

/// Convert a human amount into base units, truncating anything below one base
/// unit toward zero.
///
/// ```
/// use aptdeck_sdk::units::{parse_amount, to_base_units};
///
/// let amount = parse_amount("1.999999999").unwrap();
///
/// assert_eq!(to_base_units(&amount, 8).unwrap(), 199_999_999);
/// ```
pub fn to_base_units(amount: &BigDecimal, decimals: u8) -> Result<u128, UnitsError> {
    if amount <= &BigDecimal::zero() {
        return Err(UnitsError::InvalidAmount(amount.to_string()));
    }

    // Rescaling to `decimals` drops the extra fraction digits, which leaves
    // exactly floor(amount * 10^decimals) as the integer mantissa.
    let (base, _) = amount.with_scale(decimals as i64).into_bigint_and_exponent();

    base.to_u128().ok_or_else(|| UnitsError::Overflow {
        amount: amount.to_string(),
        decimals,
    })
}

/// Same as [`to_base_units`] but narrowed to the `u64` that Move entry
/// functions take for coin amounts.
pub fn to_base_units_u64(amount: &BigDecimal, decimals: u8) -> Result<u64, UnitsError> {
    let base = to_base_units(amount, decimals)?;

    u64::try_from(base).map_err(|_| UnitsError::Overflow {
        amount: amount.to_string(),
        decimals,
    })
}

/// Convert base units back into a human amount. Exact.
pub fn from_base_units(base: u128, decimals: u8) -> BigDecimal {
    BigDecimal::new(BigInt::from(base), decimals as i64)
}

/// Render an amount with at most `max_fraction_digits` digits after the point,
/// truncating the rest and trimming trailing zeros.
pub fn format_amount(value: &BigDecimal, max_fraction_digits: u8) -> String {
    let rendered = value
        .with_scale(max_fraction_digits as i64)
        .to_plain_string();

    if !rendered.contains('.') {
        return rendered;
    }

    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches, rstest::rstest};

    fn dec(s: &str) -> BigDecimal {
        parse_amount(s).unwrap()
    }

    #[rstest]
    #[case("1.5", 8, 150_000_000)]
    #[case("1.999999999", 8, 199_999_999)]
    #[case("0.000001", 6, 1)]
    #[case("0.0000001", 6, 0)]
    #[case("42", 0, 42)]
    #[case("1000000", 18, 1_000_000_000_000_000_000_000_000)]
    fn test_to_base_units(#[case] amount: &str, #[case] decimals: u8, #[case] expected: u128) {
        assert_eq!(to_base_units(&dec(amount), decimals), Ok(expected));
    }

    #[test]
    fn test_to_base_units_rejects_non_positive() {
        assert_matches!(
            to_base_units(&dec("0"), 8),
            Err(UnitsError::InvalidAmount(a)) if a == "0"
        );
        assert_matches!(
            to_base_units(&dec("-1.5"), 8),
            Err(UnitsError::InvalidAmount(_))
        );
    }

    #[test]
    fn test_to_base_units_overflow() {
        let huge = dec("340282366920938463463374607431768211456"); // u128::MAX + 1

        assert_matches!(
            to_base_units(&huge, 0),
            Err(UnitsError::Overflow { decimals: 0, .. })
        );

        assert_matches!(
            to_base_units_u64(&dec("184467440737.09551616"), 8),
            Err(UnitsError::Overflow { decimals: 8, .. })
        );
        assert_eq!(to_base_units_u64(&dec("184467440737.09551615"), 8), Ok(u64::MAX));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(150_000_000, 8)]
    #[case(199_999_999, 8)]
    #[case(123_456, 6)]
    #[case(u64::MAX as u128, 18)]
    #[case(u128::MAX, 8)]
    fn test_base_units_round_trip(#[case] base: u128, #[case] decimals: u8) {
        let human = from_base_units(base, decimals);

        assert_eq!(to_base_units(&human, decimals), Ok(base));
    }

    #[test]
    fn test_from_base_units() {
        assert_eq!(from_base_units(150_000_000, 8), dec("1.5"));
        assert_eq!(from_base_units(1, 6), dec("0.000001"));
        assert_eq!(from_base_units(0, 8), BigDecimal::zero());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 2.25 "), Ok(dec("2.25")));
        assert_matches!(parse_amount("abc"), Err(UnitsError::Parse(s)) if s == "abc");
        assert_matches!(parse_amount(""), Err(UnitsError::Parse(_)));
    }

    #[rstest]
    #[case("1.23456789", 4, "1.2345")]
    #[case("1.5", 4, "1.5")]
    #[case("100", 4, "100")]
    #[case("0.00001", 4, "0")]
    #[case("12.0000", 2, "12")]
    fn test_format_amount(#[case] value: &str, #[case] digits: u8, #[case] expected: &str) {
        assert_eq!(format_amount(&dec(value), digits), expected);
    }
}
