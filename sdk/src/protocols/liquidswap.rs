//! Liquidswap v0 swaps over uncorrelated curve pools.

use {
    crate::{
        aptos::{AccountAddress, MoveFunctionId, MoveType},
        protocols::{amount_argument, ProtocolError},
        transactions::EntryFunctionCall,
        units::{to_base_units_u64, BigDecimal},
    },
    bigdecimal::Zero,
    lazy_regex::Lazy,
    std::str::FromStr,
};

pub const LIQUIDSWAP_ADDRESS: &str =
    "0x190d44266241744264b964a37b8f09863167a12d3e70cda39376cfb4e3561e12";

static LIQUIDSWAP: Lazy<AccountAddress> = Lazy::new(|| {
    LIQUIDSWAP_ADDRESS
        .parse()
        .expect("Liquidswap address must be valid.")
});

static UNCORRELATED_CURVE: Lazy<MoveType> = Lazy::new(|| {
    MoveType::from_str(&format!("{LIQUIDSWAP_ADDRESS}::curves::Uncorrelated"))
        .expect("Liquidswap curve type must be valid.")
});

/// One side of a swap: the coin and how many decimals it has.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapToken {
    pub coin: MoveType,
    pub decimals: u8,
}

impl SwapToken {
    pub fn new(coin: MoveType, decimals: u8) -> Self {
        Self { coin, decimals }
    }
}

/// Swap `amount` of `from` into at least `min_out` of `to`.
pub fn swap(
    from: &SwapToken,
    to: &SwapToken,
    amount: &BigDecimal,
    min_out: &BigDecimal,
) -> Result<EntryFunctionCall, ProtocolError> {
    if from.coin == to.coin {
        return Err(ProtocolError::InvalidInput(
            "Source and destination coins must be different".to_string(),
        ));
    }

    if min_out < &BigDecimal::zero() {
        return Err(ProtocolError::InvalidInput(
            "Minimum coin out cannot be negative".to_string(),
        ));
    }

    let amount = amount_argument(amount, from.decimals)?;
    let min_out = match min_out.is_zero() {
        true => 0,
        false => to_base_units_u64(min_out, to.decimals)?,
    };

    Ok(
        EntryFunctionCall::new(MoveFunctionId::new(*LIQUIDSWAP, "scripts_v2", "swap"))
            .with_type_argument(from.coin.clone())
            .with_type_argument(to.coin.clone())
            .with_type_argument(UNCORRELATED_CURVE.clone())
            .with_argument(amount)
            .with_argument(min_out),
    )
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{aptos::MoveValue, token_list::COMMON_TOKENS, units::parse_amount},
        assert_matches::assert_matches,
    };

    fn token(index: usize) -> SwapToken {
        let token = &COMMON_TOKENS[index];

        SwapToken::new(token.move_struct_id.parse().unwrap(), token.decimals)
    }

    #[test]
    fn test_swap_uses_decimals_of_each_side() {
        let (apt, usdt) = (token(0), token(1));

        let call = swap(&apt, &usdt, &parse_amount("2").unwrap(), &parse_amount("9.5").unwrap())
            .unwrap();

        assert_eq!(
            call.to_string(),
            format!(
                "{LIQUIDSWAP_ADDRESS}::scripts_v2::swap<0x1::aptos_coin::AptosCoin, {}, {LIQUIDSWAP_ADDRESS}::curves::Uncorrelated>",
                COMMON_TOKENS[1].move_struct_id
            )
        );
        assert_eq!(
            call.arguments,
            vec![MoveValue::U64(200_000_000), MoveValue::U64(9_500_000)]
        );
    }

    #[test]
    fn test_swap_validation() {
        let (apt, usdc) = (token(0), token(2));
        let one = parse_amount("1").unwrap();

        assert_matches!(swap(&apt, &apt, &one, &one), Err(ProtocolError::InvalidInput(_)));
        assert_matches!(
            swap(&apt, &usdc, &one, &parse_amount("-1").unwrap()),
            Err(ProtocolError::InvalidInput(_))
        );
        assert_matches!(
            swap(&apt, &usdc, &parse_amount("0").unwrap(), &one),
            Err(ProtocolError::Units(_))
        );

        let call = swap(&apt, &usdc, &one, &parse_amount("0").unwrap()).unwrap();

        assert_eq!(call.arguments[1], MoveValue::U64(0));
    }
}
