use serde::Serialize;

/// Decimals assumed for tokens missing from [COMMON_TOKENS].
pub const DEFAULT_TOKEN_DECIMALS: u8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CommonToken {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
    pub move_struct_id: &'static str,
}

/// Tokens offered for swaps on mainnet.
pub const COMMON_TOKENS: &[CommonToken] = &[
    CommonToken {
        symbol: "APT",
        name: "Aptos Coin",
        decimals: 8,
        move_struct_id: "0x1::aptos_coin::AptosCoin",
    },
    CommonToken {
        symbol: "USDT",
        name: "USD Tether",
        decimals: 6,
        move_struct_id:
            "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDT",
    },
    CommonToken {
        symbol: "USDC",
        name: "USD Coin",
        decimals: 6,
        move_struct_id:
            "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDC",
    },
];

pub fn common_token_by_symbol(symbol: &str) -> Option<&'static CommonToken> {
    COMMON_TOKENS
        .iter()
        .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
}

pub fn common_token_by_struct_id(move_struct_id: &str) -> Option<&'static CommonToken> {
    COMMON_TOKENS
        .iter()
        .find(|token| token.move_struct_id == move_struct_id)
}

/// Decimals of a common token, or [DEFAULT_TOKEN_DECIMALS].
pub fn common_token_decimals(move_struct_id: &str) -> u8 {
    common_token_by_struct_id(move_struct_id)
        .map(|token| token.decimals)
        .unwrap_or(DEFAULT_TOKEN_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_token_lookups() {
        assert_eq!(common_token_by_symbol("usdc").unwrap().decimals, 6);
        assert!(common_token_by_symbol("DOGE").is_none());

        assert_eq!(common_token_decimals("0x1::aptos_coin::AptosCoin"), 8);
        assert_eq!(
            common_token_decimals(
                "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDT"
            ),
            6
        );
        assert_eq!(common_token_decimals("0x1::unknown::Token"), 8);
    }
}
