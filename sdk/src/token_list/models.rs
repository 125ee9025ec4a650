use serde::{Deserialize, Serialize};

/// One record of the Panora token list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenListEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    pub decimals: u8,
    /// Move struct id of the coin, when the token exists as a coin.
    #[serde(default)]
    pub token_address: Option<String>,
    /// Metadata object address, when the token exists as a fungible asset.
    #[serde(default)]
    pub fa_address: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub coin_gecko_id: Option<String>,
}

impl TokenListEntry {
    /// Whether `address` names this token, either as its coin type or as its
    /// fungible asset address. Comparison ignores case.
    pub fn matches_address(&self, address: &str) -> bool {
        [&self.token_address, &self.fa_address]
            .into_iter()
            .flatten()
            .any(|candidate| candidate.eq_ignore_ascii_case(address))
    }

    pub fn matches_symbol(&self, symbol: &str) -> bool {
        self.symbol.to_uppercase() == symbol.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deserializes_from_panora_shape() {
        let entry: TokenListEntry = serde_json::from_value(serde_json::json!({
            "chainId": 1,
            "name": "Tether USD",
            "symbol": "USDt",
            "decimals": 6,
            "faAddress": "0x357b0b74bc833e95a115ad22604854d6b0fca151cecd94111770e5d6ffc9dc2b",
            "logoUrl": "https://assets.panora.exchange/tokens/aptos/USDT.svg",
            "websiteUrl": "https://tether.to",
            "panoraSymbol": "USDt",
            "coinGeckoId": "tether"
        }))
        .unwrap();

        assert_eq!(entry.decimals, 6);
        assert_eq!(entry.token_address, None);
        assert_eq!(entry.coin_gecko_id.as_deref(), Some("tether"));
    }

    #[test]
    fn test_entry_without_name_or_symbol() {
        let entry: TokenListEntry = serde_json::from_value(serde_json::json!({
            "faAddress": "0xbeef",
            "decimals": 6
        }))
        .unwrap();

        assert!(entry.name.is_empty());
        assert!(entry.symbol.is_empty());
        assert!(entry.matches_address("0xBEEF"));
    }

    #[test]
    fn test_matches_ignore_case() {
        let entry = TokenListEntry {
            name: "Aptos Coin".to_string(),
            symbol: "APT".to_string(),
            decimals: 8,
            token_address: Some("0x1::aptos_coin::AptosCoin".to_string()),
            fa_address: Some("0xA".to_string()),
            logo_url: None,
            website_url: None,
            coin_gecko_id: None,
        };

        assert!(entry.matches_address("0x1::APTOS_COIN::aptoscoin"));
        assert!(entry.matches_address("0xa"));
        assert!(!entry.matches_address("0xb"));
        assert!(entry.matches_symbol("apt"));
        assert!(!entry.matches_symbol("usdc"));
    }
}
