use {
    serde::{Deserialize, Serialize},
    std::str::FromStr,
};

/// Public Aptos networks served by Aptos Labs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Testnet, Network::Devnet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
        }
    }

    /// Fullnode REST API base URL.
    pub fn fullnode_url(&self) -> String {
        format!("https://api.{}.aptoslabs.com/v1", self.as_str())
    }

    /// Indexer GraphQL endpoint.
    pub fn indexer_url(&self) -> String {
        format!("https://api.{}.aptoslabs.com/v1/graphql", self.as_str())
    }

    /// Explorer page of an account.
    pub fn explorer_account_url(&self, address: impl std::fmt::Display) -> String {
        format!(
            "https://explorer.aptoslabs.com/account/{address}?network={}",
            self.as_str()
        )
    }

    /// Explorer page of a transaction.
    pub fn explorer_txn_url(&self, hash: &str) -> String {
        format!(
            "https://explorer.aptoslabs.com/txn/{hash}?network={}",
            self.as_str()
        )
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Network::Mainnet)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(format!(
                "unknown network '{other}', expected one of: mainnet, testnet, devnet"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_urls() {
        assert_eq!(
            Network::Mainnet.fullnode_url(),
            "https://api.mainnet.aptoslabs.com/v1"
        );
        assert_eq!(
            Network::Devnet.indexer_url(),
            "https://api.devnet.aptoslabs.com/v1/graphql"
        );
        assert_eq!(
            Network::Testnet.explorer_txn_url("0xabc"),
            "https://explorer.aptoslabs.com/txn/0xabc?network=testnet"
        );
        assert_eq!(
            Network::Mainnet.explorer_account_url("0x1"),
            "https://explorer.aptoslabs.com/account/0x1?network=mainnet"
        );
    }

    #[test]
    fn test_network_parse_and_default() {
        assert_eq!(Network::default(), Network::Testnet);
        assert_eq!("MainNet".parse::<Network>(), Ok(Network::Mainnet));
        assert!("localnet".parse::<Network>().is_err());

        for net in Network::ALL {
            assert_eq!(net.to_string().parse::<Network>(), Ok(net));
        }
    }
}
