pub(crate) use {
    crate::{error::AptdeckCliError, utils::secrets::Secret},
    anyhow::{anyhow, Result as AnyResult},
    aptdeck_sdk::{
        aptos::{AccountAddress, MoveType, Network},
        units::BigDecimal,
    },
    clap::{builder::ValueParser, Args, CommandFactory, Parser, Subcommand, ValueEnum},
    colored::Colorize,
    serde::{Deserialize, Serialize},
    std::{
        path::{Path, PathBuf},
        sync::atomic::{AtomicBool, Ordering},
    },
};

// Where to find config file.
pub(crate) const CLI_CONF_PATH: &str = "~/.aptdeck/conf.toml";

/// Whether the output should be machine readable. Set once from the global
/// `--json` flag.
pub(crate) static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Aptos networks selectable from the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AptosNet {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
}

impl From<AptosNet> for Network {
    fn from(net: AptosNet) -> Self {
        match net {
            AptosNet::Mainnet => Network::Mainnet,
            AptosNet::Testnet => Network::Testnet,
            AptosNet::Devnet => Network::Devnet,
        }
    }
}

impl std::fmt::Display for AptosNet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Network::from(*self))
    }
}

/// Struct holding the config structure.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(crate) struct CliConf {
    #[serde(default)]
    pub(crate) aptos: AptosConf,
    /// Private key of the active wallet, encrypted at rest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) wallet: Option<Secret<String>>,
}

impl CliConf {
    pub(crate) async fn load_from_path(path: &Path) -> AnyResult<Self> {
        let conf = tokio::fs::read_to_string(path).await?;

        Ok(toml::from_str(&conf)?)
    }

    pub(crate) async fn save_to_path(&self, path: &Path) -> AnyResult<()> {
        let parent_folder = path.parent().expect("Parent folder must exist.");
        let conf = toml::to_string_pretty(&self)?;

        tokio::fs::create_dir_all(parent_folder).await?;
        tokio::fs::write(path, conf).await?;

        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AptosConf {
    #[serde(default)]
    pub(crate) net: AptosNet,
    /// Custom fullnode REST URL. Falls back to the public one for [Self::net].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) rpc_url: Option<String>,
    /// Custom indexer GraphQL URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) indexer_url: Option<String>,
}

// == Used by clap ==

/// Expands `~/` to the user's home directory in path arguments.
pub(crate) fn expand_tilde(path: &str) -> AnyResult<PathBuf> {
    if let Some(path) = path.strip_prefix("~/") {
        match home::home_dir() {
            Some(home) => return Ok(home.join(path)),
            None => return Err(anyhow!("Could not find home directory")),
        }
    }

    Ok(path.into())
}

/// Parse a `0x`-prefixed account address.
pub(crate) fn parse_address(address: &str) -> AnyResult<AccountAddress> {
    address.parse()
}

/// Parse a Move type such as `0x1::aptos_coin::AptosCoin`.
pub(crate) fn parse_move_type(move_type: &str) -> AnyResult<MoveType> {
    move_type.parse()
}

/// Validate an HTTP(S) URL, keeping it as given.
pub(crate) fn parse_url(url: &str) -> AnyResult<String> {
    let parsed = reqwest::Url::parse(url)?;

    match parsed.scheme() {
        "http" | "https" => Ok(url.to_string()),
        scheme => Err(anyhow!("Unsupported URL scheme '{scheme}'")),
    }
}

/// Parse a human amount such as `1.5`.
pub(crate) fn parse_amount(amount: &str) -> AnyResult<BigDecimal> {
    Ok(aptdeck_sdk::units::parse_amount(amount)?)
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches};

    #[test]
    fn test_expand_tilde() {
        let home = home::home_dir().unwrap();

        assert_eq!(
            expand_tilde("~/.aptdeck/conf.toml").unwrap(),
            home.join(".aptdeck/conf.toml")
        );
        assert_eq!(
            expand_tilde("/tmp/conf.toml").unwrap(),
            PathBuf::from("/tmp/conf.toml")
        );
    }

    #[test]
    fn test_argument_parsers() {
        assert_eq!(parse_address("0x1").unwrap(), AccountAddress::ONE);
        assert!(parse_address("0xnothex").is_err());
        assert_eq!(
            parse_move_type("0x1::aptos_coin::AptosCoin").unwrap(),
            MoveType::aptos_coin()
        );
        assert_eq!(parse_amount(" 1.5 ").unwrap().to_string(), "1.5");
        assert_matches!(parse_amount("one"), Err(_));
        assert_eq!(
            parse_url("https://fullnode.example.com/v1").unwrap(),
            "https://fullnode.example.com/v1"
        );
        assert!(parse_url("ftp://fullnode.example.com").is_err());
        assert!(parse_url("not a url").is_err());
    }

    #[test]
    fn test_net_maps_to_network() {
        assert_eq!(Network::from(AptosNet::Mainnet), Network::Mainnet);
        assert_eq!(AptosNet::Devnet.to_string(), "devnet");
        assert_eq!(AptosNet::default(), AptosNet::Testnet);
    }
}
