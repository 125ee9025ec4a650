use crate::{
    aptos::{build_aptos_client, load_conf, load_wallet},
    prelude::*,
};

mod account_balance;
mod account_history;
mod account_info;
mod account_nfts;

use {
    account_balance::{account_balance, account_balances},
    account_history::account_history,
    account_info::{account_info, account_staking},
    account_nfts::account_nfts,
};

/// Account to read. Defaults to the configured wallet.
#[derive(Args, Clone, Debug)]
pub(crate) struct AddressArgs {
    #[arg(
        long = "address",
        short = 'a',
        help = "Account address, defaults to the configured wallet",
        value_name = "ADDRESS",
        value_parser = ValueParser::from(parse_address)
    )]
    address: Option<AccountAddress>,
}

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum AccountCommand {
    #[command(about = "APT balance of an account")]
    Balance {
        #[command(flatten)]
        address: AddressArgs,
    },
    #[command(about = "Every coin and fungible asset held by an account")]
    Balances {
        #[command(flatten)]
        address: AddressArgs,
    },
    #[command(about = "Most recent transactions sent by an account")]
    History {
        #[command(flatten)]
        address: AddressArgs,
        /// How many transactions to fetch.
        #[arg(long, default_value_t = aptdeck_sdk::aptos::DEFAULT_TX_LIMIT)]
        limit: u16,
    },
    #[command(about = "NFTs owned by an account")]
    Nfts {
        #[command(flatten)]
        address: AddressArgs,
    },
    #[command(about = "Balance, sequence number and primary name of an account")]
    Info {
        #[command(flatten)]
        address: AddressArgs,
    },
    #[command(about = "APT staked through the account's stake pool")]
    Staking {
        #[command(flatten)]
        address: AddressArgs,
    },
}

/// Handle the provided account command.
pub(crate) async fn handle(
    command: AccountCommand,
    conf_path: PathBuf,
) -> AnyResult<(), AptdeckCliError> {
    let conf = load_conf(&conf_path).await?;
    let client = build_aptos_client(&conf.aptos);

    match command {
        AccountCommand::Balance { address } => {
            let address = address.resolve(&conf)?;

            account_balance(&client, address).await.map(|_| ())
        }
        AccountCommand::Balances { address } => {
            let address = address.resolve(&conf)?;

            account_balances(&client, address).await.map(|_| ())
        }
        AccountCommand::History { address, limit } => {
            let address = address.resolve(&conf)?;

            account_history(&client, address, limit).await.map(|_| ())
        }
        AccountCommand::Nfts { address } => {
            let address = address.resolve(&conf)?;

            account_nfts(&client, address).await.map(|_| ())
        }
        AccountCommand::Info { address } => {
            let address = address.resolve(&conf)?;

            account_info(&client, address).await.map(|_| ())
        }
        AccountCommand::Staking { address } => {
            let address = address.resolve(&conf)?;

            account_staking(&client, address).await.map(|_| ())
        }
    }
}

impl AddressArgs {
    /// The given address, or the address of the configured wallet.
    fn resolve(self, conf: &CliConf) -> AnyResult<AccountAddress, AptdeckCliError> {
        match self.address {
            Some(address) => Ok(address),
            None => Ok(load_wallet(conf)?.address()),
        }
    }
}

/// Mock fullnode + indexer shared by the account command tests.
#[cfg(test)]
pub(crate) async fn mock_client() -> (mockito::ServerGuard, aptdeck_sdk::aptos::AptosClient) {
    let server = mockito::Server::new_async().await;
    let client = aptdeck_sdk::aptos::AptosClient::builder()
        .with_network(Network::Mainnet)
        .with_fullnode_url(&server.url())
        .with_indexer_url(&format!("{}/graphql", server.url()))
        .build();

    (server, client)
}
