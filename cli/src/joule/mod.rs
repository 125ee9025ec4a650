use {
    crate::{
        aptos::{build_aptos_client, load_conf, load_wallet, require_mainnet},
        prelude::*,
    },
    aptdeck_sdk::protocols::joule::{JouleMarketClient, PositionId},
};

mod joule_lending;
mod joule_pool;
mod joule_positions;

use {
    joule_lending::{joule_claim_reward, joule_lending, LendingAction},
    joule_pool::joule_pool,
    joule_positions::{joule_position, joule_positions},
};

/// Asset and amount of a Joule lending operation.
#[derive(Args, Clone, Debug)]
pub(crate) struct JouleAssetArgs {
    #[arg(
        long = "token",
        short = 't',
        help = "Coin type, or fungible asset address with --fungible-asset",
        value_name = "TOKEN"
    )]
    token: String,
    #[arg(
        long = "amount",
        help = "Amount in whole tokens",
        value_name = "AMOUNT",
        value_parser = ValueParser::from(parse_amount)
    )]
    amount: BigDecimal,
    /// Treat --token as a fungible asset metadata address.
    #[arg(long = "fungible-asset")]
    fungible_asset: bool,
    #[arg(
        long = "decimals",
        help = "Decimals of the token. Looked up when omitted",
        value_name = "DECIMALS"
    )]
    decimals: Option<u8>,
}

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum JouleCommand {
    #[command(about = "Supply tokens to a Joule position")]
    Lend {
        #[command(flatten)]
        asset: JouleAssetArgs,
        #[arg(
            long = "position-id",
            help = "Position to lend to",
            value_name = "ID",
            value_parser = ValueParser::from(parse_position_id)
        )]
        position_id: PositionId,
        /// Open the position as part of this transaction.
        #[arg(long = "new-position")]
        new_position: bool,
    },
    #[command(about = "Borrow tokens against a Joule position")]
    Borrow {
        #[command(flatten)]
        asset: JouleAssetArgs,
        #[arg(
            long = "position-id",
            value_name = "ID",
            value_parser = ValueParser::from(parse_position_id)
        )]
        position_id: PositionId,
    },
    #[command(about = "Repay borrowed tokens of a Joule position")]
    Repay {
        #[command(flatten)]
        asset: JouleAssetArgs,
        #[arg(
            long = "position-id",
            value_name = "ID",
            value_parser = ValueParser::from(parse_position_id)
        )]
        position_id: PositionId,
    },
    #[command(about = "Withdraw supplied tokens from a Joule position")]
    Withdraw {
        #[command(flatten)]
        asset: JouleAssetArgs,
        #[arg(
            long = "position-id",
            value_name = "ID",
            value_parser = ValueParser::from(parse_position_id)
        )]
        position_id: PositionId,
    },
    #[command(about = "Claim Joule incentives")]
    ClaimReward {
        #[arg(
            long = "reward-coin-type",
            help = "Coin the rewards are paid in",
            value_name = "MOVE_TYPE",
            value_parser = ValueParser::from(parse_move_type)
        )]
        reward_coin_type: MoveType,
    },
    #[command(about = "All Joule positions of an account")]
    Positions {
        #[arg(
            long = "address",
            short = 'a',
            help = "Account address, defaults to the configured wallet",
            value_name = "ADDRESS",
            value_parser = ValueParser::from(parse_address)
        )]
        address: Option<AccountAddress>,
    },
    #[command(about = "Details of one Joule position")]
    Position {
        #[arg(
            long = "address",
            short = 'a',
            help = "Account address, defaults to the configured wallet",
            value_name = "ADDRESS",
            value_parser = ValueParser::from(parse_address)
        )]
        address: Option<AccountAddress>,
        #[arg(
            long = "position-id",
            value_name = "ID",
            value_parser = ValueParser::from(parse_position_id)
        )]
        position_id: PositionId,
    },
    #[command(about = "Market figures of a Joule pool")]
    Pool {
        #[arg(
            long = "token",
            short = 't',
            help = "Coin type or fungible asset address of the pool",
            value_name = "TOKEN"
        )]
        token: String,
    },
}

/// Handle the provided Joule command.
pub(crate) async fn handle(command: JouleCommand, conf_path: PathBuf) -> AnyResult<(), AptdeckCliError> {
    let conf = load_conf(&conf_path).await?;
    let client = build_aptos_client(&conf.aptos);

    // Market data comes from Joule's own API and works on any network.
    if !matches!(command, JouleCommand::Pool { .. }) {
        require_mainnet(&client, "Joule")?;
    }

    let address_or_wallet = |address: Option<AccountAddress>| match address {
        Some(address) => Ok(address),
        None => load_wallet(&conf).map(|account| account.address()),
    };

    match command {
        JouleCommand::Lend {
            asset,
            position_id,
            new_position,
        } => {
            let account = load_wallet(&conf)?;

            joule_lending(&client, &account, LendingAction::Lend { new_position }, asset, position_id)
                .await
                .map(|_| ())
        }
        JouleCommand::Borrow { asset, position_id } => {
            let account = load_wallet(&conf)?;

            joule_lending(&client, &account, LendingAction::Borrow, asset, position_id)
                .await
                .map(|_| ())
        }
        JouleCommand::Repay { asset, position_id } => {
            let account = load_wallet(&conf)?;

            joule_lending(&client, &account, LendingAction::Repay, asset, position_id)
                .await
                .map(|_| ())
        }
        JouleCommand::Withdraw { asset, position_id } => {
            let account = load_wallet(&conf)?;

            joule_lending(&client, &account, LendingAction::Withdraw, asset, position_id)
                .await
                .map(|_| ())
        }
        JouleCommand::ClaimReward { reward_coin_type } => {
            let account = load_wallet(&conf)?;

            joule_claim_reward(&client, &account, &reward_coin_type)
                .await
                .map(|_| ())
        }
        JouleCommand::Positions { address } => {
            let address = address_or_wallet(address)?;

            joule_positions(&client, address).await.map(|_| ())
        }
        JouleCommand::Position {
            address,
            position_id,
        } => {
            let address = address_or_wallet(address)?;

            joule_position(&client, address, position_id).await.map(|_| ())
        }
        JouleCommand::Pool { token } => joule_pool(&JouleMarketClient::default(), &token)
            .await
            .map(|_| ()),
    }
}

/// Parse a numeric Joule position id.
fn parse_position_id(position_id: &str) -> AnyResult<PositionId> {
    Ok(position_id.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position_id() {
        assert_eq!(parse_position_id("7").unwrap(), PositionId(7));
        assert!(parse_position_id("").is_err());
        assert!(parse_position_id("first").is_err());
    }
}
