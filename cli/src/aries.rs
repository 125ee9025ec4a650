use {
    crate::{
        aptos::{
            build_aptos_client,
            execute_call,
            load_conf,
            load_wallet,
            require_mainnet,
            require_positive,
            resolve_decimals,
        },
        command_title,
        item,
        prelude::*,
    },
    aptdeck_sdk::{
        account::LocalAccount,
        aptos::AptosClient,
        protocols::{aries, ProtocolError},
        transactions::{EntryFunctionCall, TransactionOutcome},
    },
};

/// Coin and amount of an Aries operation.
#[derive(Args, Clone, Debug)]
pub(crate) struct AriesCoinArgs {
    #[arg(
        long = "coin-type",
        short = 'c',
        help = "Coin type, e.g. 0x1::aptos_coin::AptosCoin",
        value_name = "MOVE_TYPE",
        value_parser = ValueParser::from(parse_move_type)
    )]
    coin_type: MoveType,
    #[arg(
        long = "amount",
        help = "Amount in whole coins",
        value_name = "AMOUNT",
        value_parser = ValueParser::from(parse_amount)
    )]
    amount: BigDecimal,
    #[arg(
        long = "decimals",
        help = "Decimals of the coin. Looked up when omitted",
        value_name = "DECIMALS"
    )]
    decimals: Option<u8>,
}

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum AriesCommand {
    #[command(about = "Register the Aries profile other operations need")]
    CreateProfile,
    #[command(about = "Deposit coins into Aries")]
    Lend {
        #[command(flatten)]
        coin: AriesCoinArgs,
    },
    #[command(about = "Borrow coins from Aries")]
    Borrow {
        #[command(flatten)]
        coin: AriesCoinArgs,
    },
    #[command(about = "Repay borrowed coins")]
    Repay {
        #[command(flatten)]
        coin: AriesCoinArgs,
    },
    #[command(about = "Withdraw deposited coins")]
    Withdraw {
        #[command(flatten)]
        coin: AriesCoinArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AriesAction {
    Lend,
    Borrow,
    Repay,
    Withdraw,
}

impl AriesAction {
    fn operation(&self) -> &'static str {
        match self {
            Self::Lend => "Lend",
            Self::Borrow => "Borrow",
            Self::Repay => "Repay",
            Self::Withdraw => "Withdraw",
        }
    }

    fn build(
        &self,
        coin_type: &MoveType,
        amount: &BigDecimal,
        decimals: u8,
    ) -> Result<EntryFunctionCall, ProtocolError> {
        match self {
            Self::Lend => aries::lend(coin_type, amount, decimals),
            Self::Borrow => aries::borrow(coin_type, amount, decimals),
            Self::Repay => aries::repay(coin_type, amount, decimals),
            Self::Withdraw => aries::withdraw(coin_type, amount, decimals),
        }
    }
}

/// Handle the provided Aries command.
pub(crate) async fn handle(command: AriesCommand, conf_path: PathBuf) -> AnyResult<(), AptdeckCliError> {
    let conf = load_conf(&conf_path).await?;
    let client = build_aptos_client(&conf.aptos);

    require_mainnet(&client, "Aries")?;

    let account = load_wallet(&conf)?;

    let (action, coin) = match command {
        AriesCommand::CreateProfile => {
            command_title!("Creating Aries profile '{}'", aries::DEFAULT_PROFILE_NAME);

            return execute_call(&client, &account, aries::create_profile(), "Create profile")
                .await
                .map(|_| ());
        }
        AriesCommand::Lend { coin } => (AriesAction::Lend, coin),
        AriesCommand::Borrow { coin } => (AriesAction::Borrow, coin),
        AriesCommand::Repay { coin } => (AriesAction::Repay, coin),
        AriesCommand::Withdraw { coin } => (AriesAction::Withdraw, coin),
    };

    aries_lending(&client, &account, action, coin).await.map(|_| ())
}

/// Deposit into or withdraw from the Aries profile of `account`.
async fn aries_lending(
    client: &AptosClient,
    account: &LocalAccount,
    action: AriesAction,
    coin: AriesCoinArgs,
) -> AnyResult<TransactionOutcome, AptdeckCliError> {
    let operation = action.operation();

    command_title!("Aries {operation}: {} of {}", coin.amount, coin.coin_type);

    require_positive(&coin.amount, operation)?;

    let decimals = resolve_decimals(client, coin.coin_type.as_str(), coin.decimals).await;

    item!("Decimals: {decimals}");

    let call = action
        .build(&coin.coin_type, &coin.amount, decimals)
        .map_err(|e| AptdeckCliError::failed(operation, e))?;

    execute_call(client, account, call, operation).await
}
