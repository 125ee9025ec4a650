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
        display::json_output,
        item,
        prelude::*,
    },
    aptdeck_sdk::{
        account::LocalAccount,
        aptos::AptosClient,
        protocols::{
            liquidswap::{self, SwapToken},
            ProtocolError,
        },
        transactions::TransactionOutcome,
        token_list::{common_token_by_symbol, COMMON_TOKENS},
    },
};

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum LiquidswapCommand {
    #[command(about = "Swap one coin for another")]
    Swap {
        #[arg(
            long = "from",
            help = "Coin to sell, as a symbol (APT, USDT, USDC) or a coin type",
            value_name = "COIN"
        )]
        from: String,
        #[arg(
            long = "to",
            help = "Coin to buy, as a symbol (APT, USDT, USDC) or a coin type",
            value_name = "COIN"
        )]
        to: String,
        #[arg(
            long = "amount",
            help = "Amount of --from to sell",
            value_name = "AMOUNT",
            value_parser = ValueParser::from(parse_amount)
        )]
        amount: BigDecimal,
        #[arg(
            long = "min-out",
            help = "Least amount of --to to accept",
            value_name = "AMOUNT",
            default_value = "0",
            value_parser = ValueParser::from(parse_amount)
        )]
        min_out: BigDecimal,
    },
    #[command(about = "Coins with known symbols")]
    Tokens,
}

/// Handle the provided Liquidswap command.
pub(crate) async fn handle(
    command: LiquidswapCommand,
    conf_path: PathBuf,
) -> AnyResult<(), AptdeckCliError> {
    let (from, to, amount, min_out) = match command {
        LiquidswapCommand::Tokens => return liquidswap_tokens(),
        LiquidswapCommand::Swap {
            from,
            to,
            amount,
            min_out,
        } => (from, to, amount, min_out),
    };

    let conf = load_conf(&conf_path).await?;
    let client = build_aptos_client(&conf.aptos);

    require_mainnet(&client, "Liquidswap")?;

    let account = load_wallet(&conf)?;

    liquidswap_swap(&client, &account, &from, &to, &amount, &min_out)
        .await
        .map(|_| ())
}

/// Sell `amount` of `from` for at least `min_out` of `to`. Inputs are checked
/// before the coins are resolved.
async fn liquidswap_swap(
    client: &AptosClient,
    account: &LocalAccount,
    from: &str,
    to: &str,
    amount: &BigDecimal,
    min_out: &BigDecimal,
) -> AnyResult<TransactionOutcome, AptdeckCliError> {
    command_title!("Swapping {amount} {from} for {to} on Liquidswap");

    require_positive(amount, "Swap")?;

    if same_coin(from, to) {
        return Err(AptdeckCliError::failed(
            "Swap",
            ProtocolError::InvalidInput("Source and destination coins must be different".to_string()),
        ));
    }

    if min_out < &BigDecimal::from(0) {
        return Err(AptdeckCliError::failed(
            "Swap",
            ProtocolError::InvalidInput("Minimum coin out cannot be negative".to_string()),
        ));
    }

    let from = swap_token(client, from)
        .await
        .map_err(|e| AptdeckCliError::failed("Swap", e))?;
    let to = swap_token(client, to)
        .await
        .map_err(|e| AptdeckCliError::failed("Swap", e))?;

    item!("Selling {} ({} decimals)", from.coin, from.decimals);
    item!("Buying {} ({} decimals)", to.coin, to.decimals);

    let call = liquidswap::swap(&from, &to, amount, min_out)
        .map_err(|e| AptdeckCliError::failed("Swap", e))?;

    execute_call(client, account, call, "Swap").await
}

/// Symbols compare case-insensitively, coin types exactly.
fn same_coin(from: &str, to: &str) -> bool {
    match common_token_by_symbol(from) {
        Some(_) => from.eq_ignore_ascii_case(to),
        None => from == to,
    }
}

/// A known symbol, or any coin type with its decimals looked up.
async fn swap_token(client: &AptosClient, coin: &str) -> AnyResult<SwapToken> {
    if let Some(token) = common_token_by_symbol(coin) {
        return Ok(SwapToken::new(token.move_struct_id.parse()?, token.decimals));
    }

    let coin_type = parse_move_type(coin)
        .map_err(|_| anyhow!("'{coin}' is neither a known symbol nor a coin type"))?;
    let decimals = resolve_decimals(client, coin_type.as_str(), None).await;

    Ok(SwapToken::new(coin_type, decimals))
}

fn liquidswap_tokens() -> AnyResult<(), AptdeckCliError> {
    command_title!("Coins with known symbols");

    for token in COMMON_TOKENS {
        item!(
            "{symbol} {name} ({decimals} decimals) {id}",
            symbol = token.symbol.bold(),
            name = token.name,
            decimals = token.decimals,
            id = token.move_struct_id.truecolor(100, 100, 100),
        );
    }

    json_output(&COMMON_TOKENS)
}
