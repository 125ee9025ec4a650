use {
    crate::{
        aptos::{
            build_aptos_client,
            execute_call,
            load_conf,
            load_wallet,
            require_positive,
            resolve_decimals,
            resolve_recipient,
        },
        command_title,
        display::json_output,
        item,
        loading,
        prelude::*,
    },
    aptdeck_sdk::{
        transactions::{transfer::transfer_coin, TransactionSubmitter},
        units::to_base_units_u64,
    },
};

#[derive(Args, Clone, Debug)]
pub(crate) struct TransferCommand {
    #[arg(
        long = "to",
        help = "Recipient address or ANS name such as alice.apt",
        value_name = "ADDRESS|NAME"
    )]
    to: String,
    #[arg(
        long = "amount",
        help = "Amount to send, in whole coins (1.5 APT, not octas)",
        value_name = "AMOUNT",
        value_parser = ValueParser::from(parse_amount)
    )]
    amount: BigDecimal,
    #[arg(
        long = "coin-type",
        help = "Coin to send, APT by default",
        value_name = "MOVE_TYPE",
        value_parser = ValueParser::from(parse_move_type)
    )]
    coin_type: Option<MoveType>,
    #[arg(
        long = "decimals",
        help = "Decimals of the coin. Looked up in the common token list when omitted",
        value_name = "DECIMALS"
    )]
    decimals: Option<u8>,
    /// Only estimate gas and check whether the transfer would succeed.
    #[arg(long)]
    simulate: bool,
}

/// Handle the provided transfer command.
pub(crate) async fn handle(
    TransferCommand {
        to,
        amount,
        coin_type,
        decimals,
        simulate,
    }: TransferCommand,
    conf_path: PathBuf,
) -> AnyResult<(), AptdeckCliError> {
    let conf = load_conf(&conf_path).await?;
    let account = load_wallet(&conf)?;
    let client = build_aptos_client(&conf.aptos);

    let coin_type = coin_type.unwrap_or_else(MoveType::aptos_coin);

    command_title!("Transferring {amount} of {coin_type} to {to}");

    require_positive(&amount, "Transfer")?;

    let decimals = resolve_decimals(&client, coin_type.as_str(), decimals).await;
    let base_units = to_base_units_u64(&amount, decimals)
        .map_err(|e| AptdeckCliError::failed("Transfer", e))?;

    let recipient = resolve_recipient(&client, &to).await?;
    let call = transfer_coin(&coin_type, recipient, base_units);

    item!("Recipient: {recipient}");
    item!("Base units: {base_units}");

    if !simulate {
        return execute_call(&client, &account, call, "Transfer")
            .await
            .map(|_| ());
    }

    let handle = loading!("Simulating transfer...");

    let simulation = match TransactionSubmitter::new(&client, &account)
        .simulate(&call)
        .await
    {
        Ok(simulation) => simulation,
        Err(e) => {
            handle.error();

            return Err(AptdeckCliError::failed("Simulation", e));
        }
    };

    handle.success();

    item!(
        "Would {outcome}: {status}",
        outcome = if simulation.success {
            "succeed".green()
        } else {
            "fail".red()
        },
        status = simulation.vm_status
    );
    item!(
        "Gas: {} units at {} octas",
        simulation.gas_used,
        simulation.gas_unit_price
    );

    json_output(&simulation)
}
