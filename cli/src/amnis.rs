use {
    crate::{
        aptos::{build_aptos_client, execute_call, load_conf, load_wallet, require_mainnet},
        command_title,
        prelude::*,
    },
    aptdeck_sdk::protocols::amnis,
};

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum AmnisCommand {
    #[command(about = "Stake APT for stAPT")]
    Stake {
        #[arg(
            long = "amount",
            help = "APT to stake",
            value_name = "AMOUNT",
            value_parser = ValueParser::from(parse_amount)
        )]
        amount: BigDecimal,
        #[arg(
            long = "recipient",
            help = "Who receives the stAPT, defaults to the wallet",
            value_name = "ADDRESS",
            value_parser = ValueParser::from(parse_address)
        )]
        recipient: Option<AccountAddress>,
    },
    #[command(about = "Unstake stAPT back into APT")]
    Unstake {
        #[arg(
            long = "amount",
            help = "Amount to unstake",
            value_name = "AMOUNT",
            value_parser = ValueParser::from(parse_amount)
        )]
        amount: BigDecimal,
        #[arg(
            long = "recipient",
            help = "Who receives the APT, defaults to the wallet",
            value_name = "ADDRESS",
            value_parser = ValueParser::from(parse_address)
        )]
        recipient: Option<AccountAddress>,
    },
}

/// Handle the provided Amnis command.
pub(crate) async fn handle(command: AmnisCommand, conf_path: PathBuf) -> AnyResult<(), AptdeckCliError> {
    let conf = load_conf(&conf_path).await?;
    let client = build_aptos_client(&conf.aptos);

    require_mainnet(&client, "Amnis")?;

    let account = load_wallet(&conf)?;

    let (operation, call) = match command {
        AmnisCommand::Stake { amount, recipient } => {
            let recipient = recipient.unwrap_or_else(|| account.address());

            command_title!("Staking {amount} APT with Amnis for {recipient}");

            ("Stake", amnis::stake(&amount, recipient))
        }
        AmnisCommand::Unstake { amount, recipient } => {
            let recipient = recipient.unwrap_or_else(|| account.address());

            command_title!("Unstaking {amount} from Amnis for {recipient}");

            ("Unstake", amnis::unstake(&amount, recipient))
        }
    };

    let call = call.map_err(|e| AptdeckCliError::failed(operation, e))?;

    execute_call(&client, &account, call, operation).await.map(|_| ())
}
