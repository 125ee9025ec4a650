use {
    crate::{
        aptos::{build_aptos_client, load_conf, or_warn},
        command_title,
        display::json_output,
        item,
        loading,
        prelude::*,
    },
    aptdeck_sdk::aptos::AptosClient,
};

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum AnsCommand {
    #[command(about = "Primary name registered for an address")]
    Name {
        #[arg(
            help = "Address to look up",
            value_name = "ADDRESS",
            value_parser = ValueParser::from(parse_address)
        )]
        address: AccountAddress,
    },
    #[command(about = "Owner address of a name such as alice.apt")]
    Address {
        #[arg(help = "Name to resolve", value_name = "NAME")]
        name: String,
    },
}

#[derive(Debug, Default, Serialize)]
pub(crate) struct NameLookup {
    pub(crate) address: String,
    pub(crate) name: Option<String>,
}

/// Handle the provided ANS command.
pub(crate) async fn handle(command: AnsCommand, conf_path: PathBuf) -> AnyResult<(), AptdeckCliError> {
    let conf = load_conf(&conf_path).await?;
    let client = build_aptos_client(&conf.aptos);

    match command {
        AnsCommand::Name { address } => ans_name(&client, address).await.map(|_| ()),
        AnsCommand::Address { name } => ans_address(&client, &name).await.map(|_| ()),
    }
}

/// Print the primary name of `address`, if any.
async fn ans_name(client: &AptosClient, address: AccountAddress) -> AnyResult<NameLookup, AptdeckCliError> {
    command_title!("Primary name of {address}");

    let handle = loading!("Querying the name service...");

    let result = client.primary_name(address).await;

    handle.success();

    let lookup = NameLookup {
        address: address.to_string(),
        name: or_warn(result, "primary name"),
    };

    match &lookup.name {
        Some(name) => item!("{}", name.bold()),
        None => item!("{}", "No primary name".truecolor(100, 100, 100)),
    }

    json_output(&lookup)?;

    Ok(lookup)
}

/// Print the owner of `name`, if it is registered.
async fn ans_address(client: &AptosClient, name: &str) -> AnyResult<Option<AccountAddress>, AptdeckCliError> {
    command_title!("Owner of {name}");

    let handle = loading!("Querying the name service...");

    let result = client.owner_address(name).await;

    handle.success();

    let owner = or_warn(result, "name owner");

    match owner {
        Some(owner) => item!("{}", owner.to_string().bold()),
        None => item!("{}", "Name is not registered".truecolor(100, 100, 100)),
    }

    json_output(&serde_json::json!({
        "name": name,
        "address": owner.map(|owner| owner.to_string()),
    }))?;

    Ok(owner)
}
