use {
    crate::{aptos::or_warn, command_title, display::json_output, item, loading, prelude::*},
    aptdeck_sdk::{
        aptos::{AptosClient, CoinBalance},
        units::{format_amount, from_base_units, APT_DECIMALS},
    },
};

#[derive(Debug, Default, Serialize)]
pub(crate) struct AptBalance {
    pub(crate) octas: u64,
    pub(crate) apt: String,
}

/// Print the APT balance of `address`. A failed lookup renders zero.
pub(crate) async fn account_balance(
    client: &AptosClient,
    address: AccountAddress,
) -> AnyResult<AptBalance, AptdeckCliError> {
    command_title!("APT balance of {address}");

    let handle = loading!("Fetching balance...");

    let result = client.apt_balance(address).await;

    handle.success();

    let octas = or_warn(result, "APT balance");
    let balance = AptBalance {
        octas,
        apt: format_amount(&from_base_units(octas as u128, APT_DECIMALS), APT_DECIMALS),
    };

    item!("{} APT", balance.apt.bold());

    json_output(&balance)?;

    Ok(balance)
}

/// Print every asset held by `address`. A failed lookup renders no assets.
pub(crate) async fn account_balances(
    client: &AptosClient,
    address: AccountAddress,
) -> AnyResult<Vec<CoinBalance>, AptdeckCliError> {
    command_title!("Assets held by {address}");

    let handle = loading!("Fetching balances from the indexer...");

    let result = client.fungible_balances(address).await;

    handle.success();

    let balances = or_warn(result, "balances");

    if balances.is_empty() {
        item!("{}", "No assets".truecolor(100, 100, 100));
    }

    for balance in &balances {
        item!(
            "{amount} {symbol} {asset}",
            amount = format_amount(&balance.human_amount(), balance.decimals).bold(),
            symbol = balance.symbol.as_deref().unwrap_or("?"),
            asset = balance.asset_type.truecolor(100, 100, 100),
        );
    }

    json_output(&balances)?;

    Ok(balances)
}
