use {
    crate::{aptos::or_warn, command_title, display::json_output, item, loading, prelude::*},
    aptdeck_sdk::{
        aptos::AptosClient,
        units::{format_amount, APT_DECIMALS},
    },
};

#[derive(Debug, Serialize)]
pub(crate) struct AccountOverview {
    pub(crate) address: AccountAddress,
    pub(crate) exists: bool,
    pub(crate) sequence_number: Option<u64>,
    pub(crate) apt_balance: String,
    pub(crate) primary_name: Option<String>,
    pub(crate) explorer_url: String,
}

#[derive(Debug, Default, Serialize)]
pub(crate) struct StakingView {
    pub(crate) has_stake_pool: bool,
    pub(crate) staked_octas: u64,
    pub(crate) staked_apt: String,
}

/// Print an overview of `address`. Each part that cannot be fetched is shown
/// empty.
pub(crate) async fn account_info(
    client: &AptosClient,
    address: AccountAddress,
) -> AnyResult<AccountOverview, AptdeckCliError> {
    command_title!("Account {address}");

    let handle = loading!("Fetching account details...");

    let (account, balance, name) = tokio::join!(
        client.account(address),
        client.apt_balance(address),
        client.primary_name(address),
    );

    handle.success();

    let (exists, sequence_number) = match account {
        Ok(account) => (true, Some(account.sequence_number)),
        Err(e) if e.is_not_found() => (false, None),
        Err(e) => (false, or_warn(Err(e), "account")),
    };
    let octas = or_warn(balance, "APT balance");

    let overview = AccountOverview {
        address,
        exists,
        sequence_number,
        apt_balance: format_amount(
            &aptdeck_sdk::units::from_base_units(octas as u128, APT_DECIMALS),
            APT_DECIMALS,
        ),
        primary_name: or_warn(name, "primary name"),
        explorer_url: client.network().explorer_account_url(address),
    };

    item!("Exists on chain: {}", overview.exists);

    if let Some(sequence_number) = overview.sequence_number {
        item!("Sequence number: {sequence_number}");
    }

    item!("Balance: {} APT", overview.apt_balance.bold());
    item!(
        "Primary name: {}",
        overview.primary_name.as_deref().unwrap_or("-")
    );
    item!("Explorer: {}", overview.explorer_url.truecolor(100, 100, 100));

    json_output(&overview)?;

    Ok(overview)
}

/// Print the APT staked through the stake pool of `address`.
pub(crate) async fn account_staking(
    client: &AptosClient,
    address: AccountAddress,
) -> AnyResult<StakingView, AptdeckCliError> {
    command_title!("Staking of {address}");

    let handle = loading!("Fetching stake pool...");

    let result = client.staking_info(address).await;

    handle.success();

    let view = match or_warn(result, "stake pool") {
        Some(info) => StakingView {
            has_stake_pool: true,
            staked_octas: info.staked_octas,
            staked_apt: format_amount(&info.staked_apt(), APT_DECIMALS),
        },
        None => StakingView {
            staked_apt: "0".to_string(),
            ..Default::default()
        },
    };

    if view.has_stake_pool {
        item!("Staked: {} APT", view.staked_apt.bold());
    } else {
        item!("{}", "No stake pool".truecolor(100, 100, 100));
    }

    json_output(&view)?;

    Ok(view)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::account::mock_client, serde_json::json};

    const ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    #[tokio::test]
    async fn test_info_of_missing_account() {
        let (mut server, client) = mock_client().await;

        server
            .mock("GET", format!("/accounts/{ONE}").as_str())
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(json!({ "message": "not found", "error_code": "account_not_found" }).to_string())
            .create_async()
            .await;

        server
            .mock("GET", format!("/accounts/{ONE}/balance/0x1::aptos_coin::AptosCoin").as_str())
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(json!({ "message": "not found", "error_code": "account_not_found" }).to_string())
            .create_async()
            .await;

        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "data": { "current_aptos_names": [] } }).to_string())
            .create_async()
            .await;

        let overview = account_info(&client, AccountAddress::ONE).await.unwrap();

        assert!(!overview.exists);
        assert_eq!(overview.sequence_number, None);
        assert_eq!(overview.apt_balance, "0");
        assert_eq!(overview.primary_name, None);
    }

    #[tokio::test]
    async fn test_staking_reads_active_stake() {
        let (mut server, client) = mock_client().await;

        server
            .mock("GET", format!("/accounts/{ONE}/resource/0x1::stake::StakePool").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "type": "0x1::stake::StakePool",
                    "data": { "active": { "value": "1050000000" } }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let view = account_staking(&client, AccountAddress::ONE).await.unwrap();

        assert!(view.has_stake_pool);
        assert_eq!(view.staked_apt, "10.5");
    }
}
