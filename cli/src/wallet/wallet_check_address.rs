use crate::{
    aptos::{build_aptos_client, load_conf},
    command_title,
    display::json_output,
    item,
    loading,
    notify_success,
    notify_warning,
    prelude::*,
};

#[derive(Debug, Serialize)]
pub(crate) struct AddressCheck {
    pub(crate) address: AccountAddress,
    pub(crate) exists: bool,
    pub(crate) sequence_number: Option<u64>,
}

/// Check whether `address` has an account on chain.
pub(crate) async fn wallet_check_address(
    address: AccountAddress,
    conf_path: PathBuf,
) -> AnyResult<AddressCheck, AptdeckCliError> {
    let conf = load_conf(&conf_path).await?;
    let client = build_aptos_client(&conf.aptos);

    command_title!("Checking {address} on {}", client.network());

    let handle = loading!("Fetching account...");

    let check = match client.account(address).await {
        Ok(account) => AddressCheck {
            address,
            exists: true,
            sequence_number: Some(account.sequence_number),
        },
        Err(e) if e.is_not_found() => AddressCheck {
            address,
            exists: false,
            sequence_number: None,
        },
        Err(e) => {
            handle.error();

            return Err(AptdeckCliError::failed("Address check", e));
        }
    };

    handle.success();

    match check.sequence_number {
        Some(sequence_number) => {
            notify_success!("Account exists");
            item!("Sequence number: {sequence_number}");
            item!(
                "Explorer: {}",
                client
                    .network()
                    .explorer_account_url(address)
                    .truecolor(100, 100, 100)
            );
        }
        None => notify_warning!("This address does not exist on chain"),
    }

    json_output(&check)?;

    Ok(check)
}
