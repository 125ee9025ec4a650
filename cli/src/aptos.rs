use {
    crate::{display::json_output, loading, notify_success, notify_warning, prelude::*},
    aptdeck_sdk::{
        account::LocalAccount,
        aptos::AptosClient,
        token_list::{common_token_by_struct_id, DEFAULT_TOKEN_DECIMALS},
        transactions::{EntryFunctionCall, TransactionOutcome, TransactionSubmitter},
        units::{UnitsError, APT_DECIMALS},
    },
};

/// Env var overriding the fullnode REST URL.
pub(crate) const APTOS_RPC_URL_ENV: &str = "APTOS_RPC_URL";
/// Env var overriding the indexer GraphQL URL.
pub(crate) const APTOS_INDEXER_URL_ENV: &str = "APTOS_INDEXER_URL";

/// Load the CLI configuration. A missing file is the default configuration,
/// a file that cannot be read or decrypted is an error.
pub(crate) async fn load_conf(conf_path: &Path) -> AnyResult<CliConf, AptdeckCliError> {
    match tokio::fs::try_exists(conf_path).await {
        Ok(false) => return Ok(CliConf::default()),
        Ok(true) => (),
        Err(e) => return Err(AptdeckCliError::Io(e)),
    }

    CliConf::load_from_path(conf_path).await.map_err(|e| {
        AptdeckCliError::Any(anyhow!(
            "{message} {path}: {e}\n\n{hint}",
            message = "Failed to load Aptdeck CLI configuration from",
            path = conf_path.display(),
            hint = "If the master key was rotated, run `aptdeck wallet import` again.".bold(),
        ))
    })
}

/// Build an Aptos client for the configured network. The env vars
/// [APTOS_RPC_URL_ENV] and [APTOS_INDEXER_URL_ENV] win over the configuration.
pub(crate) fn build_aptos_client(conf: &AptosConf) -> AptosClient {
    let mut builder = AptosClient::builder().with_network(conf.net.into());

    let rpc_url = std::env::var(APTOS_RPC_URL_ENV)
        .ok()
        .or_else(|| conf.rpc_url.clone());
    let indexer_url = std::env::var(APTOS_INDEXER_URL_ENV)
        .ok()
        .or_else(|| conf.indexer_url.clone());

    if let Some(url) = rpc_url {
        log::debug!("Using fullnode at {url}");

        builder = builder.with_fullnode_url(&url);
    }

    if let Some(url) = indexer_url {
        log::debug!("Using indexer at {url}");

        builder = builder.with_indexer_url(&url);
    }

    builder.build()
}

/// Decrypt the stored private key into a signing account.
pub(crate) fn load_wallet(conf: &CliConf) -> AnyResult<LocalAccount, AptdeckCliError> {
    let Some(wallet) = &conf.wallet else {
        return Err(AptdeckCliError::Any(anyhow!(
            "{message}\n\n{command}",
            message = "No wallet is configured. Generate or import one first:",
            command = "$ aptdeck wallet generate".bold(),
        )));
    };

    LocalAccount::from_private_key_hex(wallet.expose()).map_err(|e| AptdeckCliError::Any(e.into()))
}

/// Protocol integrations only exist on mainnet.
pub(crate) fn require_mainnet(client: &AptosClient, protocol: &str) -> AnyResult<(), AptdeckCliError> {
    if client.network().is_mainnet() {
        return Ok(());
    }

    Err(AptdeckCliError::Any(anyhow!(
        "{message}\n\n{command}",
        message = format!(
            "{protocol} is only deployed on mainnet but the CLI is configured for {}. Switch networks with:",
            client.network()
        ),
        command = "$ aptdeck conf set --aptos.net mainnet".bold(),
    )))
}

/// Accept either an address or an ANS name ending in `.apt`.
pub(crate) async fn resolve_recipient(
    client: &AptosClient,
    recipient: &str,
) -> AnyResult<AccountAddress, AptdeckCliError> {
    if !recipient.ends_with(".apt") {
        return parse_address(recipient).map_err(AptdeckCliError::Any);
    }

    let handle = loading!("Resolving {recipient}...");

    match client.owner_address(recipient).await {
        Ok(Some(address)) => {
            handle.success();

            Ok(address)
        }
        Ok(None) => {
            handle.error();

            Err(AptdeckCliError::Any(anyhow!(
                "Name '{recipient}' is not registered"
            )))
        }
        Err(e) => {
            handle.error();

            Err(AptdeckCliError::Any(e.into()))
        }
    }
}

/// Reject amounts that are zero or negative. Runs before any request leaves
/// the machine, failures read `"{operation} failed: ..."`.
pub(crate) fn require_positive(amount: &BigDecimal, operation: &str) -> AnyResult<(), AptdeckCliError> {
    if amount > &BigDecimal::from(0) {
        return Ok(());
    }

    Err(AptdeckCliError::failed(
        operation,
        UnitsError::InvalidAmount(amount.to_string()),
    ))
}

/// Decimals of `asset`: the explicit value, then the common token list, then
/// the indexer. Unknown assets fall back to 8 decimals.
pub(crate) async fn resolve_decimals(client: &AptosClient, asset: &str, explicit: Option<u8>) -> u8 {
    if let Some(decimals) = explicit {
        return decimals;
    }

    if asset == MoveType::aptos_coin().as_str() {
        return APT_DECIMALS;
    }

    if let Some(token) = common_token_by_struct_id(asset) {
        return token.decimals;
    }

    match client.fungible_asset_metadata(asset).await {
        Ok(Some(metadata)) => metadata.decimals,
        Ok(None) => {
            log::warn!("No metadata for {asset}, assuming {DEFAULT_TOKEN_DECIMALS} decimals");

            DEFAULT_TOKEN_DECIMALS
        }
        Err(e) => {
            notify_warning!(
                "Could not fetch decimals of {asset}, assuming {DEFAULT_TOKEN_DECIMALS}: {e}"
            );

            DEFAULT_TOKEN_DECIMALS
        }
    }
}

/// Read commands render the empty value of `T` when the lookup failed,
/// after telling the user why.
pub(crate) fn or_warn<T: Default, E: std::fmt::Display>(result: Result<T, E>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to fetch {what}: {e}");

            notify_warning!("Failed to fetch {what}, showing an empty result: {e}");

            T::default()
        }
    }
}

/// Sign, submit and confirm `call`. Failures are reported as
/// `"{operation} failed: ..."`.
pub(crate) async fn execute_call(
    client: &AptosClient,
    account: &LocalAccount,
    call: EntryFunctionCall,
    operation: &str,
) -> AnyResult<TransactionOutcome, AptdeckCliError> {
    let handle = loading!("Submitting {call}...");

    let outcome = match TransactionSubmitter::new(client, account).execute(&call).await {
        Ok(outcome) => outcome,
        Err(e) => {
            handle.error();

            return Err(AptdeckCliError::failed(operation, e));
        }
    };

    handle.success();

    notify_success!(
        "{operation} confirmed in version {version}: {url}",
        version = outcome.version,
        url = client
            .network()
            .explorer_txn_url(&outcome.hash)
            .truecolor(100, 100, 100)
    );

    json_output(&outcome)?;

    Ok(outcome)
}
