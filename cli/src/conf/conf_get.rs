use crate::{aptos::load_conf, command_title, display::json_output, item, prelude::*};

/// What `conf get` shows. The wallet is only reported as present or absent.
#[derive(Debug, Serialize)]
pub(crate) struct ConfView {
    pub(crate) net: AptosNet,
    pub(crate) rpc_url: String,
    pub(crate) indexer_url: String,
    pub(crate) wallet: Option<AccountAddress>,
}

/// Print the current Aptdeck CLI configuration.
pub(crate) async fn get_aptdeck_conf(conf_path: PathBuf) -> AnyResult<ConfView, AptdeckCliError> {
    let conf = load_conf(&conf_path).await?;
    let network = Network::from(conf.aptos.net);

    let wallet = match &conf.wallet {
        Some(key) => Some(
            aptdeck_sdk::account::LocalAccount::from_private_key_hex(key.expose())
                .map_err(|e| AptdeckCliError::Any(e.into()))?
                .address(),
        ),
        None => None,
    };

    let view = ConfView {
        net: conf.aptos.net,
        rpc_url: conf
            .aptos
            .rpc_url
            .clone()
            .unwrap_or_else(|| network.fullnode_url()),
        indexer_url: conf
            .aptos
            .indexer_url
            .clone()
            .unwrap_or_else(|| network.indexer_url()),
        wallet,
    };

    command_title!("Current Aptdeck CLI Configuration");

    item!("Network: {}", view.net.to_string().bold());
    item!("Fullnode: {}", view.rpc_url.truecolor(100, 100, 100));
    item!("Indexer: {}", view.indexer_url.truecolor(100, 100, 100));

    match &view.wallet {
        Some(address) => item!("Wallet: {}", address.to_string().bold()),
        None => item!("Wallet: {}", "not configured".truecolor(100, 100, 100)),
    }

    json_output(&view)?;

    Ok(view)
}
