use crate::{aptos::load_conf, command_title, display::json_output, loading, prelude::*};

/// Set the Aptdeck CLI configuration from the provided arguments.
pub(crate) async fn set_aptdeck_conf(
    aptos_net: Option<AptosNet>,
    aptos_rpc_url: Option<String>,
    aptos_indexer_url: Option<String>,
    aptos_reset_urls: bool,
    conf_path: PathBuf,
) -> AnyResult<(), AptdeckCliError> {
    let mut conf = load_conf(&conf_path).await?;

    command_title!("Updating Aptdeck CLI Configuration");

    let conf_handle = loading!("Updating configuration...");

    if aptos_reset_urls {
        conf.aptos.rpc_url = None;
        conf.aptos.indexer_url = None;
    }

    conf.aptos.net = aptos_net.unwrap_or(conf.aptos.net);
    conf.aptos.rpc_url = aptos_rpc_url.or(conf.aptos.rpc_url);
    conf.aptos.indexer_url = aptos_indexer_url.or(conf.aptos.indexer_url);

    match conf.save_to_path(&conf_path).await {
        Ok(()) => {
            conf_handle.success();

            json_output(&conf.aptos)
        }
        Err(e) => {
            conf_handle.error();

            Err(AptdeckCliError::Any(e))
        }
    }
}
