use crate::{aptos::load_conf, command_title, confirm, loading, notify_success, prelude::*};

/// Remove the wallet from the configuration. The network settings are kept.
pub(crate) async fn wallet_logout(yes: bool, conf_path: PathBuf) -> AnyResult<(), AptdeckCliError> {
    command_title!("Removing the stored wallet");

    let mut conf = load_conf(&conf_path).await?;

    if conf.wallet.is_none() {
        notify_success!("No wallet is configured");

        return Ok(());
    }

    if !yes && !confirm!("The private key will be deleted. Make sure it is backed up. Continue?") {
        return Err(AptdeckCliError::Any(anyhow!("Logout cancelled")));
    }

    let handle = loading!("Deleting the private key...");

    conf.wallet = None;

    match conf.save_to_path(&conf_path).await {
        Ok(()) => {
            handle.success();

            Ok(())
        }
        Err(e) => {
            handle.error();

            Err(AptdeckCliError::Any(e))
        }
    }
}
