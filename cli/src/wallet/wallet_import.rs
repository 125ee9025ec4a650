use {
    super::store_wallet,
    crate::{command_title, display::json_output, loading, notify_success, prelude::*},
    aptdeck_sdk::account::LocalAccount,
    zeroize::Zeroizing,
};

/// Import an existing private key, read from STDIN or an interactive prompt.
pub(crate) async fn wallet_import(
    stdin: bool,
    force: bool,
    conf_path: PathBuf,
) -> AnyResult<(), AptdeckCliError> {
    command_title!("Importing an Aptos wallet");

    let private_key = if stdin {
        use std::io::Read;

        let mut buf = Zeroizing::new(String::new());

        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(AptdeckCliError::Io)?;

        buf
    } else {
        Zeroizing::new(
            rpassword::prompt_password("Enter private key: ").map_err(AptdeckCliError::Io)?,
        )
    };

    import_private_key(&private_key, force, &conf_path).await
}

/// Validate `private_key` and store it.
pub(crate) async fn import_private_key(
    private_key: &str,
    force: bool,
    conf_path: &Path,
) -> AnyResult<(), AptdeckCliError> {
    let import_handle = loading!("Validating and storing the private key...");

    let account = match LocalAccount::from_private_key_hex(private_key) {
        Ok(account) => account,
        Err(e) => {
            import_handle.error();

            return Err(AptdeckCliError::failed("Import", e));
        }
    };

    if let Err(e) = store_wallet(&account, force, conf_path).await {
        import_handle.error();

        return Err(e);
    }

    import_handle.success();

    notify_success!("Imported wallet {}", account.address().to_string().bold());

    json_output(&serde_json::json!({ "address": account.address() }))
}
