use {
    super::store_wallet,
    crate::{command_title, display::json_output, item, loading, notify_success, prelude::*},
    aptdeck_sdk::account::LocalAccount,
};

#[derive(Debug, Serialize)]
pub(crate) struct GeneratedWallet {
    pub(crate) address: AccountAddress,
    pub(crate) public_key: String,
    pub(crate) private_key: String,
}

/// Generate a new wallet and store its key encrypted in the configuration.
/// The private key is printed once so that it can be backed up.
pub(crate) async fn wallet_generate(force: bool, conf_path: PathBuf) -> AnyResult<(), AptdeckCliError> {
    command_title!("Generating a new Aptos wallet");

    let account = LocalAccount::generate();

    let store_handle = loading!("Encrypting and storing the private key...");

    if let Err(e) = store_wallet(&account, force, &conf_path).await {
        store_handle.error();

        return Err(e);
    }

    store_handle.success();

    let generated = GeneratedWallet {
        address: account.address(),
        public_key: account.public_key_hex(),
        private_key: account.private_key_aip80().to_string(),
    };

    notify_success!("Wallet address: {}", generated.address.to_string().bold());
    item!("Public key: {}", generated.public_key.truecolor(100, 100, 100));
    item!(
        "Private key: {} {}",
        generated.private_key,
        "(store it somewhere safe, it is shown only once)".yellow()
    );

    json_output(&generated)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::wallet::test_env,
        assert_matches::assert_matches,
    };

    #[tokio::test]
    #[serial_test::serial(master_key_env)]
    async fn test_generate_refuses_to_overwrite() {
        let _secret_home = test_env::with_passphrase();

        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("conf.toml");

        assert_matches!(wallet_generate(false, path.clone()).await, Ok(()));

        let first = CliConf::load_from_path(&path).await.unwrap().wallet.unwrap();

        // The key is not readable in the file.
        let contents = tokio::fs::read_to_string(&path).await.unwrap();

        assert!(!contents.contains(first.expose().as_str()));

        assert_matches!(
            wallet_generate(false, path.clone()).await,
            Err(AptdeckCliError::Any(_))
        );
        assert_matches!(wallet_generate(true, path.clone()).await, Ok(()));

        let second = CliConf::load_from_path(&path).await.unwrap().wallet.unwrap();

        assert_ne!(first.expose(), second.expose());

        test_env::clear();
    }
}
