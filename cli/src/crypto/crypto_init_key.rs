use {
    crate::{
        command_title,
        loading,
        notify_success,
        prelude::*,
        utils::secrets::master_key::{init_master_key, key_source, KeySource, MasterKeyError},
    },
};

/// Generate and store a new master key. The wallet encrypted with the old key
/// is removed from the configuration first.
pub(crate) async fn crypto_init_key(force: bool, conf_path: &Path) -> AnyResult<(), AptdeckCliError> {
    command_title!("Generating and storing a new 32-byte master key");

    let check_handle = loading!("Checking for an existing key...");

    match key_source() {
        Ok(KeySource::Keyring(_)) if !force => {
            check_handle.error();

            return Err(AptdeckCliError::Any(MasterKeyError::KeyAlreadyExists.into()));
        }
        Ok(_) => check_handle.success(),
        Err(e) => {
            check_handle.error();

            return Err(AptdeckCliError::Any(e.into()));
        }
    }

    let cleanup_handle = loading!("Removing the wallet from the configuration...");

    if let Err(e) = forget_wallet(conf_path).await {
        cleanup_handle.error();

        return Err(e);
    }

    cleanup_handle.success();

    let generate_handle = loading!("Generating and storing master key...");

    match init_master_key(true) {
        Ok(()) => {
            generate_handle.success();

            notify_success!("32-byte master key saved to the OS key-ring");

            Ok(())
        }
        Err(e) => {
            generate_handle.error();

            Err(AptdeckCliError::Any(e.into()))
        }
    }
}

/// Drop the `wallet` key from the configuration without decrypting it.
async fn forget_wallet(conf_path: &Path) -> AnyResult<(), AptdeckCliError> {
    if !tokio::fs::try_exists(conf_path).await.map_err(AptdeckCliError::Io)? {
        return Ok(());
    }

    let content = tokio::fs::read_to_string(conf_path)
        .await
        .map_err(AptdeckCliError::Io)?;

    let mut value: toml::Value = toml::from_str(&content).map_err(|e| AptdeckCliError::Any(e.into()))?;

    if let Some(table) = value.as_table_mut() {
        table.remove("wallet");
    }

    let serialized = toml::to_string_pretty(&value).map_err(|e| AptdeckCliError::Any(e.into()))?;

    tokio::fs::write(conf_path, serialized)
        .await
        .map_err(AptdeckCliError::Io)
}

#[cfg(test)]
mod tests {
    use {super::*, std::fs};

    #[tokio::test]
    async fn test_forget_wallet_keeps_network() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("conf.toml");

        fs::write(
            &path,
            "wallet = \"c2VhbGVkIHdhbGxldA==\"\n\n[aptos]\nnet = \"mainnet\"\n",
        )
        .unwrap();

        forget_wallet(&path).await.unwrap();

        let parsed: toml::Value = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert!(parsed.get("wallet").is_none());
        assert_eq!(parsed["aptos"]["net"].as_str(), Some("mainnet"));
    }

    #[tokio::test]
    async fn test_forget_wallet_without_conf() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("conf.toml");

        forget_wallet(&path).await.unwrap();

        assert!(!path.exists());
    }
}
