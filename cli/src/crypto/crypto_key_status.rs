use crate::{
    command_title,
    display::json_output,
    loading,
    notify_success,
    prelude::*,
    utils::secrets::master_key::{key_source, KeySource, PASSPHRASE_ENV},
};

/// Show where the master key is loaded from.
pub(crate) fn crypto_key_status() -> AnyResult<KeySource, AptdeckCliError> {
    command_title!("Checking master key status");

    let handle = loading!("Checking key sources...");

    let source = match key_source() {
        Ok(source) => source,
        Err(e) => {
            handle.error();

            return Err(AptdeckCliError::Any(e.into()));
        }
    };

    handle.success();

    let description = match &source {
        KeySource::Passphrase => format!("source: {PASSPHRASE_ENV} env var"),
        KeySource::Keyring(prefix) => format!("source: key-ring raw key ({prefix}…)"),
        KeySource::Missing => "no master key yet, one is created on first use".to_string(),
    };

    notify_success!("{description}");

    json_output(&serde_json::json!({ "source": description }))?;

    Ok(source)
}
