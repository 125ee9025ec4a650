use crate::{
    aptos::{load_conf, load_wallet},
    command_title,
    display::json_output,
    item,
    prelude::*,
};

/// Sign `message` with the wallet key.
pub(crate) async fn wallet_sign_message(
    message: String,
    conf_path: PathBuf,
) -> AnyResult<(), AptdeckCliError> {
    let conf = load_conf(&conf_path).await?;
    let account = load_wallet(&conf)?;

    command_title!("Signing message with {}", account.address());

    let signature = account.sign_message(&message);

    item!("Signature: {}", signature.signature.bold());
    item!("Public key: {}", signature.public_key);
    item!("Address: {}", signature.address);

    json_output(&signature)
}
