use crate::{
    aptos::{load_conf, load_wallet},
    command_title,
    confirm,
    display::json_output,
    item,
    prelude::*,
};

#[derive(Debug, Serialize)]
struct WalletView {
    address: AccountAddress,
    public_key: String,
    network: Network,
    explorer_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_key: Option<String>,
}

/// Show the configured wallet.
pub(crate) async fn wallet_show(private_key: bool, conf_path: PathBuf) -> AnyResult<(), AptdeckCliError> {
    let conf = load_conf(&conf_path).await?;
    let account = load_wallet(&conf)?;
    let network = Network::from(conf.aptos.net);

    command_title!("Aptos wallet on {network}");

    let reveal = private_key && confirm!("Print the private key to the terminal?");

    let view = WalletView {
        address: account.address(),
        public_key: account.public_key_hex(),
        network,
        explorer_url: network.explorer_account_url(account.address()),
        private_key: reveal.then(|| account.private_key_aip80().to_string()),
    };

    item!("Address: {}", view.address.to_string().bold());
    item!("Public key: {}", view.public_key);
    item!("Explorer: {}", view.explorer_url.truecolor(100, 100, 100));

    if let Some(key) = &view.private_key {
        item!("Private key: {}", key.yellow());
    }

    json_output(&view)
}
